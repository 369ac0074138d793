use thiserror::Error;

/// Failures raised by pyramid construction, access and filtering.
///
/// Every variant is a precondition violation: the pyramid arithmetic has no
/// meaningful partial result, so callers get the error instead of a
/// half-built pyramid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PyramidError {
    #[error("input image is empty ({w}x{h})")]
    EmptyImage { w: usize, h: usize },
    #[error("sub-window rows {row_start}..={row_end}, cols {col_start}..={col_end} is inverted")]
    InvalidSubWindow {
        row_start: usize,
        row_end: usize,
        col_start: usize,
        col_end: usize,
    },
    #[error("sub-window covers {window_w}x{window_h} pixels but the image is {image_w}x{image_h}")]
    WindowSizeMismatch {
        window_w: usize,
        window_h: usize,
        image_w: usize,
        image_h: usize,
    },
    #[error("pyramid level {level} would be empty for the given sub-window")]
    DegenerateLevel { level: usize },
    #[error("level {level} out of range for a pyramid with {len} levels")]
    LevelOutOfRange { level: usize, len: usize },
    #[error("expected a {expected_w}x{expected_h} buffer, got {found_w}x{found_h}")]
    ShapeMismatch {
        expected_w: usize,
        expected_h: usize,
        found_w: usize,
        found_h: usize,
    },
    #[error("coordinate ({x}, {y}) outside a {w}x{h} level")]
    CoordinateOutOfRange {
        x: usize,
        y: usize,
        w: usize,
        h: usize,
    },
    #[error("expected {expected} channel(s), found {found}")]
    ChannelMismatch { expected: usize, found: usize },
    #[error("expected {expected} samples, found {found}")]
    SampleCountMismatch { expected: usize, found: usize },
    #[error("pyramid level {level} was never populated")]
    IncompletePyramid { level: usize },
    #[error("invalid parameter {name} = {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}
