#![doc = include_str!("../README.md")]

// Public modules
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod filter;
pub mod image;
pub mod pyramid;
pub mod remap;

// --- High-level re-exports -------------------------------------------------

// Main entry point: the filter and its knobs.
pub use crate::error::PyramidError;
pub use crate::filter::{FilterParams, LocalLaplacianFilter};

// Building blocks that are useful on their own.
pub use crate::image::{Pixel, PixelBuffer};
pub use crate::pyramid::{GaussianPyramid, LaplacianPyramid, SubWindow};
pub use crate::remap::RemappingFunction;

// High-level diagnostics returned by the filter.
pub use crate::diagnostics::FilterReport;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use local_laplacian::prelude::*;
///
/// # fn main() -> Result<(), PyramidError> {
/// let img = PixelBuffer::from_fn(128, 96, |x, y| ((x ^ y) & 15) as f64 / 15.0);
/// let filter = LocalLaplacianFilter::new(FilterParams::new(0.5, 1.0, 0.2))?;
/// let out = filter.run(&img)?;
/// println!("levels={} total_ms={:.1}", out.pyramid.num_levels(), out.report.timings.total_ms);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{Pixel, PixelBuffer};
    pub use crate::{FilterParams, LocalLaplacianFilter, PyramidError};
}
