//! Gaussian pyramid over an image or an arbitrary sub-window of a larger one.
//!
//! Design
//! - Level 0 is a copy of the input; level `k+1` is level `k` blurred with the
//!   5×5 separable generating kernel and decimated 2:1.
//! - The decimation lattice comes from the level's [`SubWindow`]: samples are
//!   taken at `(row_offset + 2i, col_offset + 2j)`, where the offsets are the
//!   parity of the window start. A crop whose corner sits on an odd
//!   coordinate therefore keeps the samples the full-image pyramid keeps.
//! - Borders clip the kernel and renormalise by the weights actually used,
//!   which avoids darkening at the edges.
//! - `expand` is a normalised convolution over the known/unknown lattice, so
//!   borders and holes are handled in one pass.
use super::filters::{Kernel5, GAUSSIAN_5TAP};
use super::window::SubWindow;
use crate::error::PyramidError;
use crate::image::{Pixel, PixelBuffer};
use log::warn;

#[derive(Clone, Debug)]
pub struct GaussianPyramid<P: Pixel> {
    levels: Vec<PixelBuffer<P>>,
    window: SubWindow,
    kernel: Kernel5,
}

impl<P: Pixel> GaussianPyramid<P> {
    /// Pyramid of a whole image with `num_levels` reductions above the base
    /// (`num_levels + 1` levels in total).
    pub fn build(image: &PixelBuffer<P>, num_levels: usize) -> Result<Self, PyramidError> {
        ensure_not_empty(image)?;
        Self::build_with_window(image, num_levels, SubWindow::full(image.w, image.h))
    }

    /// Pyramid of `image`, which is the `window` region of some reference
    /// image. The window extent must match the image.
    pub fn build_with_window(
        image: &PixelBuffer<P>,
        num_levels: usize,
        window: SubWindow,
    ) -> Result<Self, PyramidError> {
        Self::build_with_kernel(image, num_levels, window, GAUSSIAN_5TAP)
    }

    pub fn build_with_kernel(
        image: &PixelBuffer<P>,
        num_levels: usize,
        window: SubWindow,
        kernel: Kernel5,
    ) -> Result<Self, PyramidError> {
        warn_if_too_deep(image.w, image.h, num_levels);
        Self::construct(image, num_levels, window, kernel)
    }

    /// Same as [`GaussianPyramid::build_with_window`] without the depth
    /// warning. Used for the many small neighbourhood pyramids of the local
    /// Laplacian filter, whose depth follows the full-image pyramid.
    pub(crate) fn build_region(
        image: &PixelBuffer<P>,
        num_levels: usize,
        window: SubWindow,
    ) -> Result<Self, PyramidError> {
        Self::construct(image, num_levels, window, GAUSSIAN_5TAP)
    }

    fn construct(
        image: &PixelBuffer<P>,
        num_levels: usize,
        window: SubWindow,
        kernel: Kernel5,
    ) -> Result<Self, PyramidError> {
        ensure_not_empty(image)?;
        check_window(image, &window)?;

        let mut levels = Vec::with_capacity(num_levels + 1);
        levels.push(image.clone());

        let mut current = window;
        for level in 1..=num_levels {
            let next = current.halve();
            if next.is_empty() {
                return Err(PyramidError::DegenerateLevel { level });
            }
            let reduced = reduce(
                &levels[level - 1],
                current.offsets(),
                next.width(),
                next.height(),
                &kernel,
            );
            levels.push(reduced);
            current = next;
        }

        Ok(Self {
            levels,
            window,
            kernel,
        })
    }

    /// Number of reductions above the base level.
    #[inline]
    pub fn num_levels(&self) -> usize {
        self.levels.len() - 1
    }

    /// Total number of stored levels (`num_levels + 1`).
    #[inline]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn level(&self, level: usize) -> Result<&PixelBuffer<P>, PyramidError> {
        self.levels.get(level).ok_or(PyramidError::LevelOutOfRange {
            level,
            len: self.levels.len(),
        })
    }

    pub fn levels(&self) -> &[PixelBuffer<P>] {
        &self.levels
    }

    /// Window of the base level.
    pub fn window(&self) -> SubWindow {
        self.window
    }

    /// Window represented by `level`.
    pub fn level_window(&self, level: usize) -> SubWindow {
        self.window.at_level(level)
    }

    pub fn kernel(&self) -> &Kernel5 {
        &self.kernel
    }

    /// Upsample `level` by 2× `times` times, landing on the resolution of
    /// level `level - times`. `times` is clamped to `level`; `0` returns a
    /// copy of the level itself.
    pub fn expand(&self, level: usize, times: usize) -> Result<PixelBuffer<P>, PyramidError> {
        let mut current = self.level(level)?.clone();
        let times = times.min(level);
        for step in 0..times {
            let target = level - step - 1;
            let shape = &self.levels[target];
            let mut expanded = PixelBuffer::new(shape.w, shape.h);
            expand_into(
                &current,
                self.window.at_level(target).offsets(),
                &mut expanded,
                &self.kernel,
            );
            current = expanded;
        }
        Ok(current)
    }

    pub fn into_levels(self) -> Vec<PixelBuffer<P>> {
        self.levels
    }
}

/// Blur-and-decimate `prev` into a `w × h` level whose samples sit at
/// `(row_offset + 2i, col_offset + 2j)` of `prev`.
fn reduce<P: Pixel>(
    prev: &PixelBuffer<P>,
    (row_offset, col_offset): (usize, usize),
    w: usize,
    h: usize,
    kernel: &Kernel5,
) -> PixelBuffer<P> {
    let mut out = PixelBuffer::new(w, h);
    let max_y = prev.h - 1;
    let max_x = prev.w - 1;
    for i in 0..h {
        let y = row_offset + 2 * i;
        let rows = y.saturating_sub(Kernel5::RADIUS)..=(y + Kernel5::RADIUS).min(max_y);
        let dst_row = out.row_mut(i);
        for (j, dst_px) in dst_row.iter_mut().enumerate() {
            let x = col_offset + 2 * j;
            let cols = x.saturating_sub(Kernel5::RADIUS)..=(x + Kernel5::RADIUS).min(max_x);

            let mut value = P::zero();
            let mut total_weight = 0.0;
            for n in rows.clone() {
                let row_weight = kernel.weight(n as isize - y as isize);
                for m in cols.clone() {
                    let weight = row_weight * kernel.weight(m as isize - x as isize);
                    total_weight += weight;
                    value += prev.get(m, n).scale(weight);
                }
            }
            *dst_px = value.scale(1.0 / total_weight);
        }
    }
    out
}

/// Upsample `input` into `output` (one 2× step).
///
/// Known samples sit at `(row_offset + 2i, col_offset + 2j)` of `output`;
/// every output pixel, known or not, is the kernel-weighted mean of the known
/// samples in its clipped 5×5 neighbourhood.
pub fn expand_into<P: Pixel>(
    input: &PixelBuffer<P>,
    (row_offset, col_offset): (usize, usize),
    output: &mut PixelBuffer<P>,
    kernel: &Kernel5,
) {
    if output.is_empty() || input.is_empty() {
        return;
    }
    let max_y = output.h - 1;
    let max_x = output.w - 1;
    let known = |n: usize, offset: usize, limit: usize| {
        n >= offset && (n - offset) % 2 == 0 && (n >> 1) < limit
    };

    for i in 0..output.h {
        let rows = i.saturating_sub(Kernel5::RADIUS)..=(i + Kernel5::RADIUS).min(max_y);
        let dst_row = output.row_mut(i);
        for (j, dst_px) in dst_row.iter_mut().enumerate() {
            let cols = j.saturating_sub(Kernel5::RADIUS)..=(j + Kernel5::RADIUS).min(max_x);

            let mut value = P::zero();
            let mut total_weight = 0.0;
            for n in rows.clone().filter(|&n| known(n, row_offset, input.h)) {
                let row_weight = kernel.weight(n as isize - i as isize);
                for m in cols.clone().filter(|&m| known(m, col_offset, input.w)) {
                    let weight = row_weight * kernel.weight(m as isize - j as isize);
                    total_weight += weight;
                    value += input.get(m >> 1, n >> 1).scale(weight);
                }
            }
            debug_assert!(total_weight > 0.0, "no known sample near ({j}, {i})");
            *dst_px = value.scale(1.0 / total_weight);
        }
    }
}

fn ensure_not_empty<P: Pixel>(image: &PixelBuffer<P>) -> Result<(), PyramidError> {
    if image.is_empty() {
        return Err(PyramidError::EmptyImage {
            w: image.w,
            h: image.h,
        });
    }
    Ok(())
}

fn check_window<P: Pixel>(image: &PixelBuffer<P>, window: &SubWindow) -> Result<(), PyramidError> {
    if window.is_empty() {
        return Err(PyramidError::InvalidSubWindow {
            row_start: window.row_start,
            row_end: window.row_end,
            col_start: window.col_start,
            col_end: window.col_end,
        });
    }
    if window.width() != image.w || window.height() != image.h {
        return Err(PyramidError::WindowSizeMismatch {
            window_w: window.width(),
            window_h: window.height(),
            image_w: image.w,
            image_h: image.h,
        });
    }
    Ok(())
}

fn warn_if_too_deep(w: usize, h: usize, num_levels: usize) {
    let exhausted = |dim: usize| num_levels >= usize::BITS as usize || dim >> num_levels == 0;
    if exhausted(w) || exhausted(h) {
        warn!("{num_levels} pyramid levels exceed a {w}x{h} image; coarse levels are 1 pixel");
    }
}
