//! Laplacian pyramid: band-pass detail levels plus a coarse residual.
//!
//! Derived pyramids are computed from an image (optionally a sub-window of a
//! larger reference image) and are immutable. Blank pyramids are handed out
//! as a [`LaplacianPyramidBuilder`] that an external writer fills level by
//! level; only a fully populated builder turns into a [`LaplacianPyramid`],
//! so `reconstruct` never sees a half-written pyramid.
use super::filters::{Kernel5, GAUSSIAN_5TAP};
use super::gaussian::{expand_into, GaussianPyramid};
use super::window::SubWindow;
use crate::error::PyramidError;
use crate::image::{Pixel, PixelBuffer};

#[derive(Clone, Debug)]
pub struct LaplacianPyramid<P: Pixel> {
    levels: Vec<PixelBuffer<P>>,
    window: SubWindow,
    kernel: Kernel5,
}

impl<P: Pixel> LaplacianPyramid<P> {
    /// Decompose a whole image into `num_levels` detail levels plus residual.
    pub fn build(image: &PixelBuffer<P>, num_levels: usize) -> Result<Self, PyramidError> {
        let gauss = GaussianPyramid::build(image, num_levels)?;
        Self::from_gaussian(gauss)
    }

    /// Decompose `image`, the `window` region of a larger reference image.
    pub fn build_with_window(
        image: &PixelBuffer<P>,
        num_levels: usize,
        window: SubWindow,
    ) -> Result<Self, PyramidError> {
        let gauss = GaussianPyramid::build_with_window(image, num_levels, window)?;
        Self::from_gaussian(gauss)
    }

    /// Windowed decomposition without the depth warning, for the per-pixel
    /// neighbourhood pyramids of the local Laplacian filter.
    pub(crate) fn build_region(
        image: &PixelBuffer<P>,
        num_levels: usize,
        window: SubWindow,
    ) -> Result<Self, PyramidError> {
        let gauss = GaussianPyramid::build_region(image, num_levels, window)?;
        Self::from_gaussian(gauss)
    }

    /// Level `k` = `G[k] - expand(G[k+1])`; the top level is `G[top]` itself.
    pub fn from_gaussian(gauss: GaussianPyramid<P>) -> Result<Self, PyramidError> {
        let num_levels = gauss.num_levels();
        let mut levels = Vec::with_capacity(num_levels + 1);
        for k in 0..num_levels {
            let detail = gauss.level(k)?.sub(&gauss.expand(k + 1, 1)?);
            levels.push(detail);
        }
        let window = gauss.window();
        let kernel = *gauss.kernel();
        let residual = gauss
            .into_levels()
            .pop()
            .ok_or(PyramidError::LevelOutOfRange {
                level: num_levels,
                len: 0,
            })?;
        levels.push(residual);
        Ok(Self {
            levels,
            window,
            kernel,
        })
    }

    /// Start a blank pyramid for a `w × h` image; level `k` is
    /// `⌈w / 2^k⌉ × ⌈h / 2^k⌉`.
    pub fn blank(
        w: usize,
        h: usize,
        num_levels: usize,
    ) -> Result<LaplacianPyramidBuilder<P>, PyramidError> {
        if w == 0 || h == 0 {
            return Err(PyramidError::EmptyImage { w, h });
        }
        let mut levels = Vec::with_capacity(num_levels + 1);
        let (mut lw, mut lh) = (w, h);
        for _ in 0..=num_levels {
            levels.push(PixelBuffer::new(lw, lh));
            lw = lw.div_ceil(2);
            lh = lh.div_ceil(2);
        }
        Ok(LaplacianPyramidBuilder {
            populated: vec![false; levels.len()],
            levels,
            window: SubWindow::full(w, h),
        })
    }

    /// Number of detail levels below the residual.
    #[inline]
    pub fn num_levels(&self) -> usize {
        self.levels.len() - 1
    }

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

    pub fn residual(&self) -> &PixelBuffer<P> {
        &self.levels[self.levels.len() - 1]
    }

    pub fn window(&self) -> SubWindow {
        self.window
    }

    /// Collapse the pyramid back into a base-resolution image.
    ///
    /// Each expansion uses the parity of the *target* level's window, the
    /// same lattice the decomposition used, which makes this an exact
    /// inverse of [`LaplacianPyramid::build_with_window`].
    pub fn reconstruct(&self) -> PixelBuffer<P> {
        let top = self.levels.len() - 1;
        let mut acc = self.levels[top].clone();
        for level in (0..top).rev() {
            let detail = &self.levels[level];
            let mut expanded = PixelBuffer::new(detail.w, detail.h);
            expand_into(
                &acc,
                self.window.at_level(level).offsets(),
                &mut expanded,
                &self.kernel,
            );
            acc = expanded.add(detail);
        }
        acc
    }

    /// Number of levels that shrinks the smaller image side to roughly
    /// `desired_base_size`: `⌈|log2(min(w, h)) - log2(desired)|⌉`, at least 1.
    pub fn level_count(w: usize, h: usize, desired_base_size: usize) -> usize {
        let min_dim = w.min(h).max(1) as f64;
        let desired = desired_base_size.max(1) as f64;
        let levels = (min_dim.log2() - desired.log2()).abs().ceil() as usize;
        levels.max(1)
    }
}

/// Write access to a blank Laplacian pyramid.
///
/// Levels are populated either wholesale with [`set_level`] or pixel by
/// pixel through [`set`]/[`level_mut`] followed by [`mark_populated`].
///
/// [`set_level`]: LaplacianPyramidBuilder::set_level
/// [`set`]: LaplacianPyramidBuilder::set
/// [`level_mut`]: LaplacianPyramidBuilder::level_mut
/// [`mark_populated`]: LaplacianPyramidBuilder::mark_populated
#[derive(Debug)]
pub struct LaplacianPyramidBuilder<P: Pixel> {
    levels: Vec<PixelBuffer<P>>,
    populated: Vec<bool>,
    window: SubWindow,
}

impl<P: Pixel> LaplacianPyramidBuilder<P> {
    #[inline]
    pub fn num_levels(&self) -> usize {
        self.levels.len() - 1
    }

    pub fn level(&self, level: usize) -> Result<&PixelBuffer<P>, PyramidError> {
        self.levels.get(level).ok_or(PyramidError::LevelOutOfRange {
            level,
            len: self.levels.len(),
        })
    }

    pub fn level_mut(&mut self, level: usize) -> Result<&mut PixelBuffer<P>, PyramidError> {
        let len = self.levels.len();
        self.levels
            .get_mut(level)
            .ok_or(PyramidError::LevelOutOfRange { level, len })
    }

    /// Write one coefficient. Coordinates must lie inside the level.
    pub fn set(&mut self, level: usize, x: usize, y: usize, value: P) -> Result<(), PyramidError> {
        let buffer = self.level_mut(level)?;
        if x >= buffer.w || y >= buffer.h {
            return Err(PyramidError::CoordinateOutOfRange {
                x,
                y,
                w: buffer.w,
                h: buffer.h,
            });
        }
        buffer.set(x, y, value);
        Ok(())
    }

    /// Replace a whole level and mark it populated.
    pub fn set_level(&mut self, level: usize, buffer: PixelBuffer<P>) -> Result<(), PyramidError> {
        let slot = self.level_mut(level)?;
        if (slot.w, slot.h) != (buffer.w, buffer.h) {
            return Err(PyramidError::ShapeMismatch {
                expected_w: slot.w,
                expected_h: slot.h,
                found_w: buffer.w,
                found_h: buffer.h,
            });
        }
        *slot = buffer;
        self.populated[level] = true;
        Ok(())
    }

    pub fn mark_populated(&mut self, level: usize) -> Result<(), PyramidError> {
        let len = self.populated.len();
        let flag = self
            .populated
            .get_mut(level)
            .ok_or(PyramidError::LevelOutOfRange { level, len })?;
        *flag = true;
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.populated.iter().all(|&p| p)
    }

    /// Freeze the pyramid; fails on the first level never populated.
    pub fn finish(self) -> Result<LaplacianPyramid<P>, PyramidError> {
        if let Some(level) = self.populated.iter().position(|&p| !p) {
            return Err(PyramidError::IncompletePyramid { level });
        }
        Ok(LaplacianPyramid {
            levels: self.levels,
            window: self.window,
            kernel: GAUSSIAN_5TAP,
        })
    }
}
