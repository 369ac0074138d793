//! Sub-window bookkeeping shared by every pyramid.
//!
//! A [`SubWindow`] records which rectangle of a reference image a pyramid's
//! base level represents. Halving it level by level tells each pyramid where
//! its samples sit on the reference image's 2:1 decimation lattice, so that a
//! pyramid of a crop lines up with the pyramid of the whole image.
use crate::error::PyramidError;
use serde::{Deserialize, Serialize};

/// Inclusive `[row_start, row_end] × [col_start, col_end]` bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubWindow {
    pub row_start: usize,
    pub row_end: usize,
    pub col_start: usize,
    pub col_end: usize,
}

impl SubWindow {
    /// Validated constructor; rejects inverted bounds.
    pub fn new(
        row_start: usize,
        row_end: usize,
        col_start: usize,
        col_end: usize,
    ) -> Result<Self, PyramidError> {
        let window = Self {
            row_start,
            row_end,
            col_start,
            col_end,
        };
        if window.is_empty() {
            return Err(PyramidError::InvalidSubWindow {
                row_start,
                row_end,
                col_start,
                col_end,
            });
        }
        Ok(window)
    }

    /// Window covering a whole `w × h` image anchored at the origin.
    ///
    /// Callers must pass non-zero extents.
    pub fn full(w: usize, h: usize) -> Self {
        debug_assert!(w > 0 && h > 0);
        Self {
            row_start: 0,
            row_end: h.saturating_sub(1),
            col_start: 0,
            col_end: w.saturating_sub(1),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        (self.col_end + 1).saturating_sub(self.col_start)
    }

    #[inline]
    pub fn height(&self) -> usize {
        (self.row_end + 1).saturating_sub(self.row_start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.row_end < self.row_start || self.col_end < self.col_start
    }

    /// Bounds of the next coarser level.
    ///
    /// Starts round up and ends round down, so only samples whose full
    /// 2:1 parent lies inside the window survive.
    pub fn halve(&self) -> Self {
        Self {
            row_start: halve_start(self.row_start),
            row_end: self.row_end >> 1,
            col_start: halve_start(self.col_start),
            col_end: self.col_end >> 1,
        }
    }

    /// Bounds after `level` halvings.
    pub fn at_level(&self, level: usize) -> Self {
        (0..level).fold(*self, |w, _| w.halve())
    }

    /// `(row_offset, col_offset)`: where the first sample that survives
    /// decimation sits inside this window (0 for even starts, 1 for odd).
    ///
    /// Decimation, expansion and reconstruction all derive their lattice
    /// from this one routine.
    #[inline]
    pub fn offsets(&self) -> (usize, usize) {
        (self.row_start & 1, self.col_start & 1)
    }
}

#[inline]
fn halve_start(v: usize) -> usize {
    (v >> 1) + (v & 1)
}
