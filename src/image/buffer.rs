//! Owned f64 pixel buffer in tightly packed row-major layout.
//!
//! Every pyramid level, remapped region and filter output is a
//! `PixelBuffer<P>`. Coordinates follow the `(x, y)` = `(col, row)` order
//! used throughout the crate.
use super::pixel::Pixel;
use crate::error::PyramidError;

#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer<P: Pixel> {
    /// Image width in pixels (columns)
    pub w: usize,
    /// Image height in pixels (rows)
    pub h: usize,
    /// Backing storage in row-major order
    pub data: Vec<P>,
}

impl<P: Pixel> PixelBuffer<P> {
    /// Construct a zero-initialized buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self::filled(w, h, P::zero())
    }

    pub fn filled(w: usize, h: usize, value: P) -> Self {
        Self {
            w,
            h,
            data: vec![value; w * h],
        }
    }

    /// Build a buffer by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(w: usize, h: usize, mut f: impl FnMut(usize, usize) -> P) -> Self {
        let mut data = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                data.push(f(x, y));
            }
        }
        Self { w, h, data }
    }

    /// Wrap interleaved samples (`channels` per pixel).
    pub fn from_interleaved(
        w: usize,
        h: usize,
        channels: usize,
        samples: &[f64],
    ) -> Result<Self, PyramidError> {
        if channels != P::CHANNELS {
            return Err(PyramidError::ChannelMismatch {
                expected: P::CHANNELS,
                found: channels,
            });
        }
        if samples.len() != w * h * channels {
            return Err(PyramidError::SampleCountMismatch {
                expected: w * h * channels,
                found: samples.len(),
            });
        }
        let data = samples
            .chunks_exact(channels)
            .map(P::from_channels)
            .collect();
        Ok(Self { w, h, data })
    }

    /// Flatten into interleaved samples.
    pub fn to_interleaved(&self) -> Vec<f64> {
        let mut out = vec![0.0; self.w * self.h * P::CHANNELS];
        for (px, dst) in self.data.iter().zip(out.chunks_exact_mut(P::CHANNELS)) {
            px.write_channels(dst);
        }
        out
    }

    #[inline]
    pub fn channels(&self) -> usize {
        P::CHANNELS
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }
    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }
    #[inline]
    /// Get the pixel value at (x, y).
    pub fn get(&self, x: usize, y: usize) -> P {
        self.data[self.idx(x, y)]
    }
    #[inline]
    /// Set the pixel value at (x, y).
    pub fn set(&mut self, x: usize, y: usize, v: P) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    #[inline]
    pub fn row(&self, y: usize) -> &[P] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }

    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [P] {
        let start = y * self.w;
        &mut self.data[start..start + self.w]
    }

    /// Copy the half-open region `[x0, x1) × [y0, y1)` into a new buffer.
    pub fn crop(&self, x0: usize, x1: usize, y0: usize, y1: usize) -> Self {
        debug_assert!(x0 <= x1 && x1 <= self.w && y0 <= y1 && y1 <= self.h);
        let w = x1 - x0;
        let h = y1 - y0;
        let mut data = Vec::with_capacity(w * h);
        for y in y0..y1 {
            let start = self.idx(x0, y);
            data.extend_from_slice(&self.data[start..start + w]);
        }
        Self { w, h, data }
    }

    /// Apply `f` to every pixel, producing a new buffer of the same size.
    pub fn map(&self, f: impl Fn(P) -> P) -> Self {
        Self {
            w: self.w,
            h: self.h,
            data: self.data.iter().map(|&p| f(p)).collect(),
        }
    }

    /// Element-wise `self + other`. Both buffers must share a shape.
    pub fn add(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a + b)
    }

    /// Element-wise `self - other`. Both buffers must share a shape.
    pub fn sub(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a - b)
    }

    fn zip_with(&self, other: &Self, f: impl Fn(P, P) -> P) -> Self {
        assert_eq!(
            (self.w, self.h),
            (other.w, other.h),
            "element-wise op on mismatched buffers"
        );
        Self {
            w: self.w,
            h: self.h,
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
        }
    }

    /// Largest per-pixel difference magnitude between two buffers of equal size.
    pub fn max_abs_diff(&self, other: &Self) -> f64 {
        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(&a, &b)| (a - b).magnitude())
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn crop_copies_requested_region() {
        let img = PixelBuffer::<f64>::from_fn(5, 4, |x, y| (10 * y + x) as f64);
        let c = img.crop(1, 4, 2, 4);
        assert_eq!((c.w, c.h), (3, 2));
        assert_eq!(c.get(0, 0), 21.0);
        assert_eq!(c.get(2, 1), 33.0);
        assert_eq!(c.row(1), &[31.0, 32.0, 33.0]);
    }

    #[test]
    fn interleaved_requires_matching_channels() {
        let samples = vec![0.0; 12];
        let err = PixelBuffer::<f64>::from_interleaved(2, 2, 3, &samples).unwrap_err();
        assert!(matches!(
            err,
            PyramidError::ChannelMismatch {
                expected: 1,
                found: 3
            }
        ));
        let rgb = PixelBuffer::<Vector3<f64>>::from_interleaved(2, 2, 3, &samples).unwrap();
        assert_eq!(rgb.to_interleaved(), samples);
    }
}
