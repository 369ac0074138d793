//! Pixel arithmetic shared by every pyramid stage.
//!
//! The pyramids and the remapping function are generic over [`Pixel`], which
//! is implemented for scalar `f64` (grayscale) and `Vector3<f64>` (RGB). The
//! channel count is therefore a property of the type and can never disagree
//! between two levels of one pyramid.
use nalgebra::Vector3;
use std::ops::{Add, AddAssign, Sub};

/// Floating-point pixel with the vector-space operations the pyramids need.
pub trait Pixel:
    Copy
    + Send
    + Sync
    + std::fmt::Debug
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + AddAssign
    + 'static
{
    /// Number of channels stored per pixel.
    const CHANNELS: usize;

    fn zero() -> Self;

    /// Multiply every channel by `factor`.
    fn scale(self, factor: f64) -> Self;

    /// Absolute value for scalars, Euclidean norm for vectors.
    fn magnitude(self) -> f64;

    /// Read a pixel from `CHANNELS` consecutive samples.
    fn from_channels(channels: &[f64]) -> Self;

    /// Write the pixel into `CHANNELS` consecutive samples.
    fn write_channels(self, out: &mut [f64]);
}

impl Pixel for f64 {
    const CHANNELS: usize = 1;

    #[inline]
    fn zero() -> Self {
        0.0
    }
    #[inline]
    fn scale(self, factor: f64) -> Self {
        self * factor
    }
    #[inline]
    fn magnitude(self) -> f64 {
        self.abs()
    }
    #[inline]
    fn from_channels(channels: &[f64]) -> Self {
        channels[0]
    }
    #[inline]
    fn write_channels(self, out: &mut [f64]) {
        out[0] = self;
    }
}

impl Pixel for Vector3<f64> {
    const CHANNELS: usize = 3;

    #[inline]
    fn zero() -> Self {
        Vector3::zeros()
    }
    #[inline]
    fn scale(self, factor: f64) -> Self {
        self * factor
    }
    #[inline]
    fn magnitude(self) -> f64 {
        self.norm()
    }
    #[inline]
    fn from_channels(channels: &[f64]) -> Self {
        Vector3::new(channels[0], channels[1], channels[2])
    }
    #[inline]
    fn write_channels(self, out: &mut [f64]) {
        out[..3].copy_from_slice(self.as_slice());
    }
}
