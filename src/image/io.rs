//! I/O helpers for images and JSON.
//!
//! - `load_image`: read a PNG/JPEG/etc. into a normalised [`DynamicBuffer`].
//! - `save_buffer` / `save_image`: write a buffer as 8-bit gray or RGB,
//!   clamping values to `[0, 1]`.
//! - `byte_scale` / `detail_visualization`: stretch a buffer to `[0, 1]` for
//!   viewing (Laplacian detail levels are signed and small).
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{Pixel, PixelBuffer};
use image::{DynamicImage, GrayImage, ImageBuffer, RgbImage};
use nalgebra::Vector3;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Buffer whose channel count is only known at runtime (after decoding).
#[derive(Clone, Debug, PartialEq)]
pub enum DynamicBuffer {
    Gray(PixelBuffer<f64>),
    Rgb(PixelBuffer<Vector3<f64>>),
}

impl DynamicBuffer {
    pub fn width(&self) -> usize {
        match self {
            Self::Gray(b) => b.w,
            Self::Rgb(b) => b.w,
        }
    }

    pub fn height(&self) -> usize {
        match self {
            Self::Gray(b) => b.h,
            Self::Rgb(b) => b.h,
        }
    }

    pub fn channels(&self) -> usize {
        match self {
            Self::Gray(_) => 1,
            Self::Rgb(_) => 3,
        }
    }

    /// Convert a decoded image: grayscale stays single-channel, everything
    /// else becomes RGB. Alpha is dropped. Samples are scaled to `[0, 1]`.
    pub fn from_dynamic(img: DynamicImage) -> Self {
        if img.color().has_color() {
            let rgb = img.into_rgb8();
            let (w, h) = (rgb.width() as usize, rgb.height() as usize);
            let data = rgb
                .pixels()
                .map(|p| Vector3::new(p[0] as f64, p[1] as f64, p[2] as f64) / 255.0)
                .collect();
            Self::Rgb(PixelBuffer { w, h, data })
        } else {
            let gray = img.into_luma8();
            let (w, h) = (gray.width() as usize, gray.height() as usize);
            let data = gray.pixels().map(|p| p[0] as f64 / 255.0).collect();
            Self::Gray(PixelBuffer { w, h, data })
        }
    }
}

/// Load an image from disk as a normalised gray or RGB buffer.
pub fn load_image(path: &Path) -> Result<DynamicBuffer, String> {
    let img = image::open(path).map_err(|e| format!("Failed to open {}: {e}", path.display()))?;
    Ok(DynamicBuffer::from_dynamic(img))
}

/// Save a buffer of either channel count.
pub fn save_image(buffer: &DynamicBuffer, path: &Path) -> Result<(), String> {
    match buffer {
        DynamicBuffer::Gray(b) => save_buffer(b, path),
        DynamicBuffer::Rgb(b) => save_buffer(b, path),
    }
}

/// Save a `[0, 1]` buffer as an 8-bit PNG/JPEG/etc. (format from extension).
pub fn save_buffer<P: Pixel>(buffer: &PixelBuffer<P>, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let bytes: Vec<u8> = buffer
        .to_interleaved()
        .into_iter()
        .map(|v| (v * 255.0).round().clamp(0.0, 255.0) as u8)
        .collect();
    let (w, h) = (buffer.w as u32, buffer.h as u32);
    let image = match P::CHANNELS {
        1 => {
            let gray: GrayImage = ImageBuffer::from_raw(w, h, bytes)
                .ok_or_else(|| "Failed to create image buffer".to_string())?;
            DynamicImage::ImageLuma8(gray)
        }
        3 => {
            let rgb: RgbImage = ImageBuffer::from_raw(w, h, bytes)
                .ok_or_else(|| "Failed to create image buffer".to_string())?;
            DynamicImage::ImageRgb8(rgb)
        }
        n => return Err(format!("Cannot encode {n}-channel buffer")),
    };
    image
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Linearly stretch all samples of `buffer` to `[0, 1]`.
///
/// A constant buffer maps to zeros.
pub fn byte_scale<P: Pixel>(buffer: &PixelBuffer<P>) -> PixelBuffer<P> {
    let samples = buffer.to_interleaved();
    let (min, max) = samples
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = max - min;
    let scaled: Vec<f64> = if range > 0.0 {
        samples.iter().map(|v| (v - min) / range).collect()
    } else {
        vec![0.0; samples.len()]
    };
    rebuild(buffer, &scaled)
}

/// Absolute value of every sample, stretched to `[0, 1]`; used to view
/// Laplacian detail levels.
pub fn detail_visualization<P: Pixel>(buffer: &PixelBuffer<P>) -> PixelBuffer<P> {
    let abs: Vec<f64> = buffer.to_interleaved().iter().map(|v| v.abs()).collect();
    byte_scale(&rebuild(buffer, &abs))
}

fn rebuild<P: Pixel>(shape: &PixelBuffer<P>, samples: &[f64]) -> PixelBuffer<P> {
    let data = samples
        .chunks_exact(P::CHANNELS)
        .map(P::from_channels)
        .collect();
    PixelBuffer {
        w: shape.w,
        h: shape.h,
        data,
    }
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
