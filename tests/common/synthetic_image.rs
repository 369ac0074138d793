#![allow(dead_code)]

use local_laplacian::PixelBuffer;
use nalgebra::Vector3;

/// Checkerboard alternating between `low` and `high` in `cell`-sized squares.
pub fn checkerboard(
    width: usize,
    height: usize,
    cell: usize,
    low: f64,
    high: f64,
) -> PixelBuffer<f64> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");

    PixelBuffer::from_fn(width, height, |x, y| {
        if (x / cell + y / cell) & 1 == 0 {
            low
        } else {
            high
        }
    })
}

/// Smooth texture with a little of everything: ramps plus two sinusoids.
pub fn textured(width: usize, height: usize) -> PixelBuffer<f64> {
    PixelBuffer::from_fn(width, height, |x, y| {
        let (fx, fy) = (x as f64, y as f64);
        0.4 + 0.002 * fx + 0.001 * fy + 0.1 * (fx * 0.83).sin() * (fy * 0.37).cos()
            + 0.05 * ((fx + 2.0 * fy) * 0.21).sin()
    })
}

/// Vertical step edge at `x = width / 2` from `low` to `high`.
pub fn step_edge(width: usize, height: usize, low: f64, high: f64) -> PixelBuffer<f64> {
    PixelBuffer::from_fn(width, height, |x, _| if x < width / 2 { low } else { high })
}

/// Three decorrelated channels of texture.
pub fn textured_rgb(width: usize, height: usize) -> PixelBuffer<Vector3<f64>> {
    PixelBuffer::from_fn(width, height, |x, y| {
        let (fx, fy) = (x as f64, y as f64);
        Vector3::new(
            0.5 + 0.2 * (fx * 0.3).sin(),
            0.5 + 0.2 * (fy * 0.45).cos(),
            0.5 + 0.1 * ((fx - fy) * 0.6).sin(),
        )
    })
}
