//! Detail/edge remapping applied to a neighbourhood before re-decomposition.
//!
//! Differences from the local reference smaller than `sigma_r` are treated
//! as detail and reshaped by `fraction^alpha`; larger ones are edges whose
//! excess over `sigma_r` is scaled by `beta`. For RGB pixels the difference
//! is split into its Euclidean length and a unit direction, so the hue of
//! the deviation is kept.
//!
//! - `alpha < 1` enhances detail, `alpha > 1` suppresses it.
//! - `beta < 1` compresses edges (tone mapping), `beta > 1` expands them.
use crate::image::{Pixel, PixelBuffer};
use serde::{Deserialize, Serialize};

/// Below this deviation the detail curve is blended back toward linear so
/// sensor noise is not amplified when `alpha < 1`.
const NOISE_LEVEL: f64 = 0.01;
/// Differences shorter than this have no defined direction.
const DIRECTION_EPS: f64 = 1e-10;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RemappingFunction {
    alpha: f64,
    beta: f64,
}

impl RemappingFunction {
    pub fn new(alpha: f64, beta: f64) -> Self {
        Self { alpha, beta }
    }

    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha;
    }

    #[inline]
    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn set_beta(&mut self, beta: f64) {
        self.beta = beta;
    }

    /// Remap `value` relative to `reference` with edge threshold `sigma_r`.
    pub fn evaluate<P: Pixel>(&self, value: P, reference: P, sigma_r: f64) -> P {
        let diff = value - reference;
        let delta = diff.magnitude();
        if delta < DIRECTION_EPS {
            return reference;
        }
        let direction = diff.scale(1.0 / delta);

        if delta < sigma_r {
            let fraction = delta / sigma_r;
            let mut polynomial = fraction.powf(self.alpha);
            if self.alpha < 1.0 {
                let blend = smooth_step(NOISE_LEVEL, 2.0 * NOISE_LEVEL, fraction * sigma_r);
                polynomial = blend * polynomial + (1.0 - blend) * fraction;
            }
            reference + direction.scale(sigma_r * polynomial)
        } else {
            let offset = (delta - sigma_r) * self.beta;
            reference + direction.scale(sigma_r + offset)
        }
    }

    /// Remap every pixel of `input` against one shared `reference`.
    pub fn evaluate_region<P: Pixel>(
        &self,
        input: &PixelBuffer<P>,
        reference: P,
        sigma_r: f64,
    ) -> PixelBuffer<P> {
        input.map(|v| self.evaluate(v, reference, sigma_r))
    }
}

/// Quintic ramp from 0 at `x_min` to 1 at `x_max` with flat ends:
/// `y²(y-2)²` for `y = clamp((x - x_min) / (x_max - x_min), 0, 1)`.
pub fn smooth_step(x_min: f64, x_max: f64, x: f64) -> f64 {
    let y = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    y * y * (y - 2.0) * (y - 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn reference_maps_to_itself() {
        for &(alpha, beta) in &[(0.25, 0.0), (1.0, 1.0), (2.0, 3.0)] {
            let r = RemappingFunction::new(alpha, beta);
            assert_eq!(r.evaluate(0.42, 0.42, 0.3), 0.42);
            let v = Vector3::new(0.1, 0.5, 0.9);
            assert_eq!(r.evaluate(v, v, 0.1), v);
        }
    }

    #[test]
    fn zero_difference_maps_to_reference_for_any_exponent() {
        let r = RemappingFunction::new(-0.5, 1.0);
        assert_eq!(r.evaluate(0.4, 0.4, 0.3), 0.4);
        let v = Vector3::new(0.2, 0.3, 0.4);
        assert_eq!(r.evaluate(v, v, 0.3), v);
    }

    #[test]
    fn unit_alpha_and_beta_is_identity() {
        let r = RemappingFunction::new(1.0, 1.0);
        for i in 0..=20 {
            let value = i as f64 / 20.0;
            assert!((r.evaluate(value, 0.37, 0.2) - value).abs() < 1e-12);
        }
        let v = Vector3::new(0.9, 0.1, 0.4);
        let reference = Vector3::new(0.5, 0.5, 0.5);
        assert!((r.evaluate(v, reference, 0.3) - v).norm() < 1e-12);
    }

    #[test]
    fn edge_regime_has_slope_beta_regardless_of_alpha() {
        let sigma = 0.2;
        for &alpha in &[0.3, 1.0, 4.0] {
            let r = RemappingFunction::new(alpha, 0.5);
            let a = r.evaluate(0.5, 0.0, sigma);
            let b = r.evaluate(0.7, 0.0, sigma);
            assert!(((b - a) / 0.2 - 0.5).abs() < 1e-12);
            assert!((a - (sigma + 0.5 * (0.5 - sigma))).abs() < 1e-12);
            // Negative side mirrors the positive one.
            assert!((r.evaluate(-0.5, 0.0, sigma) + a).abs() < 1e-12);
        }
    }

    #[test]
    fn small_alpha_enhances_detail_above_noise_floor() {
        let r = RemappingFunction::new(0.25, 1.0);
        let out = r.evaluate(0.6, 0.5, 0.3);
        assert!(out > 0.6, "detail should be amplified, got {out}");
        // Inside the noise band the curve stays linear.
        let tiny = r.evaluate(0.505, 0.5, 0.3);
        assert!((tiny - 0.505).abs() < 1e-12);
    }

    #[test]
    fn vector_remap_keeps_direction() {
        let r = RemappingFunction::new(1.0, 0.0);
        let reference = Vector3::new(0.5, 0.5, 0.5);
        let value = Vector3::new(1.5, 0.5, 0.5);
        let out = r.evaluate(value, reference, 0.2);
        assert!((out - Vector3::new(0.7, 0.5, 0.5)).norm() < 1e-12);
    }

    #[test]
    fn smooth_step_clamps_and_is_symmetric() {
        assert_eq!(smooth_step(0.01, 0.02, 0.0), 0.0);
        assert_eq!(smooth_step(0.01, 0.02, 1.0), 1.0);
        assert!((smooth_step(0.0, 1.0, 0.5) - 0.5625).abs() < 1e-12);
        let lo = smooth_step(0.0, 1.0, 0.25);
        let hi = smooth_step(0.0, 1.0, 0.75);
        assert!(lo < hi);
    }

    #[test]
    fn region_uses_single_reference() {
        let r = RemappingFunction::new(1.0, 0.0);
        let img = PixelBuffer::from_fn(3, 1, |x, _| x as f64);
        let out = r.evaluate_region(&img, 1.0, 0.5);
        assert_eq!(out.data, vec![0.5, 1.0, 1.5]);
    }
}
