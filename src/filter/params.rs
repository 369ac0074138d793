//! Parameters of the local Laplacian filter.
//!
//! Defaults reproduce the classic tone-mapping setting: keep detail as is
//! (`alpha = 1`), flatten edges entirely (`beta = 0`) above a range threshold
//! of `0.3` in normalised intensity.

use crate::error::PyramidError;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterParams {
    /// Detail exponent (< 1 enhances fine detail, > 1 suppresses it).
    pub alpha: f64,
    /// Edge slope (< 1 compresses contrast, > 1 expands it).
    pub beta: f64,
    /// Edge threshold in normalised range space.
    pub sigma_r: f64,
    /// Target side length of the coarsest (residual) level.
    pub residual_size: usize,
    /// Compute the rows of each level in parallel when the `parallel`
    /// feature is enabled. Output is identical either way.
    pub parallel: bool,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            beta: 0.0,
            sigma_r: 0.3,
            residual_size: 30,
            parallel: true,
        }
    }
}

impl FilterParams {
    pub fn new(alpha: f64, beta: f64, sigma_r: f64) -> Self {
        Self {
            alpha,
            beta,
            sigma_r,
            ..Default::default()
        }
    }

    pub fn with_residual_size(mut self, residual_size: usize) -> Self {
        self.residual_size = residual_size;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn validate(&self) -> Result<(), PyramidError> {
        // fraction^alpha blows up at fraction == 0 for negative exponents.
        if !(self.alpha.is_finite() && self.alpha >= 0.0) {
            return Err(PyramidError::InvalidParameter {
                name: "alpha",
                value: self.alpha,
            });
        }
        if !self.beta.is_finite() {
            return Err(PyramidError::InvalidParameter {
                name: "beta",
                value: self.beta,
            });
        }
        if !(self.sigma_r.is_finite() && self.sigma_r > 0.0) {
            return Err(PyramidError::InvalidParameter {
                name: "sigma_r",
                value: self.sigma_r,
            });
        }
        if self.residual_size == 0 {
            return Err(PyramidError::InvalidParameter {
                name: "residual_size",
                value: 0.0,
            });
        }
        Ok(())
    }
}
