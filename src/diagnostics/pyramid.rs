use crate::image::{Pixel, PixelBuffer};
use serde::{Deserialize, Serialize};

/// Statistics for a single level of a Gaussian or Laplacian pyramid.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PyramidLevelReport {
    pub level_index: usize,
    pub width: usize,
    pub height: usize,
    /// Mean pixel magnitude (absolute value, or norm for RGB).
    pub mean_magnitude: f64,
}

/// Level sizes and energy of a pyramid built during a filter run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PyramidStage {
    pub elapsed_ms: f64,
    pub levels: Vec<PyramidLevelReport>,
}

impl PyramidStage {
    pub fn from_levels<P: Pixel>(levels: &[PixelBuffer<P>], elapsed_ms: f64) -> Self {
        let levels = levels
            .iter()
            .enumerate()
            .map(|(level, lvl)| {
                let sum: f64 = lvl.data.iter().map(|p| p.magnitude()).sum();
                let denom = (lvl.w * lvl.h).max(1) as f64;
                PyramidLevelReport {
                    level_index: level,
                    width: lvl.w,
                    height: lvl.h,
                    mean_magnitude: sum / denom,
                }
            })
            .collect();
        Self { elapsed_ms, levels }
    }
}
