use super::{PyramidStage, TimingBreakdown};
use crate::filter::FilterParams;
use serde::{Deserialize, Serialize};

/// Shape of the input handed to the filter.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    pub pyramid_levels: usize,
}

/// Work done for one output Laplacian level.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelFilterReport {
    pub level_index: usize,
    pub width: usize,
    pub height: usize,
    /// Side of the square input neighbourhood remapped per coefficient.
    pub footprint: usize,
    pub coefficients: usize,
    pub elapsed_ms: f64,
}

/// Everything recorded while running the local Laplacian filter once.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterReport {
    pub input: InputDescriptor,
    pub params: FilterParams,
    pub gaussian: PyramidStage,
    pub output_pyramid: PyramidStage,
    pub levels: Vec<LevelFilterReport>,
    pub timings: TimingBreakdown,
}
