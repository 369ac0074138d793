//! Serializable reports describing a filter run.
//!
//! `FilterReport` is returned alongside the filtered image; the CLI writes it
//! as JSON next to the output so runs can be compared.

pub mod filter;
pub mod pyramid;
pub mod timing;

pub use filter::{FilterReport, InputDescriptor, LevelFilterReport};
pub use pyramid::{PyramidLevelReport, PyramidStage};
pub use timing::{elapsed_ms, StageTiming, TimingBreakdown};
