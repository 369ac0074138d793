//! Local Laplacian filtering (Paris, Hasinoff & Kautz 2011).
//!
//! Modules
//! - [`params`] – filter knobs and their validation.
//! - [`pipeline`] – the [`LocalLaplacianFilter`] driving the per-coefficient
//!   pyramid rebuilds.

pub mod params;
pub mod pipeline;

pub use params::FilterParams;
pub use pipeline::{FilterOutput, LevelFootprint, LocalLaplacianFilter};
