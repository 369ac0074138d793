//! Gaussian and Laplacian pyramids over whole images or sub-windows.
//!
//! Every pyramid remembers the [`SubWindow`] its base level covers in some
//! reference image. Reduction, expansion and reconstruction all take their
//! sample lattice from [`SubWindow::offsets`] of the relevant level, so two
//! pyramids built over different crops of one image agree wherever their
//! supports overlap. The local Laplacian filter depends on that to harvest
//! coefficients from small per-pixel pyramids.

pub mod filters;
pub mod gaussian;
pub mod laplacian;
pub mod window;

pub use filters::{Kernel5, GAUSSIAN_5TAP};
pub use gaussian::{expand_into, GaussianPyramid};
pub use laplacian::{LaplacianPyramid, LaplacianPyramidBuilder};
pub use window::SubWindow;
