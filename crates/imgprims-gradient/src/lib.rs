//! Sobel gradients and the edge masks built on them.
//!
//! - [`gradient`] correlates the image with the fixed 3×3 Sobel pair using
//!   reflective borders, and returns `gx`, `gy`, the Euclidean magnitude and
//!   the orientation folded to `[0, 180]` degrees.
//! - [`sobel_edges`] thresholds the min-max normalized magnitude.
//! - [`directional_edges`] keeps pixels whose folded orientation lies in an
//!   inclusive window, optionally gated by the magnitude threshold.
//!
//! Orientation is unsigned: a dark-to-bright and a bright-to-dark transition
//! across the same line get the same angle.

mod edges;
mod gradient;
mod kernel;

pub use edges::{
    direction_mask, directional_edges, magnitude_mask, sobel_edges, DirectionalEdgeParams,
    SobelEdgeParams,
};
pub use gradient::{angle_to_u8, fold_angle_deg, gradient, gradient_f32, Gradient};
pub use kernel::{correlate3, Kernel3, SOBEL_X, SOBEL_Y};
