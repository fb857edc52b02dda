//! Shared building blocks for the `imgprims` workspace.
//!
//! This crate owns the image buffer types every operation consumes and
//! produces, the reflective border policy shared by the neighbourhood
//! filters, min-max normalization, and the error taxonomy. It has no
//! knowledge of any particular filter.

mod border;
mod error;
mod image;
mod logger;
mod normalize;
mod parallel;

pub use border::{pad_reflect, reflect_index};
pub use error::{ImageError, InputError, Result};
pub use image::{
    ensure_same_shape, round_to_u8, GrayImage, GrayImageF32, GrayImageView, PlanarImage, Plane,
};
pub use normalize::{normalize_min_max, normalize_to_u8, plane_min_max};
pub use parallel::for_each_row_mut;

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_from_env, init_with_level, LOG_ENV};
