//! Histogram engine and point transforms for 8-bit planes.
//!
//! - [`histogram`] counts intensities into `bins` equal-width bins over the
//!   fixed range `[0, 256)`.
//! - [`stretch`] maps `[r_min, r_max]` linearly onto `[0, 255]`, saturating
//!   outside that window.
//! - [`equalize`] builds the 256-bin cumulative distribution and applies the
//!   resulting lookup table in a single pass.
//!
//! Point transforms are expressed as a 256-entry [`Lut`], so every output
//! sample costs one table lookup.

mod equalize;
mod histogram;
mod lut;
mod stretch;

pub use equalize::{equalization_lut, equalize, equalize_planar};
pub use histogram::{
    histogram, histogram_planar, Histogram, HistogramParams, HistogramSummary, INTENSITY_LEVELS,
};
pub use lut::Lut;
pub use stretch::{stretch, stretch_lut, stretch_planar, StretchParams};
