//! Linear contrast stretch.
//!
//! `y = clip((x - r_min) * 255 / (r_max - r_min), 0, 255)`, rounded. Values
//! outside `[r_min, r_max]` saturate instead of wrapping.

use crate::Lut;
use imgprims_core::{round_to_u8, GrayImage, GrayImageView, ImageError, PlanarImage, Plane, Result};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Input window mapped onto the full 8-bit range.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StretchParams {
    pub r_min: f64,
    pub r_max: f64,
}

impl StretchParams {
    pub fn validate(&self) -> Result<()> {
        stretch_lut(self.r_min, self.r_max).map(|_| ())
    }
}

impl Default for StretchParams {
    fn default() -> Self {
        Self {
            r_min: 0.0,
            r_max: 255.0,
        }
    }
}

/// Build the stretch table. Fails unless `r_min < r_max` and both are finite.
pub fn stretch_lut(r_min: f64, r_max: f64) -> Result<Lut> {
    if !r_min.is_finite() || !r_max.is_finite() {
        return Err(ImageError::invalid_argument(
            "r_min",
            format!("window bounds must be finite (got {r_min}, {r_max})"),
        ));
    }
    if r_min >= r_max {
        return Err(ImageError::invalid_argument(
            "r_min",
            format!("must be below r_max (got {r_min} >= {r_max})"),
        ));
    }
    let scale = 255.0 / (r_max - r_min);
    Ok(Lut::from_fn(|v| round_to_u8((v as f64 - r_min) * scale)))
}

#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(src), fields(width = src.width, height = src.height))
)]
pub fn stretch(src: &GrayImageView<'_>, r_min: f64, r_max: f64) -> Result<GrayImage> {
    let lut = stretch_lut(r_min, r_max)?;
    src.ensure_non_empty()?;
    Ok(lut.apply(src))
}

pub fn stretch_planar(src: &PlanarImage, params: &StretchParams) -> Result<PlanarImage> {
    let lut = stretch_lut(params.r_min, params.r_max)?;
    src.ensure_non_empty()?;
    lut.apply_planar(src)
}
