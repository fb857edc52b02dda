//! Binary edge maps composed from the Sobel gradient.
//!
//! Both modes compare against the magnitude after min-max normalization to
//! `[0, 255]`, so thresholds are relative to the strongest edge in the image.
//! Outputs are 0 / 255 planes.

use crate::{gradient, Gradient};
use imgprims_core::{ensure_same_shape, GrayImage, GrayImageView, ImageError, Result};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

const EDGE: u8 = 255;

/// Parameters for [`sobel_edges`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SobelEdgeParams {
    /// Threshold on the normalized magnitude. Values outside `[0, 255]` are
    /// legal and give an all-255 or all-0 map.
    pub threshold: f32,
}

impl Default for SobelEdgeParams {
    fn default() -> Self {
        Self { threshold: 60.0 }
    }
}

impl SobelEdgeParams {
    pub fn validate(&self) -> Result<()> {
        check_threshold("threshold", self.threshold)
    }
}

/// Parameters for [`directional_edges`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DirectionalEdgeParams {
    /// Inclusive lower bound of the folded angle window (degrees).
    pub min_deg: f32,
    /// Inclusive upper bound of the folded angle window (degrees).
    pub max_deg: f32,
    /// Normalized magnitude gate. `0` (or any non-positive value) disables
    /// gating; it does not mean "threshold at zero".
    #[serde(default)]
    pub magnitude_threshold: f32,
}

impl Default for DirectionalEdgeParams {
    fn default() -> Self {
        Self {
            min_deg: 0.0,
            max_deg: 180.0,
            magnitude_threshold: 0.0,
        }
    }
}

impl DirectionalEdgeParams {
    pub fn validate(&self) -> Result<()> {
        let (lo, hi) = (self.min_deg, self.max_deg);
        if !(0.0..=180.0).contains(&lo) || !(0.0..=180.0).contains(&hi) {
            return Err(ImageError::invalid_argument(
                "min_deg",
                format!("angle window must lie in [0, 180] (got [{lo}, {hi}])"),
            ));
        }
        if lo > hi {
            return Err(ImageError::invalid_argument(
                "min_deg",
                format!("must not exceed max_deg (got {lo} > {hi})"),
            ));
        }
        check_threshold("magnitude_threshold", self.magnitude_threshold)
    }
}

fn check_threshold(param: &'static str, threshold: f32) -> Result<()> {
    if threshold.is_nan() {
        return Err(ImageError::invalid_argument(param, "must not be NaN"));
    }
    Ok(())
}

/// The planes of a hand-assembled [`Gradient`] may disagree in size.
fn check_planes(grad: &Gradient) -> Result<()> {
    ensure_same_shape(&grad.magnitude, &grad.angle_deg)?;
    ensure_same_shape(&grad.magnitude, &grad.gx)?;
    ensure_same_shape(&grad.magnitude, &grad.gy)
}

/// 255 where the normalized magnitude is `>= threshold`, else 0.
///
/// Magnitude is non-negative, so a threshold of 0 marks every pixel.
/// [`direction_mask`] treats 0 as "no gating" instead.
pub fn magnitude_mask(grad: &Gradient, threshold: f32) -> Result<GrayImage> {
    check_threshold("threshold", threshold)?;
    check_planes(grad)?;
    let mut mask = grad.magnitude_u8()?;
    for v in &mut mask.data {
        *v = if *v as f32 >= threshold { EDGE } else { 0 };
    }
    Ok(mask)
}

/// 255 where the folded angle lies in `[min_deg, max_deg]`, intersected with
/// the magnitude mask when `magnitude_threshold > 0`.
pub fn direction_mask(grad: &Gradient, params: &DirectionalEdgeParams) -> Result<GrayImage> {
    params.validate()?;
    check_planes(grad)?;
    let (lo, hi) = (params.min_deg, params.max_deg);

    let gate = if params.magnitude_threshold > 0.0 {
        Some(magnitude_mask(grad, params.magnitude_threshold)?)
    } else {
        None
    };

    let data = grad
        .angle_deg
        .data
        .iter()
        .enumerate()
        .map(|(i, &a)| {
            let in_window = a >= lo && a <= hi;
            let strong = gate.as_ref().map_or(true, |g| g.data[i] == EDGE);
            if in_window && strong {
                EDGE
            } else {
                0
            }
        })
        .collect();

    GrayImage::from_raw(grad.width(), grad.height(), data)
}

/// Threshold the normalized Sobel magnitude of `src`.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(src), fields(width = src.width, height = src.height))
)]
pub fn sobel_edges(src: &GrayImageView<'_>, threshold: f32) -> Result<GrayImage> {
    check_threshold("threshold", threshold)?;
    magnitude_mask(&gradient(src)?, threshold)
}

/// Keep edges of `src` whose orientation lies in the requested window.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(src), fields(width = src.width, height = src.height))
)]
pub fn directional_edges(
    src: &GrayImageView<'_>,
    params: &DirectionalEdgeParams,
) -> Result<GrayImage> {
    params.validate()?;
    direction_mask(&gradient(src)?, params)
}
