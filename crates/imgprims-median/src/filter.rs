use crate::histogram::median_histogram;
use crate::sorted::median_sorted;
use imgprims_core::{pad_reflect, GrayImage, GrayImageView, ImageError, PlanarImage, Plane, Result};
use log::debug;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Which median implementation to run. All variants give identical output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MedianMethod {
    /// Sort every window.
    SortedWindow,
    /// Sliding 256-level histogram per row.
    Histogram,
    /// Sorted windows for 3×3, sliding histogram above.
    #[default]
    Auto,
}

impl MedianMethod {
    fn resolve(self, size: usize) -> Self {
        match self {
            MedianMethod::Auto if size <= 3 => MedianMethod::SortedWindow,
            MedianMethod::Auto => MedianMethod::Histogram,
            m => m,
        }
    }
}

/// Parameters for [`median_filter`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedianParams {
    /// Window side, odd and at least 1.
    pub size: usize,
    #[serde(default)]
    pub method: MedianMethod,
}

impl Default for MedianParams {
    fn default() -> Self {
        Self {
            size: 3,
            method: MedianMethod::Auto,
        }
    }
}

impl MedianParams {
    pub fn validate(&self) -> Result<()> {
        validate_size(self.size)
    }
}

fn validate_size(size: usize) -> Result<()> {
    if size == 0 || size % 2 == 0 {
        return Err(ImageError::invalid_argument(
            "size",
            format!("must be an odd integer >= 1 (got {size})"),
        ));
    }
    // Window sample count and ranks are computed as `size * size` (`u32` in
    // the sliding histogram).
    let fits = size
        .checked_mul(size)
        .is_some_and(|n| u32::try_from(n).is_ok());
    if !fits {
        return Err(ImageError::invalid_argument(
            "size",
            format!("window of {size}x{size} samples is too large"),
        ));
    }
    Ok(())
}

/// Median filter with the default implementation choice.
pub fn median_filter(src: &GrayImageView<'_>, size: usize) -> Result<GrayImage> {
    median_filter_with(src, size, MedianMethod::Auto)
}

/// Median filter over a `size × size` window with reflective borders.
///
/// `size == 1` returns a copy of the input.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(src), fields(width = src.width, height = src.height))
)]
pub fn median_filter_with(
    src: &GrayImageView<'_>,
    size: usize,
    method: MedianMethod,
) -> Result<GrayImage> {
    validate_size(size)?;
    src.ensure_non_empty()?;
    if size == 1 {
        return Ok(src.to_image());
    }

    let method = method.resolve(size);
    debug!(
        "median: {}x{} size={size} method={method:?}",
        src.width, src.height
    );

    let padded = pad_reflect(src, size / 2)?;
    let mut out = GrayImage::new(src.width, src.height);
    match method {
        MedianMethod::SortedWindow => median_sorted(&padded, size, &mut out),
        MedianMethod::Histogram | MedianMethod::Auto => median_histogram(&padded, size, &mut out),
    }
    Ok(out)
}

/// Filter every channel independently; channel order is preserved.
pub fn median_filter_planar(src: &PlanarImage, params: &MedianParams) -> Result<PlanarImage> {
    params.validate()?;
    src.map_channels(|ch| median_filter_with(&ch, params.size, params.method))
}
