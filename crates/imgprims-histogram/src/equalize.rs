//! Histogram equalization.
//!
//! The table is built from the 256-bin cumulative distribution. Leading empty
//! bins are skipped when picking `cdf_min`, so a black border or background
//! does not pull the mapping up.

use crate::{histogram, Histogram, Lut, INTENSITY_LEVELS};
use imgprims_core::{round_to_u8, GrayImage, GrayImageView, ImageError, PlanarImage, Result};
use log::{debug, warn};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Equalization table for a 256-bin histogram.
///
/// Bin `i` maps to `round(255 * (cdf[i] - cdf_min) / (cdf[255] - cdf_min))`
/// clipped to `[0, 255]`, where `cdf_min` is the smallest nonzero cumulative
/// count. A single-valued (or empty) histogram maps everything to 0.
pub fn equalization_lut(hist: &Histogram) -> Result<Lut> {
    if hist.bins() != INTENSITY_LEVELS {
        return Err(ImageError::invalid_argument(
            "bins",
            format!(
                "equalization needs {INTENSITY_LEVELS} bins, got {}",
                hist.bins()
            ),
        ));
    }

    let cdf = hist.cumulative();
    let cdf_min = cdf.iter().copied().find(|&c| c > 0).unwrap_or(0);
    let cdf_max = cdf[INTENSITY_LEVELS - 1];

    if cdf_max <= cdf_min {
        warn!("equalize: single-valued histogram, mapping every level to 0");
        return Ok(Lut([0; INTENSITY_LEVELS]));
    }

    debug!("equalize: cdf_min={cdf_min} cdf_max={cdf_max}");
    let span = (cdf_max - cdf_min) as f64;
    Ok(Lut::from_fn(|v| {
        let c = cdf[v as usize] as f64;
        round_to_u8(255.0 * (c - cdf_min as f64) / span)
    }))
}

/// Equalize one plane: count pass, then one lookup pass.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(src), fields(width = src.width, height = src.height))
)]
pub fn equalize(src: &GrayImageView<'_>) -> Result<GrayImage> {
    let hist = histogram(src, INTENSITY_LEVELS)?;
    let lut = equalization_lut(&hist)?;
    Ok(lut.apply(src))
}

/// Equalize each channel independently.
pub fn equalize_planar(src: &PlanarImage) -> Result<PlanarImage> {
    src.map_channels(|ch| equalize(&ch))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skewed() -> GrayImage {
        GrayImage::from_fn(8, 8, |x, y| {
            let i = y * 8 + x;
            (i * i / 16) as u8
        })
    }

    #[test]
    fn spreads_to_full_range() {
        let out = equalize(&skewed().view()).expect("valid");
        assert_eq!(out.data.iter().copied().min(), Some(0));
        assert_eq!(out.data.iter().copied().max(), Some(255));
    }

    #[test]
    fn second_pass_is_stable_within_one_level() {
        let once = equalize(&skewed().view()).expect("valid");
        let twice = equalize(&once.view()).expect("valid");
        for (a, b) in once.data.iter().zip(&twice.data) {
            assert!((*a as i16 - *b as i16).abs() <= 1, "{a} vs {b}");
        }
    }

    #[test]
    fn leading_empty_bins_do_not_bias() {
        // Two levels only: the darker one must map to 0, the brighter to 255.
        let img = GrayImage::from_fn(4, 4, |x, _| if x < 2 { 100 } else { 180 });
        let out = equalize(&img.view()).expect("valid");
        assert_eq!(out.get(0, 0), 0);
        assert_eq!(out.get(3, 3), 255);
    }

    #[test]
    fn black_background_maps_to_zero() {
        let img = GrayImage::from_fn(4, 4, |x, y| if y < 2 { 0 } else { (x * 60) as u8 });
        let out = equalize(&img.view()).expect("valid");
        assert!(out.data[..8].iter().all(|&v| v == 0));
        assert_eq!(out.get(3, 3), 255);
    }

    #[test]
    fn single_valued_image_maps_to_zero() {
        let img = GrayImage::filled(3, 3, 200);
        let out = equalize(&img.view()).expect("valid");
        assert!(out.data.iter().all(|&v| v == 0));
    }

    #[test]
    fn uniform_ramp_is_fixed_point() {
        let img = GrayImage::from_fn(16, 16, |x, y| (y * 16 + x) as u8);
        assert_eq!(equalize(&img.view()).expect("valid"), img);
    }

    #[test]
    fn lut_requires_256_bins() {
        let hist = Histogram::from_counts(vec![1; 16]).expect("non-empty");
        assert!(equalization_lut(&hist).unwrap_err().is_invalid_argument());
    }
}
