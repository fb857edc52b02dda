//! Intensity histogram over the fixed range `[0, 256)`.
//!
//! Bin `k` of `n` covers `[k * 256 / n, (k + 1) * 256 / n)`. The top edge is
//! 256 rather than 255, so for `n <= 256` intensity 255 always lands in the
//! last bin.

use imgprims_core::{GrayImageView, ImageError, PlanarImage, Plane, Result};
use log::debug;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Number of distinct 8-bit intensities.
pub const INTENSITY_LEVELS: usize = 256;

/// Parameters for [`histogram`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramParams {
    /// Number of equal-width bins on `[0, 256)`. Must be positive.
    pub bins: usize,
}

impl Default for HistogramParams {
    fn default() -> Self {
        Self {
            bins: INTENSITY_LEVELS,
        }
    }
}

/// Bin counts of one plane.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Histogram {
    counts: Vec<u64>,
}

/// Compact description of a histogram, handy for reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramSummary {
    pub bins: usize,
    pub total: u64,
    pub min_count: u64,
    pub max_count: u64,
}

impl Histogram {
    /// Wrap precomputed counts. `counts` must not be empty.
    pub fn from_counts(counts: Vec<u64>) -> Result<Self> {
        if counts.is_empty() {
            return Err(ImageError::invalid_argument(
                "bins",
                "histogram needs at least one bin",
            ));
        }
        Ok(Self { counts })
    }

    #[inline]
    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    #[inline]
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn into_counts(self) -> Vec<u64> {
        self.counts
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Bin index of an 8-bit intensity.
    #[inline]
    pub fn bin_of(&self, intensity: u8) -> usize {
        bin_index(intensity, self.bins())
    }

    /// Counts divided by the total; all zeros when the histogram is empty.
    pub fn distribution(&self) -> Vec<f64> {
        let total = self.total();
        if total == 0 {
            return vec![0.0; self.bins()];
        }
        let total = total as f64;
        self.counts.iter().map(|&c| c as f64 / total).collect()
    }

    /// Running sum of counts; the last entry equals [`Histogram::total`].
    pub fn cumulative(&self) -> Vec<u64> {
        self.counts
            .iter()
            .scan(0u64, |acc, &c| {
                *acc += c;
                Some(*acc)
            })
            .collect()
    }

    /// `bins + 1` bin edges from 0 to 256.
    pub fn bin_edges(&self) -> Vec<f64> {
        let n = self.bins();
        let width = INTENSITY_LEVELS as f64 / n as f64;
        (0..=n).map(|k| k as f64 * width).collect()
    }

    pub fn summary(&self) -> HistogramSummary {
        HistogramSummary {
            bins: self.bins(),
            total: self.total(),
            min_count: self.counts.iter().copied().min().unwrap_or(0),
            max_count: self.counts.iter().copied().max().unwrap_or(0),
        }
    }
}

#[inline]
fn bin_index(intensity: u8, bins: usize) -> usize {
    // Exact integer form of floor(v * bins / 256): v >= k*256/bins <=> v*bins >= 256k.
    intensity as usize * bins / INTENSITY_LEVELS
}

/// Count the intensities of `src` into `bins` equal-width bins.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(src), fields(width = src.width, height = src.height))
)]
pub fn histogram(src: &GrayImageView<'_>, bins: usize) -> Result<Histogram> {
    if bins == 0 {
        return Err(ImageError::invalid_argument("bins", "must be positive"));
    }
    src.ensure_non_empty()?;

    let mut levels = [0u64; INTENSITY_LEVELS];
    for &v in src.as_slice() {
        levels[v as usize] += 1;
    }

    let mut counts = vec![0u64; bins];
    for (v, &c) in levels.iter().enumerate() {
        counts[bin_index(v as u8, bins)] += c;
    }

    let hist = Histogram { counts };
    debug!(
        "histogram: {}x{} into {bins} bins, max count {}",
        src.width,
        src.height,
        hist.summary().max_count
    );
    Ok(hist)
}

/// One histogram per channel, in channel order.
pub fn histogram_planar(src: &PlanarImage, bins: usize) -> Result<Vec<Histogram>> {
    if bins == 0 {
        return Err(ImageError::invalid_argument("bins", "must be positive"));
    }
    src.map_channels_to(|ch| histogram(&ch, bins))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use imgprims_core::GrayImage;

    #[test]
    fn counts_sum_to_pixel_count() {
        let img = GrayImage::from_fn(7, 5, |x, y| (x * 37 + y * 11) as u8);
        let hist = histogram(&img.view(), 256).expect("valid");
        assert_eq!(hist.total(), 35);
        assert_eq!(*hist.cumulative().last().expect("bins"), 35);
    }

    #[test]
    fn constant_image_fills_one_bin() {
        let img = GrayImage::filled(4, 3, 42);
        let hist = histogram(&img.view(), 256).expect("valid");
        for (i, &c) in hist.counts().iter().enumerate() {
            assert_eq!(c, if i == 42 { 12 } else { 0 }, "bin {i}");
        }
    }

    #[test]
    fn max_intensity_lands_in_last_bin() {
        let img = GrayImage::from_raw(3, 1, vec![0, 128, 255]).expect("valid");
        for bins in [1usize, 2, 3, 7, 255, 256] {
            let hist = histogram(&img.view(), bins).expect("valid");
            assert_eq!(hist.total(), 3);
            assert!(hist.counts()[bins - 1] >= 1, "bins={bins}");
            assert!(hist.counts()[0] >= 1, "bins={bins}");
        }
        let hist = histogram(&img.view(), 2).expect("valid");
        assert_eq!(hist.counts(), &[1, 2]);
        // Finer than one bin per level: 255 sits in the bin containing [255, 256).
        let hist = histogram(&img.view(), 1000).expect("valid");
        assert_eq!(hist.counts()[996], 1);
    }

    #[test]
    fn distribution_is_normalized() {
        let img = GrayImage::from_raw(4, 1, vec![0, 0, 10, 200]).expect("valid");
        let hist = histogram(&img.view(), 4).expect("valid");
        let dist = hist.distribution();
        assert_relative_eq!(dist[0], 0.75);
        assert_relative_eq!(dist[3], 0.25);
        assert_relative_eq!(dist.iter().sum::<f64>(), 1.0);
    }

    #[test]
    fn empty_histogram_has_zero_distribution() {
        let hist = Histogram::from_counts(vec![0; 8]).expect("non-empty");
        assert_eq!(hist.distribution(), vec![0.0; 8]);
        assert_eq!(hist.summary().total, 0);
    }

    #[test]
    fn rejects_zero_bins_and_empty_images() {
        let img = GrayImage::filled(2, 2, 1);
        assert!(histogram(&img.view(), 0).unwrap_err().is_invalid_argument());
        let empty = GrayImage::new(0, 3);
        assert!(histogram(&empty.view(), 16).unwrap_err().is_invalid_input());
    }

    #[test]
    fn summary_and_edges() {
        let img = GrayImage::from_raw(4, 1, vec![0, 1, 1, 255]).expect("valid");
        let hist = histogram(&img.view(), 4).expect("valid");
        let summary = hist.summary();
        assert_eq!(summary.min_count, 0);
        assert_eq!(summary.max_count, 3);
        assert_eq!(hist.bin_edges(), vec![0.0, 64.0, 128.0, 192.0, 256.0]);
        assert_eq!(hist.bin_of(191), 2);
        assert_eq!(hist.bin_of(192), 3);
    }

    #[test]
    fn serializes_counts_as_json() {
        let hist = Histogram::from_counts(vec![1, 0, 2]).expect("non-empty");
        let json = serde_json::to_string(&hist).expect("serialize");
        assert_eq!(json, r#"{"counts":[1,0,2]}"#);
    }
}
