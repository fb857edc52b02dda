//! JSON-configured chains of image operations.
//!
//! A [`PipelineConfig`] is an ordered list of [`Operation`]s. Every operation
//! is applied to each channel independently. All parameters are validated
//! before the first operation runs, so a bad step late in the chain fails
//! without doing any work.
//!
//! ```json
//! {
//!   "steps": [
//!     { "op": "median", "size": 3 },
//!     { "op": "stretch", "r_min": 20, "r_max": 220 },
//!     { "op": "directional_edges", "min_deg": 80, "max_deg": 100, "magnitude_threshold": 40 }
//!   ]
//! }
//! ```

use imgprims_core::{GrayImage, GrayImageView, ImageError, PlanarImage, Result};
use imgprims_gradient::{
    direction_mask, gradient, magnitude_mask, DirectionalEdgeParams, SobelEdgeParams,
};
use imgprims_histogram::{
    equalize_planar, histogram_planar, stretch_planar, HistogramParams, HistogramSummary,
    StretchParams,
};
use imgprims_median::{median_filter_planar, MedianParams};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[cfg(feature = "tracing")]
use tracing::instrument;

#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("step {index} ({op}) failed: {source}")]
    Step {
        index: usize,
        op: &'static str,
        #[source]
        source: ImageError,
    },
    #[error(transparent)]
    Image(#[from] ImageError),
}

/// One stage of a pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    Stretch(StretchParams),
    Equalize,
    Median(MedianParams),
    SobelEdges(SobelEdgeParams),
    DirectionalEdges(DirectionalEdgeParams),
    /// Sobel magnitude, min-max normalized to 8 bits.
    GradientMagnitude,
    /// Folded Sobel orientation, `0..180` degrees rendered as `0..255`.
    GradientAngle,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Stretch(_) => "stretch",
            Operation::Equalize => "equalize",
            Operation::Median(_) => "median",
            Operation::SobelEdges(_) => "sobel_edges",
            Operation::DirectionalEdges(_) => "directional_edges",
            Operation::GradientMagnitude => "gradient_magnitude",
            Operation::GradientAngle => "gradient_angle",
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Operation::Stretch(p) => p.validate(),
            Operation::Median(p) => p.validate(),
            Operation::SobelEdges(p) => p.validate(),
            Operation::DirectionalEdges(p) => p.validate(),
            Operation::Equalize | Operation::GradientMagnitude | Operation::GradientAngle => Ok(()),
        }
    }

    /// Apply to every channel of `src`.
    pub fn apply(&self, src: &PlanarImage) -> Result<PlanarImage> {
        match self {
            Operation::Stretch(p) => stretch_planar(src, p),
            Operation::Equalize => equalize_planar(src),
            Operation::Median(p) => median_filter_planar(src, p),
            Operation::SobelEdges(p) => {
                src.map_channels(|ch| magnitude_mask(&gradient(&ch)?, p.threshold))
            }
            Operation::DirectionalEdges(p) => {
                src.map_channels(|ch| direction_mask(&gradient(&ch)?, p))
            }
            Operation::GradientMagnitude => src.map_channels(|ch| gradient(&ch)?.magnitude_u8()),
            Operation::GradientAngle => src.map_channels(|ch| Ok(gradient(&ch)?.angle_u8())),
        }
    }
}

/// Ordered list of operations plus report settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub steps: Vec<Operation>,
    /// Binning of the output histograms recorded in the report.
    #[serde(default)]
    pub histogram: HistogramParams,
}

impl PipelineConfig {
    pub fn from_json_str(raw: &str) -> std::result::Result<Self, PipelineError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> std::result::Result<Self, PipelineError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> std::result::Result<(), PipelineError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Check every step and the report settings without touching pixels.
    pub fn validate(&self) -> std::result::Result<(), PipelineError> {
        if self.histogram.bins == 0 {
            return Err(ImageError::invalid_argument("bins", "must be positive").into());
        }
        for (index, op) in self.steps.iter().enumerate() {
            op.validate().map_err(|source| PipelineError::Step {
                index,
                op: op.name(),
                source,
            })?;
        }
        Ok(())
    }

    /// Run all steps in order and describe the result.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "info",
            skip(self, src),
            fields(width = src.width(), height = src.height(), steps = self.steps.len())
        )
    )]
    pub fn run(
        &self,
        src: &PlanarImage,
    ) -> std::result::Result<(PlanarImage, PipelineReport), PipelineError> {
        self.validate()?;
        src.ensure_non_empty()?;

        let mut current = src.clone();
        for (index, op) in self.steps.iter().enumerate() {
            debug!("pipeline step {index}: {op:?}");
            current = op.apply(&current).map_err(|source| PipelineError::Step {
                index,
                op: op.name(),
                source,
            })?;
        }

        let histograms = histogram_planar(&current, self.histogram.bins)?
            .iter()
            .map(|h| h.summary())
            .collect();
        info!(
            "pipeline: {} step(s) over {}x{}x{}",
            self.steps.len(),
            src.width(),
            src.height(),
            src.channel_count()
        );

        let report = PipelineReport {
            width: src.width(),
            height: src.height(),
            channels: src.channel_count(),
            steps: self.steps.iter().map(|op| op.name().to_string()).collect(),
            histograms,
        };
        Ok((current, report))
    }

    /// Single-plane convenience wrapper around [`PipelineConfig::run`].
    pub fn run_gray(
        &self,
        src: &GrayImageView<'_>,
    ) -> std::result::Result<(GrayImage, PipelineReport), PipelineError> {
        let (out, report) = self.run(&PlanarImage::from_gray(src.to_image()))?;
        let gray = out
            .into_channels()
            .into_iter()
            .next()
            .ok_or(imgprims_core::InputError::NoChannels)
            .map_err(ImageError::from)?;
        Ok((gray, report))
    }
}

/// Summary of a pipeline run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PipelineReport {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
    pub steps: Vec<String>,
    /// Output histogram summary per channel.
    pub histograms: Vec<HistogramSummary>,
}

impl PipelineReport {
    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> std::result::Result<Self, PipelineError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> std::result::Result<(), PipelineError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
