//! High-level facade for the `imgprims-*` workspace.
//!
//! This crate provides:
//! - re-exports of the component crates (`core`, `histogram`, `gradient`,
//!   `median`)
//! - a JSON-configured [`pipeline`] that chains operations over a
//!   multi-channel image and produces a serialisable report
//! - (feature `image`) adapters between `image` crate buffers and the
//!   planes used here
//!
//! ## Quickstart
//!
//! ```no_run
//! use imgprims::pipeline::PipelineConfig;
//! use image::ImageReader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = ImageReader::open("photo.png")?.decode()?;
//! let planar = imgprims::convert::planar_from_dynamic(&img)?;
//!
//! let cfg = PipelineConfig::from_json_str(
//!     r#"{ "steps": [ { "op": "median", "size": 5 }, { "op": "equalize" } ] }"#,
//! )?;
//! let (out, report) = cfg.run(&planar)?;
//! imgprims::convert::planar_to_dynamic(&out)?.save("out.png")?;
//! println!("{}", serde_json::to_string_pretty(&report)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `imgprims::core`: image planes, reflective borders, normalization, errors.
//! - `imgprims::histogram`: histograms, contrast stretch, equalization.
//! - `imgprims::gradient`: Sobel gradient, magnitude and directional edges.
//! - `imgprims::median`: median filter.

pub use imgprims_core as core;
pub use imgprims_gradient as gradient;
pub use imgprims_histogram as histogram;
pub use imgprims_median as median;

pub use imgprims_core::{
    GrayImage, GrayImageF32, GrayImageView, ImageError, InputError, PlanarImage,
};

#[cfg(feature = "image")]
pub mod convert;
pub mod pipeline;

#[cfg(feature = "tracing")]
mod logging;
#[cfg(feature = "tracing")]
pub use logging::init_tracing_with_log;
