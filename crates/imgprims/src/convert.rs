//! Adapters between `image` crate buffers and `imgprims` planes.
//!
//! Decoding and encoding stay with the `image` crate; these helpers only move
//! samples between layouts.

use image::{DynamicImage, GrayAlphaImage, GrayImage as LumaImage, RgbImage, RgbaImage};
use imgprims_core::{GrayImage, GrayImageView, ImageError, InputError, PlanarImage, Result};

fn dims_u32(width: usize, height: usize) -> Result<(u32, u32)> {
    let w = u32::try_from(width)
        .map_err(|_| ImageError::invalid_argument("width", "does not fit in u32"))?;
    let h = u32::try_from(height)
        .map_err(|_| ImageError::invalid_argument("height", "does not fit in u32"))?;
    Ok((w, h))
}

/// Borrow an `image::GrayImage` as a plane view.
pub fn gray_view(img: &LumaImage) -> GrayImageView<'_> {
    GrayImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

pub fn from_luma8(img: &LumaImage) -> GrayImage {
    gray_view(img).to_image()
}

pub fn to_luma8(img: &GrayImage) -> Result<LumaImage> {
    let (w, h) = dims_u32(img.width, img.height)?;
    LumaImage::from_raw(w, h, img.data.clone()).ok_or_else(|| {
        InputError::BufferLength {
            expected: img.width * img.height,
            got: img.data.len(),
        }
        .into()
    })
}

pub fn planar_from_rgb8(img: &RgbImage) -> Result<PlanarImage> {
    PlanarImage::from_interleaved(img.width() as usize, img.height() as usize, 3, img.as_raw())
}

pub fn planar_to_rgb8(img: &PlanarImage) -> Result<RgbImage> {
    expect_channels(img, 3)?;
    let (w, h) = dims_u32(img.width(), img.height())?;
    RgbImage::from_raw(w, h, img.to_interleaved()).ok_or_else(|| length_error(img))
}

/// Split a decoded image into planes: 1 channel for grayscale, 2 for
/// grayscale with alpha, 3 for colour and 4 for colour with alpha. Higher bit
/// depths are reduced to 8.
pub fn planar_from_dynamic(img: &DynamicImage) -> Result<PlanarImage> {
    let color = img.color();
    match (color.has_color(), color.has_alpha()) {
        (false, false) => Ok(PlanarImage::from_gray(from_luma8(&img.to_luma8()))),
        (false, true) => {
            let la = img.to_luma_alpha8();
            PlanarImage::from_interleaved(
                la.width() as usize,
                la.height() as usize,
                2,
                la.as_raw(),
            )
        }
        (true, true) => {
            let rgba = img.to_rgba8();
            PlanarImage::from_interleaved(
                rgba.width() as usize,
                rgba.height() as usize,
                4,
                rgba.as_raw(),
            )
        }
        (true, false) => planar_from_rgb8(&img.to_rgb8()),
    }
}

/// Reassemble planes into an 8-bit `DynamicImage` (1 to 4 channels).
pub fn planar_to_dynamic(img: &PlanarImage) -> Result<DynamicImage> {
    let (w, h) = dims_u32(img.width(), img.height())?;
    match img.channel_count() {
        1 => Ok(DynamicImage::ImageLuma8(to_luma8(&img.channels()[0])?)),
        2 => GrayAlphaImage::from_raw(w, h, img.to_interleaved())
            .map(DynamicImage::ImageLumaA8)
            .ok_or_else(|| length_error(img)),
        3 => Ok(DynamicImage::ImageRgb8(planar_to_rgb8(img)?)),
        4 => RgbaImage::from_raw(w, h, img.to_interleaved())
            .map(DynamicImage::ImageRgba8)
            .ok_or_else(|| length_error(img)),
        n => Err(ImageError::invalid_argument(
            "channels",
            format!("cannot encode {n} channels as an 8-bit image"),
        )),
    }
}

fn expect_channels(img: &PlanarImage, n: usize) -> Result<()> {
    if img.channel_count() != n {
        return Err(ImageError::invalid_argument(
            "channels",
            format!("expected {n} channels, got {}", img.channel_count()),
        ));
    }
    Ok(())
}

fn length_error(img: &PlanarImage) -> ImageError {
    let expected = img.width() * img.height() * img.channel_count();
    InputError::BufferLength {
        expected,
        got: img.to_interleaved().len(),
    }
    .into()
}
