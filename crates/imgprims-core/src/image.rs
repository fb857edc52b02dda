//! Single-channel planes and the planar multi-channel container.
//!
//! All planes are row-major with `stride == width`. Operations borrow their
//! input through [`GrayImageView`] and hand back a freshly allocated
//! [`GrayImage`] or [`GrayImageF32`].

use crate::{ImageError, InputError, Result};

/// Read access shared by all plane types.
pub trait Plane {
    type Pixel: Copy;

    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Row-major samples, `len == width * height`.
    fn as_slice(&self) -> &[Self::Pixel];

    #[inline]
    fn row(&self, y: usize) -> &[Self::Pixel] {
        let w = self.width();
        &self.as_slice()[y * w..(y + 1) * w]
    }

    #[inline]
    fn sample_count(&self) -> usize {
        self.width() * self.height()
    }

    /// Fail with [`InputError::ZeroArea`] when either axis is empty.
    fn ensure_non_empty(&self) -> Result<()> {
        if self.width() == 0 || self.height() == 0 {
            return Err(InputError::ZeroArea {
                width: self.width(),
                height: self.height(),
            }
            .into());
        }
        Ok(())
    }
}

/// Fail with [`InputError::ShapeMismatch`] unless `b` has the size of `a`.
pub fn ensure_same_shape<A: Plane, B: Plane>(a: &A, b: &B) -> Result<()> {
    if a.width() != b.width() || a.height() != b.height() {
        return Err(InputError::ShapeMismatch {
            expected_width: a.width(),
            expected_height: a.height(),
            width: b.width(),
            height: b.height(),
        }
        .into());
    }
    Ok(())
}

fn check_len(width: usize, height: usize, got: usize) -> Result<()> {
    let expected = width
        .checked_mul(height)
        .ok_or_else(|| ImageError::invalid_argument("width", "width * height overflows"))?;
    if got != expected {
        return Err(InputError::BufferLength { expected, got }.into());
    }
    Ok(())
}

/// Clip to `[0, 255]` and round half to even.
///
/// NaN maps to 0.
#[inline]
pub fn round_to_u8(v: f64) -> u8 {
    v.clamp(0.0, 255.0).round_ties_even() as u8
}

#[derive(Clone, Copy, Debug)]
pub struct GrayImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, len = w*h
}

impl<'a> GrayImageView<'a> {
    pub fn new(width: usize, height: usize, data: &'a [u8]) -> Result<Self> {
        check_len(width, height, data.len())?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    pub fn to_image(&self) -> GrayImage {
        GrayImage {
            width: self.width,
            height: self.height,
            data: self.data.to_vec(),
        }
    }

    pub fn to_f32(&self) -> GrayImageF32 {
        GrayImageF32 {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| v as f32).collect(),
        }
    }
}

impl Plane for GrayImageView<'_> {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.width
    }
    #[inline]
    fn height(&self) -> usize {
        self.height
    }
    #[inline]
    fn as_slice(&self) -> &[u8] {
        self.data
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl GrayImage {
    /// Zero-filled image.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, 0)
    }

    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        check_len(width, height, data.len())?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build an image by evaluating `f(x, y)` at every position.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> u8) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    #[inline]
    pub fn view(&self) -> GrayImageView<'_> {
        GrayImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: u8) {
        self.data[y * self.width + x] = v;
    }
}

impl Plane for GrayImage {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.width
    }
    #[inline]
    fn height(&self) -> usize {
        self.height
    }
    #[inline]
    fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

/// Owned single-channel `f32` plane for signed or fractional results
/// (gradients, intermediate rescale).
#[derive(Clone, Debug, PartialEq)]
pub struct GrayImageF32 {
    pub width: usize,
    pub height: usize,
    pub data: Vec<f32>,
}

impl GrayImageF32 {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    pub fn from_raw(width: usize, height: usize, data: Vec<f32>) -> Result<Self> {
        check_len(width, height, data.len())?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        self.data[y * self.width + x] = v;
    }

    /// Apply `f` to every sample and round the result into an 8-bit plane.
    pub fn map_to_u8(&self, f: impl Fn(f32) -> f64) -> GrayImage {
        GrayImage {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| round_to_u8(f(v))).collect(),
        }
    }
}

impl Plane for GrayImageF32 {
    type Pixel = f32;

    #[inline]
    fn width(&self) -> usize {
        self.width
    }
    #[inline]
    fn height(&self) -> usize {
        self.height
    }
    #[inline]
    fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

/// Ordered set of equally sized 8-bit channels.
///
/// Filters treat each channel independently; [`PlanarImage::map_channels`]
/// is the fan-out/fan-in used for that and keeps the channel order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlanarImage {
    width: usize,
    height: usize,
    channels: Vec<GrayImage>,
}

impl PlanarImage {
    pub fn new(channels: Vec<GrayImage>) -> Result<Self> {
        let first = channels.first().ok_or(InputError::NoChannels)?;
        for ch in &channels[1..] {
            ensure_same_shape(first, ch)?;
        }
        Ok(Self {
            width: first.width,
            height: first.height,
            channels,
        })
    }

    pub fn from_gray(image: GrayImage) -> Self {
        Self {
            width: image.width,
            height: image.height,
            channels: vec![image],
        }
    }

    /// Split interleaved samples (`c0 c1 .. cN c0 c1 ..`) into planes.
    pub fn from_interleaved(
        width: usize,
        height: usize,
        channel_count: usize,
        data: &[u8],
    ) -> Result<Self> {
        if channel_count == 0 {
            return Err(InputError::NoChannels.into());
        }
        let pixels = width
            .checked_mul(height)
            .ok_or_else(|| ImageError::invalid_argument("width", "width * height overflows"))?;
        check_len(pixels, channel_count, data.len())?;
        let channels = (0..channel_count)
            .map(|c| GrayImage {
                width,
                height,
                data: data.iter().skip(c).step_by(channel_count).copied().collect(),
            })
            .collect();
        Ok(Self {
            width,
            height,
            channels,
        })
    }

    /// Interleave the planes back into a single buffer.
    pub fn to_interleaved(&self) -> Vec<u8> {
        let n = self.channels.len();
        let mut out = vec![0u8; self.width * self.height * n];
        for (c, ch) in self.channels.iter().enumerate() {
            for (i, &v) in ch.data.iter().enumerate() {
                out[i * n + c] = v;
            }
        }
        out
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn channels(&self) -> &[GrayImage] {
        &self.channels
    }

    pub fn channel(&self, index: usize) -> Option<&GrayImage> {
        self.channels.get(index)
    }

    pub fn into_channels(self) -> Vec<GrayImage> {
        self.channels
    }

    pub fn ensure_non_empty(&self) -> Result<()> {
        self.channels[0].ensure_non_empty()
    }

    /// Run `f` on every channel and collect the results in channel order.
    pub fn map_channels_to<T, F>(&self, f: F) -> Result<Vec<T>>
    where
        F: Fn(GrayImageView<'_>) -> Result<T>,
    {
        self.channels.iter().map(|ch| f(ch.view())).collect()
    }

    /// Run a plane-to-plane operation on every channel and reassemble.
    pub fn map_channels<F>(&self, f: F) -> Result<PlanarImage>
    where
        F: Fn(GrayImageView<'_>) -> Result<GrayImage>,
    {
        PlanarImage::new(self.map_channels_to(f)?)
    }
}

impl From<GrayImage> for PlanarImage {
    fn from(image: GrayImage) -> Self {
        Self::from_gray(image)
    }
}
