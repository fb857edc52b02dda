//! Min-max normalization onto a fixed output range.
//!
//! A constant input has no range to stretch; every output sample is then
//! `out_min`.

use crate::{round_to_u8, GrayImage, GrayImageF32, Plane, Result};
use log::warn;

/// Smallest and largest sample of a non-empty plane. NaN samples are skipped.
pub fn plane_min_max<P>(src: &P) -> Result<(f64, f64)>
where
    P: Plane,
    P::Pixel: Into<f64>,
{
    src.ensure_non_empty()?;
    let (lo, hi) = src.as_slice().iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(lo, hi), &v| {
            let v: f64 = v.into();
            (lo.min(v), hi.max(v))
        },
    );
    Ok((lo, hi))
}

/// Affine map sending `[lo, hi]` onto `[out_min, out_max]`, or the constant
/// `out_min` when the input range is empty.
fn affine(lo: f64, hi: f64, out_min: f64, out_max: f64) -> impl Fn(f64) -> f64 {
    let scale = if hi > lo {
        (out_max - out_min) / (hi - lo)
    } else {
        0.0
    };
    move |v| out_min + (v - lo) * scale
}

/// Linearly rescale `src` so that its range becomes `[out_min, out_max]`.
///
/// `out_min > out_max` is accepted and inverts the ramp.
pub fn normalize_min_max<P>(src: &P, out_min: f32, out_max: f32) -> Result<GrayImageF32>
where
    P: Plane,
    P::Pixel: Into<f64>,
{
    let (lo, hi) = plane_min_max(src)?;
    if hi <= lo {
        warn!("normalize: constant input ({lo}), output filled with {out_min}");
    }
    let map = affine(lo, hi, out_min as f64, out_max as f64);
    let (clip_lo, clip_hi) = (out_min.min(out_max), out_min.max(out_max));
    let data = src
        .as_slice()
        .iter()
        .map(|&v| (map(v.into()) as f32).clamp(clip_lo, clip_hi))
        .collect();
    Ok(GrayImageF32 {
        width: src.width(),
        height: src.height(),
        data,
    })
}

/// Like [`normalize_min_max`] but rounds into an 8-bit plane.
pub fn normalize_to_u8<P>(src: &P, out_min: u8, out_max: u8) -> Result<GrayImage>
where
    P: Plane,
    P::Pixel: Into<f64>,
{
    let (lo, hi) = plane_min_max(src)?;
    if hi <= lo {
        warn!("normalize: constant input ({lo}), output filled with {out_min}");
    }
    let map = affine(lo, hi, out_min as f64, out_max as f64);
    let data = src
        .as_slice()
        .iter()
        .map(|&v| round_to_u8(map(v.into())))
        .collect();
    Ok(GrayImage {
        width: src.width(),
        height: src.height(),
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn ramp() -> GrayImageF32 {
        GrayImageF32::from_raw(4, 1, vec![-2.0, 0.0, 1.0, 6.0]).expect("valid")
    }

    #[test]
    fn output_spans_the_requested_range() {
        let out = normalize_to_u8(&ramp(), 0, 255).expect("non-empty");
        assert_eq!(out.data, vec![0, 64, 96, 255]);

        let out = normalize_min_max(&ramp(), 10.0, 20.0).expect("non-empty");
        assert_abs_diff_eq!(out.data[0], 10.0);
        assert_abs_diff_eq!(out.data[3], 20.0);
        assert_abs_diff_eq!(out.data[1], 12.5, epsilon = 1e-5);
    }

    #[test]
    fn constant_input_maps_to_out_min() {
        let img = GrayImage::filled(3, 3, 77);
        let out = normalize_to_u8(&img, 5, 200).expect("non-empty");
        assert!(out.data.iter().all(|&v| v == 5));

        let f = GrayImageF32::from_raw(2, 1, vec![3.5, 3.5]).expect("valid");
        let out = normalize_min_max(&f, -1.0, 1.0).expect("non-empty");
        assert_eq!(out.data, vec![-1.0, -1.0]);
    }

    #[test]
    fn reversed_range_inverts() {
        let img = GrayImage::from_raw(3, 1, vec![0, 50, 100]).expect("valid");
        let out = normalize_to_u8(&img, 255, 0).expect("non-empty");
        assert_eq!(out.data, vec![255, 128, 0]);
    }

    #[test]
    fn empty_plane_is_rejected() {
        let img = GrayImageF32::new(0, 0);
        assert!(normalize_min_max(&img, 0.0, 1.0).unwrap_err().is_invalid_input());
    }
}
