use crate::kernel::{correlate3, SOBEL_X, SOBEL_Y};
use imgprims_core::{
    normalize_to_u8, round_to_u8, GrayImage, GrayImageF32, GrayImageView, Plane, Result,
};
use log::debug;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Per-pixel Sobel gradient.
#[derive(Clone, Debug)]
pub struct Gradient {
    /// Horizontal derivative (correlation with [`SOBEL_X`]).
    pub gx: GrayImageF32,
    /// Vertical derivative (correlation with [`SOBEL_Y`]).
    pub gy: GrayImageF32,
    /// `sqrt(gx^2 + gy^2)`, unscaled.
    pub magnitude: GrayImageF32,
    /// Unsigned orientation in degrees, `[0, 180]`.
    pub angle_deg: GrayImageF32,
}

impl Gradient {
    #[inline]
    pub fn width(&self) -> usize {
        self.magnitude.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.magnitude.height
    }

    /// Magnitude min-max normalized to `[0, 255]`.
    pub fn magnitude_u8(&self) -> Result<GrayImage> {
        normalize_to_u8(&self.magnitude, 0, 255)
    }

    /// Orientation rendered as `angle * 255 / 180`.
    pub fn angle_u8(&self) -> GrayImage {
        self.angle_deg.map_to_u8(|a| angle_to_u8(a) as f64)
    }
}

/// Fold an angle in degrees onto the unsigned range `[0, 180]`.
///
/// The angle is first wrapped to `[0, 360)` and then replaced by
/// `min(a, 360 - a)`, so `θ` and `360 - θ` coincide; 0 and 180 are fixed
/// points and `-0.0` becomes `0.0`.
#[inline]
pub fn fold_angle_deg(angle: f32) -> f32 {
    let a = angle.rem_euclid(360.0);
    let folded = a.min(360.0 - a);
    if folded > 0.0 {
        folded
    } else {
        0.0
    }
}

/// Folded orientation of `(gx, gy)`; a zero vector gives 0°.
#[inline]
fn orientation_deg(gx: f32, gy: f32) -> f32 {
    let deg = (gy as f64).atan2(gx as f64).to_degrees();
    fold_angle_deg(deg as f32)
}

/// Map a folded angle onto 8 bits for display.
#[inline]
pub fn angle_to_u8(angle_deg: f32) -> u8 {
    round_to_u8(angle_deg as f64 * (255.0 / 180.0))
}

/// Sobel gradient of an 8-bit plane.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(src), fields(width = src.width, height = src.height))
)]
pub fn gradient(src: &GrayImageView<'_>) -> Result<Gradient> {
    src.ensure_non_empty()?;
    gradient_f32(&src.to_f32())
}

/// Sobel gradient of a float plane.
pub fn gradient_f32(src: &GrayImageF32) -> Result<Gradient> {
    src.ensure_non_empty()?;

    let gx = correlate3(src, &SOBEL_X);
    let gy = correlate3(src, &SOBEL_Y);

    let (magnitude, angle): (Vec<f32>, Vec<f32>) = gx
        .data
        .iter()
        .zip(&gy.data)
        .map(|(&x, &y)| ((x * x + y * y).sqrt(), orientation_deg(x, y)))
        .unzip();

    let (w, h) = (src.width, src.height);
    let magnitude = GrayImageF32::from_raw(w, h, magnitude)?;
    let angle_deg = GrayImageF32::from_raw(w, h, angle)?;
    debug!(
        "gradient: {w}x{h}, max magnitude {:.1}",
        magnitude.data.iter().fold(0.0f32, |m, &v| m.max(v))
    );

    Ok(Gradient {
        gx,
        gy,
        magnitude,
        angle_deg,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn step_edge() -> GrayImage {
        GrayImage::from_fn(4, 4, |x, _| if x < 2 { 0 } else { 255 })
    }

    #[test]
    fn constant_image_has_zero_gradient_and_angle() {
        let img = GrayImage::filled(5, 4, 90);
        let g = gradient(&img.view()).expect("non-empty");
        assert!(g.magnitude.data.iter().all(|&m| m == 0.0));
        assert!(g.angle_deg.data.iter().all(|&a| a == 0.0 && a.is_sign_positive()));
    }

    #[test]
    fn vertical_step_edge() {
        let g = gradient(&step_edge().view()).expect("non-empty");
        assert_eq!((g.width(), g.height()), (4, 4));
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(g.gy.get(x, y), 0.0, "gy at ({x},{y})");
                assert_eq!(g.angle_deg.get(x, y), 0.0, "angle at ({x},{y})");
            }
            assert_eq!(g.gx.get(0, y), 0.0);
            assert_eq!(g.gx.get(1, y), 1020.0);
            assert_eq!(g.gx.get(2, y), 1020.0);
            assert_eq!(g.gx.get(3, y), 0.0);
            assert_eq!(g.magnitude.get(1, y), 1020.0);
        }
    }

    #[test]
    fn polarity_does_not_change_orientation() {
        let dark_to_bright = step_edge();
        let bright_to_dark = GrayImage::from_fn(4, 4, |x, y| 255 - dark_to_bright.get(x, y));
        let a = gradient(&dark_to_bright.view()).expect("non-empty");
        let b = gradient(&bright_to_dark.view()).expect("non-empty");
        assert_eq!(b.gx.get(1, 1), -1020.0);
        assert_eq!(a.angle_deg.get(1, 1), 0.0);
        assert_eq!(b.angle_deg.get(1, 1), 180.0);
        assert_eq!(a.magnitude, b.magnitude);
    }

    #[test]
    fn horizontal_edge_points_at_ninety_degrees() {
        let img = GrayImage::from_fn(4, 4, |_, y| if y < 2 { 0 } else { 255 });
        let g = gradient(&img.view()).expect("non-empty");
        assert_eq!(g.gy.get(2, 1), -1020.0);
        assert_abs_diff_eq!(g.angle_deg.get(2, 1), 90.0, epsilon = 1e-4);
        assert_abs_diff_eq!(g.angle_deg.get(2, 2), 90.0, epsilon = 1e-4);
    }

    #[test]
    fn folding_is_symmetric_and_bounded() {
        assert_eq!(fold_angle_deg(0.0), 0.0);
        assert_eq!(fold_angle_deg(180.0), 180.0);
        assert_eq!(fold_angle_deg(360.0), 0.0);
        assert_eq!(fold_angle_deg(-90.0), 90.0);
        assert!(fold_angle_deg(-0.0).is_sign_positive());
        for step in 0..=720 {
            let theta = step as f32 * 0.5;
            let folded = fold_angle_deg(theta);
            assert!((0.0..=180.0).contains(&folded), "{theta} -> {folded}");
            assert_eq!(folded, fold_angle_deg(360.0 - theta), "theta={theta}");
        }
    }

    #[test]
    fn diagonal_gradient_folds_to_135() {
        assert_abs_diff_eq!(orientation_deg(-1.0, 1.0), 135.0, epsilon = 1e-4);
        assert_abs_diff_eq!(orientation_deg(-1.0, -1.0), 135.0, epsilon = 1e-4);
        assert_abs_diff_eq!(orientation_deg(1.0, -1.0), 45.0, epsilon = 1e-4);
    }

    #[test]
    fn visualisations() {
        let g = gradient(&step_edge().view()).expect("non-empty");
        let mag = g.magnitude_u8().expect("non-empty");
        assert_eq!(mag.get(0, 0), 0);
        assert_eq!(mag.get(1, 0), 255);
        assert_eq!(angle_to_u8(180.0), 255);
        assert_eq!(angle_to_u8(36.0), 51);
        assert!(g.angle_u8().data.iter().all(|&v| v == 0));
    }

    #[test]
    fn empty_input_is_rejected() {
        let img = GrayImage::new(3, 0);
        assert!(gradient(&img.view()).unwrap_err().is_invalid_input());
    }
}
