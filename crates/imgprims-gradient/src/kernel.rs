//! Fixed 3×3 kernels and their correlation with a float plane.

use imgprims_core::{for_each_row_mut, reflect_index, GrayImageF32};

/// Immutable 3×3 coefficient matrix, indexed `[row][col]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Kernel3(pub [[f32; 3]; 3]);

/// Horizontal Sobel operator; positive where intensity rises to the right.
pub const SOBEL_X: Kernel3 = Kernel3([[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]]);

/// Vertical Sobel operator; positive where intensity rises upwards.
pub const SOBEL_Y: Kernel3 = Kernel3([[1.0, 2.0, 1.0], [0.0, 0.0, 0.0], [-1.0, -2.0, -1.0]]);

/// Correlate `src` with `kernel` (no flip), reflecting at the borders.
///
/// The output has the dimensions of the input. `src` must be non-empty.
pub fn correlate3(src: &GrayImageF32, kernel: &Kernel3) -> GrayImageF32 {
    let w = src.width;
    let h = src.height;
    let mut out = GrayImageF32::new(w, h);
    if w == 0 || h == 0 {
        return out;
    }

    let cols: Vec<[usize; 3]> = (0..w as isize)
        .map(|x| {
            [
                reflect_index(x - 1, w),
                x as usize,
                reflect_index(x + 1, w),
            ]
        })
        .collect();
    let k = &kernel.0;

    for_each_row_mut(&mut out.data, w, |y, out_row| {
        let y = y as isize;
        let rows = [
            reflect_index(y - 1, h),
            y as usize,
            reflect_index(y + 1, h),
        ]
        .map(|ry| &src.data[ry * w..(ry + 1) * w]);

        for (o, c) in out_row.iter_mut().zip(&cols) {
            let mut acc = 0.0f32;
            for (row, kr) in rows.iter().zip(k) {
                acc += row[c[0]] * kr[0] + row[c[1]] * kr[1] + row[c[2]] * kr[2];
            }
            *o = acc;
        }
    });

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_plane_has_zero_response() {
        let src = GrayImageF32::from_raw(3, 3, vec![7.0; 9]).expect("valid");
        for kernel in [SOBEL_X, SOBEL_Y] {
            assert!(correlate3(&src, &kernel).data.iter().all(|&v| v == 0.0));
        }
    }

    #[test]
    fn horizontal_ramp_response() {
        // x = 0,1,2,3 in every row; borders reflect so the outer columns see
        // a single step instead of two.
        let src = GrayImageF32::from_raw(4, 2, vec![0.0, 1.0, 2.0, 3.0, 0.0, 1.0, 2.0, 3.0])
            .expect("valid");
        let gx = correlate3(&src, &SOBEL_X);
        assert_eq!(&gx.data[..4], &[4.0, 8.0, 8.0, 4.0]);
        let gy = correlate3(&src, &SOBEL_Y);
        assert!(gy.data.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn vertical_orientation_sign() {
        // Brighter at the top gives a positive vertical response.
        let src = GrayImageF32::from_raw(1, 3, vec![10.0, 5.0, 0.0]).expect("valid");
        let gy = correlate3(&src, &SOBEL_Y);
        // Single column: both horizontal neighbours reflect onto the centre.
        assert_eq!(gy.data, vec![20.0, 40.0, 20.0]);
    }
}
