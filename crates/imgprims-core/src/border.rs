//! Reflective border extension shared by the neighbourhood filters.
//!
//! The convention is "reflect with edge duplication": `cba|abcd|dcb`. The
//! sample one step outside the image repeats the outermost sample, two steps
//! out repeats the next one, and so on. The mapping is periodic with period
//! `2 * len`, so offsets wider than the image are still well defined.

use crate::{GrayImage, GrayImageView, ImageError, Result};

/// Map a possibly out-of-range coordinate onto `[0, len)`.
///
/// `len` must be positive.
#[inline]
pub fn reflect_index(i: isize, len: usize) -> usize {
    debug_assert!(len > 0, "reflect_index on an empty axis");
    let n = len as isize;
    let m = i.rem_euclid(2 * n);
    if m < n {
        m as usize
    } else {
        (2 * n - 1 - m) as usize
    }
}

/// `len + 2 * radius`, or `None` when it does not fit.
fn padded_len(len: usize, radius: usize) -> Option<usize> {
    radius.checked_mul(2)?.checked_add(len)
}

/// Copy `src` into a new image grown by `radius` on every side, filling the
/// margin by reflection.
///
/// Fails with `InvalidArgument` when the padded image would not be
/// addressable.
pub fn pad_reflect(src: &GrayImageView<'_>, radius: usize) -> Result<GrayImage> {
    let too_large = || ImageError::invalid_argument("radius", format!("{radius} is too large"));
    let out_w = padded_len(src.width, radius).ok_or_else(too_large)?;
    let out_h = padded_len(src.height, radius).ok_or_else(too_large)?;
    let area = out_w.checked_mul(out_h).ok_or_else(too_large)?;
    let r = isize::try_from(radius).map_err(|_| too_large())?;
    isize::try_from(out_w.max(out_h)).map_err(|_| too_large())?;

    let col_map: Vec<usize> = (0..out_w as isize)
        .map(|x| reflect_index(x - r, src.width))
        .collect();

    let mut data = Vec::with_capacity(area);
    for y in 0..out_h as isize {
        let sy = reflect_index(y - r, src.height);
        let row = &src.data[sy * src.width..(sy + 1) * src.width];
        data.extend(col_map.iter().map(|&sx| row[sx]));
    }

    Ok(GrayImage {
        width: out_w,
        height: out_h,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflect_repeats_the_edge_sample() {
        let mapped: Vec<usize> = (-3..7).map(|i| reflect_index(i, 4)).collect();
        assert_eq!(mapped, vec![2, 1, 0, 0, 1, 2, 3, 3, 2, 1]);
    }

    #[test]
    fn reflect_handles_offsets_wider_than_the_axis() {
        // period 4 on a two-sample axis: ..1 0 | 0 1 | 1 0 0 1..
        let mapped: Vec<usize> = (-4..6).map(|i| reflect_index(i, 2)).collect();
        assert_eq!(mapped, vec![0, 1, 1, 0, 0, 1, 1, 0, 0, 1]);
        assert!((-10..10).all(|i| reflect_index(i, 1) == 0));
    }

    #[test]
    fn pad_reflect_mirrors_rows_and_columns() {
        let img = GrayImage::from_raw(3, 2, vec![1, 2, 3, 4, 5, 6]).expect("valid");
        let padded = pad_reflect(&img.view(), 1).expect("small radius");
        assert_eq!(padded.width, 5);
        assert_eq!(padded.height, 4);
        #[rustfmt::skip]
        let expected = vec![
            1, 1, 2, 3, 3,
            1, 1, 2, 3, 3,
            4, 4, 5, 6, 6,
            4, 4, 5, 6, 6,
        ];
        assert_eq!(padded.data, expected);
    }

    #[test]
    fn pad_by_zero_is_a_copy() {
        let img = GrayImage::from_raw(2, 2, vec![9, 8, 7, 6]).expect("valid");
        assert_eq!(pad_reflect(&img.view(), 0).expect("zero radius"), img);
    }

    #[test]
    fn unaddressable_padding_is_rejected() {
        let img = GrayImage::filled(3, 3, 7);
        for radius in [usize::MAX / 2, usize::MAX / 4] {
            let err = pad_reflect(&img.view(), radius).unwrap_err();
            assert!(err.is_invalid_argument(), "radius={radius}");
        }
    }
}
