use imgprims_core::{for_each_row_mut, GrayImage};

/// Literal sorted-window median over an already padded plane.
pub(crate) fn median_sorted(padded: &GrayImage, size: usize, out: &mut GrayImage) {
    let mid = size * size / 2;
    let pw = padded.width;
    for_each_row_mut(&mut out.data, out.width, |y, out_row| {
        let mut window = Vec::with_capacity(size * size);
        for (x, o) in out_row.iter_mut().enumerate() {
            window.clear();
            for wy in y..y + size {
                window.extend_from_slice(&padded.data[wy * pw + x..wy * pw + x + size]);
            }
            // Same element a full sort would put at `mid`.
            *o = *window.select_nth_unstable(mid).1;
        }
    });
}
