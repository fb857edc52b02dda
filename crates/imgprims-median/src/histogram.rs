use imgprims_core::{for_each_row_mut, GrayImage};

/// Index of the level holding the `rank`-th smallest sample (0-based).
#[inline]
fn level_at_rank(hist: &[u32; 256], rank: u32) -> u8 {
    let mut seen = 0u32;
    for (level, &count) in hist.iter().enumerate() {
        seen += count;
        if seen > rank {
            return level as u8;
        }
    }
    u8::MAX
}

/// Row-wise sliding histogram median over an already padded plane.
///
/// Each output row starts from a full window count and then moves right by
/// dropping the leftmost column and adding the next one.
pub(crate) fn median_histogram(padded: &GrayImage, size: usize, out: &mut GrayImage) {
    let rank = (size * size / 2) as u32;
    let pw = padded.width;
    for_each_row_mut(&mut out.data, out.width, |y, out_row| {
        let rows = &padded.data[y * pw..(y + size) * pw];
        let column = |x: usize| rows.chunks_exact(pw).map(move |r| r[x]);

        let mut hist = [0u32; 256];
        for x in 0..size {
            for v in column(x) {
                hist[v as usize] += 1;
            }
        }

        let last = out_row.len() - 1;
        for (x, o) in out_row.iter_mut().enumerate() {
            *o = level_at_rank(&hist, rank);
            if x == last {
                break;
            }
            for v in column(x) {
                hist[v as usize] -= 1;
            }
            for v in column(x + size) {
                hist[v as usize] += 1;
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_lookup() {
        let mut hist = [0u32; 256];
        hist[3] = 2;
        hist[9] = 1;
        hist[200] = 2;
        assert_eq!(level_at_rank(&hist, 0), 3);
        assert_eq!(level_at_rank(&hist, 1), 3);
        assert_eq!(level_at_rank(&hist, 2), 9);
        assert_eq!(level_at_rank(&hist, 4), 200);
    }
}
