//! Row-wise execution helper.
//!
//! With the `rayon` feature rows are processed on the rayon pool, otherwise
//! sequentially. Each row is written by exactly one call, so results do not
//! depend on the schedule.

/// Call `f(y, row)` for every `width`-sized row of `data`.
pub fn for_each_row_mut<T, F>(data: &mut [T], width: usize, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    if width == 0 {
        return;
    }

    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        data.par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| f(y, row));
    }

    #[cfg(not(feature = "rayon"))]
    {
        data.chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| f(y, row));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visits_every_row_once() {
        let mut data = vec![0usize; 12];
        for_each_row_mut(&mut data, 4, |y, row| {
            for (x, v) in row.iter_mut().enumerate() {
                *v = y * 10 + x;
            }
        });
        assert_eq!(data, vec![0, 1, 2, 3, 10, 11, 12, 13, 20, 21, 22, 23]);
    }
}
