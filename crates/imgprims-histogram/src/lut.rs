use imgprims_core::{for_each_row_mut, GrayImage, GrayImageView, PlanarImage, Result};

/// 256-entry intensity lookup table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lut(pub [u8; 256]);

impl Lut {
    pub fn identity() -> Self {
        Self::from_fn(|v| v)
    }

    pub fn from_fn(f: impl Fn(u8) -> u8) -> Self {
        Self(std::array::from_fn(|i| f(i as u8)))
    }

    #[inline]
    pub fn get(&self, v: u8) -> u8 {
        self.0[v as usize]
    }

    /// One pass over `src`, one lookup per sample.
    pub fn apply(&self, src: &GrayImageView<'_>) -> GrayImage {
        let mut out = GrayImage::new(src.width, src.height);
        for_each_row_mut(&mut out.data, src.width, |y, row| {
            let src_row = &src.data[y * src.width..(y + 1) * src.width];
            for (o, &v) in row.iter_mut().zip(src_row) {
                *o = self.0[v as usize];
            }
        });
        out
    }

    pub fn apply_planar(&self, src: &PlanarImage) -> Result<PlanarImage> {
        src.map_channels(|ch| Ok(self.apply(&ch)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_table_per_sample() {
        let lut = Lut::from_fn(|v| 255 - v);
        let img = GrayImage::from_raw(2, 2, vec![0, 10, 200, 255]).expect("valid");
        assert_eq!(lut.apply(&img.view()).data, vec![255, 245, 55, 0]);
        assert_eq!(Lut::identity().apply(&img.view()), img);
    }
}
