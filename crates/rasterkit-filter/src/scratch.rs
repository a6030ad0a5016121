//! Auxiliary buffer for multi-pass filters
//!
//! A full-frame plane of signed sums, owned by a single filter call. It
//! starts as a copy of the source's representative channel, so cells the
//! first pass does not compute (the border) already hold the source value.
//! Values are not clamped while staged; clamping happens on commit.

use rasterkit_core::{Image, Region, clamp_intensity};

#[derive(Debug, Clone)]
pub(crate) struct AuxBuffer {
    width: u32,
    height: u32,
    data: Vec<i32>,
}

impl AuxBuffer {
    pub(crate) fn from_image(image: &Image) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            data: image.pixels().iter().map(|p| p.value() as i32).collect(),
        }
    }

    #[inline]
    pub(crate) fn get(&self, x: u32, y: u32) -> i32 {
        self.data[self.index(x, y)]
    }

    #[inline]
    pub(crate) fn set(&mut self, x: u32, y: u32, v: i32) {
        let idx = self.index(x, y);
        self.data[idx] = v;
    }

    /// Write the staged values of `region` into `image`, clamped to
    /// `[0, 255]`, in all three channels.
    pub(crate) fn commit(&self, image: &mut Image, region: Region) {
        for (x, y) in region.row_major() {
            image.set_gray_unchecked(x, y, clamp_intensity(self.get(x, y)));
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y as usize * self.width as usize + x as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rasterkit_core::Pixel;

    #[test]
    fn test_starts_as_source_copy() {
        let img = Image::from_gray(3, 2, &[1, 2, 3, 4, 5, 6]).unwrap();
        let aux = AuxBuffer::from_image(&img);
        assert_eq!(aux.get(2, 0), 3);
        assert_eq!(aux.get(0, 1), 4);
    }

    #[test]
    fn test_commit_clamps_region_only() {
        let mut img = Image::from_gray(3, 3, &[7; 9]).unwrap();
        let mut aux = AuxBuffer::from_image(&img);
        aux.set(1, 1, 400);
        aux.set(0, 0, -20);
        aux.commit(&mut img, Region::inset(3, 3, 1));
        assert_eq!(img.get(1, 1).unwrap(), Pixel::gray(255));
        // (0, 0) is outside the committed region.
        assert_eq!(img.get(0, 0).unwrap(), Pixel::gray(7));
    }
}
