//! Pixel access functions
//!
//! Checked accessors return [`Error::IndexOutOfBounds`] for coordinates
//! outside the frame. Filters use the unchecked forms because their scan
//! regions are inset so that every neighbour they touch is in the frame.

use super::{Image, Pixel};
use crate::error::{Error, Result};

impl Image {
    /// Get the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if the coordinate is outside the
    /// image.
    pub fn get(&self, x: u32, y: u32) -> Result<Pixel> {
        self.check_bounds(x, y)?;
        Ok(self.data[self.index(x, y)])
    }

    /// Set the pixel at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if the coordinate is outside the
    /// image.
    pub fn set(&mut self, x: u32, y: u32, pixel: Pixel) -> Result<()> {
        self.check_bounds(x, y)?;
        let idx = self.index(x, y);
        self.data[idx] = pixel;
        Ok(())
    }

    /// Get a pixel without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get_unchecked(&self, x: u32, y: u32) -> Pixel {
        debug_assert!(x < self.width && y < self.height);
        self.data[self.index(x, y)]
    }

    /// Set a pixel without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn set_unchecked(&mut self, x: u32, y: u32, pixel: Pixel) {
        debug_assert!(x < self.width && y < self.height);
        let idx = self.index(x, y);
        self.data[idx] = pixel;
    }

    /// Representative channel at `(x, y)`, unchecked.
    #[inline]
    pub fn value_unchecked(&self, x: u32, y: u32) -> u8 {
        self.get_unchecked(x, y).value()
    }

    /// Write `v` into all three channels at `(x, y)`, unchecked.
    #[inline]
    pub fn set_gray_unchecked(&mut self, x: u32, y: u32, v: u8) {
        self.set_unchecked(x, y, Pixel::gray(v));
    }

    fn check_bounds(&self, x: u32, y: u32) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_roundtrip() {
        let mut img = Image::new(3, 3).unwrap();
        img.set(2, 1, Pixel::rgb(10, 20, 30)).unwrap();
        assert_eq!(img.get(2, 1).unwrap(), Pixel::rgb(10, 20, 30));
        assert_eq!(img.value_unchecked(2, 1), 10);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut img = Image::new(3, 2).unwrap();
        assert_eq!(
            img.get(3, 0).unwrap_err(),
            Error::IndexOutOfBounds {
                x: 3,
                y: 0,
                width: 3,
                height: 2
            }
        );
        assert!(img.get(0, 2).is_err());
        assert!(img.set(5, 5, Pixel::WHITE).is_err());
        // A failed set leaves the image untouched.
        assert!(img.pixels().iter().all(|&p| p == Pixel::BLACK));
    }

    #[test]
    fn test_set_gray_writes_all_channels() {
        let mut img = Image::filled(2, 2, Pixel::rgb(1, 2, 3)).unwrap();
        img.set_gray_unchecked(1, 1, 77);
        assert_eq!(img.get(1, 1).unwrap(), Pixel::gray(77));
        assert_eq!(img.get(0, 0).unwrap(), Pixel::rgb(1, 2, 3));
    }
}
