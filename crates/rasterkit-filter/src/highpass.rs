//! Two-pass high-pass (sharpening) filter
//!
//! Pass 1 correlates the image row-major into an auxiliary buffer. Pass 2
//! correlates the auxiliary buffer column-major back into the image. Both
//! passes truncate toward zero and floor negative sums at 0; only the final
//! write saturates at 255.

use crate::kernel::Kernel;
use crate::linear::{ColumnOrder, window_sum};
use crate::scratch::AuxBuffer;
use rasterkit_core::{Image, Region, clamp_intensity};
use tracing::{debug, trace};

/// High-pass filter with a configurable kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighPassFilter {
    kernel: Kernel,
}

impl Default for HighPassFilter {
    fn default() -> Self {
        Self::new(Kernel::high_pass())
    }
}

impl HighPassFilter {
    pub fn new(kernel: Kernel) -> Self {
        Self { kernel }
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    /// Filter `image` in place.
    pub fn apply(&self, image: &mut Image) {
        let region = Region::inset(image.width(), image.height(), self.kernel.inset());
        debug!(
            width = image.width(),
            height = image.height(),
            "high-pass filter"
        );

        let mut aux = AuxBuffer::from_image(image);
        for (x, y) in region.row_major() {
            let sum = window_sum(&self.kernel, x, y, ColumnOrder::Forward, |sx, sy| {
                image.value_unchecked(sx, sy) as f64
            });
            aux.set(x, y, (sum as i32).max(0));
        }
        trace!(pixels = region.area(), "high-pass pass 1 done");

        for (x, y) in region.col_major() {
            let sum = window_sum(&self.kernel, x, y, ColumnOrder::Forward, |sx, sy| {
                aux.get(sx, sy) as f64
            });
            image.set_gray_unchecked(x, y, clamp_intensity((sum as i32).max(0)));
        }
        trace!("high-pass pass 2 done");
    }
}

/// High-pass filter `image` in place with the default sharpening kernel.
pub fn high_pass(image: &mut Image) {
    HighPassFilter::default().apply(image);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rasterkit_core::Pixel;

    #[test]
    fn test_flat_image_goes_to_zero() {
        // Kernel weights sum to 0, so every interior sum is 0.
        let mut img = Image::filled(5, 5, Pixel::gray(120)).unwrap();
        high_pass(&mut img);
        assert_eq!(img.get(2, 2).unwrap(), Pixel::gray(0));
        assert_eq!(img.get(0, 0).unwrap(), Pixel::gray(120));
    }

    #[test]
    fn test_isolated_peak() {
        // 3x3 image: only (1, 1) is interior.
        // Pass 1: 4 * 100 = 400 (no upper clamp in the buffer).
        // Pass 2 reads the buffer: 4 * 400 - 0.5 * 8 * 0 = 1600, saturates.
        let mut img = Image::from_gray(3, 3, &[0, 0, 0, 0, 100, 0, 0, 0, 0]).unwrap();
        high_pass(&mut img);
        assert_eq!(img.get(1, 1).unwrap(), Pixel::gray(255));
    }

    #[test]
    fn test_intermediate_floor_at_zero() {
        // Centre darker than its surround: pass 1 is negative and floors at
        // 0, pass 2 then sees 0 at the centre and 20 around it.
        let mut img = Image::from_gray(3, 3, &[20, 20, 20, 20, 0, 20, 20, 20, 20]).unwrap();
        high_pass(&mut img);
        assert_eq!(img.get(1, 1).unwrap(), Pixel::gray(0));
    }

    #[test]
    fn test_small_image_unchanged() {
        let src = Image::from_gray(2, 4, &[9, 8, 7, 6, 5, 4, 3, 2]).unwrap();
        let mut img = src.clone();
        high_pass(&mut img);
        assert_eq!(img, src);
    }
}
