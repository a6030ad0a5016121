//! Grayscale conversion
//!
//! Luminance uses the weights 0.3 / 0.59 / 0.11, evaluated in `f64` in
//! that order and truncated toward zero. Truncation means some neutral
//! inputs come out one level darker (`(1, 1, 1)` becomes 0); that is the
//! established output of this conversion and is kept as is.

use super::{Image, Pixel};
use tracing::debug;

const WEIGHT_R: f64 = 0.3;
const WEIGHT_G: f64 = 0.59;
const WEIGHT_B: f64 = 0.11;

/// Luminance of a single pixel.
#[inline]
pub fn gray_value(pixel: Pixel) -> u8 {
    let y = WEIGHT_R * pixel.r as f64 + WEIGHT_G * pixel.g as f64 + WEIGHT_B * pixel.b as f64;
    y as u8
}

impl Image {
    /// Replace every pixel with its luminance in all three channels.
    pub fn convert_to_gray(&mut self) {
        debug!(width = self.width, height = self.height, "convert_to_gray");
        for p in self.data.iter_mut() {
            *p = Pixel::gray(gray_value(*p));
        }
    }

    /// Check whether every pixel has equal channels.
    pub fn is_grayscale(&self) -> bool {
        self.data.iter().all(|p| p.is_gray())
    }
}
