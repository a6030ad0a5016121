//! Rasterkit Core - pixel storage and the primitives every filter builds on
//!
//! This crate provides the data structures shared by the rest of the
//! workspace:
//!
//! - [`Image`] / [`Pixel`] - Owned RGB pixel buffer with checked and
//!   unchecked coordinate access
//! - [`Region`] / [`Scan`] - Rectangular sub-regions and the two traversal
//!   orders used by multi-pass filters
//! - [`Histogram`] / [`Ratio`] - Intensity histogram with exact per-level
//!   probabilities
//! - [`LogicalOp`] / [`DimensionPolicy`] - Per-pixel AND/OR/XOR of two images
//!
//! All filters that do not keep colour information read the red channel as
//! a luminance stand-in and write their result into all three channels, so
//! images become grayscale-equivalent after the first such operation.

pub mod error;
pub mod histogram;
pub mod image;
pub mod scan;

pub use error::{Error, Result};
pub use histogram::{Histogram, Ratio};
pub use image::{DimensionPolicy, Image, LogicalOp, Pixel, gray_value};
pub use scan::{Region, Scan, ScanOrder};

/// Largest representable channel intensity.
pub const MAX_INTENSITY: u8 = 255;

/// Number of distinct channel intensities.
pub const INTENSITY_LEVELS: usize = 256;

/// Clamp a signed filter sum into the `[0, 255]` channel range.
///
/// Sums below zero become 0; sums above 255 saturate because the pixel
/// store is 8 bits wide.
#[inline]
pub fn clamp_intensity(value: i32) -> u8 {
    value.clamp(0, MAX_INTENSITY as i32) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_intensity() {
        assert_eq!(clamp_intensity(-17), 0);
        assert_eq!(clamp_intensity(0), 0);
        assert_eq!(clamp_intensity(128), 128);
        assert_eq!(clamp_intensity(255), 255);
        assert_eq!(clamp_intensity(1020), 255);
    }
}
