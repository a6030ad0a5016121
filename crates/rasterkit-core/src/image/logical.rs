//! Logical combination of two images
//!
//! AND, OR and XOR of the representative channels, written into all three
//! channels of the first image. The second image is only read.
//!
//! With [`DimensionPolicy::Clip`] the operation covers the overlap of the
//! two frames: a pixel of the first image is combined when its `x` is inside
//! the second image's width and its `y` inside the second image's height,
//! and left alone otherwise. [`DimensionPolicy::Strict`] refuses to combine
//! images whose extents differ.

use super::{Image, Pixel};
use crate::error::{Error, Result};
use tracing::debug;

/// Bitwise operator applied per pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOp {
    And,
    Or,
    Xor,
}

impl LogicalOp {
    /// Combine two intensities.
    #[inline]
    pub fn apply(self, a: u8, b: u8) -> u8 {
        match self {
            LogicalOp::And => a & b,
            LogicalOp::Or => a | b,
            LogicalOp::Xor => a ^ b,
        }
    }

    /// Lower-case operator name.
    pub fn name(self) -> &'static str {
        match self {
            LogicalOp::And => "and",
            LogicalOp::Or => "or",
            LogicalOp::Xor => "xor",
        }
    }
}

/// How to treat two images of different extents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DimensionPolicy {
    /// Combine the overlap and leave the rest of the first image unchanged.
    #[default]
    Clip,
    /// Fail with [`Error::DimensionMismatch`] unless the extents are equal.
    Strict,
}

impl Image {
    /// Combine `other` into `self` with `op`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] under [`DimensionPolicy::Strict`]
    /// when the two images differ in width or height.
    pub fn combine(&mut self, other: &Image, op: LogicalOp, policy: DimensionPolicy) -> Result<()> {
        if policy == DimensionPolicy::Strict && !self.sizes_equal(other) {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }
        debug!(
            op = op.name(),
            width = self.width,
            height = self.height,
            other_width = other.width,
            other_height = other.height,
            "combine"
        );

        self.combine_clipped(other, op);
        Ok(())
    }

    /// Bitwise AND over the overlapping region.
    pub fn and(&mut self, other: &Image) {
        self.combine_clipped(other, LogicalOp::And);
    }

    /// Bitwise OR over the overlapping region.
    pub fn or(&mut self, other: &Image) {
        self.combine_clipped(other, LogicalOp::Or);
    }

    /// Bitwise XOR over the overlapping region.
    pub fn xor(&mut self, other: &Image) {
        self.combine_clipped(other, LogicalOp::Xor);
    }

    fn combine_clipped(&mut self, other: &Image, op: LogicalOp) {
        let (ow, oh) = other.dimensions();
        for (x, y) in self.scan_row_major(None) {
            if x < ow && y < oh {
                let v = op.apply(self.value_unchecked(x, y), other.value_unchecked(x, y));
                self.set_unchecked(x, y, Pixel::gray(v));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply() {
        assert_eq!(LogicalOp::And.apply(0b1100, 0b1010), 0b1000);
        assert_eq!(LogicalOp::Or.apply(0b1100, 0b1010), 0b1110);
        assert_eq!(LogicalOp::Xor.apply(0b1100, 0b1010), 0b0110);
    }

    #[test]
    fn test_constant_images() {
        let a = 0xA5;
        let b = 0x3C;
        let src = Image::filled(4, 4, Pixel::gray(b)).unwrap();
        for op in [LogicalOp::And, LogicalOp::Or, LogicalOp::Xor] {
            let mut dst = Image::filled(4, 4, Pixel::gray(a)).unwrap();
            dst.combine(&src, op, DimensionPolicy::Strict).unwrap();
            let want = Pixel::gray(op.apply(a, b));
            assert!(dst.pixels().iter().all(|&p| p == want), "{}", op.name());
        }
    }

    #[test]
    fn test_clip_leaves_outside_untouched() {
        let mut dst = Image::filled(4, 3, Pixel::gray(0xFF)).unwrap();
        let src = Image::filled(2, 5, Pixel::gray(0x0F)).unwrap();
        dst.and(&src);
        for (x, y) in dst.scan_row_major(None) {
            let want = if x < 2 { 0x0F } else { 0xFF };
            assert_eq!(dst.get(x, y).unwrap(), Pixel::gray(want), "({x},{y})");
        }
    }

    #[test]
    fn test_shorthands_match_clip_policy() {
        let base = Image::from_gray(3, 2, &[0x11, 0x22, 0x33, 0x44, 0x55, 0x66]).unwrap();
        let src = Image::filled(2, 3, Pixel::gray(0x0F)).unwrap();
        let shorthands: [(LogicalOp, fn(&mut Image, &Image)); 3] = [
            (LogicalOp::And, Image::and),
            (LogicalOp::Or, Image::or),
            (LogicalOp::Xor, Image::xor),
        ];
        for (op, shorthand) in shorthands {
            let mut a = base.clone();
            shorthand(&mut a, &src);
            let mut b = base.clone();
            b.combine(&src, op, DimensionPolicy::Clip).unwrap();
            assert_eq!(a, b, "{}", op.name());
            assert_eq!(a.get(2, 0).unwrap(), Pixel::gray(0x33));
        }
    }

    #[test]
    fn test_strict_rejects_mismatch() {
        let mut dst = Image::new(4, 3).unwrap();
        let src = Image::new(3, 3).unwrap();
        let err = dst
            .combine(&src, LogicalOp::Or, DimensionPolicy::Strict)
            .unwrap_err();
        assert_eq!(
            err,
            Error::DimensionMismatch {
                expected: (4, 3),
                actual: (3, 3)
            }
        );
    }

    #[test]
    fn test_uses_red_channel() {
        let mut dst = Image::filled(1, 1, Pixel::rgb(0b0101, 0xFF, 0xFF)).unwrap();
        let src = Image::filled(1, 1, Pixel::rgb(0b0011, 0, 0)).unwrap();
        dst.xor(&src);
        assert_eq!(dst.get(0, 0).unwrap(), Pixel::gray(0b0110));
    }
}
