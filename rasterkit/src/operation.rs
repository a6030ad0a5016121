//! Operation dispatch by name
//!
//! Every operation the library offers is a variant of [`Operation`], and
//! [`OPERATIONS`] is the single table mapping names to variants. Names are
//! matched case-insensitively and `_` is accepted in place of `-`.

use crate::{Error, Result};
use rasterkit_core::{DimensionPolicy, Image, LogicalOp};
use rasterkit_filter as filter;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// A named image operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Luminance conversion, `trunc(0.3 r + 0.59 g + 0.11 b)`
    Grayscale,
    /// Histogram equalization
    Equalize,
    /// Histogram of the red channel; the image is not modified
    Histogram,
    /// In-place correlation with the default smoothing kernel
    Correlation,
    /// In-place convolution with the default smoothing kernel
    Convolution,
    /// Two-pass high-pass filter
    HighPass,
    /// 5x5 mode filter
    Mode,
    /// 5x5 median filter
    Median,
    /// Sequential two-pass gradient filter
    Gradient,
    /// Gradient magnitude `sqrt(gx^2 + gy^2)`
    GradientMagnitude,
    /// Bitwise AND with a second image
    And,
    /// Bitwise OR with a second image
    Or,
    /// Bitwise XOR with a second image
    Xor,
}

/// Every operation under its canonical name.
pub const OPERATIONS: [(&str, Operation); 13] = [
    ("grayscale", Operation::Grayscale),
    ("equalize", Operation::Equalize),
    ("histogram", Operation::Histogram),
    ("correlation", Operation::Correlation),
    ("convolution", Operation::Convolution),
    ("high-pass", Operation::HighPass),
    ("mode", Operation::Mode),
    ("median", Operation::Median),
    ("gradient", Operation::Gradient),
    ("gradient-magnitude", Operation::GradientMagnitude),
    ("and", Operation::And),
    ("or", Operation::Or),
    ("xor", Operation::Xor),
];

impl Operation {
    /// Canonical name.
    pub fn name(self) -> &'static str {
        match self {
            Operation::Grayscale => "grayscale",
            Operation::Equalize => "equalize",
            Operation::Histogram => "histogram",
            Operation::Correlation => "correlation",
            Operation::Convolution => "convolution",
            Operation::HighPass => "high-pass",
            Operation::Mode => "mode",
            Operation::Median => "median",
            Operation::Gradient => "gradient",
            Operation::GradientMagnitude => "gradient-magnitude",
            Operation::And => "and",
            Operation::Or => "or",
            Operation::Xor => "xor",
        }
    }

    /// The bitwise operator for two-image operations.
    pub fn logical_op(self) -> Option<LogicalOp> {
        match self {
            Operation::And => Some(LogicalOp::And),
            Operation::Or => Some(LogicalOp::Or),
            Operation::Xor => Some(LogicalOp::Xor),
            _ => None,
        }
    }

    /// Whether the operation needs a second image.
    pub fn requires_operand(self) -> bool {
        self.logical_op().is_some()
    }
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        OPERATIONS
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, op)| *op)
            .ok_or_else(|| Error::UnsupportedOperation(s.to_string()))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parameters accompanying an operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct OperationParams<'a> {
    /// Second image for AND/OR/XOR
    pub operand: Option<&'a Image>,
    /// Extent handling for AND/OR/XOR
    pub policy: DimensionPolicy,
}

impl<'a> OperationParams<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the second image.
    pub fn with_operand(mut self, operand: &'a Image) -> Self {
        self.operand = Some(operand);
        self
    }

    /// Set the extent handling.
    pub fn with_policy(mut self, policy: DimensionPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// What an operation produced besides its effect on the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The image was modified in place
    Applied,
    /// Per-level counts of the observed intensities
    Histogram(BTreeMap<u8, u64>),
}

/// Run `op` on `image` in place.
///
/// # Errors
///
/// Returns [`Error::MissingOperand`] for AND/OR/XOR without a second image,
/// and [`Error::Core`] with a dimension mismatch when the strict policy
/// rejects the operand.
pub fn apply(image: &mut Image, op: Operation, params: &OperationParams<'_>) -> Result<Outcome> {
    debug!(
        operation = %op,
        width = image.width(),
        height = image.height(),
        "apply operation"
    );

    match op {
        Operation::Grayscale => image.convert_to_gray(),
        Operation::Equalize => filter::equalize(image)?,
        Operation::Histogram => return Ok(Outcome::Histogram(get_histogram(image))),
        Operation::Correlation => filter::correlation(image),
        Operation::Convolution => filter::convolution(image),
        Operation::HighPass => filter::high_pass(image),
        Operation::Mode => filter::mode_filter(image),
        Operation::Median => filter::median_filter(image),
        Operation::Gradient => filter::gradient(image),
        Operation::GradientMagnitude => filter::gradient_magnitude(image),
        Operation::And | Operation::Or | Operation::Xor => combine(image, op, params)?,
    }

    Ok(Outcome::Applied)
}

fn combine(image: &mut Image, op: Operation, params: &OperationParams<'_>) -> Result<()> {
    let logical = op
        .logical_op()
        .ok_or_else(|| Error::UnsupportedOperation(op.name().to_string()))?;
    let other = params.operand.ok_or(Error::MissingOperand(op.name()))?;
    image.combine(other, logical, params.policy)?;
    Ok(())
}

/// Look up `name` and run the operation on `image` in place.
///
/// # Errors
///
/// Returns [`Error::UnsupportedOperation`] if no operation has that name;
/// otherwise as [`apply`].
pub fn apply_named_operation(
    image: &mut Image,
    name: &str,
    params: &OperationParams<'_>,
) -> Result<Outcome> {
    let op: Operation = name.parse()?;
    apply(image, op, params)
}

/// Histogram of the red channel, observed levels only.
pub fn get_histogram(image: &Image) -> BTreeMap<u8, u64> {
    image.build_histogram().to_map()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rasterkit_core::Pixel;

    #[test]
    fn test_parse_names() {
        assert_eq!("median".parse::<Operation>().unwrap(), Operation::Median);
        assert_eq!("High_Pass".parse::<Operation>().unwrap(), Operation::HighPass);
        assert_eq!(
            " gradient-magnitude ".parse::<Operation>().unwrap(),
            Operation::GradientMagnitude
        );
        assert!(matches!(
            "blur".parse::<Operation>(),
            Err(Error::UnsupportedOperation(name)) if name == "blur"
        ));
    }

    #[test]
    fn test_names_roundtrip() {
        for (name, op) in OPERATIONS {
            assert_eq!(op.name(), name);
            assert_eq!(op.to_string().parse::<Operation>().unwrap(), op);
        }
    }

    #[test]
    fn test_histogram_leaves_image() {
        let mut img = Image::from_gray(2, 2, &[1, 1, 9, 200]).unwrap();
        let before = img.clone();
        let outcome = apply(&mut img, Operation::Histogram, &OperationParams::new()).unwrap();
        assert_eq!(
            outcome,
            Outcome::Histogram(BTreeMap::from([(1, 2), (9, 1), (200, 1)]))
        );
        assert_eq!(img, before);
    }

    #[test]
    fn test_logical_requires_operand() {
        let mut img = Image::filled(2, 2, Pixel::gray(3)).unwrap();
        assert!(matches!(
            apply(&mut img, Operation::Xor, &OperationParams::new()),
            Err(Error::MissingOperand("xor"))
        ));
        assert!(Operation::And.requires_operand());
        assert!(!Operation::Median.requires_operand());
    }

    #[test]
    fn test_logical_dispatch_uses_operator() {
        let other = Image::filled(2, 2, Pixel::gray(0b1010)).unwrap();
        let params = OperationParams::new().with_operand(&other);
        for op in [Operation::And, Operation::Or, Operation::Xor] {
            let mut img = Image::filled(2, 2, Pixel::gray(0b1100)).unwrap();
            apply(&mut img, op, &params).unwrap();
            let want = op.logical_op().unwrap().apply(0b1100, 0b1010);
            assert_eq!(img.get(1, 1).unwrap(), Pixel::gray(want), "{op}");
        }
    }

    #[test]
    fn test_strict_policy_rejects_mismatch() {
        let mut img = Image::filled(3, 3, Pixel::gray(3)).unwrap();
        let other = Image::filled(2, 3, Pixel::gray(1)).unwrap();
        let params = OperationParams::new()
            .with_operand(&other)
            .with_policy(DimensionPolicy::Strict);
        assert!(matches!(
            apply(&mut img, Operation::And, &params),
            Err(Error::Core(rasterkit_core::Error::DimensionMismatch { .. }))
        ));
    }
}
