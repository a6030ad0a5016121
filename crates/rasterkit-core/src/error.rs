//! Error types for rasterkit-core
//!
//! A single error type covers every fallible operation in the core crate.
//! Filters are built so that their scan ranges never leave the image, so in
//! practice these variants surface from the checked accessors, from image
//! construction, and from the strict logical combiner.

use thiserror::Error;

/// Rasterkit core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Width or height of zero
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Pixel buffer length does not match `width * height`
    #[error("pixel buffer length {actual} does not match {width}x{height}")]
    BufferLength {
        width: u32,
        height: u32,
        actual: usize,
    },

    /// Coordinate outside `[0, width) x [0, height)`
    #[error("coordinate ({x}, {y}) out of bounds for {width}x{height} image")]
    IndexOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Two images were required to have identical extents
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for rasterkit-core operations
pub type Result<T> = std::result::Result<T, Error>;
