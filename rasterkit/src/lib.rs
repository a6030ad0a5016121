//! Rasterkit - Grayscale and RGB image filtering
//!
//! # Overview
//!
//! Rasterkit loads an image into an owned RGB buffer, runs destructive
//! in-place operations on it and saves the result:
//!
//! - Grayscale conversion and histogram equalization
//! - Correlation and convolution with a 3x3 smoothing kernel
//! - Two-pass high-pass filtering
//! - 5x5 median and mode filtering
//! - Sequential gradient filtering and gradient magnitude
//! - Bitwise AND/OR/XOR of two images
//!
//! Operations can be called directly through the [`filter`] module or
//! dispatched by name with [`apply_named_operation`].
//!
//! # Example
//!
//! ```
//! use rasterkit::{Image, OperationParams, Pixel, apply_named_operation};
//!
//! let mut img = Image::new(5, 5).unwrap();
//! img.set(2, 2, Pixel::gray(255)).unwrap();
//! apply_named_operation(&mut img, "median", &OperationParams::new()).unwrap();
//! assert_eq!(img.get(2, 2).unwrap(), Pixel::gray(0));
//! ```

mod error;
pub mod operation;

// Re-export core types (primary data structures used everywhere)
pub use rasterkit_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use rasterkit_filter as filter;
pub use rasterkit_io as io;

pub use error::{Error, Result};
pub use operation::{
    OPERATIONS, Operation, OperationParams, Outcome, apply, apply_named_operation, get_histogram,
};

use std::path::Path;
use tracing::debug;

/// Load an image from a PNG, JPEG or PNM file.
///
/// The image remembers `path` so that [`save_in_place`] can rewrite it.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Image> {
    Ok(rasterkit_io::read_image(path)?)
}

/// Save an image, choosing the format from the extension of `path`.
pub fn save<P: AsRef<Path>>(image: &Image, path: P) -> Result<()> {
    Ok(rasterkit_io::write_image_auto(image, path)?)
}

/// Save an image back to the file it was loaded from.
///
/// # Errors
///
/// Returns [`Error::NoSourcePath`] if the image was not loaded from a file.
pub fn save_in_place(image: &Image) -> Result<()> {
    let path = image.source_path().ok_or(Error::NoSourcePath)?;
    debug!(path = %path.display(), "save in place");
    save(image, path)
}
