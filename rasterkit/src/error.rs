//! Error type for the rasterkit facade
//!
//! Aggregates the errors of the member crates and adds the failures that
//! only exist at the dispatch layer.

use thiserror::Error;

/// Rasterkit error type
#[derive(Debug, Error)]
pub enum Error {
    /// Pixel buffer or geometry error
    #[error(transparent)]
    Core(#[from] rasterkit_core::Error),

    /// Filter error
    #[error(transparent)]
    Filter(#[from] rasterkit_filter::FilterError),

    /// File I/O or codec error
    #[error(transparent)]
    Io(#[from] rasterkit_io::IoError),

    /// No operation is registered under this name
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// A two-image operation was requested without a second image
    #[error("operation '{0}' requires a second image")]
    MissingOperand(&'static str),

    /// The image was not loaded from a file, so there is nowhere to save it
    #[error("image has no source path")]
    NoSourcePath,
}

/// Result type alias for rasterkit operations
pub type Result<T> = std::result::Result<T, Error>;
