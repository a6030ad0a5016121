//! rasterkit-filter - Spatial filters and histogram equalization
//!
//! This crate provides the in-place image operations:
//!
//! - Correlation and convolution with a 3x3 kernel
//! - Two-pass high-pass (sharpening) filtering
//! - Median and mode filtering over a 5x5 window
//! - Sequential two-pass gradient and gradient magnitude
//! - Histogram equalization through a tone reproduction curve
//!
//! Every filter reads the red channel, writes its result into all three
//! channels and leaves a border as wide as its inset unchanged. Multi-pass
//! filters stage intermediate values in a private full-frame buffer that
//! lives only for the duration of one call.

pub mod enhance;
mod error;
pub mod gradient;
pub mod highpass;
pub mod kernel;
pub mod linear;
pub mod rank;
mod scratch;

pub use error::{FilterError, FilterResult};
pub use kernel::{KERNEL_SIZE, Kernel};

// Re-export commonly used functions
pub use enhance::{TrcLut, equalize, equalize_mapping, equalize_trc, identity_trc, trc_map};
pub use gradient::{GradientFilter, gradient, gradient_magnitude};
pub use highpass::{HighPassFilter, high_pass};
pub use linear::{ColumnOrder, LinearFilter, convolution, convolve, correlate, correlation};
pub use rank::{RANK_RADIUS, RANK_WINDOW, RankStat, median_filter, mode_filter, rank_filter};
