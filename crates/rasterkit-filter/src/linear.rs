//! Linear filtering: correlation and convolution
//!
//! A 3x3 weighted sum over the neighbourhood of each interior pixel,
//! truncated toward zero. The scan is row-major (outer `x`, inner `y`) and
//! updates the image in place, so a sum may read neighbours that were
//! already rewritten earlier in the same scan.
//!
//! Convolution is correlation with the kernel's columns visited in reverse
//! order, `j = (2, 1, 0)`.
//!
//! # Border handling
//!
//! The scan region is inset by `kernel.inset()` pixels on every side;
//! pixels in that margin are left unchanged.

use crate::kernel::Kernel;
use rasterkit_core::{Image, Region, clamp_intensity};
use tracing::debug;

/// Order in which a kernel row's weights are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColumnOrder {
    /// `j = (0, 1, 2)`: correlation.
    #[default]
    Forward,
    /// `j = (2, 1, 0)`: convolution.
    Reversed,
}

impl ColumnOrder {
    #[inline]
    fn indices(self) -> [usize; 3] {
        match self {
            ColumnOrder::Forward => [0, 1, 2],
            ColumnOrder::Reversed => [2, 1, 0],
        }
    }
}

/// Weighted 3x3 sum centred on `(x, y)`.
///
/// `sample` returns the value at a neighbour. The caller guarantees that
/// `(x, y)` is at least one pixel away from every edge.
#[inline]
pub(crate) fn window_sum<F>(kernel: &Kernel, x: u32, y: u32, columns: ColumnOrder, sample: F) -> f64
where
    F: Fn(u32, u32) -> f64,
{
    let j = columns.indices();
    let mut sum = 0.0;
    for (i, row) in kernel.weights().iter().enumerate() {
        let sx = x - 1 + i as u32;
        sum += sample(sx, y - 1) * row[j[0]];
        sum += sample(sx, y) * row[j[1]];
        sum += sample(sx, y + 1) * row[j[2]];
    }
    sum
}

/// Correlation/convolution filter owning one kernel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LinearFilter {
    kernel: Kernel,
}

impl LinearFilter {
    pub fn new(kernel: Kernel) -> Self {
        Self { kernel }
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    /// Correlate `image` with the kernel in place.
    pub fn correlate(&self, image: &mut Image) {
        self.apply(image, ColumnOrder::Forward);
    }

    /// Convolve `image` with the kernel in place.
    pub fn convolve(&self, image: &mut Image) {
        self.apply(image, ColumnOrder::Reversed);
    }

    /// Run one in-place pass visiting kernel columns in `columns` order.
    ///
    /// Sums are truncated toward zero and stored saturated to `[0, 255]`.
    pub fn apply(&self, image: &mut Image, columns: ColumnOrder) {
        let region = Region::inset(image.width(), image.height(), self.kernel.inset());
        debug!(
            width = image.width(),
            height = image.height(),
            ?columns,
            "linear filter"
        );

        for (x, y) in region.row_major() {
            let sum = window_sum(&self.kernel, x, y, columns, |sx, sy| {
                image.value_unchecked(sx, sy) as f64
            });
            image.set_gray_unchecked(x, y, clamp_intensity(sum as i32));
        }
    }
}

/// Correlate `image` with `kernel` in place.
pub fn correlate(image: &mut Image, kernel: &Kernel) {
    LinearFilter::new(*kernel).correlate(image);
}

/// Convolve `image` with `kernel` in place.
pub fn convolve(image: &mut Image, kernel: &Kernel) {
    LinearFilter::new(*kernel).convolve(image);
}

/// Correlation with the default smoothing kernel.
pub fn correlation(image: &mut Image) {
    LinearFilter::default().correlate(image);
}

/// Convolution with the default smoothing kernel.
pub fn convolution(image: &mut Image) {
    LinearFilter::default().convolve(image);
}
