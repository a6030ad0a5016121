//! Gradient (edge) filtering
//!
//! [`GradientFilter::apply`] runs two sequential correlations: `kernel_x`
//! row-major from the image into an auxiliary buffer, then `kernel_y`
//! column-major from that buffer back into the image. The intermediate is
//! kept signed and unclamped.
//!
//! [`GradientFilter::magnitude`] instead computes both responses from the
//! source and stores `min(255, trunc(sqrt(gx^2 + gy^2)))`.
//!
//! Both leave a one-pixel border unchanged.

use crate::kernel::Kernel;
use crate::linear::{ColumnOrder, window_sum};
use crate::scratch::AuxBuffer;
use rasterkit_core::{Image, Region, clamp_intensity};
use tracing::{debug, trace};

/// Pair of derivative kernels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientFilter {
    kernel_x: Kernel,
    kernel_y: Kernel,
}

impl Default for GradientFilter {
    fn default() -> Self {
        Self::new(Kernel::gradient_x(), Kernel::gradient_y())
    }
}

impl GradientFilter {
    pub fn new(kernel_x: Kernel, kernel_y: Kernel) -> Self {
        Self { kernel_x, kernel_y }
    }

    pub fn kernel_x(&self) -> &Kernel {
        &self.kernel_x
    }

    pub fn kernel_y(&self) -> &Kernel {
        &self.kernel_y
    }

    fn region(&self, image: &Image) -> Region {
        let margin = self.kernel_x.inset().max(self.kernel_y.inset());
        Region::inset(image.width(), image.height(), margin)
    }

    /// Two sequential passes, `kernel_x` then `kernel_y`, in place.
    pub fn apply(&self, image: &mut Image) {
        let region = self.region(image);
        debug!(
            width = image.width(),
            height = image.height(),
            "gradient filter"
        );

        let mut aux = AuxBuffer::from_image(image);
        for (x, y) in region.row_major() {
            let sum = window_sum(&self.kernel_x, x, y, ColumnOrder::Forward, |sx, sy| {
                image.value_unchecked(sx, sy) as f64
            });
            aux.set(x, y, sum as i32);
        }
        trace!("gradient x pass done");

        for (x, y) in region.col_major() {
            let sum = window_sum(&self.kernel_y, x, y, ColumnOrder::Forward, |sx, sy| {
                aux.get(sx, sy) as f64
            });
            image.set_gray_unchecked(x, y, clamp_intensity(sum as i32));
        }
        trace!("gradient y pass done");
    }

    /// Gradient magnitude of the source, in place.
    pub fn magnitude(&self, image: &mut Image) {
        let region = self.region(image);
        debug!(
            width = image.width(),
            height = image.height(),
            "gradient magnitude"
        );

        let mut aux = AuxBuffer::from_image(image);
        for (x, y) in region.row_major() {
            let sample = |sx: u32, sy: u32| image.value_unchecked(sx, sy) as f64;
            let gx = window_sum(&self.kernel_x, x, y, ColumnOrder::Forward, sample);
            let gy = window_sum(&self.kernel_y, x, y, ColumnOrder::Forward, sample);
            aux.set(x, y, gx.hypot(gy) as i32);
        }
        aux.commit(image, region);
    }
}

/// Sequential two-pass gradient with the default derivative kernels.
pub fn gradient(image: &mut Image) {
    GradientFilter::default().apply(image);
}

/// Gradient magnitude with the default derivative kernels.
pub fn gradient_magnitude(image: &mut Image) {
    GradientFilter::default().magnitude(image);
}
