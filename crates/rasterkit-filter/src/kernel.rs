//! 3x3 filter kernels
//!
//! A [`Kernel`] is an immutable 3x3 matrix of weights. Element `[i][j]`
//! multiplies the neighbour at `(x - 1 + i, y - 1 + j)`: the first index
//! follows the x axis and the second follows the y axis.
//!
//! Filters never mutate their kernels. Variants such as the column-reversed
//! kernel used to express convolution are new values.

use crate::{FilterError, FilterResult};

/// Side length of every kernel.
pub const KERNEL_SIZE: u32 = 3;

/// Immutable 3x3 kernel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kernel {
    weights: [[f64; 3]; 3],
}

impl Kernel {
    /// Create a kernel from its weights.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] if any weight is NaN or
    /// infinite.
    pub fn new(weights: [[f64; 3]; 3]) -> FilterResult<Self> {
        if weights.iter().flatten().any(|w| !w.is_finite()) {
            return Err(FilterError::InvalidKernel(
                "weights must be finite".into(),
            ));
        }
        Ok(Self { weights })
    }

    /// Create a kernel from nine weights in `[i][j]` order.
    pub fn from_slice(data: &[f64]) -> FilterResult<Self> {
        if data.len() != 9 {
            return Err(FilterError::InvalidKernel(format!(
                "expected 9 weights, got {}",
                data.len()
            )));
        }
        let mut weights = [[0.0; 3]; 3];
        for (i, row) in weights.iter_mut().enumerate() {
            row.copy_from_slice(&data[i * 3..i * 3 + 3]);
        }
        Self::new(weights)
    }

    /// Weighted 3x3 smoothing kernel (weights sum to 1).
    pub const fn low_pass() -> Self {
        Self {
            weights: [
                [1.5 / 18.0, 2.0 / 18.0, 1.5 / 18.0],
                [2.0 / 18.0, 4.0 / 18.0, 2.0 / 18.0],
                [1.5 / 18.0, 2.0 / 18.0, 1.5 / 18.0],
            ],
        }
    }

    /// Sharpening kernel: dominant centre, negative surround.
    pub const fn high_pass() -> Self {
        Self {
            weights: [[-0.5, -0.5, -0.5], [-0.5, 4.0, -0.5], [-0.5, -0.5, -0.5]],
        }
    }

    /// Derivative kernel applied in the first gradient pass.
    pub const fn gradient_x() -> Self {
        Self {
            weights: [[1.0, 2.0, 1.0], [0.0, 0.0, 0.0], [-1.0, -2.0, -1.0]],
        }
    }

    /// Derivative kernel applied in the second gradient pass.
    pub const fn gradient_y() -> Self {
        Self {
            weights: [[1.0, 0.0, -1.0], [2.0, 0.0, -2.0], [1.0, 0.0, -1.0]],
        }
    }

    /// Side length of the kernel.
    #[inline]
    pub const fn size(&self) -> u32 {
        KERNEL_SIZE
    }

    /// Border margin a filter with this kernel leaves untouched.
    ///
    /// Defined as `size - 2`, which is one pixel for a 3x3 kernel.
    #[inline]
    pub const fn inset(&self) -> u32 {
        KERNEL_SIZE - 2
    }

    /// Weight `[i][j]`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.weights[i][j]
    }

    /// All weights.
    pub fn weights(&self) -> &[[f64; 3]; 3] {
        &self.weights
    }

    /// The kernel with each row's column order reversed.
    ///
    /// Correlating with this kernel is the same as convolving with the
    /// original one.
    pub fn mirrored(&self) -> Self {
        let mut weights = self.weights;
        for row in weights.iter_mut() {
            row.reverse();
        }
        Self { weights }
    }

    /// The kernel rotated by 180 degrees.
    pub fn rotated_180(&self) -> Self {
        let mut weights = [[0.0; 3]; 3];
        for (i, row) in weights.iter_mut().enumerate() {
            for (j, w) in row.iter_mut().enumerate() {
                *w = self.weights[2 - i][2 - j];
            }
        }
        Self { weights }
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f64 {
        self.weights.iter().flatten().sum()
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Self::low_pass()
    }
}
