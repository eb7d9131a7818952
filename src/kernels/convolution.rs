//! Valid-mode 2D convolution

#[cfg(feature = "tracing")]
use tracing::instrument;

use super::{for_each_row_block, use_parallel};
use crate::{Element, MatkernError, Matrix, Result};

impl<T: Element> Matrix<T> {
    /// 2D convolution with a kernel (valid padding, unit stride)
    ///
    /// Slides `kernel` over every position where it fully overlaps the
    /// input. As is usual for image kernels the kernel is not flipped, so
    /// this is technically a cross-correlation:
    ///
    /// ```text
    /// output[i, j] = Σ_ki Σ_kj input[i + ki, j + kj] · kernel[ki, kj]
    /// ```
    ///
    /// The window is accumulated in row-major order starting from zero, so
    /// floating-point results are deterministic.
    ///
    /// # Returns
    ///
    /// Convolved matrix with dimensions:
    /// - rows: `input.rows - kernel.rows + 1`
    /// - cols: `input.cols - kernel.cols + 1`
    ///
    /// # Errors
    ///
    /// Returns `KernelTooLarge` if the kernel exceeds the input in either
    /// dimension
    ///
    /// # Example
    ///
    /// ```
    /// use matkern::Matrix;
    ///
    /// let input = Matrix::from_fn(4, 4, |r, c| (r * 4 + c) as i32).unwrap();
    /// let kernel = Matrix::from_vec(3, 3, vec![1; 9]).unwrap();
    ///
    /// let result = input.convolve2d(&kernel).unwrap();
    /// assert_eq!(result.shape(), (2, 2)); // 4 - 3 + 1
    /// assert_eq!(result.as_slice(), &[45, 54, 81, 90]);
    /// ```
    #[cfg_attr(feature = "tracing", instrument(skip(self, kernel), fields(input_dims = %format!("{}x{}", self.rows, self.cols), kernel_dims = %format!("{}x{}", kernel.rows, kernel.cols))))]
    pub fn convolve2d(&self, kernel: &Matrix<T>) -> Result<Matrix<T>> {
        if kernel.rows > self.rows || kernel.cols > self.cols {
            return Err(MatkernError::KernelTooLarge {
                kernel_rows: kernel.rows,
                kernel_cols: kernel.cols,
                input_rows: self.rows,
                input_cols: self.cols,
            });
        }

        let output_rows = self.rows - kernel.rows + 1;
        let output_cols = self.cols - kernel.cols + 1;

        let mut result = Matrix::zeros_with_backend(output_rows, output_cols, self.backend);

        let input = &self.data;
        let in_cols = self.cols;
        let (k_rows, k_cols) = (kernel.rows, kernel.cols);
        let weights = &kernel.data;
        let parallel = use_parallel(self.backend, output_rows * output_cols);

        for_each_row_block(&mut result.data, output_cols, parallel, |out_row, out| {
            for (out_col, cell) in out.iter_mut().enumerate() {
                let mut sum = T::ZERO;

                for k_row in 0..k_rows {
                    let in_start = (out_row + k_row) * in_cols + out_col;
                    let window = &input[in_start..in_start + k_cols];
                    let taps = &weights[k_row * k_cols..(k_row + 1) * k_cols];

                    for (&x, &w) in window.iter().zip(taps) {
                        sum += x * w;
                    }
                }

                *cell = sum;
            }
        });

        Ok(result)
    }
}
