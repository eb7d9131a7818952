//! Incremental 2D prefix sum

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{Element, Matrix};

impl<T: Element> Matrix<T> {
    /// 2D prefix sum built incrementally from the top-left corner
    ///
    /// The first row and first column are running sums along their own
    /// axis. Every interior cell then combines its own value with the
    /// finished cell to its left and the finished cell above:
    ///
    /// ```text
    /// S(0, j) = S(0, j-1) + A(0, j)
    /// S(i, 0) = S(i-1, 0) + A(i, 0)
    /// S(i, j) = A(i, j) + S(i, j-1) + S(i-1, j)
    /// ```
    ///
    /// There is no `- S(i-1, j-1)` correction term, so interior cells differ
    /// from a standard summed-area table. Row `i` depends on row `i-1`,
    /// which keeps this kernel sequential.
    ///
    /// Values grow combinatorially (an all-ones input reaches
    /// `C(i + j + 2, i + 1) - 1`), so integer element types overflow on
    /// moderate sizes; an all-ones `i64` matrix overflows past 32×32. Use a floating-point element type for large inputs.
    ///
    /// # Example
    ///
    /// ```
    /// use matkern::Matrix;
    ///
    /// let ones = Matrix::from_fn(2, 3, |_, _| 1).unwrap();
    /// let s = ones.prefix_sum_2d();
    /// assert_eq!(s.as_slice(), &[1, 2, 3, 2, 5, 9]);
    /// ```
    #[cfg_attr(feature = "tracing", instrument(skip(self), fields(dims = %format!("{}x{}", self.rows, self.cols))))]
    pub fn prefix_sum_2d(&self) -> Matrix<T> {
        let rows = self.rows;
        let cols = self.cols;
        let a = &self.data;

        let mut result = Matrix::zeros_with_backend(rows, cols, self.backend);
        let s = &mut result.data;

        s[0] = a[0];
        for j in 1..cols {
            s[j] = s[j - 1] + a[j];
        }
        for i in 1..rows {
            s[i * cols] = s[(i - 1) * cols] + a[i * cols];
        }

        for i in 1..rows {
            for j in 1..cols {
                let idx = i * cols + j;
                s[idx] = a[idx] + s[idx - 1] + s[idx - cols];
            }
        }

        result
    }
}
