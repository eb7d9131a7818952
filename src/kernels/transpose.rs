//! Matrix transpose

#[cfg(feature = "tracing")]
use tracing::instrument;

use super::{for_each_row_block, use_parallel};
use crate::{Element, Matrix};

/// Side of the square blocks the transpose walks. 64×64 f32 is 16KB and
/// fits in L1.
const BLOCK_SIZE: usize = 64;

impl<T: Element> Matrix<T> {
    /// Transposes the matrix (swap rows and columns)
    ///
    /// Any matrix, square or not, is valid: an `m×n` input yields an `n×m`
    /// output with `B(j, i) = A(i, j)`.
    ///
    /// # Example
    ///
    /// ```
    /// use matkern::Matrix;
    ///
    /// let m = Matrix::from_vec(2, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
    /// let t = m.transpose();
    ///
    /// // [[1, 2, 3],     [[1, 4],
    /// //  [4, 5, 6]]  →   [2, 5],
    /// //                  [3, 6]]
    /// assert_eq!(t.shape(), (3, 2));
    /// assert_eq!(t.as_slice(), &[1, 4, 2, 5, 3, 6]);
    /// ```
    #[cfg_attr(feature = "tracing", instrument(skip(self), fields(dims = %format!("{}x{}", self.rows, self.cols))))]
    pub fn transpose(&self) -> Matrix<T> {
        let rows = self.rows;
        let cols = self.cols;
        let mut result = Matrix::zeros_with_backend(cols, rows, self.backend);

        let src = &self.data;
        let parallel = use_parallel(self.backend, rows * cols);

        // Each block owns BLOCK_SIZE output rows (= source columns)
        for_each_row_block(&mut result.data, BLOCK_SIZE * rows, parallel, |block, out| {
            let j_block = block * BLOCK_SIZE;
            let j_end = (j_block + BLOCK_SIZE).min(cols);

            for i_block in (0..rows).step_by(BLOCK_SIZE) {
                let i_end = (i_block + BLOCK_SIZE).min(rows);

                for i in i_block..i_end {
                    let src_row = &src[i * cols..(i + 1) * cols];
                    for j in j_block..j_end {
                        // result[j, i] = self[i, j]
                        out[(j - j_block) * rows + i] = src_row[j];
                    }
                }
            }
        });

        result
    }
}
