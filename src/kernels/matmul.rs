//! Cache-tiled matrix multiplication

#[cfg(feature = "tracing")]
use tracing::instrument;

use super::{for_each_row_block, use_parallel};
use crate::{Element, MatkernError, Matrix, Result};

/// Tile sizes for [`Matrix::matmul_tiled`]
///
/// The iteration space `(i, j, t)` of `C[i,j] += A[i,t] · B[t,j]` is cut
/// into `row_block × col_block × depth_block` tiles. Tiling only changes the
/// memory access pattern: reduction tiles are always visited in increasing
/// `t`, so each output cell is summed in the same order as the naive loop
/// and results are bit-identical for any tile configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileConfig {
    /// Output rows per tile (also the unit of parallel work)
    pub row_block: usize,
    /// Output columns per tile
    pub col_block: usize,
    /// Reduction indices per tile
    pub depth_block: usize,
}

impl Default for TileConfig {
    fn default() -> Self {
        TileConfig {
            row_block: 4,
            col_block: 4,
            depth_block: 2,
        }
    }
}

impl TileConfig {
    /// Creates a validated tile configuration
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if any block size is zero
    pub fn new(row_block: usize, col_block: usize, depth_block: usize) -> Result<Self> {
        let tiles = TileConfig {
            row_block,
            col_block,
            depth_block,
        };
        tiles.validate()?;
        Ok(tiles)
    }

    fn validate(&self) -> Result<()> {
        if self.row_block == 0 || self.col_block == 0 || self.depth_block == 0 {
            return Err(MatkernError::InvalidInput(format!(
                "Tile sizes must be positive, got {}x{}x{}",
                self.row_block, self.col_block, self.depth_block
            )));
        }
        Ok(())
    }
}

impl<T: Element> Matrix<T> {
    /// Matrix multiplication (matmul) with the default [`TileConfig`]
    ///
    /// Computes `C = A × B` where A is `m×k`, B is `k×n`, and C is `m×n`.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `self.cols != other.rows`
    ///
    /// # Example
    ///
    /// ```
    /// use matkern::Matrix;
    ///
    /// let a = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    /// let b = Matrix::from_vec(2, 2, vec![5.0, 6.0, 7.0, 8.0]).unwrap();
    /// let c = a.matmul(&b).unwrap();
    ///
    /// // [[1, 2],   [[5, 6],   [[19, 22],
    /// //  [3, 4]] ×  [7, 8]] =  [43, 50]]
    /// assert_eq!(c.as_slice(), &[19.0, 22.0, 43.0, 50.0]);
    /// ```
    pub fn matmul(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        self.matmul_tiled(other, TileConfig::default())
    }

    /// Matrix multiplication with explicit tile sizes
    ///
    /// Iterates output row blocks, then column blocks, then reduction
    /// blocks, with an inner multiply-accumulate loop clamped to the matrix
    /// extents. Under the parallel backend each row block is an independent
    /// task that writes only its own output rows.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `self.cols != other.rows`, or
    /// `InvalidInput` if a tile size is zero
    #[cfg_attr(feature = "tracing", instrument(skip(self, other), fields(dims = %format!("{}x{} @ {}x{}", self.rows, self.cols, other.rows, other.cols))))]
    pub fn matmul_tiled(&self, other: &Matrix<T>, tiles: TileConfig) -> Result<Matrix<T>> {
        self.check_inner_dims(other)?;
        tiles.validate()?;

        let m = self.rows;
        let k = self.cols;
        let n = other.cols;

        let mut result = Matrix::zeros_with_backend(m, n, self.backend);

        let a = &self.data;
        let b = &other.data;
        let parallel = use_parallel(self.backend, m * n);

        // Clamped so the block length cannot overflow
        let row_block = tiles.row_block.min(m);

        for_each_row_block(&mut result.data, row_block * n, parallel, |block, out| {
            let i0 = block * row_block;
            let i_end = (i0 + row_block).min(m);

            for jj in (0..n).step_by(tiles.col_block) {
                let j_end = (jj + tiles.col_block).min(n);

                for kk in (0..k).step_by(tiles.depth_block) {
                    let k_end = (kk + tiles.depth_block).min(k);

                    for i in i0..i_end {
                        let a_row = &a[i * k..(i + 1) * k];
                        let c_row = &mut out[(i - i0) * n..(i - i0 + 1) * n];

                        for j in jj..j_end {
                            let mut acc = c_row[j];
                            for t in kk..k_end {
                                acc += a_row[t] * b[t * n + j];
                            }
                            c_row[j] = acc;
                        }
                    }
                }
            }
        });

        Ok(result)
    }

    /// Naive O(n³) matrix multiplication
    ///
    /// Reference ordering for the tiled kernel: each cell is summed from
    /// zero in increasing reduction index.
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if `self.cols != other.rows`
    pub fn matmul_naive(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        self.check_inner_dims(other)?;

        let (m, k, n) = (self.rows, self.cols, other.cols);
        let mut result = Matrix::zeros_with_backend(m, n, self.backend);

        // C[i,j] = Σ A[i,t] × B[t,j]
        for i in 0..m {
            for j in 0..n {
                let mut sum = T::ZERO;
                for t in 0..k {
                    sum += self.data[i * k + t] * other.data[t * n + j];
                }
                result.data[i * n + j] = sum;
            }
        }

        Ok(result)
    }

    fn check_inner_dims(&self, other: &Matrix<T>) -> Result<()> {
        if self.cols != other.rows {
            return Err(MatkernError::DimensionMismatch {
                left_rows: self.rows,
                left_cols: self.cols,
                right_rows: other.rows,
                right_cols: other.cols,
            });
        }
        Ok(())
    }
}


// Property-based tests for matmul
#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    /// Generate an integer matrix of given dimensions
    fn matrix_strategy(rows: usize, cols: usize) -> impl Strategy<Value = Matrix<i64>> {
        proptest::collection::vec(-100i64..100, rows * cols)
            .prop_map(move |data| Matrix::from_vec(rows, cols, data).unwrap())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: Matrix multiplication is associative (exact on integers)
        /// (A × B) × C = A × (B × C)
        #[test]
        fn test_matmul_associative(
            a in matrix_strategy(3, 4),
            b in matrix_strategy(4, 5),
            c in matrix_strategy(5, 3)
        ) {
            let ab_c = a.matmul(&b).unwrap().matmul(&c).unwrap();
            let a_bc = a.matmul(&b.matmul(&c).unwrap()).unwrap();
            prop_assert_eq!(ab_c, a_bc);
        }

        /// Property: (A × B)ᵀ = Bᵀ × Aᵀ
        #[test]
        fn test_matmul_transpose_identity(
            a in matrix_strategy(4, 2),
            b in matrix_strategy(2, 6)
        ) {
            let lhs = a.matmul(&b).unwrap().transpose();
            let rhs = b.transpose().matmul(&a.transpose()).unwrap();
            prop_assert_eq!(lhs, rhs);
        }

        /// Property: output shape is (A.rows, B.cols)
        #[test]
        fn test_matmul_shape(m in 1usize..9, k in 1usize..9, n in 1usize..9) {
            let a = Matrix::<i32>::new(m, k).unwrap();
            let b = Matrix::<i32>::new(k, n).unwrap();
            prop_assert_eq!(a.matmul(&b).unwrap().shape(), (m, n));
        }

        /// Property: any tiling reproduces the naive float result bit for bit
        #[test]
        fn test_tiled_equals_naive(
            data_a in proptest::collection::vec(-10.0f32..10.0, 6 * 7),
            data_b in proptest::collection::vec(-10.0f32..10.0, 7 * 5),
            rb in 1usize..8,
            cb in 1usize..8,
            db in 1usize..8
        ) {
            let a = Matrix::from_vec(6, 7, data_a).unwrap();
            let b = Matrix::from_vec(7, 5, data_b).unwrap();
            let tiles = TileConfig::new(rb, cb, db).unwrap();
            prop_assert_eq!(a.matmul_tiled(&b, tiles).unwrap(), a.matmul_naive(&b).unwrap());
        }
    }
}
