//! Matrix inverse modulo an integer (Gauss–Jordan elimination)

#[cfg(feature = "tracing")]
use tracing::instrument;

use super::{for_each_row_block, use_parallel};
use crate::modular::inverse_i128;
use crate::{MatkernError, Matrix, ModularElement, Result};

impl<T: ModularElement> Matrix<T> {
    /// Inverse of a square matrix modulo `modulus`
    ///
    /// Runs Gauss–Jordan elimination on the augmented matrix `[A | I]`,
    /// with every entry kept as a residue in `[0, modulus)`. For each pivot
    /// row `r`, in order:
    ///
    /// 1. **Normalize**: scale row `r` (columns `r..2n`) by the modular
    ///    inverse of its diagonal entry, turning the pivot into 1.
    /// 2. **Eliminate**: subtract `Aug(r2, r) × row r` from every other row
    ///    `r2` with a nonzero entry in column `r`.
    ///
    /// The eliminate phase only reads the pivot row, snapshotted after
    /// normalization, so its rows are independent and run in parallel under
    /// the parallel backend. Rows are never swapped: a diagonal entry that
    /// is not a unit modulo `modulus` fails the inversion even if a later
    /// row could have supplied a pivot.
    ///
    /// # Errors
    ///
    /// - `NotSquare` if `rows != cols`
    /// - `InvalidModulus` if `modulus <= 0`
    /// - `NonInvertible` if a pivot shares a factor with `modulus`
    ///
    /// # Example
    ///
    /// ```
    /// use matkern::Matrix;
    ///
    /// let a = Matrix::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
    /// let inv = a.mod_inverse(7).unwrap();
    /// assert_eq!(inv.as_slice(), &[5, 1, 5, 3]);
    ///
    /// let id = a.matmul(&inv).unwrap().mod_reduce(7).unwrap();
    /// assert_eq!(id, Matrix::identity(2).unwrap());
    /// ```
    #[cfg_attr(feature = "tracing", instrument(skip(self), fields(n = self.rows)))]
    pub fn mod_inverse(&self, modulus: T) -> Result<Matrix<T>> {
        if self.rows != self.cols {
            return Err(MatkernError::NotSquare {
                rows: self.rows,
                cols: self.cols,
            });
        }
        let m = checked_modulus(modulus)?;

        let n = self.rows;
        let width = 2 * n;
        let src = &self.data;

        // [A | I], reduced into [0, m)
        let mut aug = Matrix::<i128>::zeros_with_backend(n, width, self.backend);
        aug.fill(|r, c| {
            if c < n {
                src[r * n + c].to_i128().rem_euclid(m)
            } else if c - n == r {
                1 % m
            } else {
                0
            }
        });

        let parallel = use_parallel(self.backend, n * width);

        for r in 0..n {
            let pivot_row = normalize_pivot(&mut aug.data[r * width..(r + 1) * width], r, m)?;

            for_each_row_block(&mut aug.data, width, parallel, |r2, row| {
                if r2 != r {
                    eliminate(row, &pivot_row, r, m);
                }
            });
        }

        let mut inverse = Matrix::zeros_with_backend(n, n, self.backend);
        // Right half of the reduced augmented matrix
        for (dst, aug_row) in inverse.data.chunks_mut(n).zip(aug.data.chunks(width)) {
            for (d, &s) in dst.iter_mut().zip(&aug_row[n..]) {
                *d = T::from_residue(s);
            }
        }

        Ok(inverse)
    }

    /// Reduces every element into `[0, modulus)`
    ///
    /// # Errors
    ///
    /// Returns `InvalidModulus` if `modulus <= 0`
    pub fn mod_reduce(&self, modulus: T) -> Result<Matrix<T>> {
        let m = checked_modulus(modulus)?;

        let mut result = Matrix::zeros_with_backend(self.rows, self.cols, self.backend);
        for (d, &s) in result.data.iter_mut().zip(&self.data) {
            *d = T::from_residue(s.to_i128().rem_euclid(m));
        }
        Ok(result)
    }
}

fn checked_modulus<T: ModularElement>(modulus: T) -> Result<i128> {
    let m = modulus.to_i128();
    if m <= 0 {
        return Err(MatkernError::InvalidModulus(m));
    }
    Ok(m)
}

/// Normalize phase: scales `row` so its pivot at column `r` becomes 1 and
/// returns a snapshot of the finished row for the eliminate phase.
fn normalize_pivot(row: &mut [i128], r: usize, m: i128) -> Result<Vec<i128>> {
    let pivot = row[r];
    let factor = match inverse_i128(pivot, m) {
        Some(factor) => factor,
        None => {
            #[cfg(feature = "tracing")]
            tracing::warn!(row = r, pivot, modulus = m, "pivot has no modular inverse");

            return Err(MatkernError::NonInvertible {
                row: r,
                pivot,
                modulus: m,
            });
        }
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(row = r, pivot, factor, "normalized pivot row");

    for value in &mut row[r..] {
        *value = (*value * factor).rem_euclid(m);
    }
    Ok(row.to_vec())
}

/// Eliminate phase for one non-pivot row
fn eliminate(row: &mut [i128], pivot_row: &[i128], r: usize, m: i128) {
    let factor = row[r];
    if factor == 0 {
        return;
    }
    for (value, &p) in row[r..].iter_mut().zip(&pivot_row[r..]) {
        *value = (*value - factor * p).rem_euclid(m);
    }
}
