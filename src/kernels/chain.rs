//! Product of a sequence of matrices

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{Element, MatkernError, Matrix, Result};

/// Left-to-right product `((M0 × M1) × M2) × ...` of a matrix sequence
///
/// No cost-based parenthesization is attempted. Adjacent dimensions are not
/// validated up front: an incompatible pair surfaces as the
/// `DimensionMismatch` of the multiplication that hits it. A single matrix
/// yields a copy of itself.
///
/// # Errors
///
/// Returns `EmptySequence` for an empty slice, or `DimensionMismatch` for
/// incompatible neighbours
///
/// # Example
///
/// ```
/// use matkern::{chain_product, Matrix};
///
/// let a = Matrix::from_vec(1, 2, vec![1, 2]).unwrap();
/// let b = Matrix::from_vec(2, 2, vec![1, 0, 0, 1]).unwrap();
/// let c = Matrix::from_vec(2, 1, vec![3, 4]).unwrap();
///
/// let p = chain_product(&[a, b, c]).unwrap();
/// assert_eq!(p.as_slice(), &[11]);
/// ```
#[cfg_attr(feature = "tracing", instrument(skip(matrices), fields(len = matrices.len())))]
pub fn chain_product<T: Element>(matrices: &[Matrix<T>]) -> Result<Matrix<T>> {
    let (first, rest) = matrices
        .split_first()
        .ok_or(MatkernError::EmptySequence)?;

    rest.iter()
        .try_fold(first.clone(), |product, next| product.matmul(next))
}
