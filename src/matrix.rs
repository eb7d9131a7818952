//! Matrix storage for matkern
//!
//! Provides the dense, row-major [`Matrix`] every kernel consumes and
//! produces. Kernels live in [`crate::kernels`] and are exposed as methods
//! on `Matrix<T>`.
//!
//! # Example
//!
//! ```
//! use matkern::Matrix;
//!
//! // Create a 2x3 matrix
//! let m = Matrix::<i32>::new(2, 3).unwrap();
//! assert_eq!(m.rows(), 2);
//! assert_eq!(m.cols(), 3);
//! ```

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::{Backend, Element, MatkernError, Result};

/// A 2D matrix with row-major storage
///
/// Data is stored in row-major format (C-style), where consecutive elements
/// in memory belong to the same row: element `(r, c)` lives at offset
/// `r * cols + c`.
///
/// # Storage Layout
///
/// For a 2x3 matrix:
/// ```text
/// [[a, b, c],
///  [d, e, f]]
/// ```
/// Data is stored as: [a, b, c, d, e, f]
///
/// # Ownership
///
/// A matrix exclusively owns its buffer. `Clone` is a deep copy, so two
/// matrices never alias the same storage.
///
/// # Example
///
/// ```
/// use matkern::Matrix;
///
/// let m = Matrix::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
/// assert_eq!(m.get(0, 0), Ok(&1));
/// assert_eq!(m.get(0, 1), Ok(&2));
/// assert_eq!(m.get(1, 0), Ok(&3));
/// assert_eq!(m.get(1, 1), Ok(&4));
/// ```
#[derive(Debug, Clone)]
pub struct Matrix<T> {
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) data: Vec<T>,
    pub(crate) backend: Backend,
}

impl<T: Element> Matrix<T> {
    /// Creates a zero-filled matrix
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimension` if `rows` or `cols` is zero, or
    /// `InvalidInput` if `rows * cols` overflows
    ///
    /// # Example
    ///
    /// ```
    /// use matkern::{Matrix, MatkernError};
    ///
    /// let m = Matrix::<f32>::new(3, 4).unwrap();
    /// assert_eq!(m.shape(), (3, 4));
    /// assert_eq!(m.get(2, 3), Ok(&0.0));
    ///
    /// assert_eq!(
    ///     Matrix::<f32>::new(0, 4).unwrap_err(),
    ///     MatkernError::InvalidDimension { rows: 0, cols: 4 }
    /// );
    /// ```
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        check_dims(rows, cols)?;
        Ok(Self::zeros_with_backend(rows, cols, Backend::select_best()))
    }

    /// Creates a zero-filled matrix using a specific backend
    /// (Internal use only - dimensions are derived from validated operands)
    pub(crate) fn zeros_with_backend(rows: usize, cols: usize, backend: Backend) -> Self {
        debug_assert!(rows > 0 && cols > 0);
        Matrix {
            rows,
            cols,
            data: vec![T::ZERO; rows * cols],
            backend,
        }
    }

    /// Creates a matrix from a vector of data in row-major order
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimension` for a zero dimension and `InvalidInput` if
    /// `data.len() != rows * cols`
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        let len = check_dims(rows, cols)?;
        if data.len() != len {
            return Err(MatkernError::InvalidInput(format!(
                "Data length {} does not match matrix dimensions {}x{} (expected {})",
                data.len(),
                rows,
                cols,
                len
            )));
        }

        Ok(Matrix {
            rows,
            cols,
            data,
            backend: Backend::select_best(),
        })
    }

    /// Creates a matrix from a slice by copying the data
    pub fn from_slice(rows: usize, cols: usize, data: &[T]) -> Result<Self> {
        Self::from_vec(rows, cols, data.to_vec())
    }

    /// Creates a matrix and fills it from `generator` (see [`Matrix::fill`])
    ///
    /// # Example
    ///
    /// ```
    /// use matkern::Matrix;
    ///
    /// let m = Matrix::from_fn(2, 2, |r, c| (r * 10 + c) as i64).unwrap();
    /// assert_eq!(m.as_slice(), &[0, 1, 10, 11]);
    /// ```
    pub fn from_fn<F>(rows: usize, cols: usize, generator: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> T,
    {
        let mut m = Self::new(rows, cols)?;
        m.fill(generator);
        Ok(m)
    }

    /// Creates an `n x n` identity matrix
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimension` if `n == 0`
    pub fn identity(n: usize) -> Result<Self> {
        let mut m = Self::new(n, n)?;
        for i in 0..n {
            m.data[i * n + i] = T::ONE;
        }
        Ok(m)
    }

    /// Pins the execution backend used by kernels that take this matrix as
    /// their primary operand
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Returns the execution backend
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Returns the number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the shape as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns a reference to the underlying row-major data
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Overwrites every element with `generator(row, col)`
    ///
    /// The generator is invoked exactly once per coordinate, in row-major
    /// order, so stateful generators (counters, seeded RNGs) see a
    /// deterministic sequence.
    ///
    /// # Example
    ///
    /// ```
    /// use matkern::Matrix;
    ///
    /// let mut b = Matrix::<i32>::new(2, 3).unwrap();
    /// let mut counter = 0;
    /// b.fill(|_, _| {
    ///     counter += 1;
    ///     counter - 1
    /// });
    /// assert_eq!(b.as_slice(), &[0, 1, 2, 3, 4, 5]);
    /// ```
    pub fn fill<F>(&mut self, mut generator: F)
    where
        F: FnMut(usize, usize) -> T,
    {
        let cols = self.cols;
        for (idx, slot) in self.data.iter_mut().enumerate() {
            *slot = generator(idx / cols, idx % cols);
        }
    }

    /// Gets a reference to the element at (row, col)
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the coordinate is outside the matrix
    pub fn get(&self, row: usize, col: usize) -> Result<&T> {
        let idx = self.offset(row, col)?;
        Ok(&self.data[idx])
    }

    /// Gets a mutable reference to the element at (row, col)
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the coordinate is outside the matrix
    pub fn get_mut(&mut self, row: usize, col: usize) -> Result<&mut T> {
        let idx = self.offset(row, col)?;
        Ok(&mut self.data[idx])
    }

    /// Writes `value` at (row, col)
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the coordinate is outside the matrix
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        *self.get_mut(row, col)? = value;
        Ok(())
    }
}

impl<T> Matrix<T> {
    /// Linear offset of (row, col), bounds checked
    #[inline]
    fn offset(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.rows || col >= self.cols {
            Err(MatkernError::OutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
        } else {
            Ok(row * self.cols + col)
        }
    }
}

/// Validates dimensions and returns the element count
fn check_dims(rows: usize, cols: usize) -> Result<usize> {
    if rows == 0 || cols == 0 {
        return Err(MatkernError::InvalidDimension { rows, cols });
    }
    rows.checked_mul(cols).ok_or_else(|| {
        MatkernError::InvalidInput(format!(
            "Matrix dimensions {rows}x{cols} overflow the addressable element count"
        ))
    })
}

/// Dimensions and elements must match; the backend is an execution hint
/// and does not take part in equality.
impl<T: PartialEq> PartialEq for Matrix<T> {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows && self.cols == other.cols && self.data == other.data
    }
}

impl<T: Eq> Eq for Matrix<T> {}

/// Bounds-checked indexing that panics with the `OutOfRange` message
impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        match self.offset(row, col) {
            Ok(idx) => &self.data[idx],
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        match self.offset(row, col) {
            Ok(idx) => &mut self.data[idx],
            Err(err) => panic!("{err}"),
        }
    }
}

/// Diagnostic rendering: a `Rows R, Cols C` header followed by one bracketed
/// line per row. Not intended to be parsed back.
impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rows {}, Cols {}", self.rows, self.cols)?;
        for row in self.data.chunks(self.cols) {
            write!(f, "[ ")?;
            for value in row {
                write!(f, "{value} ")?;
            }
            writeln!(f, "] ")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_new() {
        let m = Matrix::<f32>::new(3, 4).unwrap();
        assert_eq!(m.rows(), 3);
        assert_eq!(m.cols(), 4);
        assert_eq!(m.shape(), (3, 4));
        assert_eq!(m.as_slice().len(), 12);
        assert!(m.as_slice().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_matrix_new_zero_dimension() {
        assert_eq!(
            Matrix::<i32>::new(0, 3),
            Err(MatkernError::InvalidDimension { rows: 0, cols: 3 })
        );
        assert_eq!(
            Matrix::<i32>::new(3, 0),
            Err(MatkernError::InvalidDimension { rows: 3, cols: 0 })
        );
    }

    #[test]
    fn test_from_vec_length_mismatch() {
        let err = Matrix::from_vec(2, 2, vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, MatkernError::InvalidInput(_)));
        assert!(err.to_string().contains("expected 4"));
    }

    #[test]
    fn test_dimension_product_overflow() {
        let err = Matrix::<i32>::from_vec(usize::MAX, 2, vec![]).unwrap_err();
        assert!(matches!(err, MatkernError::InvalidInput(_)));
        assert!(err.to_string().contains("overflow"));

        assert!(matches!(
            Matrix::<i32>::new(usize::MAX, usize::MAX),
            Err(MatkernError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_from_vec_zero_dimension() {
        let err = Matrix::<i32>::from_vec(0, 2, vec![]).unwrap_err();
        assert_eq!(err, MatkernError::InvalidDimension { rows: 0, cols: 2 });
    }

    #[test]
    fn test_identity() {
        let m = Matrix::<i64>::identity(3).unwrap();
        assert_eq!(m.as_slice(), &[1, 0, 0, 0, 1, 0, 0, 0, 1]);
        assert!(Matrix::<i64>::identity(0).is_err());
    }

    #[test]
    fn test_fill_visits_row_major() {
        let mut m = Matrix::<i32>::new(2, 3).unwrap();
        let mut visited = Vec::new();
        m.fill(|r, c| {
            visited.push((r, c));
            (r + c) as i32
        });
        assert_eq!(
            visited,
            vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]
        );
        assert_eq!(m.as_slice(), &[0, 1, 2, 1, 2, 3]);
    }

    #[test]
    fn test_fill_overwrites() {
        let mut m = Matrix::from_vec(1, 2, vec![9, 9]).unwrap();
        m.fill(|_, c| c as i32);
        assert_eq!(m.as_slice(), &[0, 1]);
    }

    #[test]
    fn test_get_set_bounds() {
        let mut m = Matrix::<i32>::new(2, 2).unwrap();
        m.set(1, 0, 7).unwrap();
        assert_eq!(m.get(1, 0), Ok(&7));
        assert_eq!(m.as_slice()[2], 7);

        let err = MatkernError::OutOfRange {
            row: 2,
            col: 0,
            rows: 2,
            cols: 2,
        };
        assert_eq!(m.get(2, 0), Err(err.clone()));
        assert_eq!(m.set(2, 0, 1), Err(err));
        assert!(m.get(0, 2).is_err());
        assert!(m.get_mut(5, 5).is_err());
    }

    #[test]
    fn test_index_access() {
        let mut m = Matrix::<f64>::new(2, 3).unwrap();
        m[(1, 2)] = 4.5;
        assert_eq!(m[(1, 2)], 4.5);
        assert_eq!(m.as_slice()[5], 4.5);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_index_out_of_range_panics() {
        let m = Matrix::<i32>::new(2, 2).unwrap();
        let _ = m[(0, 2)];
    }

    #[test]
    fn test_equality() {
        let a = Matrix::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
        let b = Matrix::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
        let c = Matrix::from_vec(2, 2, vec![1, 2, 3, 5]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);

        // Same element count, different shape
        let flat = Matrix::from_vec(1, 4, vec![1, 2, 3, 4]).unwrap();
        assert_ne!(a, flat);
    }

    #[test]
    fn test_equality_ignores_backend() {
        let a = Matrix::from_vec(1, 2, vec![1, 2])
            .unwrap()
            .with_backend(Backend::Sequential);
        let b = a.clone().with_backend(Backend::Parallel);
        assert_eq!(a, b);
        assert_eq!(b.backend(), Backend::Parallel);
    }

    #[test]
    fn test_clone_is_deep() {
        let a = Matrix::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
        let mut b = a.clone();
        b[(0, 0)] = 100;
        assert_eq!(a[(0, 0)], 1);
        assert_eq!(b[(0, 0)], 100);
    }

    #[test]
    fn test_display() {
        let m = Matrix::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(m.to_string(), "Rows 2, Cols 2\n[ 1 2 ] \n[ 3 4 ] \n");
    }
}
