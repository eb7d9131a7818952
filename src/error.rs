//! Error types for matkern operations

use thiserror::Error;

/// Result type for matkern operations
pub type Result<T> = std::result::Result<T, MatkernError>;

/// Errors that can occur while constructing matrices or running kernels
///
/// Every variant is a precondition violation detected at the point of use.
/// None of them is transient, so callers should treat them as terminal for
/// the computation that produced them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatkernError {
    /// A matrix was requested with zero rows or zero columns
    #[error("Invalid dimension: {rows}x{cols} (rows and cols must be positive)")]
    InvalidDimension {
        /// Requested rows
        rows: usize,
        /// Requested columns
        cols: usize,
    },

    /// Element access outside the matrix extent
    #[error("Coordinate ({row}, {col}) out of range for {rows}x{cols} matrix")]
    OutOfRange {
        /// Requested row
        row: usize,
        /// Requested column
        col: usize,
        /// Matrix rows
        rows: usize,
        /// Matrix columns
        cols: usize,
    },

    /// Inner dimensions of a product do not agree
    #[error("Dimension mismatch: {left_rows}x{left_cols} × {right_rows}x{right_cols} (inner dimensions {left_cols} and {right_rows} must match)")]
    DimensionMismatch {
        /// Left operand rows
        left_rows: usize,
        /// Left operand columns
        left_cols: usize,
        /// Right operand rows
        right_rows: usize,
        /// Right operand columns
        right_cols: usize,
    },

    /// Convolution kernel exceeds the input in at least one dimension
    #[error("Kernel size ({kernel_rows}x{kernel_cols}) larger than input ({input_rows}x{input_cols})")]
    KernelTooLarge {
        /// Kernel rows
        kernel_rows: usize,
        /// Kernel columns
        kernel_cols: usize,
        /// Input rows
        input_rows: usize,
        /// Input columns
        input_cols: usize,
    },

    /// Operation requires a square matrix
    #[error("Matrix is not square: {rows}x{cols}")]
    NotSquare {
        /// Matrix rows
        rows: usize,
        /// Matrix columns
        cols: usize,
    },

    /// Modulus must be strictly positive
    #[error("Invalid modulus: {0} (must be > 0)")]
    InvalidModulus(i128),

    /// A pivot shares a factor with the modulus
    #[error("Matrix is not invertible modulo {modulus}: pivot {pivot} at row {row} has no inverse")]
    NonInvertible {
        /// Pivot row where elimination stopped
        row: usize,
        /// Pivot value (reduced into `[0, modulus)`)
        pivot: i128,
        /// Modulus
        modulus: i128,
    },

    /// Chain product over zero matrices
    #[error("Product of an empty sequence of matrices is undefined")]
    EmptySequence,

    /// Malformed constructor or configuration input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
