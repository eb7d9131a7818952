//! matkern: Dense-Matrix Numeric Kernels
//!
//! **matkern** provides a row-major [`Matrix`] together with a small set of
//! kernels over it:
//!
//! 1. **Transpose** - blocked, cache-friendly
//! 2. **Convolution** - valid mode, unit stride
//! 3. **Multiplication** - cache-tiled triple loop with configurable tiles
//! 4. **Modular inverse** - Gauss–Jordan elimination modulo `m`
//! 5. **Chain product** - left-to-right product of a matrix sequence
//! 6. **2D prefix sum** - incremental summed-area construction
//!
//! # Design Principles
//!
//! - **Value semantics**: every kernel reads its inputs and returns a newly
//!   allocated matrix; no kernel mutates an operand
//! - **Explicit failure**: precondition violations surface as [`MatkernError`]
//! - **Parallel-ready**: with the `parallel` feature, kernels split disjoint
//!   output rows across rayon workers; results are identical to sequential
//!
//! # Quick Start
//!
//! ```rust
//! use matkern::Matrix;
//!
//! let a = Matrix::from_vec(2, 2, vec![1, 2, 3, 4]).unwrap();
//! let b = Matrix::from_vec(2, 2, vec![5, 6, 7, 8]).unwrap();
//!
//! let c = a.matmul(&b).unwrap();
//! assert_eq!(c.as_slice(), &[19, 22, 43, 50]);
//! assert_eq!(a.transpose().transpose(), a);
//! ```

pub mod element;
pub mod error;
pub mod kernels;
pub mod matrix;
pub mod modular;

pub use element::{Element, ModularElement};
pub use error::{MatkernError, Result};
pub use kernels::chain::chain_product;
pub use kernels::matmul::TileConfig;
pub use matrix::Matrix;
pub use modular::mod_inverse;

/// Kernel execution target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Single-threaded loops
    Sequential,
    /// Row-block parallelism over rayon (requires the `parallel` feature,
    /// otherwise treated as `Sequential`)
    Parallel,
}

impl Backend {
    /// Select the best backend compiled into this build
    ///
    /// Returns `Parallel` when the `parallel` feature is enabled, otherwise
    /// `Sequential`.
    ///
    /// # Examples
    ///
    /// ```
    /// use matkern::Backend;
    ///
    /// let backend = Backend::select_best();
    /// println!("Using backend: {:?}", backend);
    /// ```
    pub fn select_best() -> Self {
        if cfg!(feature = "parallel") {
            Backend::Parallel
        } else {
            Backend::Sequential
        }
    }
}
