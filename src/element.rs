//! Numeric element types stored in a [`Matrix`](crate::Matrix)
//!
//! The element type is fixed per matrix at compile time. Floating-point and
//! signed integer types are supported; the modular kernels additionally
//! require [`ModularElement`].

use std::fmt::{Debug, Display};
use std::ops::{Add, AddAssign, Mul, Sub};

/// Scalar stored in a matrix buffer
pub trait Element:
    Copy
    + Default
    + PartialEq
    + Debug
    + Display
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + AddAssign
    + Send
    + Sync
    + 'static
{
    /// Additive identity
    const ZERO: Self;
    /// Multiplicative identity
    const ONE: Self;
}

macro_rules! impl_element {
    ($($t:ty => $zero:expr, $one:expr);* $(;)?) => {
        $(
            impl Element for $t {
                const ZERO: Self = $zero;
                const ONE: Self = $one;
            }
        )*
    };
}

impl_element! {
    i32 => 0, 1;
    i64 => 0, 1;
    i128 => 0, 1;
    f32 => 0.0, 1.0;
    f64 => 0.0, 1.0;
}

/// Signed integer element usable in modular arithmetic
///
/// Arithmetic is carried out in `i128`, so the product of two residues of
/// any implementing type cannot overflow. That bound is why only `i32` and
/// `i64` implement it.
pub trait ModularElement: Element + Ord {
    /// Lossless widening
    fn to_i128(self) -> i128;

    /// Narrowing of a value already reduced into `[0, m)` for some `m` of
    /// type `Self`, which always fits.
    fn from_residue(value: i128) -> Self;
}

macro_rules! impl_modular_element {
    ($($t:ty),*) => {
        $(
            impl ModularElement for $t {
                #[inline]
                fn to_i128(self) -> i128 {
                    self as i128
                }

                #[inline]
                fn from_residue(value: i128) -> Self {
                    debug_assert!(value >= <$t>::MIN as i128 && value <= <$t>::MAX as i128);
                    value as $t
                }
            }
        )*
    };
}

impl_modular_element!(i32, i64);
