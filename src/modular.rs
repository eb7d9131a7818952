//! Modular scalar arithmetic
//!
//! The multiplicative inverse here backs the Gauss–Jordan elimination in
//! [`Matrix::mod_inverse`](crate::Matrix::mod_inverse).

use crate::ModularElement;

/// Multiplicative inverse of `a` modulo `m` (Extended Euclidean Algorithm)
///
/// `a` is first reduced into `[0, m)`, so negative inputs are accepted.
/// The returned coefficient is normalized into `[0, m)`.
///
/// Returns `None` when `gcd(a, m) != 1` or when `m <= 0`. `None` is the only
/// "no inverse" signal: `Some(0)` is a genuine answer (for `m == 1`).
///
/// # Example
///
/// ```
/// use matkern::mod_inverse;
///
/// assert_eq!(mod_inverse(3, 7), Some(5)); // 3 * 5 = 15 ≡ 1 (mod 7)
/// assert_eq!(mod_inverse(-3i64, 7), Some(2));
/// assert_eq!(mod_inverse(2, 4), None);
/// ```
pub fn mod_inverse<T: ModularElement>(a: T, m: T) -> Option<T> {
    inverse_i128(a.to_i128(), m.to_i128()).map(T::from_residue)
}

pub(crate) fn inverse_i128(a: i128, m: i128) -> Option<i128> {
    if m <= 0 {
        return None;
    }

    let (mut old_r, mut r) = (a.rem_euclid(m), m);
    let (mut old_s, mut s) = (1i128, 0i128);

    while r != 0 {
        let q = old_r / r;
        (old_r, r) = (r, old_r - q * r);
        (old_s, s) = (s, old_s - q * s);
    }

    (old_r == 1).then(|| old_s.rem_euclid(m))
}
