//! Constant-time equality, selection and erasure. No secret-dependent
//! branching or indexing.

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroize;

/// Constant-time slice equality. Slices of different lengths compare unequal;
/// lengths are public.
#[inline]
#[must_use]
pub fn ct_eq(a: &[u8], b: &[u8]) -> Choice {
    a.ct_eq(b)
}

/// Returns `a` where `flag` is set, `b` otherwise, without branching on `flag`.
#[inline]
#[must_use]
pub fn ct_select<const L: usize>(flag: Choice, a: &[u8; L], b: &[u8; L]) -> [u8; L] {
    core::array::from_fn(|i| u8::conditional_select(&b[i], &a[i], flag))
}

/// Wipe `buf` with writes the optimiser cannot elide.
#[inline]
pub fn ct_zeroize(buf: &mut [u8]) {
    buf.zeroize();
}
