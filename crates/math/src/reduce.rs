//! Montgomery and Barrett modular reduction for the Kyber field (q = 3329).
//!
//! All functions are branch-free; the only data-dependent operations are
//! arithmetic shifts and masks.

use crate::Q;

/// q^{-1} mod 2^{16} (Montgomery inverse).
pub const QINV: i16 = -3327;

/// 2^{16} mod q (Montgomery radix residue), centred.
pub const MONT: i16 = -1044;

/// 2^{32} mod q, used to move a value into the Montgomery domain.
pub const MONT_SQ: i16 = 1353;

/// Montgomery reduction: computes `a * R^{-1} mod q` where R = 2^{16}.
///
/// Input: `a in {-q*2^{15}, ..., q*2^{15} - 1}`. Output: `r in {-q+1, ...,
/// q-1}` with `r \equiv a*R^{-1} (mod q)`.
#[inline]
#[must_use]
pub const fn montgomery_reduce(a: i32) -> i16 {
    let t = (a as i16).wrapping_mul(QINV);
    ((a - (t as i32) * (Q as i32)) >> 16) as i16
}

/// Barrett reduction: centered reduction modulo q.
///
/// Input any `i16`. Output: `r in {-floor(q/2), ..., floor(q/2)}` with
/// `r \equiv a (mod q)`.
#[inline]
#[must_use]
pub const fn barrett_reduce(a: i16) -> i16 {
    const V: i32 = ((1i32 << 26) + (Q as i32) / 2) / (Q as i32); // 20159
    let t = ((V * (a as i32) + (1 << 25)) >> 26) as i16;
    a.wrapping_sub(t.wrapping_mul(Q))
}

/// Field multiplication followed by Montgomery reduction: `a*b*R^{-1} mod q`.
#[inline]
#[must_use]
pub const fn fqmul(a: i16, b: i16) -> i16 {
    montgomery_reduce((a as i32) * (b as i32))
}

/// Conditionally add q so that a value in `(-q, q)` lands in `[0, q)`.
#[inline]
#[must_use]
pub const fn csubq(a: i16) -> u16 {
    let t = a as u16;
    t.wrapping_add(((a >> 15) as u16) & (Q as u16))
}

/// Fully reduce any `i16` to its canonical representative in `[0, q)`.
#[inline]
#[must_use]
pub const fn freeze(a: i16) -> i16 {
    csubq(barrett_reduce(a)) as i16
}

/// `a + b mod q` in `[0, q)` for any `i16` inputs.
#[inline]
#[must_use]
pub const fn add_mod(a: i16, b: i16) -> i16 {
    freeze(barrett_reduce(a) + barrett_reduce(b))
}

/// `a - b mod q` in `[0, q)` for any `i16` inputs.
#[inline]
#[must_use]
pub const fn sub_mod(a: i16, b: i16) -> i16 {
    freeze(barrett_reduce(a) - barrett_reduce(b))
}
