//! Negacyclic number-theoretic transform over `Z_q[X]/(X^256 + 1)`.
//!
//! Seven Cooley-Tukey layers split a polynomial into 128 residues modulo
//! `X^2 - zeta_i`; the Gentleman-Sande inverse merges them back. Twiddles are
//! stored Montgomery-scaled so each butterfly costs a single [`fqmul`].

use crate::{
    N, Q,
    reduce::{barrett_reduce, fqmul},
};

/// Primitive 256th root of unity modulo q.
pub const ROOT_OF_UNITY: i16 = 17;

const fn centred(x: i64) -> i16 {
    let x = x.rem_euclid(Q as i64);
    if x > Q as i64 / 2 { (x - Q as i64) as i16 } else { x as i16 }
}

/// `ZETAS[i] = 2^16 * 17^{rev7(i)} mod q`, centred, where `rev7` reverses the
/// low seven bits of `i`.
pub const ZETAS: [i16; 128] = {
    let mut powers = [1i64; 128];
    let mut e = 1;
    while e < 128 {
        powers[e] = powers[e - 1] * ROOT_OF_UNITY as i64 % Q as i64;
        e += 1;
    }

    let mut table = [0i16; 128];
    let mut i = 0;
    while i < 128 {
        let rev = ((i as u8).reverse_bits() >> 1) as usize;
        table[i] = centred(powers[rev] << 16);
        i += 1;
    }
    table
};

/// `R^2 / 128 mod q`. Folds the `1/128` of the inverse transform into one
/// multiplication and leaves every output scaled by `R`.
const INV_NTT_SCALE: i16 = 1441;

/// In-place forward transform: standard order in, bit-reversed order out.
///
/// Inputs bounded by `q` in absolute value give outputs bounded by `8q`;
/// callers reduce afterwards.
pub fn forward_ntt(r: &mut [i16; N]) {
    let mut k = 1;
    for layer in 1..=7 {
        let half = N >> layer;
        for block in r.chunks_exact_mut(2 * half) {
            let zeta = ZETAS[k];
            k += 1;
            let (lo, hi) = block.split_at_mut(half);
            for (a, b) in lo.iter_mut().zip(hi) {
                let t = fqmul(zeta, *b);
                *b = *a - t;
                *a += t;
            }
        }
    }
}

/// In-place inverse transform: bit-reversed in, standard order out. Every
/// output coefficient carries an extra factor `R = 2^16`.
pub fn inverse_ntt(r: &mut [i16; N]) {
    let mut k = 127;
    for layer in (1..=7).rev() {
        let half = N >> layer;
        for block in r.chunks_exact_mut(2 * half) {
            let zeta = ZETAS[k];
            k -= 1;
            let (lo, hi) = block.split_at_mut(half);
            for (a, b) in lo.iter_mut().zip(hi) {
                let t = *a;
                *a = barrett_reduce(t + *b);
                *b = fqmul(zeta, *b - t);
            }
        }
    }
    for c in r.iter_mut() {
        *c = fqmul(*c, INV_NTT_SCALE);
    }
}

/// `(a0 + a1 X) * (b0 + b1 X) mod (X^2 - zeta)`, scaled by `R^{-1}`.
#[inline]
#[must_use]
pub const fn basemul(a: [i16; 2], b: [i16; 2], zeta: i16) -> [i16; 2] {
    [
        fqmul(fqmul(a[1], b[1]), zeta) + fqmul(a[0], b[0]),
        fqmul(a[0], b[1]) + fqmul(a[1], b[0]),
    ]
}

/// Product of two transformed polynomials: 128 [`basemul`]s, residue pairs
/// `4i, 4i+1` modulo `X^2 - zeta` and `4i+2, 4i+3` modulo `X^2 + zeta`.
#[must_use]
pub fn basemul_poly(a: &[i16; N], b: &[i16; N]) -> [i16; N] {
    let mut r = [0i16; N];
    let quads = r.chunks_exact_mut(4).zip(a.chunks_exact(4).zip(b.chunks_exact(4)));
    for (i, (out, (x, y))) in quads.enumerate() {
        let zeta = ZETAS[64 + i];
        let lo = basemul([x[0], x[1]], [y[0], y[1]], zeta);
        let hi = basemul([x[2], x[3]], [y[2], y[3]], -zeta);
        out.copy_from_slice(&[lo[0], lo[1], hi[0], hi[1]]);
    }
    r
}
