//! Hash-driven sampling: seed expansion, the public matrix, and CBD noise.

use kyber_math::{
    N,
    poly::{NttMatrix, NttPolynomial, Polynomial},
    sample::{self, CbdWidth},
};
use zeroize::Zeroizing;

use crate::{
    hash::{self, XofReader},
    params::SYMBYTES,
};

/// Largest PRF output any noise width consumes (`64 * 3`).
const MAX_CBD_BYTES: usize = 3 * N / 4;

/// Expand `seed` with one-byte domain separator `domain` into `out`.
#[inline]
pub fn expand_seed(seed: &[u8; SYMBYTES], domain: u8, out: &mut [u8]) {
    hash::prf(seed, domain, out);
}

/// Uniform polynomial for matrix entry `(i, j)`, already in NTT domain.
#[must_use]
pub fn sample_uniform(seed: &[u8; SYMBYTES], i: u8, j: u8) -> NttPolynomial {
    let mut xof = hash::xof_absorb(seed, i, j);
    let mut coeffs = [0i16; N];
    sample::reject_uniform(&mut coeffs, |buf| xof.read(buf));
    NttPolynomial::from(coeffs)
}

/// `CBD_eta` noise polynomial from `PRF(seed, nonce)`.
#[must_use]
pub fn sample_noise<Eta: CbdWidth>(seed: &[u8; SYMBYTES], nonce: u8) -> Polynomial {
    let mut buf = Zeroizing::new([0u8; MAX_CBD_BYTES]);
    let bytes = &mut buf[..Eta::BUF_BYTES];
    expand_seed(seed, nonce, bytes);
    Polynomial::sample_cbd::<Eta>(bytes)
}

/// The public matrix `A` (or `A^T` when `transposed`) from its 32-byte seed.
/// Entry `(i, j)` of `A` reads the stream `XOF(seed, j, i)`.
#[must_use]
pub fn gen_matrix<const K: usize>(seed: &[u8; SYMBYTES], transposed: bool) -> NttMatrix<K> {
    NttMatrix::from_fn(|i, j| {
        let (x, y) = if transposed { (i, j) } else { (j, i) };
        sample_uniform(seed, x as u8, y as u8)
    })
}
