//! SHA-3 adapters for the symmetric primitives Kyber is built on.
//!
//! - `H`   = SHA3-256
//! - `G`   = SHA3-512, split into two 32-byte halves
//! - `PRF` = SHAKE-256(seed || nonce)
//! - `XOF` = SHAKE-128(seed || i || j)
//! - `KDF` = SHAKE-256, 32-byte output

pub use sha3::digest::XofReader;
use sha3::{
    Digest, Sha3_256, Sha3_512, Shake128, Shake128Reader, Shake256,
    digest::{ExtendableOutput, Update},
};

use crate::params::{SSBYTES, SYMBYTES};

/// `H(input) = SHA3-256(input)`.
#[inline]
#[must_use]
pub fn hash_h(input: impl AsRef<[u8]>) -> [u8; SYMBYTES] {
    let mut out = [0u8; SYMBYTES];
    out.copy_from_slice(&Sha3_256::digest(input));
    out
}

/// `G(input) = SHA3-512(input)`, written as its two 32-byte halves into `lo`
/// and `hi`. The digest buffer is wiped before returning.
#[inline]
pub fn hash_g(input: impl AsRef<[u8]>, lo: &mut [u8; SYMBYTES], hi: &mut [u8; SYMBYTES]) {
    let mut digest = Sha3_512::digest(input);
    lo.copy_from_slice(&digest[..SYMBYTES]);
    hi.copy_from_slice(&digest[SYMBYTES..]);
    crate::ct::ct_zeroize(&mut digest);
}

/// `PRF(seed, nonce) = SHAKE-256(seed || nonce)`, squeezed into `output`.
pub fn prf(seed: &[u8; SYMBYTES], nonce: u8, output: &mut [u8]) {
    let mut buf = [0; SYMBYTES + 1];
    buf[..SYMBYTES].copy_from_slice(seed);
    buf[SYMBYTES] = nonce;
    Shake256::digest_xof(buf, output);
}

/// SHAKE-128 absorbing `seed || i || j`; the returned reader yields the
/// stream for matrix entry `(i, j)`.
#[must_use]
pub fn xof_absorb(seed: &[u8; SYMBYTES], i: u8, j: u8) -> Shake128Reader {
    let mut buf = [0; SYMBYTES + 2];
    buf[..SYMBYTES].copy_from_slice(seed);
    buf[SYMBYTES..].copy_from_slice(&[i, j]);
    Shake128::default().chain(buf).finalize_xof()
}

/// `KDF(key || ct_hash) = SHAKE-256(key || ct_hash)`, 32 bytes.
#[must_use]
pub fn kdf(key: impl AsRef<[u8]>, ct_hash: impl AsRef<[u8]>) -> [u8; SSBYTES] {
    let mut out = [0u8; SSBYTES];
    Shake256::default()
        .chain(key)
        .chain(ct_hash)
        .finalize_xof()
        .read(&mut out);
    out
}
