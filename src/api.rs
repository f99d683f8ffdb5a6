//! Byte-level interface over the reference parameter set, [`Kyber512`].
//!
//! Keys and ciphertexts cross this boundary as plain byte slices and are
//! validated eagerly: wrong lengths fail with [`InvalidLength`](crate::Error::InvalidLength) before
//! any arithmetic runs.

use rand_core::CryptoRng;
use zeroize::Zeroizing;

use crate::{
    Result, kem,
    params::{Kyber512, ParameterSet},
    types::{Ciphertext, PublicKey, SecretKey, SharedSecret},
};

/// Parameter set used by every function in this module.
pub type Reference = Kyber512;

/// Public key length in bytes.
pub const PUBLIC_KEY_BYTES: usize = Reference::PK_BYTES;
/// Private key length in bytes.
pub const PRIVATE_KEY_BYTES: usize = Reference::SK_BYTES;
/// Ciphertext length in bytes.
pub const CIPHERTEXT_BYTES: usize = Reference::CT_BYTES;
/// Shared secret length in bytes.
pub const SHARED_SECRET_BYTES: usize = crate::params::SSBYTES;

/// Serialized key pair. The private half is wiped on drop.
pub struct KeyPair {
    pub public_key: Vec<u8>,
    pub private_key: Zeroizing<Vec<u8>>,
}

impl core::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key_len", &self.public_key.len())
            .finish_non_exhaustive()
    }
}

fn checked<T>(what: &'static str, parsed: Result<T>) -> Result<T> {
    if let Err(err) = &parsed {
        log::debug!("rejected {what}: {err}");
    }
    parsed
}

/// Key generation with a caller-supplied RNG.
pub fn generate_keypair_with_rng(rng: &mut impl CryptoRng) -> KeyPair {
    log::trace!("generating {} key pair", Reference::NAME);
    let (pk, sk) = kem::keypair::<Reference>(rng);
    KeyPair {
        public_key: pk.as_bytes().to_vec(),
        private_key: Zeroizing::new(sk.as_bytes().to_vec()),
    }
}

/// Encapsulation with a caller-supplied RNG. Returns `(ciphertext, secret)`.
pub fn encapsulate_with_rng(
    public_key: &[u8], rng: &mut impl CryptoRng,
) -> Result<(Vec<u8>, SharedSecret)> {
    let pk = checked("public key", PublicKey::<Reference>::try_from(public_key))?;
    log::trace!("encapsulating to {} public key", Reference::NAME);
    let (ct, ss) = kem::encapsulate(&pk, rng);
    Ok((ct.as_bytes().to_vec(), ss))
}

/// Key generation from the operating-system RNG. Panics if the RNG fails.
#[cfg(feature = "std")]
#[must_use]
pub fn generate_keypair() -> KeyPair {
    generate_keypair_with_rng(&mut os_rng())
}

/// Encapsulation from the operating-system RNG. Panics if the RNG fails.
#[cfg(feature = "std")]
pub fn encapsulate(public_key: &[u8]) -> Result<(Vec<u8>, SharedSecret)> {
    encapsulate_with_rng(public_key, &mut os_rng())
}

#[cfg(feature = "std")]
fn os_rng() -> rand_core::UnwrapErr<rand_core::OsRng> {
    use rand_core::TryRngCore;
    rand_core::OsRng.unwrap_err()
}

/// Decapsulate `ciphertext` with `private_key`.
///
/// Only malformed inputs fail. A well-formed but altered ciphertext yields a
/// pseudorandom secret unrelated to the sender's.
pub fn decapsulate(ciphertext: &[u8], private_key: &[u8]) -> Result<SharedSecret> {
    let ct = checked("ciphertext", Ciphertext::<Reference>::try_from(ciphertext))?;
    let sk = checked("private key", SecretKey::<Reference>::try_from(private_key))?;
    Ok(kem::decapsulate(&ct, &sk))
}
