//! `kyber-pqc` -- a native, constant-time Kyber-class key encapsulation
//! mechanism.
//!
//! Implements the Kyber KEM (IND-CPA encryption plus a Fujisaki-Okamoto
//! transform with implicit rejection) for the Kyber512, Kyber768 and
//! Kyber1024 parameter sets. The generic interface lives in [`kem`]; [`api`]
//! offers a byte-slice interface over the reference set, Kyber512.

#![deny(unsafe_code)]

pub mod api;
pub mod ct;
pub mod hash;
pub mod kem;
pub mod memlock;
pub mod params;
mod pke;
pub mod sampler;
pub mod types;

pub use kem::{decapsulate, encapsulate, encapsulate_derand, keypair, keypair_derand};
pub use kyber_math as math;
pub use memlock::{Guarded, LockError, MemoryLock, NoLock};
pub use params::{Kyber512, Kyber768, Kyber1024, ParameterSet};
pub use types::{Ciphertext, PublicKey, SecretKey, SharedSecret};

/// Errors returned when importing keys or ciphertexts from bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Input byte slice has the wrong length for the parameter set.
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Expected byte count.
        expected: usize,
        /// Actual byte count received.
        actual: usize,
    },
    /// Key bytes failed validation: a public key with an unreduced
    /// coefficient, or a secret key whose stored `H(pk)` does not match.
    #[error("invalid key")]
    InvalidKey,
}

pub type Result<T> = core::result::Result<T, Error>;
