//! `kyber-math`: core mathematical primitives for Kyber-class KEMs.
//!
//! `no_std`, zero-allocation polynomial arithmetic over `Z_q[X]/(X^{256}+1)`.
//! Sub-modules cover modular reduction, the Number-Theoretic Transform,
//! polynomial and polynomial-vector arithmetic, byte-level packing and
//! compression, and the deterministic halves of the samplers (the hash
//! streams that feed them live in the parent crate).
//!
//! Every routine here runs a fixed instruction sequence for a given input
//! size, with the single exception of [`sample::reject_uniform`], whose loop
//! length depends on public seed material only.

#![no_std]

pub mod compress;
pub mod encode;
pub mod ntt;
pub mod poly;
pub mod reduce;
pub mod sample;

/// Polynomial ring degree.
pub const N: usize = 256;

/// Field modulus.
pub const Q: i16 = 3329;

/// Size in bytes of hashes, seeds, and messages.
pub const SYMBYTES: usize = 32;

/// Size in bytes of a serialised polynomial (12 bits * 256 / 8).
pub const POLYBYTES: usize = 384;
