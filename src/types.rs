//! Key and ciphertext types.
//!
//! All types wrap fixed-size byte arrays chosen by the [`ParameterSet`].
//! Secret types zeroize on drop and never print their contents.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{
    Error, Result, ct, hash,
    params::{ByteArray, ParameterSet, SSBYTES, SYMBYTES},
};

fn copy_exact<A: ByteArray>(bytes: &[u8]) -> Result<A> {
    if bytes.len() != A::LEN {
        return Err(Error::InvalidLength {
            expected: A::LEN,
            actual: bytes.len(),
        });
    }
    let mut arr = A::zeroed();
    arr.as_mut().copy_from_slice(bytes);
    Ok(arr)
}

/// Encapsulation (public) key: `rho || encode(t)`.
pub struct PublicKey<P: ParameterSet> {
    pub(crate) bytes: P::PkArray,
}

impl<P: ParameterSet> PublicKey<P> {
    /// Wrap an existing byte array without validation.
    #[must_use]
    pub fn from_bytes(bytes: P::PkArray) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_ref()
    }

    #[must_use]
    pub fn into_bytes(self) -> P::PkArray {
        self.bytes
    }

    /// True iff every encoded coefficient of `t` is reduced mod q.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        kyber_math::encode::check_modulus(&self.as_bytes()[SYMBYTES..])
    }
}

impl<P: ParameterSet> TryFrom<&[u8]> for PublicKey<P> {
    type Error = Error;

    /// Length check followed by the modulus check.
    fn try_from(bytes: &[u8]) -> Result<Self> {
        let pk = Self::from_bytes(copy_exact(bytes)?);
        if !pk.is_well_formed() {
            return Err(Error::InvalidKey);
        }
        Ok(pk)
    }
}

impl<P: ParameterSet> AsRef<[u8]> for PublicKey<P> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}

impl<P: ParameterSet> Clone for PublicKey<P> {
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
        }
    }
}

impl<P: ParameterSet> PartialEq for PublicKey<P> {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<P: ParameterSet> Eq for PublicKey<P> {}

impl<P: ParameterSet> core::fmt::Debug for PublicKey<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PublicKey")
            .field("params", &P::NAME)
            .field("len", &self.bytes.as_ref().len())
            .finish_non_exhaustive()
    }
}

/// Decapsulation (secret) key: `encode(s) || pk || H(pk) || z`.
pub struct SecretKey<P: ParameterSet> {
    pub(crate) bytes: P::SkArray,
}

impl<P: ParameterSet> SecretKey<P> {
    /// Wrap an existing byte array without validation.
    #[must_use]
    pub fn from_bytes(bytes: P::SkArray) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_ref()
    }

    pub(crate) fn pke_secret(&self) -> &[u8] {
        &self.as_bytes()[..P::INDCPA_SK_BYTES]
    }

    pub(crate) fn public_bytes(&self) -> &[u8] {
        &self.as_bytes()[P::INDCPA_SK_BYTES..P::INDCPA_SK_BYTES + P::PK_BYTES]
    }

    pub(crate) fn public_key_hash(&self) -> &[u8] {
        let start = P::INDCPA_SK_BYTES + P::PK_BYTES;
        &self.as_bytes()[start..start + SYMBYTES]
    }

    pub(crate) fn rejection_value(&self) -> [u8; SYMBYTES] {
        let mut z = [0u8; SYMBYTES];
        z.copy_from_slice(&self.as_bytes()[P::SK_BYTES - SYMBYTES..]);
        z
    }

    /// The public key embedded in this secret key.
    #[must_use]
    pub fn public_key(&self) -> PublicKey<P> {
        let mut bytes = P::PkArray::zeroed();
        bytes.as_mut().copy_from_slice(self.public_bytes());
        PublicKey::from_bytes(bytes)
    }

    /// Check that the embedded `H(pk)` matches the embedded public key.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let h = hash::hash_h(self.public_bytes());
        bool::from(ct::ct_eq(&h, self.public_key_hash()))
    }
}

impl<P: ParameterSet> TryFrom<&[u8]> for SecretKey<P> {
    type Error = Error;

    /// Length check followed by the `H(pk)` consistency check.
    fn try_from(bytes: &[u8]) -> Result<Self> {
        let sk = Self::from_bytes(copy_exact(bytes)?);
        if !sk.is_consistent() {
            return Err(Error::InvalidKey);
        }
        Ok(sk)
    }
}

impl<P: ParameterSet> AsRef<[u8]> for SecretKey<P> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}

impl<P: ParameterSet> Clone for SecretKey<P> {
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
        }
    }
}

impl<P: ParameterSet> AsMut<[u8]> for SecretKey<P> {
    #[inline]
    fn as_mut(&mut self) -> &mut [u8] {
        self.bytes.as_mut()
    }
}

impl<P: ParameterSet> Zeroize for SecretKey<P> {
    fn zeroize(&mut self) {
        ct::ct_zeroize(self.bytes.as_mut());
    }
}

impl<P: ParameterSet> Drop for SecretKey<P> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<P: ParameterSet> ZeroizeOnDrop for SecretKey<P> {}

impl<P: ParameterSet> core::fmt::Debug for SecretKey<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SecretKey")
            .field("params", &P::NAME)
            .finish_non_exhaustive()
    }
}

/// Ciphertext: `compress_du(u) || compress_dv(v)`.
pub struct Ciphertext<P: ParameterSet> {
    pub(crate) bytes: P::CtArray,
}

impl<P: ParameterSet> Ciphertext<P> {
    #[must_use]
    pub fn from_bytes(bytes: P::CtArray) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_ref()
    }

    #[must_use]
    pub fn into_bytes(self) -> P::CtArray {
        self.bytes
    }
}

impl<P: ParameterSet> TryFrom<&[u8]> for Ciphertext<P> {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        copy_exact(bytes).map(Self::from_bytes)
    }
}

impl<P: ParameterSet> AsRef<[u8]> for Ciphertext<P> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}

impl<P: ParameterSet> Clone for Ciphertext<P> {
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
        }
    }
}

impl<P: ParameterSet> core::fmt::Debug for Ciphertext<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Ciphertext")
            .field("params", &P::NAME)
            .field("len", &self.bytes.as_ref().len())
            .finish_non_exhaustive()
    }
}

/// 32-byte shared secret.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret {
    pub(crate) bytes: [u8; SSBYTES],
}

impl SharedSecret {
    #[must_use]
    pub fn from_bytes(bytes: [u8; SSBYTES]) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl AsRef<[u8]> for SharedSecret {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Constant-time comparison.
impl PartialEq for SharedSecret {
    fn eq(&self, other: &Self) -> bool {
        bool::from(ct::ct_eq(&self.bytes, &other.bytes))
    }
}

impl Eq for SharedSecret {}

impl core::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SharedSecret([REDACTED])")
    }
}
