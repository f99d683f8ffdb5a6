//! Kyber parameter sets: the [`ParameterSet`] trait and the zero-sized marker
//! types [`Kyber512`], [`Kyber768`] and [`Kyber1024`].

pub use kyber_math::{N, POLYBYTES, Q, SYMBYTES};
use kyber_math::{
    compress::{CompressWidth, CompressWidthParams, D4, D5, D10, D11},
    sample::{CbdWidth, Eta2, Eta3},
};
use zeroize::Zeroize;

/// Size in bytes of the shared-secret output.
pub const SSBYTES: usize = 32;

/// Fixed-size byte buffer backing a key or ciphertext.
pub trait ByteArray:
    AsRef<[u8]> + AsMut<[u8]> + Clone + core::fmt::Debug + Zeroize + Send + Sync + 'static {
    /// Array length in bytes.
    const LEN: usize;

    /// Return a zero-filled instance.
    fn zeroed() -> Self;
}

impl<const SIZE: usize> ByteArray for [u8; SIZE] {
    const LEN: usize = SIZE;

    #[inline]
    fn zeroed() -> Self {
        [0u8; SIZE]
    }
}

/// A Kyber parameter set. Implemented only by the marker types in this module.
pub trait ParameterSet: 'static + Send + Sync {
    /// Module rank.
    const K: usize;

    /// Noise width for the secret and key-generation error vectors.
    type Eta1: CbdWidth;
    /// Noise width for the encryption error terms.
    type Eta2: CbdWidth;
    /// Compression width of the `u` vector.
    type Du: CompressWidth;
    /// Compression width of the `v` polynomial.
    type Dv: CompressWidth;

    /// `K * POLYBYTES`: an encoded polynomial vector.
    const POLYVEC_BYTES: usize = Self::K * POLYBYTES;
    /// Compressed `v`.
    const POLY_COMPRESSED_BYTES: usize = <Self::Dv as CompressWidthParams>::POLY_BYTES;
    /// Compressed `u`.
    const POLYVEC_COMPRESSED_BYTES: usize = Self::K * <Self::Du as CompressWidthParams>::POLY_BYTES;
    /// IND-CPA public key: `seed || encode(t)`.
    const INDCPA_PK_BYTES: usize = SYMBYTES + Self::POLYVEC_BYTES;
    /// IND-CPA secret key: `encode(s)`.
    const INDCPA_SK_BYTES: usize = Self::POLYVEC_BYTES;
    /// IND-CPA ciphertext.
    const INDCPA_BYTES: usize = Self::POLYVEC_COMPRESSED_BYTES + Self::POLY_COMPRESSED_BYTES;
    /// KEM public key.
    const PK_BYTES: usize = Self::INDCPA_PK_BYTES;
    /// KEM secret key: `encode(s) || pk || H(pk) || z`.
    const SK_BYTES: usize = Self::INDCPA_SK_BYTES + Self::PK_BYTES + 2 * SYMBYTES;
    /// KEM ciphertext.
    const CT_BYTES: usize = Self::INDCPA_BYTES;

    /// Backing array for public keys.
    type PkArray: ByteArray;
    /// Backing array for secret keys.
    type SkArray: ByteArray;
    /// Backing array for ciphertexts.
    type CtArray: ByteArray;

    /// Short human-readable name, used in log records.
    const NAME: &'static str;
}

/// Kyber512 (k = 2). The reference parameter set of the byte-level API.
#[derive(Debug, Clone, Copy)]
pub struct Kyber512;

impl ParameterSet for Kyber512 {
    const K: usize = 2;
    type Eta1 = Eta3;
    type Eta2 = Eta2;
    type Du = D10;
    type Dv = D4;

    type PkArray = [u8; 800];
    type SkArray = [u8; 1632];
    type CtArray = [u8; 768];

    const NAME: &'static str = "kyber512";
}

/// Kyber768 (k = 3).
#[derive(Debug, Clone, Copy)]
pub struct Kyber768;

impl ParameterSet for Kyber768 {
    const K: usize = 3;
    type Eta1 = Eta2;
    type Eta2 = Eta2;
    type Du = D10;
    type Dv = D4;

    type PkArray = [u8; 1184];
    type SkArray = [u8; 2400];
    type CtArray = [u8; 1088];

    const NAME: &'static str = "kyber768";
}

/// Kyber1024 (k = 4).
#[derive(Debug, Clone, Copy)]
pub struct Kyber1024;

impl ParameterSet for Kyber1024 {
    const K: usize = 4;
    type Eta1 = Eta2;
    type Eta2 = Eta2;
    type Du = D11;
    type Dv = D5;

    type PkArray = [u8; 1568];
    type SkArray = [u8; 3168];
    type CtArray = [u8; 1568];

    const NAME: &'static str = "kyber1024";
}

const _: () = {
    macro_rules! check_params {
        ($t:ty) => {
            assert!(<<$t as ParameterSet>::PkArray as ByteArray>::LEN == <$t>::PK_BYTES);
            assert!(<<$t as ParameterSet>::SkArray as ByteArray>::LEN == <$t>::SK_BYTES);
            assert!(<<$t as ParameterSet>::CtArray as ByteArray>::LEN == <$t>::CT_BYTES);
            assert!(
                <$t>::POLY_COMPRESSED_BYTES
                    == N * <<$t as ParameterSet>::Dv as CompressWidthParams>::D as usize / 8
            );
            assert!(
                <$t>::POLYVEC_COMPRESSED_BYTES
                    == <$t>::K * N * <<$t as ParameterSet>::Du as CompressWidthParams>::D as usize
                        / 8
            );
        };
    }
    check_params!(Kyber512);
    check_params!(Kyber768);
    check_params!(Kyber1024);

    assert!(Kyber512::PK_BYTES == 800);
    assert!(Kyber512::SK_BYTES == 1632);
    assert!(Kyber512::CT_BYTES == 768);

    assert!(Kyber768::PK_BYTES == 1184);
    assert!(Kyber768::SK_BYTES == 2400);
    assert!(Kyber768::CT_BYTES == 1088);

    assert!(Kyber1024::PK_BYTES == 1568);
    assert!(Kyber1024::SK_BYTES == 3168);
    assert!(Kyber1024::CT_BYTES == 1568);
};
