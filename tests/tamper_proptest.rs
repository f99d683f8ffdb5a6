//! Randomized tamper-resistance properties.
//!
//! Any single-bit change to a ciphertext or to the encapsulation seed must be
//! absorbed by implicit rejection: decapsulation succeeds, yields a secret
//! different from the honest one, and yields it deterministically.

use kyber_pqc::{
    Ciphertext, Kyber512, Kyber768, Kyber1024, ParameterSet, decapsulate, encapsulate_derand,
    keypair_derand,
};
use proptest::prelude::*;

fn flipped_ciphertext_is_rejected<P: ParameterSet>(
    d: [u8; 32], z: [u8; 32], seed: [u8; 32], bit: usize,
) -> Result<(), TestCaseError> {
    let (pk, sk) = keypair_derand::<P>(&d, &z);
    let (ct, ss) = encapsulate_derand::<P>(&pk, &seed);

    let bit = bit % (P::CT_BYTES * 8);
    let mut bytes = ct.into_bytes();
    bytes.as_mut()[bit / 8] ^= 1 << (bit % 8);
    let tampered = Ciphertext::<P>::from_bytes(bytes);

    let first = decapsulate::<P>(&tampered, &sk);
    let second = decapsulate::<P>(&tampered, &sk);
    prop_assert_ne!(first.as_bytes(), ss.as_bytes(), "bit {} accepted", bit);
    prop_assert_eq!(first.as_bytes(), second.as_bytes());
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_bit_flip_rejected_512(
        d in any::<[u8; 32]>(),
        z in any::<[u8; 32]>(),
        seed in any::<[u8; 32]>(),
        bit in any::<usize>(),
    ) {
        flipped_ciphertext_is_rejected::<Kyber512>(d, z, seed, bit)?;
    }

    #[test]
    fn prop_bit_flip_rejected_768(
        d in any::<[u8; 32]>(),
        seed in any::<[u8; 32]>(),
        bit in any::<usize>(),
    ) {
        flipped_ciphertext_is_rejected::<Kyber768>(d, [0x11; 32], seed, bit)?;
    }

    #[test]
    fn prop_bit_flip_rejected_1024(
        d in any::<[u8; 32]>(),
        seed in any::<[u8; 32]>(),
        bit in any::<usize>(),
    ) {
        flipped_ciphertext_is_rejected::<Kyber1024>(d, [0x22; 32], seed, bit)?;
    }

    #[test]
    fn prop_roundtrip_agrees(
        d in any::<[u8; 32]>(),
        z in any::<[u8; 32]>(),
        seed in any::<[u8; 32]>(),
    ) {
        let (pk, sk) = keypair_derand::<Kyber512>(&d, &z);
        let (ct, ss) = encapsulate_derand::<Kyber512>(&pk, &seed);
        let ss_dec = decapsulate::<Kyber512>(&ct, &sk);
        prop_assert_eq!(ss_dec.as_bytes(), ss.as_bytes());
    }

    #[test]
    fn prop_seed_bit_flip_changes_everything(
        seed in any::<[u8; 32]>(),
        bit in 0usize..256,
    ) {
        let (pk, _) = keypair_derand::<Kyber512>(&[7; 32], &[8; 32]);
        let (ct1, ss1) = encapsulate_derand::<Kyber512>(&pk, &seed);
        let mut other = seed;
        other[bit / 8] ^= 1 << (bit % 8);
        let (ct2, ss2) = encapsulate_derand::<Kyber512>(&pk, &other);
        prop_assert_ne!(ct1.as_bytes(), ct2.as_bytes());
        prop_assert_ne!(ss1.as_bytes(), ss2.as_bytes());
    }
}
