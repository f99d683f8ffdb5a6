//! IND-CCA2 key encapsulation: the Fujisaki-Okamoto transform over [`pke`]
//! with implicit rejection.
//!
//! [`pke`]: crate::pke

use rand_core::CryptoRng;
use zeroize::Zeroizing;

use crate::{
    ct, hash,
    params::{ByteArray, ParameterSet, SYMBYTES},
    pke,
    types::{Ciphertext, PublicKey, SecretKey, SharedSecret},
};

/// Deterministic key generation. `d` seeds the IND-CPA key pair; `z` is the
/// implicit-rejection value stored in the secret key.
#[must_use]
pub fn keypair_derand<P: ParameterSet>(
    d: &[u8; SYMBYTES], z: &[u8; SYMBYTES],
) -> (PublicKey<P>, SecretKey<P>) {
    let mut pk = P::PkArray::zeroed();
    let mut sk = SecretKey::<P>::from_bytes(P::SkArray::zeroed());

    let sk_bytes = sk.bytes.as_mut();
    let (s_part, rest) = sk_bytes.split_at_mut(P::INDCPA_SK_BYTES);
    let (pk_part, rest) = rest.split_at_mut(P::PK_BYTES);
    let (h_part, z_part) = rest.split_at_mut(SYMBYTES);

    pke::keypair_derand::<P>(pk.as_mut(), s_part, d);
    pk_part.copy_from_slice(pk.as_ref());
    h_part.copy_from_slice(&hash::hash_h(pk.as_ref()));
    z_part.copy_from_slice(z);

    (PublicKey::from_bytes(pk), sk)
}

/// Randomized key generation.
pub fn keypair<P: ParameterSet>(rng: &mut impl CryptoRng) -> (PublicKey<P>, SecretKey<P>) {
    let mut coins = Zeroizing::new([0u8; 2 * SYMBYTES]);
    rng.fill_bytes(&mut coins[..]);
    let (d, z) = split_coins(&coins);
    keypair_derand::<P>(&d, &z)
}

fn split_coins(coins: &[u8; 2 * SYMBYTES]) -> (Zeroizing<[u8; SYMBYTES]>, Zeroizing<[u8; SYMBYTES]>) {
    let mut d = Zeroizing::new([0u8; SYMBYTES]);
    let mut z = Zeroizing::new([0u8; SYMBYTES]);
    d.copy_from_slice(&coins[..SYMBYTES]);
    z.copy_from_slice(&coins[SYMBYTES..]);
    (d, z)
}

/// `(K_bar, coins) = G(m || H(pk))`.
fn derive_key_and_coins(
    m: &[u8; SYMBYTES], pk_hash: &[u8],
) -> (Zeroizing<[u8; SYMBYTES]>, Zeroizing<[u8; SYMBYTES]>) {
    let mut buf = Zeroizing::new([0u8; 2 * SYMBYTES]);
    buf[..SYMBYTES].copy_from_slice(m);
    buf[SYMBYTES..].copy_from_slice(pk_hash);
    let mut k_bar = Zeroizing::new([0u8; SYMBYTES]);
    let mut coins = Zeroizing::new([0u8; SYMBYTES]);
    hash::hash_g(&*buf, &mut k_bar, &mut coins);
    (k_bar, coins)
}

/// Deterministic encapsulation. `seed` is hashed before use, so raw RNG
/// output never reaches the encryption.
#[must_use]
pub fn encapsulate_derand<P: ParameterSet>(
    pk: &PublicKey<P>, seed: &[u8; SYMBYTES],
) -> (Ciphertext<P>, SharedSecret) {
    let m = Zeroizing::new(hash::hash_h(seed));
    let (k_bar, coins) = derive_key_and_coins(&m, &hash::hash_h(pk.as_bytes()));

    let mut ct = P::CtArray::zeroed();
    pke::encrypt::<P>(ct.as_mut(), &m, pk.as_bytes(), &coins);

    let ss = hash::kdf(&*k_bar, hash::hash_h(ct.as_ref()));
    (Ciphertext::from_bytes(ct), SharedSecret::from_bytes(ss))
}

/// Randomized encapsulation.
pub fn encapsulate<P: ParameterSet>(
    pk: &PublicKey<P>, rng: &mut impl CryptoRng,
) -> (Ciphertext<P>, SharedSecret) {
    let mut seed = Zeroizing::new([0u8; SYMBYTES]);
    rng.fill_bytes(&mut seed[..]);
    encapsulate_derand::<P>(pk, &seed)
}

/// Decapsulation with implicit rejection. Never fails: a ciphertext that does
/// not re-encrypt identically yields `KDF(z || H(ct))`, selected without
/// branching on the comparison.
#[must_use]
pub fn decapsulate<P: ParameterSet>(ct: &Ciphertext<P>, sk: &SecretKey<P>) -> SharedSecret {
    let mut m = Zeroizing::new([0u8; SYMBYTES]);
    pke::decrypt::<P>(&mut m, ct.as_bytes(), sk.pke_secret());

    let (k_bar, coins) = derive_key_and_coins(&m, sk.public_key_hash());

    let mut ct_prime = P::CtArray::zeroed();
    pke::encrypt::<P>(ct_prime.as_mut(), &m, sk.public_bytes(), &coins);

    let ok = ct::ct_eq(ct.as_bytes(), ct_prime.as_ref());
    let z = Zeroizing::new(sk.rejection_value());
    let selected = Zeroizing::new(ct::ct_select(ok, &*k_bar, &*z));

    let ss = hash::kdf(&*selected, hash::hash_h(ct.as_bytes()));
    SharedSecret::from_bytes(ss)
}
