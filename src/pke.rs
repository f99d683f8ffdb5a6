//! IND-CPA public-key encryption, the inner scheme of the KEM.
//!
//! Byte layouts:
//! - public key: `rho (32) || encode(t_hat)`
//! - secret key: `encode(s_hat)`
//! - ciphertext: `compress_du(u) || compress_dv(v)`

use kyber_math::poly::{NttVector, Polynomial, Vector};
use zeroize::Zeroizing;

use crate::{
    params::{ParameterSet, SYMBYTES},
    sampler::{gen_matrix, sample_noise},
};

/// `K` noise polynomials from consecutive nonces starting at `*nonce`.
fn noise_vector<Eta: kyber_math::sample::CbdWidth, const K: usize>(
    seed: &[u8; SYMBYTES], nonce: &mut u8,
) -> Zeroizing<Vector<K>> {
    Zeroizing::new(Vector::from_fn(|_| {
        let p = sample_noise::<Eta>(seed, *nonce);
        *nonce += 1;
        p
    }))
}

fn matrix_seed(pk: &[u8]) -> [u8; SYMBYTES] {
    let mut rho = [0u8; SYMBYTES];
    rho.copy_from_slice(&pk[..SYMBYTES]);
    rho
}

// -- key generation ----------------------------------------------------------

/// Deterministic IND-CPA key generation from the 32-byte seed `d`.
///
/// `pk` must hold [`ParameterSet::INDCPA_PK_BYTES`], `sk`
/// [`ParameterSet::INDCPA_SK_BYTES`]. Callers validate lengths first.
pub(crate) fn keypair_derand<P: ParameterSet>(pk: &mut [u8], sk: &mut [u8], d: &[u8; SYMBYTES]) {
    match P::K {
        2 => keypair_inner::<P, 2>(pk, sk, d),
        3 => keypair_inner::<P, 3>(pk, sk, d),
        4 => keypair_inner::<P, 4>(pk, sk, d),
        _ => unreachable!(),
    }
}

fn keypair_inner<P: ParameterSet, const K: usize>(pk: &mut [u8], sk: &mut [u8], d: &[u8; SYMBYTES]) {
    let mut rho = [0u8; SYMBYTES];
    let mut sigma = Zeroizing::new([0u8; SYMBYTES]);
    crate::hash::hash_g(d, &mut rho, &mut sigma);

    let a = gen_matrix::<K>(&rho, false);

    let mut nonce = 0u8;
    let s = noise_vector::<P::Eta1, K>(&sigma, &mut nonce);
    let e = noise_vector::<P::Eta1, K>(&sigma, &mut nonce);

    let s_hat = Zeroizing::new(s.ntt());
    let e_hat = Zeroizing::new(e.ntt());

    // t_hat = A * s_hat + e_hat
    let mut t_hat = a.mul_vec_tomont(&s_hat);
    t_hat += &*e_hat;

    pk[..SYMBYTES].copy_from_slice(&rho);
    t_hat.to_bytes(&mut pk[SYMBYTES..P::INDCPA_PK_BYTES]);
    s_hat.to_bytes(&mut sk[..P::INDCPA_SK_BYTES]);
}

// -- encryption --------------------------------------------------------------

/// Encrypt the 32-byte message `m` under `pk`, deterministically in `coins`.
pub(crate) fn encrypt<P: ParameterSet>(
    ct: &mut [u8], m: &[u8; SYMBYTES], pk: &[u8], coins: &[u8; SYMBYTES],
) {
    match P::K {
        2 => encrypt_inner::<P, 2>(ct, m, pk, coins),
        3 => encrypt_inner::<P, 3>(ct, m, pk, coins),
        4 => encrypt_inner::<P, 4>(ct, m, pk, coins),
        _ => unreachable!(),
    }
}

fn encrypt_inner<P: ParameterSet, const K: usize>(
    ct: &mut [u8], m: &[u8; SYMBYTES], pk: &[u8], coins: &[u8; SYMBYTES],
) {
    let rho = matrix_seed(pk);
    let t_hat = NttVector::<K>::from_bytes(&pk[SYMBYTES..P::INDCPA_PK_BYTES]);
    let at = gen_matrix::<K>(&rho, true);

    let mut nonce = 0u8;
    let r = noise_vector::<P::Eta1, K>(coins, &mut nonce);
    let e1 = noise_vector::<P::Eta2, K>(coins, &mut nonce);
    let e2 = Zeroizing::new(sample_noise::<P::Eta2>(coins, nonce));

    let r_hat = Zeroizing::new(r.ntt());

    // u = A^T * r + e1
    let mut u = at.mul_vec(&r_hat).ntt_inverse();
    u += &*e1;

    // v = t^T * r + e2 + decompress_1(m)
    let mut v = Zeroizing::new(t_hat.inner_product(&r_hat).ntt_inverse());
    *v += &*e2;
    *v += &Polynomial::from_message(m);

    let (ct_u, ct_v) = ct[..P::INDCPA_BYTES].split_at_mut(P::POLYVEC_COMPRESSED_BYTES);
    u.compress::<P::Du>(ct_u);
    v.compress::<P::Dv>(ct_v);
}

// -- decryption --------------------------------------------------------------

/// Recover the message: `m = compress_1(v - s^T u)`.
pub(crate) fn decrypt<P: ParameterSet>(m: &mut [u8; SYMBYTES], ct: &[u8], sk: &[u8]) {
    match P::K {
        2 => decrypt_inner::<P, 2>(m, ct, sk),
        3 => decrypt_inner::<P, 3>(m, ct, sk),
        4 => decrypt_inner::<P, 4>(m, ct, sk),
        _ => unreachable!(),
    }
}

/// `v - s^T u` before message decoding.
fn noisy_message<P: ParameterSet, const K: usize>(ct: &[u8], sk: &[u8]) -> Zeroizing<Polynomial> {
    let (ct_u, ct_v) = ct[..P::INDCPA_BYTES].split_at(P::POLYVEC_COMPRESSED_BYTES);
    let u = Vector::<K>::decompress::<P::Du>(ct_u);
    let v = Polynomial::decompress::<P::Dv>(ct_v);
    let s_hat = Zeroizing::new(NttVector::<K>::from_bytes(&sk[..P::INDCPA_SK_BYTES]));

    let su = Zeroizing::new(s_hat.inner_product(&u.ntt()).ntt_inverse());
    Zeroizing::new(&v - &*su)
}

fn decrypt_inner<P: ParameterSet, const K: usize>(m: &mut [u8; SYMBYTES], ct: &[u8], sk: &[u8]) {
    *m = noisy_message::<P, K>(ct, sk).to_message();
}
