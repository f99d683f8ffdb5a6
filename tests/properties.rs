//! End-to-end properties of the byte-level API over the reference set.

use std::{cell::RefCell, collections::HashSet, rc::Rc};

use kyber_pqc::{
    Error, Guarded, Kyber512, LockError, MemoryLock, SecretKey, api, keypair_derand,
};
use rand_chacha::ChaCha20Rng;
use rand_core::{RngCore, SeedableRng};
use zeroize::{Zeroize, Zeroizing};

#[test]
fn ten_thousand_roundtrips() {
    let mut rng = ChaCha20Rng::seed_from_u64(0xC0FFEE);
    let kp = api::generate_keypair_with_rng(&mut rng);
    for i in 0..10_000 {
        let (ct, ss) = api::encapsulate_with_rng(&kp.public_key, &mut rng).unwrap();
        let ss2 = api::decapsulate(&ct, &kp.private_key).unwrap();
        assert_eq!(ss, ss2, "trial {i}");
    }
}

#[test]
fn single_bit_flips_are_absorbed() {
    let mut rng = ChaCha20Rng::seed_from_u64(7);
    let kp = api::generate_keypair_with_rng(&mut rng);
    let (ct, ss) = api::encapsulate_with_rng(&kp.public_key, &mut rng).unwrap();

    for bit in (0..ct.len() * 8).step_by(61) {
        let mut tampered = ct.clone();
        tampered[bit / 8] ^= 1 << (bit % 8);
        let a = api::decapsulate(&tampered, &kp.private_key).unwrap();
        let b = api::decapsulate(&tampered, &kp.private_key).unwrap();
        assert_ne!(a, ss, "bit {bit} left the secret unchanged");
        assert_eq!(a, b, "bit {bit} gave a non-deterministic secret");
    }
}

#[test]
fn wrong_length_inputs_rejected() {
    let mut rng = ChaCha20Rng::seed_from_u64(8);
    let kp = api::generate_keypair_with_rng(&mut rng);
    let (ct, _) = api::encapsulate_with_rng(&kp.public_key, &mut rng).unwrap();

    for len in [0, 1, 10, 31, 32, 799, 801, 1184] {
        let pk = vec![0u8; len];
        assert_eq!(
            api::encapsulate_with_rng(&pk, &mut rng).unwrap_err(),
            Error::InvalidLength { expected: 800, actual: len }
        );
    }
    for len in [0, 767, 769, 1088] {
        let bad = vec![0u8; len];
        assert_eq!(
            api::decapsulate(&bad, &kp.private_key).unwrap_err(),
            Error::InvalidLength { expected: 768, actual: len }
        );
    }
    for len in [0, 1631, 1633, 2400] {
        let bad = vec![0u8; len];
        assert_eq!(
            api::decapsulate(&ct, &bad).unwrap_err(),
            Error::InvalidLength { expected: 1632, actual: len }
        );
    }
}

#[test]
fn thousand_unique_public_keys() {
    let mut rng = ChaCha20Rng::seed_from_u64(0xABCD);
    let keys: HashSet<Vec<u8>> = (0..1_000)
        .map(|_| api::generate_keypair_with_rng(&mut rng).public_key)
        .collect();
    assert_eq!(keys.len(), 1_000);
}

#[test]
fn unique_public_keys_across_threads() {
    const THREADS: usize = 4;
    const PER_THREAD: usize = 250;

    let keys: Vec<Vec<u8>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                scope.spawn(|| {
                    (0..PER_THREAD)
                        .map(|_| api::generate_keypair().public_key)
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().expect("keygen thread panicked"))
            .collect()
    });

    let unique: HashSet<&Vec<u8>> = keys.iter().collect();
    assert_eq!(unique.len(), THREADS * PER_THREAD);
}

#[derive(Default, Clone)]
struct RecordingLock {
    unlocked: Rc<RefCell<Option<Vec<u8>>>>,
}

impl MemoryLock for RecordingLock {
    fn lock(&self, _region: &[u8]) -> Result<(), LockError> {
        Ok(())
    }

    fn unlock(&self, region: &[u8]) {
        *self.unlocked.borrow_mut() = Some(region.to_vec());
    }
}

#[test]
fn secret_key_is_wiped() {
    let (_, mut sk) = keypair_derand::<Kyber512>(&[1; 32], &[2; 32]);
    assert!(sk.as_bytes().iter().any(|&b| b != 0));
    sk.zeroize();
    assert!(sk.as_bytes().iter().all(|&b| b == 0));
}

#[test]
fn guarded_secret_key_unlocks_zeroed_memory() {
    let lock = RecordingLock::default();
    {
        let (pk, sk) = keypair_derand::<Kyber512>(&[3; 32], &[4; 32]);
        let guarded: Guarded<SecretKey<Kyber512>, _> = Guarded::with_lock(sk, lock.clone());
        assert!(guarded.is_locked());
        assert_eq!(guarded.public_key(), pk);
    }
    let seen = lock.unlocked.borrow();
    let seen = seen.as_ref().expect("unlock was called");
    assert_eq!(seen.len(), 1632);
    assert!(seen.iter().all(|&b| b == 0));
}

#[test]
fn guarded_byte_private_key_unlocks_full_zeroed_region() {
    let lock = RecordingLock::default();
    {
        let kp = api::generate_keypair_with_rng(&mut ChaCha20Rng::seed_from_u64(11));
        let guarded = Guarded::with_lock(Zeroizing::new(kp.private_key.to_vec()), lock.clone());
        let (ct, ss) = api::encapsulate_with_rng(&kp.public_key, &mut ChaCha20Rng::seed_from_u64(12))
            .unwrap();
        assert_eq!(api::decapsulate(&ct, &guarded).unwrap(), ss);
    }
    let seen = lock.unlocked.borrow();
    let seen = seen.as_ref().expect("unlock was called");
    assert_eq!(seen.len(), 1632);
    assert!(seen.iter().all(|&b| b == 0));
}

/// NIST SP 800-22 frequency (monobit) test over 10,000 shared secrets.
#[test]
fn shared_secrets_pass_monobit() {
    let mut rng = ChaCha20Rng::seed_from_u64(0x5EC2E7);
    let kp = api::generate_keypair_with_rng(&mut rng);

    let mut ones: u64 = 0;
    let mut bits: u64 = 0;
    for _ in 0..10_000 {
        let (_, ss) = api::encapsulate_with_rng(&kp.public_key, &mut rng).unwrap();
        ones += ss.as_bytes().iter().map(|b| u64::from(b.count_ones())).sum::<u64>();
        bits += 8 * ss.as_bytes().len() as u64;
    }

    let s = 2.0 * ones as f64 - bits as f64;
    let statistic = s.abs() / (bits as f64).sqrt();
    // Two-sided critical value at the 99% level.
    assert!(statistic < 2.5758, "monobit statistic {statistic}");
}

#[test]
fn nearby_seeds_give_unrelated_ciphertexts() {
    let (pk, _) = keypair_derand::<Kyber512>(&[5; 32], &[6; 32]);
    let mut seed = [0u8; 32];
    ChaCha20Rng::seed_from_u64(9).fill_bytes(&mut seed);
    let (ct1, _) = kyber_pqc::encapsulate_derand::<Kyber512>(&pk, &seed);
    seed[0] ^= 1;
    let (ct2, _) = kyber_pqc::encapsulate_derand::<Kyber512>(&pk, &seed);
    let same = ct1
        .as_bytes()
        .iter()
        .zip(ct2.as_bytes())
        .filter(|(a, b)| a == b)
        .count();
    assert!(same < 768 / 8, "{same} identical ciphertext bytes");
}
