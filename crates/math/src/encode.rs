//! Polynomial byte-level encoding (12-bit packing) and message encode/decode.

use crate::{
    N, POLYBYTES, Q, SYMBYTES,
    compress::{CompressWidth, D1},
    reduce::csubq,
};

/// Pack 256 coefficients reduced to `(-q, q)` into 384 bytes, 2 coefficients
/// per 3 bytes, each stored as its canonical value in `[0, q)`.
pub fn coeffs_to_bytes(r: &mut [u8], a: &[i16; N]) {
    debug_assert!(r.len() >= POLYBYTES);
    for (o, pair) in r.chunks_exact_mut(3).zip(a.chunks_exact(2)) {
        let t0 = csubq(pair[0]);
        let t1 = csubq(pair[1]);
        o[0] = t0 as u8;
        o[1] = ((t0 >> 8) | (t1 << 4)) as u8;
        o[2] = (t1 >> 4) as u8;
    }
}

/// Unpack 384 bytes into 256 12-bit coefficients. Values `>= q` are passed
/// through unchanged; use [`check_modulus`] on untrusted input.
pub fn bytes_to_coeffs(r: &mut [i16; N], a: &[u8]) {
    debug_assert!(a.len() >= POLYBYTES);
    for (pair, b) in r.chunks_exact_mut(2).zip(a.chunks_exact(3)) {
        pair[0] = ((b[0] as u16) | (((b[1] as u16) & 0x0F) << 8)) as i16;
        pair[1] = (((b[1] as u16) >> 4) | ((b[2] as u16) << 4)) as i16;
    }
}

/// True iff every 12-bit value packed in `a` is already reduced mod q, i.e.
/// decode-then-encode reproduces the input.
#[must_use]
pub fn check_modulus(a: &[u8]) -> bool {
    a.chunks_exact(POLYBYTES).all(|chunk| {
        let mut coeffs = [0i16; N];
        bytes_to_coeffs(&mut coeffs, chunk);
        coeffs.iter().all(|&c| c < Q)
    }) && a.len() % POLYBYTES == 0
}

pub fn coeffs_to_message(msg: &mut [u8; SYMBYTES], a: &[i16; N]) {
    D1::compress_poly(msg, a);
}

pub fn message_to_coeffs(r: &mut [i16; N], msg: &[u8; SYMBYTES]) {
    D1::decompress_poly(r, msg);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tobytes_frombytes_roundtrip() {
        let mut a = [0i16; N];
        for (i, c) in a.iter_mut().enumerate() {
            *c = (i as i16 * 13) % (Q - 1);
        }
        let mut buf = [0u8; POLYBYTES];
        coeffs_to_bytes(&mut buf, &a);

        let mut b = [0i16; N];
        bytes_to_coeffs(&mut b, &buf);
        assert_eq!(a, b);
    }

    #[test]
    fn negative_coefficients_pack_canonically() {
        let a = [-1i16; N];
        let mut buf = [0u8; POLYBYTES];
        coeffs_to_bytes(&mut buf, &a);
        let mut b = [0i16; N];
        bytes_to_coeffs(&mut b, &buf);
        assert!(b.iter().all(|&c| c == Q - 1));
        assert!(check_modulus(&buf));
    }

    #[test]
    fn modulus_check_rejects_unreduced_values() {
        let mut buf = [0u8; 2 * POLYBYTES];
        assert!(check_modulus(&buf));
        // Second coefficient of the second polynomial = 0xFFF.
        buf[POLYBYTES + 1] = 0xF0;
        buf[POLYBYTES + 2] = 0xFF;
        assert!(!check_modulus(&buf));
        assert!(!check_modulus(&buf[..POLYBYTES + 1]));
    }

    #[test]
    fn frommsg_tomsg_roundtrip() {
        let msg: [u8; SYMBYTES] = core::array::from_fn(|i| (i * 37) as u8);
        let mut poly = [0i16; N];
        message_to_coeffs(&mut poly, &msg);
        assert!(poly.iter().all(|&c| c == 0 || c == (Q + 1) / 2));

        let mut recovered = [0u8; SYMBYTES];
        coeffs_to_message(&mut recovered, &poly);
        assert_eq!(msg, recovered);
    }
}
