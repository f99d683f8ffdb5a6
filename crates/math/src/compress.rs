//! Sealed compression-width traits and compress/decompress operations.
//!
//! Each compression width (D=1,4,5,10,11) is a zero-sized marker type
//! implementing [`CompressWidth`], eliminating runtime dispatch.
//!
//! Division by q is replaced with a reciprocal multiplication so that no
//! secret-dependent `div` instruction is ever emitted.

use crate::{N, Q, SYMBYTES, reduce::csubq};

mod sealed {
    pub trait Sealed {}
}

pub trait CompressWidthParams: sealed::Sealed {
    /// Bits kept per coefficient.
    const D: u32;
    /// Bytes produced by compressing one polynomial (`N * D / 8`).
    const POLY_BYTES: usize;
}

/// Lossy coefficient compression to `D` bits per coefficient.
///
/// Inputs must be reduced to `(-q, q)`; outputs of `decompress_poly` lie in
/// `[0, q)`.
pub trait CompressWidth: CompressWidthParams {
    fn compress_poly(r: &mut [u8], coeffs: &[i16; N]);
    fn decompress_poly(coeffs: &mut [i16; N], a: &[u8]);
}

macro_rules! compress_width {
    ($($name:ident: $d:expr, $poly_bytes:expr),*) => {
        $(
            pub struct $name;
            impl sealed::Sealed for $name {}
            impl CompressWidthParams for $name {
                const D: u32 = $d;
                const POLY_BYTES: usize = $poly_bytes;
            }
        )*
    };
}

compress_width!(
    D1: 1, SYMBYTES,
    D4: 4, 128,
    D5: 5, 160,
    D10: 10, 320,
    D11: 11, 352
);

/// `floor(n / q)` for `n < 2^23`, computed as `n * ceil(2^35 / q) >> 35`.
#[inline]
const fn div_q(n: u32) -> u32 {
    const RECIP: u64 = 10_321_340;
    ((n as u64 * RECIP) >> 35) as u32
}

/// Compress a canonical coefficient to `d` bits: `round(x * 2^d / q) mod 2^d`.
#[inline]
#[must_use]
pub const fn compress_coeff(x: u16, d: u32) -> u16 {
    let t = div_q(((x as u32) << d) + (Q as u32) / 2);
    (t & ((1u32 << d) - 1)) as u16
}

/// Decompress a `d`-bit value: `round(y * q / 2^d)`.
#[inline]
#[must_use]
pub const fn decompress_coeff(y: u16, d: u32) -> i16 {
    (((y as u32) * (Q as u32) + (1u32 << (d - 1))) >> d) as i16
}

#[inline]
fn compressed<const D: u32>(a: &[i16; N]) -> [u16; N] {
    a.map(|c| compress_coeff(csubq(c), D))
}

impl CompressWidth for D1 {
    fn compress_poly(r: &mut [u8], a: &[i16; N]) {
        debug_assert!(r.len() >= Self::POLY_BYTES);
        let t = compressed::<1>(a);
        for (byte, chunk) in r.iter_mut().zip(t.chunks_exact(8)) {
            let mut b = 0u8;
            for (j, &c) in chunk.iter().enumerate() {
                b |= (c as u8) << j;
            }
            *byte = b;
        }
    }

    fn decompress_poly(r: &mut [i16; N], msg: &[u8]) {
        debug_assert!(msg.len() >= Self::POLY_BYTES);
        for (chunk, &byte) in r.chunks_exact_mut(8).zip(msg) {
            for (j, c) in chunk.iter_mut().enumerate() {
                let mask = -(((byte >> j) & 1) as i16);
                *c = mask & ((Q + 1) / 2);
            }
        }
    }
}

impl CompressWidth for D4 {
    fn compress_poly(r: &mut [u8], a: &[i16; N]) {
        debug_assert!(r.len() >= Self::POLY_BYTES);
        let t = compressed::<4>(a);
        for (byte, pair) in r.iter_mut().zip(t.chunks_exact(2)) {
            *byte = (pair[0] as u8) | ((pair[1] as u8) << 4);
        }
    }

    fn decompress_poly(r: &mut [i16; N], a: &[u8]) {
        debug_assert!(a.len() >= Self::POLY_BYTES);
        for (pair, &byte) in r.chunks_exact_mut(2).zip(a) {
            pair[0] = decompress_coeff((byte & 0x0F) as u16, 4);
            pair[1] = decompress_coeff((byte >> 4) as u16, 4);
        }
    }
}

impl CompressWidth for D5 {
    fn compress_poly(r: &mut [u8], a: &[i16; N]) {
        debug_assert!(r.len() >= Self::POLY_BYTES);
        let t = compressed::<5>(a);
        for (o, chunk) in r.chunks_exact_mut(5).zip(t.chunks_exact(8)) {
            let s: [u8; 8] = core::array::from_fn(|j| chunk[j] as u8);
            o[0] = s[0] | (s[1] << 5);
            o[1] = (s[1] >> 3) | (s[2] << 2) | (s[3] << 7);
            o[2] = (s[3] >> 1) | (s[4] << 4);
            o[3] = (s[4] >> 4) | (s[5] << 1) | (s[6] << 6);
            o[4] = (s[6] >> 2) | (s[7] << 3);
        }
    }

    fn decompress_poly(r: &mut [i16; N], a: &[u8]) {
        debug_assert!(a.len() >= Self::POLY_BYTES);
        for (o, b) in r.chunks_exact_mut(8).zip(a.chunks_exact(5)) {
            let t = [
                b[0] & 0x1F,
                (b[0] >> 5) | ((b[1] & 0x03) << 3),
                (b[1] >> 2) & 0x1F,
                (b[1] >> 7) | ((b[2] & 0x0F) << 1),
                (b[2] >> 4) | ((b[3] & 0x01) << 4),
                (b[3] >> 1) & 0x1F,
                (b[3] >> 6) | ((b[4] & 0x07) << 2),
                b[4] >> 3,
            ];
            for (c, &x) in o.iter_mut().zip(t.iter()) {
                *c = decompress_coeff(x as u16, 5);
            }
        }
    }
}

impl CompressWidth for D10 {
    fn compress_poly(r: &mut [u8], a: &[i16; N]) {
        debug_assert!(r.len() >= Self::POLY_BYTES);
        let t = compressed::<10>(a);
        for (o, t) in r.chunks_exact_mut(5).zip(t.chunks_exact(4)) {
            o[0] = t[0] as u8;
            o[1] = ((t[0] >> 8) | (t[1] << 2)) as u8;
            o[2] = ((t[1] >> 6) | (t[2] << 4)) as u8;
            o[3] = ((t[2] >> 4) | (t[3] << 6)) as u8;
            o[4] = (t[3] >> 2) as u8;
        }
    }

    fn decompress_poly(r: &mut [i16; N], a: &[u8]) {
        debug_assert!(a.len() >= Self::POLY_BYTES);
        for (o, b) in r.chunks_exact_mut(4).zip(a.chunks_exact(5)) {
            let b: [u16; 5] = core::array::from_fn(|j| b[j] as u16);
            o[0] = decompress_coeff(b[0] | ((b[1] & 0x03) << 8), 10);
            o[1] = decompress_coeff((b[1] >> 2) | ((b[2] & 0x0F) << 6), 10);
            o[2] = decompress_coeff((b[2] >> 4) | ((b[3] & 0x3F) << 4), 10);
            o[3] = decompress_coeff((b[3] >> 6) | (b[4] << 2), 10);
        }
    }
}

impl CompressWidth for D11 {
    fn compress_poly(r: &mut [u8], a: &[i16; N]) {
        debug_assert!(r.len() >= Self::POLY_BYTES);
        let t = compressed::<11>(a);
        for (o, t) in r.chunks_exact_mut(11).zip(t.chunks_exact(8)) {
            o[0] = t[0] as u8;
            o[1] = ((t[0] >> 8) | (t[1] << 3)) as u8;
            o[2] = ((t[1] >> 5) | (t[2] << 6)) as u8;
            o[3] = (t[2] >> 2) as u8;
            o[4] = ((t[2] >> 10) | (t[3] << 1)) as u8;
            o[5] = ((t[3] >> 7) | (t[4] << 4)) as u8;
            o[6] = ((t[4] >> 4) | (t[5] << 7)) as u8;
            o[7] = (t[5] >> 1) as u8;
            o[8] = ((t[5] >> 9) | (t[6] << 2)) as u8;
            o[9] = ((t[6] >> 6) | (t[7] << 5)) as u8;
            o[10] = (t[7] >> 3) as u8;
        }
    }

    fn decompress_poly(r: &mut [i16; N], a: &[u8]) {
        debug_assert!(a.len() >= Self::POLY_BYTES);
        for (o, b) in r.chunks_exact_mut(8).zip(a.chunks_exact(11)) {
            let b: [u16; 11] = core::array::from_fn(|j| b[j] as u16);
            o[0] = decompress_coeff(b[0] | ((b[1] & 0x07) << 8), 11);
            o[1] = decompress_coeff((b[1] >> 3) | ((b[2] & 0x3F) << 5), 11);
            o[2] = decompress_coeff((b[2] >> 6) | (b[3] << 2) | ((b[4] & 0x01) << 10), 11);
            o[3] = decompress_coeff((b[4] >> 1) | ((b[5] & 0x0F) << 7), 11);
            o[4] = decompress_coeff((b[5] >> 4) | ((b[6] & 0x7F) << 4), 11);
            o[5] = decompress_coeff((b[6] >> 7) | (b[7] << 1) | ((b[8] & 0x03) << 9), 11);
            o[6] = decompress_coeff((b[8] >> 2) | ((b[9] & 0x1F) << 6), 11);
            o[7] = decompress_coeff((b[9] >> 5) | (b[10] << 3), 11);
        }
    }
}
