//! Coefficient samplers. They only turn bytes into coefficients; the PRF and
//! XOF streams that supply the bytes live in the parent crate.

use crate::{N, Q};

mod sealed {
    pub trait Sealed {}
}

/// Width of a centred binomial distribution: each coefficient is the
/// difference of the bit counts of two `ETA`-bit strings.
///
/// `sample` reads exactly [`BUF_BYTES`](Self::BUF_BYTES) bytes and runs the
/// same shifts and masks whatever their value.
pub trait CbdWidth: sealed::Sealed {
    const ETA: usize;
    /// PRF bytes consumed per polynomial (`2 * ETA` bits per coefficient).
    const BUF_BYTES: usize = 2 * Self::ETA * N / 8;

    fn sample(r: &mut [i16; N], buf: &[u8]);
}

macro_rules! cbd_width {
    ($name:ident, eta = $eta:literal, word = $word:literal, lanes = $lanes:literal) => {
        pub struct $name;

        impl sealed::Sealed for $name {}

        impl CbdWidth for $name {
            const ETA: usize = $eta;

            fn sample(r: &mut [i16; N], buf: &[u8]) {
                const LANE: u32 = (1 << $eta) - 1;
                const PER_WORD: usize = $word * 8 / (2 * $eta);
                debug_assert!(buf.len() >= Self::BUF_BYTES);

                for (out, bytes) in r.chunks_exact_mut(PER_WORD).zip(buf.chunks_exact($word)) {
                    let mut le = [0u8; 4];
                    le[..$word].copy_from_slice(bytes);
                    let t = u32::from_le_bytes(le);

                    // Each eta-bit lane of `d` holds the popcount of that lane of `t`.
                    let mut d = 0u32;
                    for shift in 0..$eta {
                        d += (t >> shift) & $lanes;
                    }
                    for (j, c) in out.iter_mut().enumerate() {
                        let base = 2 * $eta * j;
                        let a = (d >> base) & LANE;
                        let b = (d >> (base + $eta)) & LANE;
                        *c = a as i16 - b as i16;
                    }
                }
            }
        }
    };
}

cbd_width!(Eta2, eta = 2, word = 4, lanes = 0x5555_5555);
cbd_width!(Eta3, eta = 3, word = 3, lanes = 0x0024_9249);

/// Bytes requested from the XOF per refill (one SHAKE-128 block).
pub const XOF_BLOCK_BYTES: usize = 168;

/// Fill `r` with uniform coefficients in `[0, q)` by rejection.
///
/// `fill` supplies successive [`XOF_BLOCK_BYTES`]-byte blocks of a public
/// stream. Every 3 bytes give two 12-bit candidates, and candidates `>= q` are
/// dropped. The loop length depends on that public stream only. Returns the
/// number of coefficients written, always `N`.
pub fn reject_uniform(r: &mut [i16; N], mut fill: impl FnMut(&mut [u8])) -> usize {
    let mut block = [0u8; XOF_BLOCK_BYTES];
    let mut filled = 0;

    while filled < N {
        fill(&mut block);
        for b in block.chunks_exact(3) {
            let candidates = [
                u16::from(b[0]) | ((u16::from(b[1]) & 0x0F) << 8),
                (u16::from(b[1]) >> 4) | (u16::from(b[2]) << 4),
            ];
            for cand in candidates {
                if filled < N && cand < Q as u16 {
                    r[filled] = cand as i16;
                    filled += 1;
                }
            }
        }
    }
    filled
}
