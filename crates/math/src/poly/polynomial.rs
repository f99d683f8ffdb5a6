use core::ops;

use zeroize::Zeroize;

use super::NttPolynomial;
use crate::{N, SYMBYTES, compress::CompressWidth, encode, ntt, reduce, sample::CbdWidth};

/// Polynomial in standard (coefficient) form over `R_q = Z_q[X]/(X^{256}+1)`.
///
/// Coefficients may hold any representative between reductions. [`freeze`],
/// `+`, `-` and [`multiply`](Self::multiply) all return them to `[0, q)`.
///
/// [`freeze`]: Polynomial::freeze
#[derive(Clone, Copy, Zeroize)]
pub struct Polynomial(pub(crate) [i16; N]);

coefficient_storage!(Polynomial);

impl Polynomial {
    /// Forward NTT, Barrett-reduced.
    #[must_use]
    pub fn ntt(self) -> NttPolynomial {
        let mut coeffs = self.0;
        ntt::forward_ntt(&mut coeffs);
        let mut hat = NttPolynomial(coeffs);
        hat.reduce();
        hat
    }

    /// Negacyclic product `self * other mod (X^256 + 1)`, canonical.
    #[must_use]
    pub fn multiply(&self, other: &Self) -> Self {
        // basemul leaves R^{-1}; the inverse NTT puts R back.
        let mut c = self.ntt().basemul(&other.ntt()).ntt_inverse();
        c.freeze();
        c
    }

    pub fn freeze(&mut self) {
        for c in &mut self.0 {
            *c = reduce::freeze(*c);
        }
    }

    /// Lossy `D`-bit compression into `D::POLY_BYTES` bytes of `out`.
    pub fn compress<D: CompressWidth>(&self, out: &mut [u8]) {
        D::compress_poly(out, &self.0);
    }

    #[must_use]
    pub fn decompress<D: CompressWidth>(bytes: &[u8]) -> Self {
        let mut p = Self::zero();
        D::decompress_poly(&mut p.0, bytes);
        p
    }

    /// Each message bit becomes a coefficient of `0` or `(q+1)/2`.
    #[must_use]
    pub fn from_message(msg: &[u8; SYMBYTES]) -> Self {
        let mut p = Self::zero();
        encode::message_to_coeffs(&mut p.0, msg);
        p
    }

    /// Rounds each coefficient to the nearer of `0` and `q/2`.
    #[must_use]
    pub fn to_message(&self) -> [u8; SYMBYTES] {
        let mut msg = [0u8; SYMBYTES];
        encode::coeffs_to_message(&mut msg, &self.0);
        msg
    }

    /// `CBD_eta` noise from `Eta::BUF_BYTES` bytes of PRF output.
    #[must_use]
    pub fn sample_cbd<Eta: CbdWidth>(buf: &[u8]) -> Self {
        let mut p = Self::zero();
        Eta::sample(&mut p.0, buf);
        p
    }
}

/// Difference with every coefficient in `[0, q)`.
impl ops::SubAssign<&Self> for Polynomial {
    #[inline]
    fn sub_assign(&mut self, rhs: &Self) {
        for (a, b) in self.0.iter_mut().zip(&rhs.0) {
            *a = reduce::sub_mod(*a, *b);
        }
    }
}

impl ops::Sub<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    #[inline]
    fn sub(self, rhs: &Polynomial) -> Polynomial {
        let mut diff = *self;
        diff -= rhs;
        diff
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Q;

    fn ramp(mul: usize, add: usize) -> Polynomial {
        Polynomial(core::array::from_fn(|i| ((i * mul + add) % Q as usize) as i16))
    }

    #[test]
    fn sub_undoes_add() {
        let a = ramp(3, 1);
        let b = ramp(11, 2_000);
        assert_eq!((&(&a + &b) - &b).0, a.0);
    }

    #[test]
    fn chained_sums_stay_canonical() {
        let top = Polynomial::from([Q - 1; N]);
        assert!((&top + &top).0.iter().all(|&c| c == Q - 2));

        let mut acc = top;
        for _ in 0..12 {
            acc = &acc + &top;
        }
        // 13 * (q - 1) = -13 mod q
        assert!(acc.0.iter().all(|&c| c == Q - 13));

        acc += &Polynomial::from([i16::MAX; N]);
        assert!(acc.0.iter().all(|c| (0..Q).contains(c)));
    }

    #[test]
    fn differences_stay_canonical() {
        let zero = Polynomial::zero();
        let top = Polynomial::from([Q - 1; N]);
        assert!((&zero - &top).0.iter().all(|&c| c == 1));

        let mut acc = zero;
        for _ in 0..12 {
            acc -= &top;
        }
        assert!(acc.0.iter().all(|&c| c == 12));
    }

    #[test]
    fn multiply_is_commutative_and_canonical() {
        let a = ramp(1_337, 11);
        let b = ramp(2_711, 500);
        let ab = a.multiply(&b);
        assert_eq!(ab.0, b.multiply(&a).0);
        assert!(ab.0.iter().all(|c| (0..Q).contains(c)));
    }

    #[test]
    fn multiply_by_x_rotates_negacyclically() {
        let a = ramp(7, 3);
        let mut x = Polynomial::zero();
        x.0[1] = 1;
        let ax = a.multiply(&x);
        assert_eq!(ax.0[0], (Q - a.0[N - 1]) % Q);
        assert_eq!(&ax.0[1..], &a.0[..N - 1]);
    }

    #[test]
    fn multiply_by_one_is_identity() {
        let a = ramp(1_001, 42);
        let mut one = Polynomial::zero();
        one.0[0] = 1;
        assert_eq!(a.multiply(&one).0, a.0);
    }

    #[test]
    fn freeze_maps_into_canonical_range() {
        let mut p = Polynomial(core::array::from_fn(|i| (i as i16 - 128) * 97));
        let before = p.0;
        p.freeze();
        for (b, a) in before.iter().zip(p.0.iter()) {
            assert!((0..Q).contains(a));
            assert_eq!((*b as i32 - *a as i32).rem_euclid(Q as i32), 0);
        }
    }

    #[test]
    fn message_survives_small_noise() {
        let msg: [u8; SYMBYTES] = core::array::from_fn(|i| (i * 37) as u8);
        let mut p = Polynomial::from_message(&msg);
        for (i, c) in p.0.iter_mut().enumerate() {
            *c += if i % 2 == 0 { 800 } else { -800 };
        }
        p.freeze();
        assert_eq!(p.to_message(), msg);
    }
}
