use core::ops;

use zeroize::Zeroize;

use super::{NttPolynomial, Polynomial};
use crate::{POLYBYTES, compress::CompressWidth};

/// `K` polynomials in coefficient form.
#[derive(Clone, Zeroize)]
pub struct Vector<const K: usize> {
    pub(crate) polys: [Polynomial; K],
}

/// `K` polynomials in NTT domain.
#[derive(Clone, Zeroize)]
pub struct NttVector<const K: usize> {
    pub(crate) polys: [NttPolynomial; K],
}

impl<const K: usize> Vector<K> {
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            polys: [Polynomial::zero(); K],
        }
    }

    #[must_use]
    pub fn from_fn(f: impl FnMut(usize) -> Polynomial) -> Self {
        Self {
            polys: core::array::from_fn(f),
        }
    }

    #[must_use]
    pub fn ntt(&self) -> NttVector<K> {
        NttVector {
            polys: self.polys.map(Polynomial::ntt),
        }
    }

    pub fn reduce(&mut self) {
        for p in &mut self.polys {
            p.reduce();
        }
    }

    /// Compress each polynomial to `D` bits, `K * D::POLY_BYTES` bytes total.
    pub fn compress<D: CompressWidth>(&self, r: &mut [u8]) {
        for (p, out) in self.polys.iter().zip(r.chunks_exact_mut(D::POLY_BYTES)) {
            p.compress::<D>(out);
        }
    }

    #[must_use]
    pub fn decompress<D: CompressWidth>(a: &[u8]) -> Self {
        let mut v = Self::zero();
        for (p, chunk) in v.polys.iter_mut().zip(a.chunks_exact(D::POLY_BYTES)) {
            *p = Polynomial::decompress::<D>(chunk);
        }
        v
    }

    #[must_use]
    pub const fn polys(&self) -> &[Polynomial; K] {
        &self.polys
    }

    #[must_use]
    pub const fn polys_mut(&mut self) -> &mut [Polynomial; K] {
        &mut self.polys
    }
}

impl<const K: usize> NttVector<K> {
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            polys: [NttPolynomial::zero(); K],
        }
    }

    #[must_use]
    pub fn from_fn(f: impl FnMut(usize) -> NttPolynomial) -> Self {
        Self {
            polys: core::array::from_fn(f),
        }
    }

    /// Inverse NTT on every entry; results carry the factor `R`.
    #[must_use]
    pub fn ntt_inverse(&self) -> Vector<K> {
        Vector {
            polys: self.polys.map(NttPolynomial::ntt_inverse),
        }
    }

    pub fn reduce(&mut self) {
        for p in &mut self.polys {
            p.reduce();
        }
    }

    /// `sum_i self[i] * other[i]` in NTT domain, Barrett-reduced, with the
    /// `R^{-1}` factor of [`NttPolynomial::basemul`].
    #[must_use]
    pub fn inner_product(&self, other: &Self) -> NttPolynomial {
        let mut acc = NttPolynomial::zero();
        for (a, b) in self.polys.iter().zip(other.polys.iter()) {
            // At most four terms, each below 2q: no i16 overflow.
            acc.add_unreduced(&a.basemul(b));
        }
        acc.reduce();
        acc
    }

    /// Serialize to `K * 384` bytes.
    pub fn to_bytes(&self, r: &mut [u8]) {
        for (p, out) in self.polys.iter().zip(r.chunks_exact_mut(POLYBYTES)) {
            p.to_bytes(out);
        }
    }

    #[must_use]
    pub fn from_bytes(a: &[u8]) -> Self {
        let mut v = Self::zero();
        for (p, chunk) in v.polys.iter_mut().zip(a.chunks_exact(POLYBYTES)) {
            *p = NttPolynomial::from_bytes(chunk);
        }
        v
    }

    #[must_use]
    pub const fn polys(&self) -> &[NttPolynomial; K] {
        &self.polys
    }

    #[must_use]
    pub const fn polys_mut(&mut self) -> &mut [NttPolynomial; K] {
        &mut self.polys
    }
}

/// `K x K` matrix of NTT-domain polynomials (the public matrix `A` or its
/// transpose). Rebuilt from the seed on every use.
pub struct NttMatrix<const K: usize> {
    pub(crate) rows: [NttVector<K>; K],
}

impl<const K: usize> NttMatrix<K> {
    #[must_use]
    pub fn zero() -> Self {
        Self {
            rows: core::array::from_fn(|_| NttVector::zero()),
        }
    }

    /// Build entry `(i, j)` from `f(i, j)`.
    #[must_use]
    pub fn from_fn(mut f: impl FnMut(usize, usize) -> NttPolynomial) -> Self {
        Self {
            rows: core::array::from_fn(|i| NttVector::from_fn(|j| f(i, j))),
        }
    }

    /// `A * v`, each row converted back out of the `R^{-1}` scaling so the
    /// result is a plain NTT-domain vector.
    #[must_use]
    pub fn mul_vec_tomont(&self, v: &NttVector<K>) -> NttVector<K> {
        NttVector::from_fn(|i| {
            let mut p = self.rows[i].inner_product(v);
            p.to_mont();
            p
        })
    }

    /// `A * v`, rows left scaled by `R^{-1}` for a following inverse NTT.
    #[must_use]
    pub fn mul_vec(&self, v: &NttVector<K>) -> NttVector<K> {
        NttVector::from_fn(|i| self.rows[i].inner_product(v))
    }

    #[must_use]
    pub const fn rows(&self) -> &[NttVector<K>; K] {
        &self.rows
    }

    #[must_use]
    pub const fn rows_mut(&mut self) -> &mut [NttVector<K>; K] {
        &mut self.rows
    }
}

impl<'b, const K: usize> ops::Add<&'b Vector<K>> for &Vector<K> {
    type Output = Vector<K>;
    fn add(self, rhs: &'b Vector<K>) -> Vector<K> {
        let mut r = self.clone();
        r += rhs;
        r
    }
}

impl<'b, const K: usize> ops::Sub<&'b Vector<K>> for &Vector<K> {
    type Output = Vector<K>;
    fn sub(self, rhs: &'b Vector<K>) -> Vector<K> {
        let mut r = self.clone();
        for (a, b) in r.polys.iter_mut().zip(rhs.polys.iter()) {
            *a -= b;
        }
        r
    }
}

impl<const K: usize> ops::AddAssign<&Self> for Vector<K> {
    fn add_assign(&mut self, rhs: &Self) {
        for (a, b) in self.polys.iter_mut().zip(rhs.polys.iter()) {
            *a += b;
        }
    }
}

impl<const K: usize> ops::AddAssign<&Self> for NttVector<K> {
    fn add_assign(&mut self, rhs: &Self) {
        for (a, b) in self.polys.iter_mut().zip(rhs.polys.iter()) {
            *a += b;
        }
    }
}

impl<const K: usize> Default for Vector<K> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const K: usize> Default for NttVector<K> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const K: usize> core::fmt::Debug for Vector<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Vector").field("k", &K).finish_non_exhaustive()
    }
}

impl<const K: usize> core::fmt::Debug for NttVector<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NttVector").field("k", &K).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{N, Q, compress::D10, reduce::freeze};

    #[test]
    fn tobytes_frombytes_roundtrip() {
        let mut v = NttVector::<3>::zero();
        for k in 0..3 {
            for i in 0..N {
                v.polys[k].0[i] = ((k * N + i) as i16 * 7) % (Q - 1);
            }
        }
        let mut buf = [0u8; 3 * POLYBYTES];
        v.to_bytes(&mut buf);
        let v2 = NttVector::<3>::from_bytes(&buf);
        for k in 0..3 {
            assert_eq!(v.polys[k].0, v2.polys[k].0, "poly {k} mismatch");
        }
    }

    #[test]
    fn add_then_sub_is_identity() {
        let mut v = Vector::<2>::zero();
        v.polys[0].0[0] = 42;
        v.polys[1].0[255] = 100;
        let w = Vector::<2>::from_fn(|k| Polynomial::from([k as i16 + 1; N]));
        let back = &(&v + &w) - &w;
        assert_eq!(back.polys[0].0, v.polys[0].0);
        assert_eq!(back.polys[1].0, v.polys[1].0);
    }

    #[test]
    fn inner_product_matches_ring_multiplication() {
        let a = Vector::<2>::from_fn(|k| {
            Polynomial::from(core::array::from_fn(|i| ((i * 31 + k * 7) % 3329) as i16))
        });
        let b = Vector::<2>::from_fn(|k| {
            Polynomial::from(core::array::from_fn(|i| ((i * 17 + k * 101) % 3329) as i16))
        });

        let mut expected = &a.polys[0].multiply(&b.polys[0]) + &a.polys[1].multiply(&b.polys[1]);
        expected.freeze();

        let mut got = a.ntt().inner_product(&b.ntt()).ntt_inverse();
        got.freeze();
        assert_eq!(got.0, expected.0);
    }

    #[test]
    fn matrix_identity_times_vector() {
        let mut one = Polynomial::zero();
        one.0[0] = 1;
        let one_hat = one.ntt();
        let id = NttMatrix::<3>::from_fn(|i, j| {
            if i == j { one_hat } else { NttPolynomial::zero() }
        });

        let v = Vector::<3>::from_fn(|k| {
            Polynomial::from(core::array::from_fn(|i| ((i + 5 * k) % 3329) as i16))
        });
        let v_hat = v.ntt();
        let r = id.mul_vec_tomont(&v_hat);
        for (x, y) in r.polys.iter().zip(v_hat.polys.iter()) {
            for (c, d) in x.0.iter().zip(y.0.iter()) {
                assert_eq!(freeze(*c), freeze(*d));
            }
        }

        // Without to_mont, the inverse NTT cancels the R^{-1} exactly.
        let back = id.mul_vec(&v_hat).ntt_inverse();
        for (x, y) in back.polys.iter().zip(v.polys.iter()) {
            let mut x = *x;
            x.freeze();
            assert_eq!(x.0, y.0);
        }
    }

    #[test]
    fn compress_decompress_vector_sizes() {
        let v = Vector::<2>::from_fn(|k| {
            Polynomial::from(core::array::from_fn(|i| ((i * 13 + k) % 3329) as i16))
        });
        let mut buf = [0u8; 2 * 320];
        v.compress::<D10>(&mut buf);
        let w = Vector::<2>::decompress::<D10>(&buf);
        for (x, y) in v.polys.iter().zip(w.polys.iter()) {
            for (a, b) in x.0.iter().zip(y.0.iter()) {
                let d = (*a as i32 - *b as i32).rem_euclid(Q as i32);
                assert!(d.min(Q as i32 - d) <= 2);
            }
        }
    }
}
