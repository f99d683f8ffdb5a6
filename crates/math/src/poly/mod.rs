//! Ring elements in both domains, and vectors and matrices of them.

/// Storage-level API shared by [`Polynomial`] and [`NttPolynomial`]: both are a
/// bare `[i16; N]` and differ only in which ring operations they admit.
macro_rules! coefficient_storage {
    ($ty:ident) => {
        impl $ty {
            #[inline]
            #[must_use]
            pub const fn zero() -> Self {
                Self([0; crate::N])
            }

            #[must_use]
            pub const fn coeffs(&self) -> &[i16; crate::N] {
                &self.0
            }

            #[must_use]
            pub const fn coeffs_mut(&mut self) -> &mut [i16; crate::N] {
                &mut self.0
            }

            /// Barrett-reduce every coefficient into `[-(q-1)/2, (q-1)/2]`.
            pub fn reduce(&mut self) {
                for c in &mut self.0 {
                    *c = crate::reduce::barrett_reduce(*c);
                }
            }

            /// 12-bit packing into [`POLYBYTES`](crate::POLYBYTES) bytes.
            pub fn to_bytes(&self, out: &mut [u8]) {
                crate::encode::coeffs_to_bytes(out, &self.0);
            }

            /// Inverse of `to_bytes`. Values `>= q` are kept as read.
            #[must_use]
            pub fn from_bytes(bytes: &[u8]) -> Self {
                let mut p = Self::zero();
                crate::encode::bytes_to_coeffs(&mut p.0, bytes);
                p
            }
        }

        impl From<[i16; crate::N]> for $ty {
            #[inline]
            fn from(coeffs: [i16; crate::N]) -> Self {
                Self(coeffs)
            }
        }

        impl Default for $ty {
            #[inline]
            fn default() -> Self {
                Self::zero()
            }
        }

        impl core::fmt::Debug for $ty {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.debug_tuple(stringify!($ty))
                    .field(&&self.0[..4])
                    .finish_non_exhaustive()
            }
        }

        impl $ty {
            /// Coefficient-wise sum with no reduction, for short accumulations
            /// whose bound the caller tracks.
            #[inline]
            pub(crate) fn add_unreduced(&mut self, rhs: &Self) {
                for (a, b) in self.0.iter_mut().zip(&rhs.0) {
                    *a += *b;
                }
            }
        }

        /// Sum with every coefficient in `[0, q)`.
        impl core::ops::AddAssign<&Self> for $ty {
            #[inline]
            fn add_assign(&mut self, rhs: &Self) {
                for (a, b) in self.0.iter_mut().zip(&rhs.0) {
                    *a = crate::reduce::add_mod(*a, *b);
                }
            }
        }

        impl core::ops::Add<&$ty> for &$ty {
            type Output = $ty;

            #[inline]
            fn add(self, rhs: &$ty) -> $ty {
                let mut sum = *self;
                sum += rhs;
                sum
            }
        }
    };
}

mod ntt_poly;
mod polynomial;
mod polyvec;

pub use ntt_poly::NttPolynomial;
pub use polynomial::Polynomial;
pub use polyvec::{NttMatrix, NttVector, Vector};
