use zeroize::Zeroize;

use super::Polynomial;
use crate::{
    N, ntt,
    reduce::{MONT_SQ, fqmul},
};

/// A ring element after the forward NTT: 128 degree-1 residues, stored in
/// bit-reversed order.
///
/// Multiplication here is pointwise ([`basemul`](Self::basemul)) and leaves a
/// factor `R^{-1}` on its output. Either [`to_mont`](Self::to_mont) or the
/// inverse transform removes it again.
#[derive(Clone, Copy, Zeroize)]
pub struct NttPolynomial(pub(crate) [i16; N]);

coefficient_storage!(NttPolynomial);

impl NttPolynomial {
    /// Back to coefficient form, scaled by `R`.
    #[must_use]
    pub fn ntt_inverse(self) -> Polynomial {
        let mut coeffs = self.0;
        ntt::inverse_ntt(&mut coeffs);
        Polynomial(coeffs)
    }

    /// Scale every coefficient by `R`.
    pub fn to_mont(&mut self) {
        for c in &mut self.0 {
            *c = fqmul(*c, MONT_SQ);
        }
    }

    #[must_use]
    pub fn basemul(&self, other: &Self) -> Self {
        Self(ntt::basemul_poly(&self.0, &other.0))
    }
}
