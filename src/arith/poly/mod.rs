//! Polynomials used for Shamir sharing and Feldman commitments.
//!
//! Polynomials are represented in **coefficient form** with coefficients in
//! ascending order:
//! - `p(x) = c_0 + c_1*x + c_2*x^2 + ... + c_{t-1}*x^{t-1}`
//! - Stored as `[c_0, c_1, c_2, ..., c_{t-1}]`
//!
//! Two flavours share the [`Polynomial`] interface:
//!
//! - **[`DensePolynomial`]**: the secret polynomial of a contributor. Its
//!   coefficients are [`SecretScalar`]s and are wiped on drop. Evaluating it at
//!   an id is the scalar `share` primitive.
//! - **[`PublicPolynomial`]**: the commitment vector `g^{c_0}, ..., g^{c_{t-1}}`.
//!   Evaluating it at an id yields `g^{p(id)}` without any secret, which is the
//!   Feldman check.
//!
//! # Example
//!
//! ```rust
//! use npvdkgrs::{CurvePoint, DensePolynomial, FieldElement, Fr, G2, Polynomial};
//! use rand::thread_rng;
//!
//! let mut rng = thread_rng();
//! let poly = DensePolynomial::<Fr>::random(None, 3, &mut rng);
//! let commitments = poly.commit(&G2::generator());
//!
//! let id = Fr::random(&mut rng);
//! let share = poly.evaluate(&id);
//! assert_eq!(commitments.evaluate(&id), G2::generator().mul_scalar(share.expose()));
//! ```

use std::fmt::Debug;
use std::marker::PhantomData;

use rand_core::{CryptoRng, RngCore};

use crate::{CurvePoint, FieldElement, SecretScalar};

/// Evaluation interface shared by secret and public polynomials.
pub trait Polynomial<F: FieldElement> {
    /// Value produced by an evaluation (a scalar or a group element).
    type Output;

    /// Number of coefficients, i.e. the threshold `t` of the sharing.
    fn len(&self) -> usize;

    /// Returns `true` for a polynomial without coefficients.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Degree bound `len() - 1`.
    fn degree(&self) -> usize {
        self.len().saturating_sub(1)
    }

    /// Evaluates the polynomial at the given point using Horner's method.
    fn evaluate(&self, point: &F) -> Self::Output;
}

/// Secret polynomial over the scalar field.
#[derive(Clone, Debug)]
pub struct DensePolynomial<F: FieldElement> {
    coeffs: Vec<SecretScalar<F>>,
}

impl<F: FieldElement> DensePolynomial<F> {
    /// Create a dense polynomial from the provided coefficient vector.
    ///
    /// The coefficients are in ascending order (constant term first). Leading
    /// zeros are kept so that the commitment vector always has `len` entries.
    pub fn from_coefficients_vec(coeffs: Vec<SecretScalar<F>>) -> Self {
        Self { coeffs }
    }

    /// Samples a polynomial with `len` coefficients.
    ///
    /// The constant term is `constant` when given (resharing an existing
    /// share), otherwise random. All other coefficients are random.
    pub fn random<R: RngCore + CryptoRng + ?Sized>(
        constant: Option<&SecretScalar<F>>,
        len: usize,
        rng: &mut R,
    ) -> Self {
        let mut coeffs = Vec::with_capacity(len);
        if let Some(c0) = constant {
            coeffs.push(c0.clone());
        }
        while coeffs.len() < len {
            coeffs.push(SecretScalar::random(rng));
        }
        Self { coeffs }
    }

    pub fn coeffs(&self) -> &[SecretScalar<F>] {
        &self.coeffs
    }

    /// Feldman commitment `base^{c_i}` to every coefficient.
    pub fn commit<G: CurvePoint<F>>(&self, base: &G) -> PublicPolynomial<F, G> {
        PublicPolynomial::from_commitments(
            self.coeffs
                .iter()
                .map(|c| base.mul_scalar(c.expose()))
                .collect(),
        )
    }
}

impl<F: FieldElement> Polynomial<F> for DensePolynomial<F> {
    type Output = SecretScalar<F>;

    fn len(&self) -> usize {
        self.coeffs.len()
    }

    fn evaluate(&self, point: &F) -> SecretScalar<F> {
        let mut result = SecretScalar::new(F::zero());
        for coeff in self.coeffs.iter().rev() {
            result = SecretScalar::new(*result.expose() * *point + *coeff.expose());
        }
        result
    }
}

/// Commitment vector of a polynomial, evaluated in the group.
#[derive(Debug)]
pub struct PublicPolynomial<F: FieldElement, G: CurvePoint<F>> {
    commitments: Vec<G>,
    _field: PhantomData<F>,
}

impl<F: FieldElement, G: CurvePoint<F>> PublicPolynomial<F, G> {
    pub fn from_commitments(commitments: Vec<G>) -> Self {
        Self {
            commitments,
            _field: PhantomData,
        }
    }

    pub fn commitments(&self) -> &[G] {
        &self.commitments
    }

    /// Image of the constant term, i.e. the public key of the shared secret.
    pub fn constant_term(&self) -> Option<&G> {
        self.commitments.first()
    }

    pub fn into_commitments(self) -> Vec<G> {
        self.commitments
    }
}

impl<F: FieldElement, G: CurvePoint<F>> Clone for PublicPolynomial<F, G> {
    fn clone(&self) -> Self {
        Self::from_commitments(self.commitments.clone())
    }
}

impl<F: FieldElement, G: CurvePoint<F>> PartialEq for PublicPolynomial<F, G> {
    fn eq(&self, other: &Self) -> bool {
        self.commitments == other.commitments
    }
}

impl<F: FieldElement, G: CurvePoint<F>> Polynomial<F> for PublicPolynomial<F, G> {
    type Output = G;

    fn len(&self) -> usize {
        self.commitments.len()
    }

    fn evaluate(&self, point: &F) -> G {
        self.commitments
            .iter()
            .rev()
            .fold(G::identity(), |acc, c| acc.mul_scalar(point).add(c))
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::{Fr, G2};

    #[test]
    fn evaluate_matches_explicit_sum() {
        // p(x) = 1 + 2x + 3x^2
        let poly = DensePolynomial::from_coefficients_vec(
            [1u64, 2, 3]
                .iter()
                .map(|c| SecretScalar::new(Fr::from_u64(*c)))
                .collect(),
        );
        assert_eq!(poly.len(), 3);
        assert_eq!(poly.degree(), 2);
        assert_eq!(*poly.evaluate(&Fr::from_u64(2)).expose(), Fr::from_u64(17));
        assert_eq!(*poly.evaluate(&Fr::zero()).expose(), Fr::one());
    }

    #[test]
    fn random_keeps_constant_term() {
        let mut rng = StdRng::seed_from_u64(21);
        let c0 = SecretScalar::new(Fr::from_u64(99));
        let poly = DensePolynomial::random(Some(&c0), 4, &mut rng);
        assert_eq!(poly.len(), 4);
        assert_eq!(poly.coeffs()[0], c0);

        let fresh = DensePolynomial::<Fr>::random(None, 4, &mut rng);
        assert_eq!(fresh.len(), 4);
        assert_ne!(fresh.coeffs()[0], c0);
    }

    #[test]
    fn commitment_evaluation_is_image_of_share() {
        let mut rng = StdRng::seed_from_u64(22);
        let poly = DensePolynomial::<Fr>::random(None, 3, &mut rng);
        let public = poly.commit(&G2::generator());
        assert_eq!(public.len(), 3);
        assert_eq!(
            *public.constant_term().unwrap(),
            G2::generator().mul_scalar(poly.coeffs()[0].expose())
        );
        for _ in 0..4 {
            let x = Fr::random(&mut rng);
            let share = poly.evaluate(&x);
            assert_eq!(public.evaluate(&x), G2::generator().mul_scalar(share.expose()));
        }
    }
}
