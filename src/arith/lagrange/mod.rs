//! Lagrange interpolation at zero.
//!
//! These are the `recover(values, ids)` primitives of threshold secret
//! sharing: given evaluations `p(id_i)` of a polynomial of degree `< k` at `k`
//! distinct non-zero points, they return `p(0)`. The same coefficients serve
//! scalars (secret shares) and group elements (public shares, signatures).
//!
//! # Mathematical Background
//!
//! ```text
//! λ_i = ∏(j≠i) id_j / (id_j - id_i)
//! p(0) = ∑ λ_i · p(id_i)
//! ```
//!
//! Denominators are inverted in one batch (Montgomery's trick). A zero
//! denominator means two ids coincide and is reported as an error, as is a
//! zero id (it would reveal `p(0)` directly).

use rayon::iter::{IntoParallelIterator, ParallelIterator};
use tracing::instrument;

use crate::{BackendError, CurvePoint, FieldElement};

/// Computes the Lagrange coefficients `λ_i` for interpolation at zero.
///
/// # Errors
///
/// - `BackendError::Math` if `ids` is empty
/// - `BackendError::Math` if an id is zero
/// - `BackendError::Math` if two ids are equal
#[instrument(level = "trace", skip_all, fields(count = ids.len()))]
pub fn lagrange_coefficients_at_zero<F: FieldElement>(ids: &[F]) -> Result<Vec<F>, BackendError> {
    if ids.is_empty() {
        return Err(BackendError::Math("cannot interpolate without points"));
    }
    if ids.iter().any(FieldElement::is_zero) {
        return Err(BackendError::Math("interpolation id must be non-zero"));
    }

    let (numerators, mut denominators): (Vec<F>, Vec<F>) = (0..ids.len())
        .into_par_iter()
        .map(|i| {
            let mut num = F::one();
            let mut den = F::one();
            for (j, id_j) in ids.iter().enumerate() {
                if i != j {
                    num *= *id_j;
                    den *= *id_j - ids[i];
                }
            }
            (num, den)
        })
        .unzip();

    F::batch_inversion(&mut denominators)
        .map_err(|_| BackendError::Math("interpolation ids must be distinct"))?;

    Ok(numerators
        .into_iter()
        .zip(denominators)
        .map(|(num, den_inv)| num * den_inv)
        .collect())
}

/// Interpolates scalar shares `values[i] = p(ids[i])` at zero.
pub fn recover_scalar<F: FieldElement>(values: &[F], ids: &[F]) -> Result<F, BackendError> {
    if values.len() != ids.len() {
        return Err(BackendError::Math("values and ids length mismatch"));
    }
    let lambdas = lagrange_coefficients_at_zero(ids)?;
    Ok(values
        .iter()
        .zip(lambdas.iter())
        .fold(F::zero(), |acc, (v, l)| acc + *v * *l))
}

/// Interpolates group shares `values[i] = g^{p(ids[i])}` at zero.
///
/// Computed as a single multi-scalar multiplication.
pub fn recover_point<F: FieldElement, G: CurvePoint<F>>(
    values: &[G],
    ids: &[F],
) -> Result<G, BackendError> {
    if values.len() != ids.len() {
        return Err(BackendError::Math("values and ids length mismatch"));
    }
    let lambdas = lagrange_coefficients_at_zero(ids)?;
    G::multi_scalar_multiplication(values, &lambdas)
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::{DensePolynomial, Fr, G2, Polynomial};

    #[test]
    fn any_threshold_subset_recovers_the_secret() {
        let mut rng = StdRng::seed_from_u64(31);
        let t = 3;
        let poly = DensePolynomial::<Fr>::random(None, t, &mut rng);
        let public = poly.commit(&G2::generator());
        let secret = *poly.coeffs()[0].expose();

        let ids: Vec<Fr> = (0..5).map(|_| Fr::random(&mut rng)).collect();
        let shares: Vec<Fr> = ids.iter().map(|id| *poly.evaluate(id).expose()).collect();
        let public_shares: Vec<G2> = ids.iter().map(|id| public.evaluate(id)).collect();

        for subset in [[0usize, 1, 2], [0, 2, 4], [1, 3, 4], [2, 3, 4]] {
            let sub_ids: Vec<Fr> = subset.iter().map(|&i| ids[i]).collect();
            let sub_shares: Vec<Fr> = subset.iter().map(|&i| shares[i]).collect();
            let sub_points: Vec<G2> = subset.iter().map(|&i| public_shares[i]).collect();
            assert_eq!(recover_scalar(&sub_shares, &sub_ids).unwrap(), secret);
            assert_eq!(
                recover_point(&sub_points, &sub_ids).unwrap(),
                *public.constant_term().unwrap()
            );
        }

        // all five points interpolate the same degree-2 polynomial
        assert_eq!(recover_scalar(&shares, &ids).unwrap(), secret);

        // too few points give an unrelated value
        assert_ne!(recover_scalar(&shares[..2], &ids[..2]).unwrap(), secret);
    }

    #[test]
    fn rejects_degenerate_ids() {
        let one = Fr::one();
        let two = Fr::from_u64(2);
        assert!(lagrange_coefficients_at_zero::<Fr>(&[]).is_err());
        assert!(lagrange_coefficients_at_zero(&[one, Fr::zero()]).is_err());
        assert!(lagrange_coefficients_at_zero(&[one, two, one]).is_err());
        assert!(recover_scalar(&[one], &[one, two]).is_err());
        assert!(recover_point::<Fr, G2>(&[G2::generator()], &[one, two]).is_err());
    }

    #[test]
    fn coefficients_sum_to_one() {
        // interpolating the constant polynomial 1
        let ids: Vec<Fr> = (1..=4).map(Fr::from_u64).collect();
        let lambdas = lagrange_coefficients_at_zero(&ids).unwrap();
        let sum = lambdas.iter().fold(Fr::zero(), |acc, l| acc + *l);
        assert_eq!(sum, Fr::one());
    }
}
