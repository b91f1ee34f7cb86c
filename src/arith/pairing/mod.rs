use std::fmt::Debug;

#[cfg(feature = "blst")]
mod blst_bls12_381;
#[cfg(feature = "blst")]
pub use blst_bls12_381::PairingEngine;

use crate::{BackendError, CurvePoint, FieldElement, TargetGroup};

/// Main backend trait that ties together all cryptographic operations.
///
/// PVSH and the key-generation protocol are generic over this trait. The
/// concrete [`PairingEngine`] is selected by the enabled backend feature.
///
/// # Type Parameters
///
/// - `Scalar`: The scalar field type (Fr)
/// - `G1`: The first elliptic curve group (hash targets, signatures, proofs)
/// - `G2`: The second elliptic curve group (public keys, commitments)
/// - `Target`: The pairing target group (GT)
///
/// # Example
///
/// ```rust,no_run
/// use npvdkgrs::{CurvePoint, FieldElement, Fr, PairingBackend, PairingEngine, TargetGroup};
///
/// type G1 = <PairingEngine as PairingBackend>::G1;
/// type G2 = <PairingEngine as PairingBackend>::G2;
///
/// let a = Fr::from_u64(6);
/// let lhs = PairingEngine::pairing(&G1::generator().mul_scalar(&a), &G2::generator());
/// let rhs = PairingEngine::pairing(&G1::generator(), &G2::generator().mul_scalar(&a));
/// assert_eq!(lhs, rhs);
/// ```
pub trait PairingBackend: Send + Sync + Debug + Sized + 'static {
    /// Scalar field type (Fr).
    type Scalar: FieldElement;
    /// First curve group (G1).
    type G1: CurvePoint<Self::Scalar>;
    /// Second curve group (G2).
    type G2: CurvePoint<Self::Scalar>;
    /// Pairing target group (GT).
    type Target: TargetGroup<Scalar = Self::Scalar>;

    /// Computes the bilinear pairing: `e(g1, g2) -> GT`.
    ///
    /// The pairing satisfies bilinearity: `e(a*P, b*Q) = e(P, Q)^(ab)`.
    fn pairing(g1: &Self::G1, g2: &Self::G2) -> Self::Target;

    /// Computes a product of pairings: `∏ e(g1[i], g2[i])`.
    ///
    /// This is more efficient than computing individual pairings and multiplying.
    /// Returns an error if the input arrays have different lengths.
    fn multi_pairing(g1: &[Self::G1], g2: &[Self::G2]) -> Result<Self::Target, BackendError>;
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::{Fr, G1, G2};

    #[test]
    fn multi_pairing_matches_product_of_pairings() {
        let mut rng = StdRng::seed_from_u64(9);
        let a = Fr::random(&mut rng);
        let b = Fr::random(&mut rng);
        let p = [G1::generator().mul_scalar(&a), G1::generator()];
        let q = [G2::generator(), G2::generator().mul_scalar(&b)];

        let product = PairingEngine::pairing(&p[0], &q[0]).combine(&PairingEngine::pairing(&p[1], &q[1]));
        assert_eq!(PairingEngine::multi_pairing(&p, &q).unwrap(), product);
        assert!(PairingEngine::multi_pairing(&p, &q[..1]).is_err());
    }

    #[test]
    fn pairing_is_bilinear() {
        let mut rng = StdRng::seed_from_u64(10);
        let a = Fr::random(&mut rng);
        let b = Fr::random(&mut rng);
        let lhs = PairingEngine::pairing(&G1::generator().mul_scalar(&a), &G2::generator().mul_scalar(&b));
        let rhs = PairingEngine::pairing(&G1::generator(), &G2::generator()).mul_scalar(&(a * b));
        assert_eq!(lhs, rhs);
    }
}
