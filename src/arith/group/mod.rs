use std::fmt::Debug;

use crate::{BackendError, FieldElement};

#[cfg(feature = "blst")]
mod blst_bls12_381;
#[cfg(feature = "blst")]
pub use blst_bls12_381::{G1, G2, Gt};

/// Elliptic curve point abstraction for G1 and G2 groups.
///
/// This trait provides operations on elliptic curve points in projective coordinates,
/// with canonical compressed encodings and hashing onto the curve.
///
/// # Type Parameters
///
/// - `F`: The scalar field type used for scalar multiplication
///
/// # Example
///
/// ```rust,no_run
/// use npvdkgrs::{CurvePoint, FieldElement, Fr, G2};
/// use rand::thread_rng;
///
/// let mut rng = thread_rng();
/// let sk = Fr::random(&mut rng);
///
/// // Public key image of a secret scalar
/// let pk = G2::generator().mul_scalar(&sk);
/// let doubled = pk.add(&pk);
/// assert_eq!(doubled, pk.mul_scalar(&Fr::from_u64(2)));
///
/// // Canonical compressed encoding
/// let repr = pk.to_repr();
/// assert_eq!(G2::from_repr(&repr).unwrap(), pk);
/// ```
pub trait CurvePoint<F: FieldElement>:
    Clone + Copy + Send + Sync + Debug + PartialEq + 'static
{
    /// Associated affine representation.
    type Affine: Clone + Debug + Send + Sync + 'static + Copy;

    /// Compressed byte representation.
    type Repr: AsRef<[u8]>
        + AsMut<[u8]>
        + From<Vec<u8>>
        + Default
        + Debug
        + Send
        + Sync
        + Clone
        + 'static;

    /// Returns the point at infinity (identity element).
    fn identity() -> Self;

    /// Returns the standard generator for this group.
    fn generator() -> Self;

    /// Checks if this point is the identity element.
    fn is_identity(&self) -> bool;

    /// Converts from affine to projective coordinates.
    fn from_affine(affine: &Self::Affine) -> Self;

    /// Converts from projective to affine coordinates.
    fn to_affine(&self) -> Self::Affine;

    /// Performs elliptic curve point addition.
    fn add(&self, other: &Self) -> Self;

    /// Performs elliptic curve point subtraction.
    fn sub(&self, other: &Self) -> Self;

    /// Returns the additive inverse of this point.
    fn negate(&self) -> Self;

    /// Performs scalar multiplication: returns `scalar * self`.
    fn mul_scalar(&self, scalar: &F) -> Self;

    /// Computes `∑ scalars[i] * points[i]`.
    ///
    /// Returns an error if the slices have different lengths.
    fn multi_scalar_multiplication(points: &[Self], scalars: &[F]) -> Result<Self, BackendError>;

    /// Hashes arbitrary bytes onto the curve (deterministic, domain separated).
    fn hash_to_curve(msg: &[u8], dst: &[u8]) -> Self;

    /// Serializes this point in canonical compressed form.
    fn to_repr(&self) -> Self::Repr;

    /// Deserializes a compressed point.
    ///
    /// Rejects encodings that are not canonical, not on the curve or outside
    /// the prime-order subgroup.
    fn from_repr(repr: &Self::Repr) -> Result<Self, BackendError>;
}

/// Pairing target group (GT) abstraction.
///
/// This trait represents the target group of the pairing operation, which is
/// a multiplicative subgroup of the extension field.
pub trait TargetGroup: Clone + Send + Sync + Debug + PartialEq + 'static {
    /// Scalar field type for scalar multiplication.
    type Scalar: FieldElement + Copy;
    /// Byte representation for serialization.
    type Repr: AsRef<[u8]> + AsMut<[u8]> + Default + Debug + Send + Sync + Clone + 'static;

    /// Returns the multiplicative identity element.
    fn identity() -> Self;

    /// Performs scalar multiplication (exponentiation in multiplicative notation).
    fn mul_scalar(&self, scalar: &Self::Scalar) -> Self;

    /// Combines (multiplies) two target group elements.
    fn combine(&self, other: &Self) -> Self;

    /// Serializes this element to its byte representation.
    fn to_repr(&self) -> Result<Self::Repr, BackendError>;
}

/// Encodes a point as lowercase hex of its compressed representation.
pub fn point_to_hex<F: FieldElement, C: CurvePoint<F>>(point: &C) -> String {
    hex::encode(point.to_repr())
}

/// Decodes a point from the hex form produced by [`point_to_hex`].
pub fn point_from_hex<F: FieldElement, C: CurvePoint<F>>(encoded: &str) -> Result<C, BackendError> {
    let bytes =
        hex::decode(encoded).map_err(|_| BackendError::Serialization("invalid point hex"))?;
    C::from_repr(&C::Repr::from(bytes))
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::Fr;

    #[test]
    fn compressed_hex_roundtrip() {
        let mut rng = StdRng::seed_from_u64(3);
        let s = Fr::random(&mut rng);
        let p1 = G1::generator().mul_scalar(&s);
        let p2 = G2::generator().mul_scalar(&s);

        let h1 = point_to_hex::<Fr, G1>(&p1);
        let h2 = point_to_hex::<Fr, G2>(&p2);
        assert_eq!(h1.len(), 96);
        assert_eq!(h2.len(), 192);
        assert_eq!(point_from_hex::<Fr, G1>(&h1).unwrap(), p1);
        assert_eq!(point_from_hex::<Fr, G2>(&h2).unwrap(), p2);

        // wrong length, wrong group
        assert!(point_from_hex::<Fr, G2>(&h1).is_err());
        assert!(point_from_hex::<Fr, G1>("00").is_err());
    }

    #[test]
    fn msm_matches_naive_sum() {
        let mut rng = StdRng::seed_from_u64(5);
        let points: Vec<G2> = (0..4)
            .map(|_| G2::generator().mul_scalar(&Fr::random(&mut rng)))
            .collect();
        let scalars: Vec<Fr> = (0..4).map(|_| Fr::random(&mut rng)).collect();

        let naive = points
            .iter()
            .zip(scalars.iter())
            .fold(G2::identity(), |acc, (p, s)| acc.add(&p.mul_scalar(s)));
        let msm = G2::multi_scalar_multiplication(&points, &scalars).unwrap();
        assert_eq!(naive, msm);

        assert!(G2::multi_scalar_multiplication(&points, &scalars[..3]).is_err());
    }

    #[test]
    fn target_group_repr_is_compressed_and_canonical() {
        use crate::{PairingBackend, PairingEngine};

        let mut rng = StdRng::seed_from_u64(6);
        let a = Fr::random(&mut rng);
        let lhs = PairingEngine::pairing(&G1::generator().mul_scalar(&a), &G2::generator());
        let rhs = PairingEngine::pairing(&G1::generator(), &G2::generator().mul_scalar(&a));

        let repr = lhs.to_repr().unwrap();
        assert_eq!(repr.len(), 288);
        assert_eq!(repr, rhs.to_repr().unwrap());
        assert_ne!(repr, TargetGroup::to_repr(&Gt::identity()).unwrap());
    }

    #[test]
    fn hash_to_curve_is_domain_separated() {
        let a = <G1 as CurvePoint<Fr>>::hash_to_curve(b"msg", b"DST-A");
        let b = <G1 as CurvePoint<Fr>>::hash_to_curve(b"msg", b"DST-A");
        let c = <G1 as CurvePoint<Fr>>::hash_to_curve(b"msg", b"DST-B");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(!CurvePoint::<Fr>::is_identity(&a));
    }
}
