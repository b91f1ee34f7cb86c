//! blst-backed G1, G2 and GT of BLS12-381.
//!
//! Points are kept in projective form; encodings are the standard compressed
//! ones (48 bytes for G1, 96 bytes for G2) and hashing uses the
//! `hash_to_curve` suite provided by blst.
//!
//! # Feature
//!
//! Compiled when the Cargo feature `blst` is enabled.

use blstrs::{Compress, G1Affine, G1Projective, G2Affine, G2Projective, Gt as BlstGt, Scalar};
use group::Group;

use crate::{BackendError, CurvePoint, TargetGroup};

pub type G1 = G1Projective;
pub type G2 = G2Projective;
pub type Gt = BlstGt;

const G1_COMPRESSED_LEN: usize = 48;
const G2_COMPRESSED_LEN: usize = 96;

impl CurvePoint<Scalar> for G1 {
    type Affine = G1Affine;
    type Repr = Vec<u8>;

    fn identity() -> Self {
        <G1Projective as Group>::identity()
    }

    fn generator() -> Self {
        <G1Projective as Group>::generator()
    }

    fn is_identity(&self) -> bool {
        <Self as Group>::is_identity(self).into()
    }

    fn from_affine(affine: &Self::Affine) -> Self {
        affine.into()
    }

    fn to_affine(&self) -> Self::Affine {
        self.into()
    }

    fn add(&self, other: &Self) -> Self {
        self + other
    }

    fn sub(&self, other: &Self) -> Self {
        self - other
    }

    fn negate(&self) -> Self {
        -self
    }

    fn mul_scalar(&self, scalar: &Scalar) -> Self {
        self * scalar
    }

    fn multi_scalar_multiplication(
        points: &[Self],
        scalars: &[Scalar],
    ) -> Result<Self, BackendError> {
        if points.len() != scalars.len() {
            return Err(BackendError::Math("points and scalars length mismatch"));
        }
        Ok(G1::multi_exp(points, scalars))
    }

    fn hash_to_curve(msg: &[u8], dst: &[u8]) -> Self {
        G1Projective::hash_to_curve(msg, dst, &[])
    }

    fn to_repr(&self) -> Self::Repr {
        G1Affine::from(self).to_compressed().to_vec()
    }

    fn from_repr(repr: &Self::Repr) -> Result<Self, BackendError> {
        let mut bytes = [0u8; G1_COMPRESSED_LEN];
        if repr.len() != G1_COMPRESSED_LEN {
            return Err(BackendError::Serialization("invalid G1 length"));
        }
        bytes.copy_from_slice(repr);
        Option::<G1Affine>::from(G1Affine::from_compressed(&bytes))
            .map(G1Projective::from)
            .ok_or(BackendError::Serialization("invalid G1 bytes"))
    }
}

impl CurvePoint<Scalar> for G2 {
    type Affine = G2Affine;
    type Repr = Vec<u8>;

    fn identity() -> Self {
        <G2Projective as Group>::identity()
    }

    fn generator() -> Self {
        <G2Projective as Group>::generator()
    }

    fn is_identity(&self) -> bool {
        <Self as Group>::is_identity(self).into()
    }

    fn from_affine(affine: &Self::Affine) -> Self {
        affine.into()
    }

    fn to_affine(&self) -> Self::Affine {
        self.into()
    }

    fn add(&self, other: &Self) -> Self {
        self + other
    }

    fn sub(&self, other: &Self) -> Self {
        self - other
    }

    fn negate(&self) -> Self {
        -self
    }

    fn mul_scalar(&self, scalar: &Scalar) -> Self {
        self * scalar
    }

    fn multi_scalar_multiplication(
        points: &[Self],
        scalars: &[Scalar],
    ) -> Result<Self, BackendError> {
        if points.len() != scalars.len() {
            return Err(BackendError::Math("points and scalars length mismatch"));
        }
        Ok(G2::multi_exp(points, scalars))
    }

    fn hash_to_curve(msg: &[u8], dst: &[u8]) -> Self {
        G2Projective::hash_to_curve(msg, dst, &[])
    }

    fn to_repr(&self) -> Self::Repr {
        G2Affine::from(self).to_compressed().to_vec()
    }

    fn from_repr(repr: &Self::Repr) -> Result<Self, BackendError> {
        let mut bytes = [0u8; G2_COMPRESSED_LEN];
        if repr.len() != G2_COMPRESSED_LEN {
            return Err(BackendError::Serialization("invalid G2 length"));
        }
        bytes.copy_from_slice(repr);
        Option::<G2Affine>::from(G2Affine::from_compressed(&bytes))
            .map(G2Projective::from)
            .ok_or(BackendError::Serialization("invalid G2 bytes"))
    }
}

impl TargetGroup for Gt {
    type Scalar = Scalar;
    type Repr = Vec<u8>;

    fn identity() -> Self {
        <Gt as Group>::identity()
    }

    fn mul_scalar(&self, scalar: &Self::Scalar) -> Self {
        self * scalar
    }

    fn combine(&self, other: &Self) -> Self {
        self + other
    }

    fn to_repr(&self) -> Result<Self::Repr, BackendError> {
        let mut bytes = Vec::with_capacity(288);
        self.write_compressed(&mut bytes)
            .map_err(|_| BackendError::Serialization("gt serialization failure"))?;
        Ok(bytes)
    }
}
