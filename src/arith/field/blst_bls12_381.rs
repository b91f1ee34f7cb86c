//! blst-backed scalar field of BLS12-381.
//!
//! Compiled when the Cargo feature `blst` is enabled.

use blstrs::Scalar;
use ff::Field;
use rand_core::RngCore;

use crate::{BackendError, FieldElement};

pub type Fr = Scalar;

impl FieldElement for Scalar {
    type Repr = Vec<u8>;

    fn zero() -> Self {
        Scalar::ZERO
    }

    fn one() -> Self {
        Scalar::ONE
    }

    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        <Scalar as Field>::random(rng)
    }

    fn is_zero(&self) -> bool {
        bool::from(<Scalar as Field>::is_zero(self))
    }

    fn invert(&self) -> Option<Self> {
        Field::invert(self).into()
    }

    fn to_repr(&self) -> Self::Repr {
        self.to_bytes_be().to_vec()
    }

    fn from_repr(repr: &Self::Repr) -> Result<Self, BackendError> {
        let mut bytes = [0u8; 32];
        if repr.len() != 32 {
            return Err(BackendError::Serialization("invalid scalar length"));
        }
        bytes.copy_from_slice(repr);
        Option::<Scalar>::from(Scalar::from_bytes_be(&bytes))
            .ok_or(BackendError::Serialization("invalid scalar bytes"))
    }

    fn from_uniform_bytes(bytes: &[u8; 64]) -> Self {
        // Horner over big-endian 64-bit limbs: acc = acc * 2^64 + limb.
        let shift = Scalar::from(u64::MAX) + Scalar::ONE;
        let mut acc = Scalar::ZERO;
        for chunk in bytes.chunks_exact(8) {
            let mut limb = [0u8; 8];
            limb.copy_from_slice(chunk);
            acc = acc * shift + Scalar::from(u64::from_be_bytes(limb));
        }
        acc
    }

    fn batch_inversion(elements: &mut [Self]) -> Result<(), BackendError> {
        use ff::BatchInvert;

        if elements.is_empty() {
            return Ok(());
        }

        // Check for zero elements before batch inversion
        for elem in elements.iter() {
            if bool::from(<Scalar as Field>::is_zero(elem)) {
                return Err(BackendError::Math("cannot invert zero element"));
            }
        }

        // Use ff crate's batch inversion (Montgomery's trick)
        elements.iter_mut().batch_invert();

        Ok(())
    }

    fn from_u64(n: u64) -> Self {
        Scalar::from(n)
    }
}
