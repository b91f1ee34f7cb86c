use std::fmt::Debug;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use blake3::Hasher;
use rand_core::RngCore;
use zeroize::Zeroize;

use crate::BackendError;

#[cfg(feature = "blst")]
mod blst_bls12_381;
#[cfg(feature = "blst")]
pub use blst_bls12_381::Fr;

/// Field element abstraction for scalar field operations.
///
/// This trait abstracts over the scalar field Fr of the pairing-friendly curve,
/// providing the field operations the PVSH engine and the Shamir primitives need.
///
/// # Type Parameters
///
/// - `Repr`: Byte representation type for serialization (32 canonical bytes for BLS12-381)
///
/// # Example
///
/// ```rust,no_run
/// use rand::thread_rng;
/// use npvdkgrs::{FieldElement, Fr};
///
/// let mut rng = thread_rng();
/// let a = Fr::random(&mut rng);
///
/// let inv = a.invert().expect("non-zero element");
/// assert_eq!(a * inv, Fr::one());
///
/// let bytes = a.to_repr();
/// let recovered = Fr::from_repr(&bytes).expect("valid repr");
/// assert_eq!(a, recovered);
/// ```
pub trait FieldElement:
    Clone
    + Copy
    + Send
    + Sync
    + Debug
    + Default
    + PartialEq
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
{
    /// Byte representation type (e.g., 32 bytes for bls12-381 scalars).
    type Repr: AsRef<[u8]>
        + AsMut<[u8]>
        + From<Vec<u8>>
        + Default
        + Debug
        + Send
        + Sync
        + Clone
        + 'static;

    /// Returns the additive identity (zero) element.
    fn zero() -> Self;

    /// Returns the multiplicative identity (one) element.
    fn one() -> Self;

    /// Generates a random field element using the provided RNG.
    fn random<R: RngCore + ?Sized>(rng: &mut R) -> Self;

    /// Returns `true` for the additive identity.
    fn is_zero(&self) -> bool;

    /// Computes the multiplicative inverse, returning `None` for zero.
    fn invert(&self) -> Option<Self>;

    /// Serializes this field element to its canonical byte representation.
    fn to_repr(&self) -> Self::Repr;

    /// Deserializes a field element from its byte representation.
    ///
    /// Returns an error if the representation is invalid (wrong length or not
    /// reduced modulo the field order).
    fn from_repr(repr: &Self::Repr) -> Result<Self, BackendError>;

    /// Reduces 64 uniformly random bytes into the field.
    ///
    /// The bias of the reduction is negligible because the input is twice as
    /// long as the field modulus.
    fn from_uniform_bytes(bytes: &[u8; 64]) -> Self;

    /// Performs batch inversion of a slice of field elements.
    fn batch_inversion(elements: &mut [Self]) -> Result<(), BackendError>;

    /// Convert u64 to self.
    fn from_u64(n: u64) -> Self;
}

/// Hashes `msg` into the scalar field under the domain tag `domain`.
///
/// BLAKE3 in XOF mode produces 64 bytes which are reduced with
/// [`FieldElement::from_uniform_bytes`]. The intermediate buffer is wiped.
pub fn hash_to_scalar<F: FieldElement>(domain: &[u8], msg: &[u8]) -> F {
    let mut hasher = Hasher::new();
    hasher.update(&(domain.len() as u64).to_le_bytes());
    hasher.update(domain);
    hasher.update(msg);
    let mut wide = [0u8; 64];
    hasher.finalize_xof().fill(&mut wide);
    let scalar = F::from_uniform_bytes(&wide);
    wide.zeroize();
    scalar
}

/// Encodes a scalar as lowercase hex of its canonical representation.
pub fn scalar_to_hex<F: FieldElement>(scalar: &F) -> String {
    hex::encode(scalar.to_repr())
}

/// Decodes a scalar from the hex form produced by [`scalar_to_hex`].
pub fn scalar_from_hex<F: FieldElement>(encoded: &str) -> Result<F, BackendError> {
    let bytes =
        hex::decode(encoded).map_err(|_| BackendError::Serialization("invalid scalar hex"))?;
    F::from_repr(&F::Repr::from(bytes))
}
