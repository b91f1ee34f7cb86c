//! Scoped ownership of secret scalars.
//!
//! Secret keys, polynomial coefficients, decrypted shares and the one-time
//! masks of PVSH all live inside a [`SecretScalar`]. The value is overwritten
//! with zero when the owner is dropped, on every exit path including early
//! returns through `?`.
//!
//! # Limits
//!
//! Only scalars and byte buffers are wiped. The following intermediates are
//! left to the allocator:
//!
//! - the pairing value `e` behind a PVSH mask (only its serialized bytes are wiped)
//! - the point `Q^sk` computed while decoding
//! - the internal state of the per-task `ChaCha20Rng` used while building a
//!   contribution (its seed buffer is wiped)
//!
//! The curve and RNG types of the backend do not implement `Zeroize`.
//!
//! ```rust
//! use npvdkgrs::{FieldElement, Fr, SecretScalar};
//!
//! let sk = SecretScalar::new(Fr::from_u64(42));
//! assert_eq!(*sk.expose(), Fr::from_u64(42));
//! assert_eq!(format!("{sk:?}"), "SecretScalar(<redacted>)");
//! ```

use std::fmt;

use rand_core::{CryptoRng, RngCore};
use zeroize::{DefaultIsZeroes, Zeroize, ZeroizeOnDrop};

use crate::{BackendError, FieldElement, scalar_from_hex, scalar_to_hex};

#[derive(Clone, Copy, Default)]
struct Cell<F>(F);

impl<F: Copy + Default> DefaultIsZeroes for Cell<F> {}

/// A scalar that must never leave its owner in clear form.
///
/// `Debug` output is redacted and there is no serde implementation; the hex
/// form is only available through the explicit [`SecretScalar::to_hex`].
pub struct SecretScalar<F: FieldElement>(Cell<F>);

impl<F: FieldElement> SecretScalar<F> {
    pub fn new(value: F) -> Self {
        Self(Cell(value))
    }

    /// Samples a fresh secret from a cryptographically secure generator.
    pub fn random<R: RngCore + CryptoRng + ?Sized>(rng: &mut R) -> Self {
        Self::new(F::random(rng))
    }

    /// Borrows the secret value.
    pub fn expose(&self) -> &F {
        &self.0.0
    }

    /// Hex encoding of the secret. Callers own the returned string.
    pub fn to_hex(&self) -> String {
        scalar_to_hex(self.expose())
    }

    pub fn from_hex(encoded: &str) -> Result<Self, BackendError> {
        scalar_from_hex(encoded).map(Self::new)
    }
}

impl<F: FieldElement> Clone for SecretScalar<F> {
    fn clone(&self) -> Self {
        Self::new(*self.expose())
    }
}

impl<F: FieldElement> PartialEq for SecretScalar<F> {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl<F: FieldElement> Eq for SecretScalar<F> {}

impl<F: FieldElement> fmt::Debug for SecretScalar<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretScalar(<redacted>)")
    }
}

impl<F: FieldElement> From<F> for SecretScalar<F> {
    fn from(value: F) -> Self {
        Self::new(value)
    }
}

impl<F: FieldElement> Zeroize for SecretScalar<F> {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl<F: FieldElement> Drop for SecretScalar<F> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<F: FieldElement> ZeroizeOnDrop for SecretScalar<F> {}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::Fr;

    #[test]
    fn zeroize_clears_value() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut secret = SecretScalar::<Fr>::random(&mut rng);
        assert!(!FieldElement::is_zero(secret.expose()));
        secret.zeroize();
        assert!(FieldElement::is_zero(secret.expose()));
    }

    #[test]
    fn hex_roundtrip_is_explicit() {
        let secret = SecretScalar::new(Fr::from_u64(7));
        let encoded = secret.to_hex();
        assert_eq!(SecretScalar::<Fr>::from_hex(&encoded).unwrap(), secret);
        assert!(!format!("{secret:?}").contains(&encoded));
    }
}
