//! Publicly Verifiable Secret Handoff (PVSH).
//!
//! PVSH encrypts one scalar `sh` to a recipient `(id, PK = g2^sk)` so that
//! only the holder of `sk` can decrypt it, while anybody who knows the public
//! image `PH = g2^sh` can check that the ciphertext really carries `sh`.
//!
//! # Protocol
//!
//! ```text
//! encode:  r <- random
//!          Q  = H1(id || PK)
//!          eh = Hs(e(Q, PK^r))
//!          c  = sh + eh,   U = g2^r
//!          H  = H1(Q.c.U)
//!          V  = H^(eh / r)
//!
//! verify:  e(H, g2^c) == e(H, PH) * e(V, U)
//!
//! decode:  eh = Hs(e(Q^sk, U)),   sh = c - eh
//! ```
//!
//! Verification and decoding are independent: a recipient that wants both
//! safety and the plaintext runs both.

use std::fmt::Debug;

use rand_core::{CryptoRng, RngCore};

use crate::{FailureReason, PairingBackend, SecretScalar, errors::Error};

mod ciphertext;
pub use ciphertext::Ciphertext;

mod scheme;
pub use scheme::Pvsh;

/// Encode / verify / decode interface of a verifiable handoff scheme.
pub trait VerifiableHandoff<B: PairingBackend>: Debug + Send + Sync + 'static {
    /// Encrypts `share` to the recipient `(id, public_key)`.
    ///
    /// Samples a fresh mask from `rng`; every call yields a different ciphertext.
    ///
    /// # Errors
    ///
    /// - [`Error::Backend`] if the pairing value cannot be serialized
    fn encode<R: RngCore + CryptoRng + ?Sized>(
        &self,
        rng: &mut R,
        id: &B::Scalar,
        public_key: &B::G2,
        share: &B::Scalar,
    ) -> Result<Ciphertext<B>, Error>;

    /// Checks that `ciphertext` carries the secret whose public image is `public_share`.
    ///
    /// Needs no secret. Returns the reason on failure.
    fn verify(
        &self,
        id: &B::Scalar,
        public_key: &B::G2,
        public_share: &B::G2,
        ciphertext: &Ciphertext<B>,
    ) -> Result<(), FailureReason>;

    /// Recovers the handed-off secret with the recipient's secret key.
    ///
    /// Performs no verification; a wrong key or a forged ciphertext yields an
    /// unrelated scalar.
    ///
    /// # Errors
    ///
    /// - [`Error::Backend`] if the pairing value cannot be serialized
    fn decode(
        &self,
        id: &B::Scalar,
        public_key: &B::G2,
        secret_key: &SecretScalar<B::Scalar>,
        ciphertext: &Ciphertext<B>,
    ) -> Result<SecretScalar<B::Scalar>, Error>;
}
