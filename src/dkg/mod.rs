//! Non-interactive publicly verifiable distributed key generation with resharing.
//!
//! A round has two stages:
//!
//! 1. **Contribution** ([`DistributedKeyGeneration::calculate_contribution`]):
//!    every contributor samples a polynomial of degree `t - 1`, publishes its
//!    Feldman commitments and PVSH-encrypts the evaluation at every
//!    participant's id. No interaction is needed; the result is broadcast.
//!
//! 2. **Key calculation** ([`DistributedKeyGeneration::calculate_my_key`]):
//!    every participant verifies every encrypted sub-share against the
//!    commitments, decrypts its own ones and interpolates its secret share,
//!    the public shares of everybody and the group public key.
//!
//! Anyone can run the verification part of stage 2, it needs no secret.
//!
//! # Resharing
//!
//! Old members pass their current share as `old_share`; it becomes the
//! constant term of their polynomial. As long as at least `t_old` old members
//! contribute, the new roster (of any size, with any new threshold) ends up
//! with the same group public key.
//!
//! # Example
//!
//! ```rust
//! use npvdkgrs::{
//!     CurvePoint, DistributedKeyGeneration, G2, Npvdkgrs, PairingEngine, Participant,
//!     ThresholdParameters,
//! };
//! use rand::thread_rng;
//!
//! let mut rng = thread_rng();
//! let dkg = Npvdkgrs::<PairingEngine>::new();
//! let params = ThresholdParameters::new(3, 2).unwrap();
//!
//! let members: Vec<_> = (0..3)
//!     .map(|_| Participant::<PairingEngine>::generate(&mut rng, &G2::generator()))
//!     .collect();
//! let roster: Vec<_> = members.iter().map(|(p, _)| p.clone()).collect();
//!
//! let contributions: Vec<_> = members
//!     .iter()
//!     .map(|(me, _)| dkg.calculate_contribution(&mut rng, &params, me, None, &roster).unwrap())
//!     .collect();
//!
//! let (me, sk) = &members[0];
//! let share = dkg.calculate_my_key(&contributions, &me.id, sk).unwrap();
//! assert!(share.is_ok());
//! assert_eq!(
//!     share.own_public_share,
//!     Some(G2::generator().mul_scalar(share.own_secret_share.as_ref().unwrap().expose()))
//! );
//! ```

use std::fmt::Debug;

use rand_core::{CryptoRng, RngCore};

use crate::{PairingBackend, SecretScalar, ThresholdParameters, errors::Error};

mod contribution;
mod reconstruct;

mod types;
pub use types::{
    CalculatedShare, Contribution, ContributionError, EncryptedShare, Participant, PublicShare,
};

mod scheme;
pub use scheme::Npvdkgrs;

/// Key generation and resharing interface.
pub trait DistributedKeyGeneration<B: PairingBackend>: Debug + Send + Sync + 'static {
    /// Builds the caller's contribution for a round.
    ///
    /// `params` describes the round's roster (`parties` must equal
    /// `participants.len()`) and its threshold. `old_share` seeds the
    /// polynomial when resharing.
    ///
    /// # Errors
    ///
    /// - [`Error::ParticipantCountMismatch`] if the roster size differs from `params.parties`
    /// - [`Error::InvalidConfig`] if `t > n`, `t == 0`, or an id is zero or repeated
    /// - [`Error::Backend`] if a sub-share cannot be encrypted
    fn calculate_contribution<R: RngCore + CryptoRng + ?Sized>(
        &self,
        rng: &mut R,
        params: &ThresholdParameters,
        me: &Participant<B>,
        old_share: Option<&SecretScalar<B::Scalar>>,
        participants: &[Participant<B>],
    ) -> Result<Contribution<B>, Error>;

    /// Verifies all contributions of a round and reconstructs the caller's key material.
    ///
    /// Verification failures are returned as data in
    /// [`CalculatedShare::errors`]; when there is any, no key material is
    /// released.
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedInput`] if `contributions` is empty
    fn calculate_my_key(
        &self,
        contributions: &[Contribution<B>],
        me_id: &B::Scalar,
        me_secret_key: &SecretScalar<B::Scalar>,
    ) -> Result<CalculatedShare<B>, Error>;
}
