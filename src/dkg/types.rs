//! Data carried between the two stages of a key-generation round.
//!
//! - [`Participant`]: public roster entry `(id, PK)`
//! - [`Contribution`]: one contributor's broadcast message
//! - [`CalculatedShare`]: what a participant learns after processing every contribution
//!
//! Contributions are immutable once built and are only read by the
//! verifiers. A [`CalculatedShare`] either carries key material and no
//! errors, or only errors.

use rand_core::{CryptoRng, RngCore};

use crate::{
    Ciphertext, CurvePoint, FailureReason, FieldElement, PairingBackend, PublicPolynomial,
    SecretScalar,
};

/// Public roster entry of a round.
#[derive(Debug)]
pub struct Participant<B: PairingBackend> {
    /// Self-declared identity, must be non-zero and unique in the roster.
    pub id: B::Scalar,
    /// `PK = g2^sk`.
    pub public_key: B::G2,
}

impl<B: PairingBackend> Participant<B> {
    pub fn new(id: B::Scalar, public_key: B::G2) -> Self {
        Self { id, public_key }
    }

    /// Samples a fresh member: a random non-zero id and a key pair over `g2`.
    ///
    /// Returns the public roster entry together with the secret key.
    pub fn generate<R: RngCore + CryptoRng + ?Sized>(
        rng: &mut R,
        g2: &B::G2,
    ) -> (Self, SecretScalar<B::Scalar>) {
        let id = loop {
            let id = B::Scalar::random(rng);
            if !id.is_zero() {
                break id;
            }
        };
        let secret_key = SecretScalar::random(rng);
        let public_key = g2.mul_scalar(secret_key.expose());
        (Self { id, public_key }, secret_key)
    }
}

impl<B: PairingBackend> Clone for Participant<B> {
    fn clone(&self) -> Self {
        Self::new(self.id, self.public_key)
    }
}

impl<B: PairingBackend> PartialEq for Participant<B> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.public_key == other.public_key
    }
}

/// A sub-share encrypted to one contributee.
#[derive(Debug)]
pub struct EncryptedShare<B: PairingBackend> {
    pub contributee_id: B::Scalar,
    pub contributee_public_key: B::G2,
    pub ciphertext: Ciphertext<B>,
}

impl<B: PairingBackend> Clone for EncryptedShare<B> {
    fn clone(&self) -> Self {
        Self {
            contributee_id: self.contributee_id,
            contributee_public_key: self.contributee_public_key,
            ciphertext: self.ciphertext.clone(),
        }
    }
}

impl<B: PairingBackend> PartialEq for EncryptedShare<B> {
    fn eq(&self, other: &Self) -> bool {
        self.contributee_id == other.contributee_id
            && self.contributee_public_key == other.contributee_public_key
            && self.ciphertext == other.ciphertext
    }
}

/// One contributor's broadcast message.
///
/// # Fields
///
/// - `contributor_id` / `contributor_public_key`: who built it
/// - `shares`: one encrypted sub-share per participant of the round
/// - `commitments`: Feldman commitments `g2^{a_0}, ..., g2^{a_{t-1}}` of the
///   contributor's polynomial
#[derive(Debug)]
pub struct Contribution<B: PairingBackend> {
    pub contributor_id: B::Scalar,
    pub contributor_public_key: B::G2,
    pub shares: Vec<EncryptedShare<B>>,
    pub commitments: PublicPolynomial<B::Scalar, B::G2>,
}

impl<B: PairingBackend> Contribution<B> {
    /// Threshold this contribution was built for.
    pub fn threshold(&self) -> usize {
        self.commitments.commitments().len()
    }

    /// Checks that a resharing contribution is seeded with the contributor's
    /// existing share, i.e. that `commitments[0]` equals the public share the
    /// contributor obtained in the previous round.
    pub fn verify_reshared_from(&self, previous_public_share: &B::G2) -> bool {
        self.commitments.constant_term() == Some(previous_public_share)
    }

    /// The encrypted share addressed to `id`, if any.
    pub fn share_for(&self, id: &B::Scalar) -> Option<&EncryptedShare<B>> {
        self.shares.iter().find(|s| s.contributee_id == *id)
    }
}

impl<B: PairingBackend> Clone for Contribution<B> {
    fn clone(&self) -> Self {
        Self {
            contributor_id: self.contributor_id,
            contributor_public_key: self.contributor_public_key,
            shares: self.shares.clone(),
            commitments: self.commitments.clone(),
        }
    }
}

impl<B: PairingBackend> PartialEq for Contribution<B> {
    fn eq(&self, other: &Self) -> bool {
        self.contributor_id == other.contributor_id
            && self.contributor_public_key == other.contributor_public_key
            && self.shares == other.shares
            && self.commitments == other.commitments
    }
}

/// Reconstructed public share of one participant.
#[derive(Debug)]
pub struct PublicShare<B: PairingBackend> {
    pub id: B::Scalar,
    pub public_share: B::G2,
}

impl<B: PairingBackend> Clone for PublicShare<B> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            public_share: self.public_share,
        }
    }
}

impl<B: PairingBackend> PartialEq for PublicShare<B> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.public_share == other.public_share
    }
}

/// A rejected entry of a round.
///
/// `sender` is the contributor at fault, `receiver` the contributee the entry
/// was addressed to. Either is `None` when the problem is not tied to one.
#[derive(Debug)]
pub struct ContributionError<B: PairingBackend> {
    pub sender: Option<B::Scalar>,
    pub receiver: Option<B::Scalar>,
    pub reason: FailureReason,
}

impl<B: PairingBackend> ContributionError<B> {
    pub fn new(
        sender: Option<B::Scalar>,
        receiver: Option<B::Scalar>,
        reason: FailureReason,
    ) -> Self {
        Self {
            sender,
            receiver,
            reason,
        }
    }
}

impl<B: PairingBackend> Clone for ContributionError<B> {
    fn clone(&self) -> Self {
        Self::new(self.sender, self.receiver, self.reason.clone())
    }
}

impl<B: PairingBackend> PartialEq for ContributionError<B> {
    fn eq(&self, other: &Self) -> bool {
        self.sender == other.sender && self.receiver == other.receiver && self.reason == other.reason
    }
}

/// Outcome of processing all contributions of a round.
///
/// Check [`CalculatedShare::is_ok`] before trusting any field: on failure
/// only `errors` is populated.
#[derive(Debug)]
pub struct CalculatedShare<B: PairingBackend> {
    /// The caller's new secret share; `None` if the caller is not a contributee.
    pub own_secret_share: Option<SecretScalar<B::Scalar>>,
    pub own_public_share: Option<B::G2>,
    /// Public share of every contributee, ordered by id encoding.
    pub public_shares: Vec<PublicShare<B>>,
    pub group_public_key: Option<B::G2>,
    pub errors: Vec<ContributionError<B>>,
}

impl<B: PairingBackend> CalculatedShare<B> {
    /// Error-only result, no key material is released.
    pub fn rejected(errors: Vec<ContributionError<B>>) -> Self {
        Self {
            own_secret_share: None,
            own_public_share: None,
            public_shares: Vec::new(),
            group_public_key: None,
            errors,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty() && self.group_public_key.is_some()
    }

    /// Public share reconstructed for `id`.
    pub fn public_share_of(&self, id: &B::Scalar) -> Option<&B::G2> {
        self.public_shares
            .iter()
            .find(|s| s.id == *id)
            .map(|s| &s.public_share)
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::{DensePolynomial, Fr, G2, PairingEngine};

    #[test]
    fn generated_participant_matches_secret_key() {
        let mut rng = StdRng::seed_from_u64(51);
        let (member, sk) = Participant::<PairingEngine>::generate(&mut rng, &G2::generator());
        assert!(!FieldElement::is_zero(&member.id));
        assert_eq!(member.public_key, G2::generator().mul_scalar(sk.expose()));
    }

    #[test]
    fn reshared_origin_is_checked_against_constant_term() {
        let mut rng = StdRng::seed_from_u64(52);
        let old = SecretScalar::<Fr>::random(&mut rng);
        let poly = DensePolynomial::random(Some(&old), 2, &mut rng);
        let (member, _) = Participant::<PairingEngine>::generate(&mut rng, &G2::generator());
        let contribution = Contribution::<PairingEngine> {
            contributor_id: member.id,
            contributor_public_key: member.public_key,
            shares: Vec::new(),
            commitments: poly.commit(&G2::generator()),
        };
        assert_eq!(contribution.threshold(), 2);
        assert!(contribution.verify_reshared_from(&G2::generator().mul_scalar(old.expose())));
        assert!(!contribution.verify_reshared_from(&member.public_key));
    }

    #[test]
    fn rejected_share_carries_no_key_material() {
        let err = ContributionError::<PairingEngine>::new(None, None, FailureReason::ZeroId);
        let share = CalculatedShare::rejected(vec![err]);
        assert!(!share.is_ok());
        assert!(share.own_secret_share.is_none());
        assert!(share.group_public_key.is_none());
        assert!(share.public_shares.is_empty());
    }
}
