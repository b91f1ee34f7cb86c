//! Contribution builder.
//!
//! Samples the contributor's polynomial (seeded with the old share when
//! resharing), publishes its Feldman commitments and PVSH-encrypts the
//! evaluation at every participant's id.

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rand_core::{CryptoRng, RngCore};
use rayon::iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};
use zeroize::Zeroizing;

use crate::{
    Contribution, DensePolynomial, EncryptedShare, FieldElement, PairingBackend, Participant,
    Polynomial, Pvsh, SecretScalar, ThresholdParameters, VerifiableHandoff, errors::Error,
};

/// Rejects rosters that would break interpolation or leak the constant term.
pub(crate) fn validate_roster<B: PairingBackend>(
    params: &ThresholdParameters,
    participants: &[Participant<B>],
) -> Result<(), Error> {
    if participants.len() != params.parties {
        return Err(Error::ParticipantCountMismatch {
            expected: params.parties,
            actual: participants.len(),
        });
    }
    params.validate()?;

    for (i, p) in participants.iter().enumerate() {
        if p.id.is_zero() {
            return Err(Error::InvalidConfig("participant id must be non-zero".into()));
        }
        if participants[..i].iter().any(|q| q.id == p.id) {
            return Err(Error::InvalidConfig("participant ids must be distinct".into()));
        }
    }
    Ok(())
}

/// Builds one contribution.
///
/// Each participant's ciphertext is produced on its own rayon task with a
/// ChaCha20 stream seeded from `rng`, so a seeded `rng` gives a reproducible
/// contribution.
pub(crate) fn build<B, R>(
    pvsh: &Pvsh<B>,
    rng: &mut R,
    params: &ThresholdParameters,
    me: &Participant<B>,
    old_share: Option<&SecretScalar<B::Scalar>>,
    participants: &[Participant<B>],
) -> Result<Contribution<B>, Error>
where
    B: PairingBackend,
    R: RngCore + CryptoRng + ?Sized,
{
    validate_roster(params, participants)?;

    let poly = DensePolynomial::random(old_share, params.threshold, rng);
    let commitments = poly.commit(pvsh.base());

    // wiped when dropped, after every task has seeded its generator
    let mut seeds = Zeroizing::new(vec![[0u8; 32]; participants.len()]);
    for seed in seeds.iter_mut() {
        rng.fill_bytes(seed);
    }

    let shares = participants
        .par_iter()
        .zip(seeds.as_slice().par_iter())
        .map(|(participant, seed)| -> Result<EncryptedShare<B>, Error> {
            let mut task_rng = ChaCha20Rng::from_seed(*seed);
            let sub_share = poly.evaluate(&participant.id);
            Ok(EncryptedShare {
                contributee_id: participant.id,
                contributee_public_key: participant.public_key,
                ciphertext: pvsh.encode(
                    &mut task_rng,
                    &participant.id,
                    &participant.public_key,
                    sub_share.expose(),
                )?,
            })
        })
        .collect::<Result<Vec<_>, Error>>()?;

    Ok(Contribution {
        contributor_id: me.id,
        contributor_public_key: me.public_key,
        shares,
        commitments,
    })
}
