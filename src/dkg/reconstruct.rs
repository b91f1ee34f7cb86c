//! Contribution verifier and key reconstructor.
//!
//! Processing happens in three steps:
//!
//! 1. [`check_consistency`]: every contribution must target the same
//!    contributee set with the same threshold, from distinct non-zero contributors.
//! 2. [`scan`]: per contribution, Feldman-evaluate the commitments at every
//!    contributee id, PVSH-verify the ciphertext against it and decrypt the
//!    entries addressed to the caller. Contributions are scanned in parallel
//!    and merged by a fold/reduce into one [`ContributionScan`].
//! 3. [`recover`]: interpolate every contributee's public share over the
//!    contributor ids, the caller's secret share likewise, then the group key
//!    over the contributee ids.
//!
//! Any error from steps 1 and 2 fails the round before step 3 runs.

use std::collections::{BTreeMap, BTreeSet};

use rayon::iter::{IntoParallelIterator, IntoParallelRefIterator, ParallelIterator};
use tracing::{debug, trace};

use crate::{
    CalculatedShare, Contribution, ContributionError, CurvePoint, FailureReason, FieldElement,
    PairingBackend, Polynomial, PublicShare, Pvsh, SecretScalar, VerifiableHandoff,
    lagrange_coefficients_at_zero, recover_point, scalar_to_hex,
};

/// Ids are keyed by their canonical encoding.
type IdKey = Vec<u8>;

fn id_key<F: FieldElement>(id: &F) -> IdKey {
    id.to_repr().as_ref().to_vec()
}

/// Everything collected for one contributee across all contributions.
pub(crate) struct ContributeeRecord<B: PairingBackend> {
    id: B::Scalar,
    contributor_ids: Vec<B::Scalar>,
    public_shares: Vec<B::G2>,
    /// Decrypted sub-shares, only for the caller's own id.
    secret_shares: Vec<(B::Scalar, SecretScalar<B::Scalar>)>,
}

impl<B: PairingBackend> ContributeeRecord<B> {
    fn new(id: B::Scalar) -> Self {
        Self {
            id,
            contributor_ids: Vec::new(),
            public_shares: Vec::new(),
            secret_shares: Vec::new(),
        }
    }

    fn absorb(&mut self, other: Self) {
        self.contributor_ids.extend(other.contributor_ids);
        self.public_shares.extend(other.public_shares);
        self.secret_shares.extend(other.secret_shares);
    }
}

/// Partial result of scanning a subset of the contributions.
pub(crate) struct ContributionScan<B: PairingBackend> {
    pub(crate) errors: Vec<ContributionError<B>>,
    pub(crate) records: BTreeMap<IdKey, ContributeeRecord<B>>,
}

impl<B: PairingBackend> Default for ContributionScan<B> {
    fn default() -> Self {
        Self {
            errors: Vec::new(),
            records: BTreeMap::new(),
        }
    }
}

impl<B: PairingBackend> ContributionScan<B> {
    fn merge(mut self, other: Self) -> Self {
        self.errors.extend(other.errors);
        for (key, record) in other.records {
            match self.records.get_mut(&key) {
                Some(existing) => existing.absorb(record),
                None => {
                    self.records.insert(key, record);
                }
            }
        }
        self
    }
}

/// The most frequent value, ties going to the earliest.
fn most_common<K: Ord + Clone>(items: &[K]) -> Option<K> {
    let mut counts: BTreeMap<&K, usize> = BTreeMap::new();
    for item in items {
        *counts.entry(item).or_default() += 1;
    }
    let max = counts.values().copied().max()?;
    items.iter().find(|item| counts[*item] == max).cloned()
}

/// Structural checks across the whole contribution set.
///
/// The contributee set and threshold of the majority are the reference;
/// contributions deviating from it are blamed.
pub(crate) fn check_consistency<B: PairingBackend>(
    contributions: &[Contribution<B>],
) -> Vec<ContributionError<B>> {
    let mut errors = Vec::new();
    let roster_of = |c: &Contribution<B>| -> BTreeSet<(IdKey, Vec<u8>)> {
        c.shares
            .iter()
            .map(|s| {
                (
                    id_key(&s.contributee_id),
                    s.contributee_public_key.to_repr().as_ref().to_vec(),
                )
            })
            .collect()
    };
    let rosters: Vec<_> = contributions.iter().map(roster_of).collect();
    let thresholds: Vec<usize> = contributions.iter().map(Contribution::threshold).collect();
    let (Some(reference_roster), Some(threshold)) =
        (most_common(&rosters), most_common(&thresholds))
    else {
        return errors;
    };

    let mut contributors = BTreeSet::new();
    for (contribution, roster) in contributions.iter().zip(rosters.iter()) {
        let sender = Some(contribution.contributor_id);
        let mut fail = |receiver: Option<B::Scalar>, reason: FailureReason| {
            errors.push(ContributionError::new(sender, receiver, reason));
        };

        if contribution.contributor_id.is_zero() {
            fail(None, FailureReason::ZeroId);
        }
        if !contributors.insert(id_key(&contribution.contributor_id)) {
            fail(None, FailureReason::DuplicateContributor);
        }
        if contribution.threshold() == 0 || contribution.threshold() != threshold {
            fail(None, FailureReason::InconsistentThreshold);
        }

        let mut seen = BTreeSet::new();
        for share in &contribution.shares {
            if share.contributee_id.is_zero() {
                fail(Some(share.contributee_id), FailureReason::ZeroId);
            }
            if !seen.insert(id_key(&share.contributee_id)) {
                fail(Some(share.contributee_id), FailureReason::DuplicateContributee);
            }
        }
        if *roster != reference_roster {
            fail(None, FailureReason::InconsistentContributeeSet);
        }
    }

    let contributee_count = reference_roster
        .iter()
        .map(|(id, _)| id)
        .collect::<BTreeSet<_>>()
        .len();
    if contributee_count < threshold {
        errors.push(ContributionError::new(
            None,
            None,
            FailureReason::NotEnoughContributees,
        ));
    }
    errors
}

/// Verifies one contribution and collects its public (and, for the caller,
/// secret) sub-shares.
fn scan_contribution<B: PairingBackend>(
    pvsh: &Pvsh<B>,
    contribution: &Contribution<B>,
    me_id: &B::Scalar,
    me_secret_key: &SecretScalar<B::Scalar>,
) -> ContributionScan<B> {
    let mut scan = ContributionScan::default();
    for share in &contribution.shares {
        let expected = contribution.commitments.evaluate(&share.contributee_id);
        let verified = pvsh.verify(
            &share.contributee_id,
            &share.contributee_public_key,
            &expected,
            &share.ciphertext,
        );

        let record = scan
            .records
            .entry(id_key(&share.contributee_id))
            .or_insert_with(|| ContributeeRecord::new(share.contributee_id));
        record.contributor_ids.push(contribution.contributor_id);
        record.public_shares.push(expected);

        match verified {
            Ok(()) => {
                trace!(
                    sender = %scalar_to_hex(&contribution.contributor_id),
                    receiver = %scalar_to_hex(&share.contributee_id),
                    "sub-share verified"
                );
                if share.contributee_id == *me_id {
                    match pvsh.decode(
                        &share.contributee_id,
                        &share.contributee_public_key,
                        me_secret_key,
                        &share.ciphertext,
                    ) {
                        Ok(decoded) => record
                            .secret_shares
                            .push((contribution.contributor_id, decoded)),
                        Err(err) => scan.errors.push(ContributionError::new(
                            Some(contribution.contributor_id),
                            Some(share.contributee_id),
                            FailureReason::RecoveryFailed(err.to_string()),
                        )),
                    }
                }
            }
            Err(reason) => {
                debug!(
                    sender = %scalar_to_hex(&contribution.contributor_id),
                    receiver = %scalar_to_hex(&share.contributee_id),
                    %reason,
                    "sub-share rejected"
                );
                scan.errors.push(ContributionError::new(
                    Some(contribution.contributor_id),
                    Some(share.contributee_id),
                    reason,
                ));
            }
        }
    }
    scan
}

/// Scans all contributions in parallel and merges the partial results.
pub(crate) fn scan<B: PairingBackend>(
    pvsh: &Pvsh<B>,
    contributions: &[Contribution<B>],
    me_id: &B::Scalar,
    me_secret_key: &SecretScalar<B::Scalar>,
) -> ContributionScan<B> {
    contributions
        .par_iter()
        .fold(ContributionScan::default, |acc, contribution| {
            acc.merge(scan_contribution(pvsh, contribution, me_id, me_secret_key))
        })
        .reduce(ContributionScan::default, ContributionScan::merge)
}

struct RecoveredShare<B: PairingBackend> {
    public: PublicShare<B>,
    secret: Option<SecretScalar<B::Scalar>>,
}

fn recovery_failed<B: PairingBackend>(
    receiver: Option<B::Scalar>,
    err: impl ToString,
) -> ContributionError<B> {
    ContributionError::new(None, receiver, FailureReason::RecoveryFailed(err.to_string()))
}

fn recover_record<B: PairingBackend>(
    pvsh: &Pvsh<B>,
    record: ContributeeRecord<B>,
) -> Result<RecoveredShare<B>, ContributionError<B>> {
    let public_share = recover_point(&record.public_shares, &record.contributor_ids)
        .map_err(|e| recovery_failed(Some(record.id), e))?;

    let secret = if record.secret_shares.is_empty() {
        None
    } else {
        let ids: Vec<B::Scalar> = record.secret_shares.iter().map(|(id, _)| *id).collect();
        let lambdas =
            lagrange_coefficients_at_zero(&ids).map_err(|e| recovery_failed(Some(record.id), e))?;
        let mut acc = SecretScalar::new(B::Scalar::zero());
        for ((_, share), lambda) in record.secret_shares.iter().zip(lambdas.iter()) {
            acc = SecretScalar::new(*acc.expose() + *share.expose() * *lambda);
        }
        if pvsh.base().mul_scalar(acc.expose()) != public_share {
            return Err(ContributionError::new(
                None,
                Some(record.id),
                FailureReason::InvalidShPhForMe,
            ));
        }
        Some(acc)
    };

    Ok(RecoveredShare {
        public: PublicShare {
            id: record.id,
            public_share,
        },
        secret,
    })
}

/// Interpolates per-contributee shares and the group key from a clean scan.
pub(crate) fn recover<B: PairingBackend>(
    pvsh: &Pvsh<B>,
    records: BTreeMap<IdKey, ContributeeRecord<B>>,
    me_id: &B::Scalar,
) -> CalculatedShare<B> {
    let results: Vec<Result<RecoveredShare<B>, ContributionError<B>>> = records
        .into_par_iter()
        .map(|(_, record)| recover_record(pvsh, record))
        .collect();

    let mut errors = Vec::new();
    let mut public_shares = Vec::with_capacity(results.len());
    let mut own_secret_share = None;
    for result in results {
        match result {
            Ok(recovered) => {
                if recovered.secret.is_some() {
                    own_secret_share = recovered.secret;
                }
                public_shares.push(recovered.public);
            }
            Err(err) => errors.push(err),
        }
    }
    if !errors.is_empty() {
        return CalculatedShare::rejected(errors);
    }

    let ids: Vec<B::Scalar> = public_shares.iter().map(|s| s.id).collect();
    let points: Vec<B::G2> = public_shares.iter().map(|s| s.public_share).collect();
    let group_public_key = match recover_point(&points, &ids) {
        Ok(pg) => pg,
        Err(e) => return CalculatedShare::rejected(vec![recovery_failed(None, e)]),
    };

    let own_public_share = public_shares
        .iter()
        .find(|s| s.id == *me_id)
        .map(|s| s.public_share);

    CalculatedShare {
        own_secret_share,
        own_public_share,
        public_shares,
        group_public_key: Some(group_public_key),
        errors,
    }
}
