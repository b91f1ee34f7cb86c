use rand_core::{CryptoRng, RngCore};
use tracing::{info, instrument, warn};

use super::{contribution, reconstruct};
use crate::{
    CalculatedShare, Contribution, DistributedKeyGeneration, PairingBackend, Participant, Pvsh,
    SecretScalar, ThresholdParameters, errors::Error, scalar_to_hex,
};

/// The NPVDKGRS scheme over a PVSH engine.
#[derive(Debug)]
pub struct Npvdkgrs<B: PairingBackend> {
    pvsh: Pvsh<B>,
}

impl<B: PairingBackend> Npvdkgrs<B> {
    /// Creates a scheme over the standard G2 generator with the default hash domains.
    pub fn new() -> Self {
        Self::with_pvsh(Pvsh::new())
    }

    /// Creates a scheme over a configured PVSH engine (custom base point or domains).
    pub fn with_pvsh(pvsh: Pvsh<B>) -> Self {
        Self { pvsh }
    }

    pub fn pvsh(&self) -> &Pvsh<B> {
        &self.pvsh
    }

    /// Base point `g2` of public keys and commitments.
    pub fn base(&self) -> &B::G2 {
        self.pvsh.base()
    }
}

impl<B: PairingBackend> Default for Npvdkgrs<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: PairingBackend> Clone for Npvdkgrs<B> {
    fn clone(&self) -> Self {
        Self::with_pvsh(self.pvsh.clone())
    }
}

impl<B: PairingBackend> DistributedKeyGeneration<B> for Npvdkgrs<B> {
    #[instrument(
        level = "info",
        skip_all,
        fields(
            contributor = %scalar_to_hex(&me.id),
            parties = params.parties,
            threshold = params.threshold,
            resharing = old_share.is_some(),
        )
    )]
    fn calculate_contribution<R: RngCore + CryptoRng + ?Sized>(
        &self,
        rng: &mut R,
        params: &ThresholdParameters,
        me: &Participant<B>,
        old_share: Option<&SecretScalar<B::Scalar>>,
        participants: &[Participant<B>],
    ) -> Result<Contribution<B>, Error> {
        contribution::build(&self.pvsh, rng, params, me, old_share, participants)
    }

    #[instrument(
        level = "info",
        skip_all,
        fields(me = %scalar_to_hex(me_id), contributions = contributions.len())
    )]
    fn calculate_my_key(
        &self,
        contributions: &[Contribution<B>],
        me_id: &B::Scalar,
        me_secret_key: &SecretScalar<B::Scalar>,
    ) -> Result<CalculatedShare<B>, Error> {
        if contributions.is_empty() {
            return Err(Error::MalformedInput("no contributions".into()));
        }

        let mut errors = reconstruct::check_consistency(contributions);
        let scan = reconstruct::scan(&self.pvsh, contributions, me_id, me_secret_key);
        errors.extend(scan.errors);
        if !errors.is_empty() {
            warn!(errors = errors.len(), "round rejected");
            return Ok(CalculatedShare::rejected(errors));
        }

        let share = reconstruct::recover(&self.pvsh, scan.records, me_id);
        if share.is_ok() {
            info!(
                shares = share.public_shares.len(),
                own = share.own_secret_share.is_some(),
                "key material reconstructed"
            );
        } else {
            warn!(errors = share.errors.len(), "round rejected after recovery");
        }
        Ok(share)
    }
}
