//! Minimal BLS threshold signatures over the keys produced by a round.
//!
//! Signatures live in G1, public keys in G2:
//!
//! ```text
//! sign:     σ = H(m)^sk
//! verify:   e(σ, g2) == e(H(m), PK)
//! recover:  σ = ∑ λ_i σ_i     (Lagrange at zero over the signer ids)
//! ```
//!
//! Any `t` partial signatures made with the shares of a round recover a
//! signature that verifies against the group public key.

use tracing::instrument;

use crate::{
    CurvePoint, HashDomains, PairingBackend, SecretScalar, errors::Error, recover_point,
};

/// A signature made with one participant's secret share.
#[derive(Debug)]
pub struct PartialSignature<B: PairingBackend> {
    pub signer_id: B::Scalar,
    pub signature: B::G1,
}

impl<B: PairingBackend> Clone for PartialSignature<B> {
    fn clone(&self) -> Self {
        Self {
            signer_id: self.signer_id,
            signature: self.signature,
        }
    }
}

fn hash_message<B: PairingBackend>(msg: &[u8], domains: &HashDomains) -> B::G1 {
    B::G1::hash_to_curve(msg, &domains.message)
}

/// Signs `msg` with a secret key or secret share.
pub fn sign<B: PairingBackend>(
    secret_key: &SecretScalar<B::Scalar>,
    msg: &[u8],
    domains: &HashDomains,
) -> B::G1 {
    hash_message::<B>(msg, domains).mul_scalar(secret_key.expose())
}

/// Checks `e(signature, g2) == e(H(msg), public_key)`.
pub fn verify<B: PairingBackend>(
    public_key: &B::G2,
    msg: &[u8],
    signature: &B::G1,
    g2: &B::G2,
    domains: &HashDomains,
) -> bool {
    if signature.is_identity() || public_key.is_identity() {
        return false;
    }
    B::pairing(signature, g2) == B::pairing(&hash_message::<B>(msg, domains), public_key)
}

/// Combines partial signatures into a signature under the group key.
///
/// # Errors
///
/// - [`Error::MalformedInput`] if `partials` is empty
/// - [`Error::Backend`] if signer ids are zero or repeated
#[instrument(level = "debug", skip_all, fields(partials = partials.len()))]
pub fn recover_signature<B: PairingBackend>(
    partials: &[PartialSignature<B>],
) -> Result<B::G1, Error> {
    if partials.is_empty() {
        return Err(Error::MalformedInput("no partial signatures".into()));
    }
    let ids: Vec<B::Scalar> = partials.iter().map(|p| p.signer_id).collect();
    let signatures: Vec<B::G1> = partials.iter().map(|p| p.signature).collect();
    Ok(recover_point(&signatures, &ids)?)
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::{DensePolynomial, FieldElement, Fr, G2, PairingEngine, Polynomial};

    #[test]
    fn single_key_sign_and_verify() {
        let mut rng = StdRng::seed_from_u64(61);
        let domains = HashDomains::default();
        let sk = SecretScalar::<Fr>::random(&mut rng);
        let pk = G2::generator().mul_scalar(sk.expose());

        let sig = sign::<PairingEngine>(&sk, b"hello", &domains);
        assert!(verify::<PairingEngine>(&pk, b"hello", &sig, &G2::generator(), &domains));
        assert!(!verify::<PairingEngine>(&pk, b"hullo", &sig, &G2::generator(), &domains));
    }

    #[test]
    fn threshold_partials_recover_group_signature() {
        let mut rng = StdRng::seed_from_u64(62);
        let domains = HashDomains::default();
        let poly = DensePolynomial::<Fr>::random(None, 2, &mut rng);
        let group_pk = G2::generator().mul_scalar(poly.coeffs()[0].expose());

        let partials: Vec<PartialSignature<PairingEngine>> = (1..=3u64)
            .map(|i| {
                let id = Fr::from_u64(i);
                PartialSignature {
                    signer_id: id,
                    signature: sign::<PairingEngine>(&poly.evaluate(&id), b"msg", &domains),
                }
            })
            .collect();

        let sig = recover_signature(&partials[1..]).unwrap();
        assert!(verify::<PairingEngine>(&group_pk, b"msg", &sig, &G2::generator(), &domains));

        let lone = recover_signature(&partials[..1]).unwrap();
        assert!(!verify::<PairingEngine>(&group_pk, b"msg", &lone, &G2::generator(), &domains));

        assert!(recover_signature::<PairingEngine>(&[]).is_err());
    }
}
