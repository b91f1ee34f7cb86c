//! Serde serialization support for the wire types.
//!
//! Every value travels as a lowercase hex string so that contributions can be
//! broadcast or stored as plain JSON.
//!
//! # Serialization Strategy
//!
//! - **Scalars** (ids): 32-byte big-endian canonical encoding
//! - **Curve Points** (G2 keys and commitments): compressed encoding via `to_repr()`
//! - **PVSH ciphertexts**: the `"<c>.<U>.<V>"` string form
//! - **Failure reasons**: their `Display` form
//!
//! Secret shares are never serialized implicitly; [`CalculatedShare`] only
//! serializes its public part.
//!
//! # Example
//!
//! ```rust
//! use npvdkgrs::{G2, PairingEngine, Participant, CurvePoint};
//!
//! let mut rng = rand::thread_rng();
//! let (member, _sk) = Participant::<PairingEngine>::generate(&mut rng, &G2::generator());
//!
//! let json = serde_json::to_string(&member).unwrap();
//! assert!(json.contains("\"publicKey\""));
//! let back: Participant<PairingEngine> = serde_json::from_str(&json).unwrap();
//! assert_eq!(back, member);
//! ```

use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{
    CalculatedShare, Ciphertext, Contribution, ContributionError, EncryptedShare,
    FailureReason, PairingBackend, Participant, PublicPolynomial, PublicShare, point_from_hex,
    point_to_hex, scalar_from_hex, scalar_to_hex,
};

fn g2_to_hex<B: PairingBackend>(point: &B::G2) -> String {
    point_to_hex::<B::Scalar, B::G2>(point)
}

fn g2_from_hex<B: PairingBackend, E: de::Error>(encoded: &str) -> Result<B::G2, E> {
    point_from_hex::<B::Scalar, B::G2>(encoded).map_err(E::custom)
}

fn scalar_from_wire<B: PairingBackend, E: de::Error>(encoded: &str) -> Result<B::Scalar, E> {
    scalar_from_hex(encoded).map_err(E::custom)
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParticipantWire {
    id: String,
    public_key: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EncryptedShareWire {
    contributee_id: String,
    contributee_pk: String,
    encrypted_share: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionWire {
    contributor_id: String,
    contributor_pk: String,
    contributions: Vec<EncryptedShareWire>,
    polynomial_commitments: Vec<String>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PublicShareWire {
    id: String,
    public_share: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionErrorWire {
    sender_id: Option<String>,
    receiver_id: Option<String>,
    reason: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CalculatedShareWire {
    own_public_share: Option<String>,
    public_shares: Vec<PublicShareWire>,
    group_public_key: Option<String>,
    errors: Vec<ContributionErrorWire>,
}

impl<B: PairingBackend> Serialize for Ciphertext<B> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, B: PairingBackend> Deserialize<'de> for Ciphertext<B> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        encoded.parse().map_err(de::Error::custom)
    }
}

impl<B: PairingBackend> Serialize for Participant<B> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ParticipantWire {
            id: scalar_to_hex(&self.id),
            public_key: g2_to_hex::<B>(&self.public_key),
        }
        .serialize(serializer)
    }
}

impl<'de, B: PairingBackend> Deserialize<'de> for Participant<B> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = ParticipantWire::deserialize(deserializer)?;
        Ok(Participant::new(
            scalar_from_wire::<B, D::Error>(&wire.id)?,
            g2_from_hex::<B, D::Error>(&wire.public_key)?,
        ))
    }
}

impl<B: PairingBackend> From<&EncryptedShare<B>> for EncryptedShareWire {
    fn from(share: &EncryptedShare<B>) -> Self {
        Self {
            contributee_id: scalar_to_hex(&share.contributee_id),
            contributee_pk: g2_to_hex::<B>(&share.contributee_public_key),
            encrypted_share: share.ciphertext.to_string(),
        }
    }
}

impl EncryptedShareWire {
    fn decode<B: PairingBackend, E: de::Error>(&self) -> Result<EncryptedShare<B>, E> {
        Ok(EncryptedShare {
            contributee_id: scalar_from_wire::<B, E>(&self.contributee_id)?,
            contributee_public_key: g2_from_hex::<B, E>(&self.contributee_pk)?,
            ciphertext: self.encrypted_share.parse().map_err(E::custom)?,
        })
    }
}

impl<B: PairingBackend> Serialize for Contribution<B> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ContributionWire {
            contributor_id: scalar_to_hex(&self.contributor_id),
            contributor_pk: g2_to_hex::<B>(&self.contributor_public_key),
            contributions: self.shares.iter().map(EncryptedShareWire::from).collect(),
            polynomial_commitments: self
                .commitments
                .commitments()
                .iter()
                .map(g2_to_hex::<B>)
                .collect(),
        }
        .serialize(serializer)
    }
}

impl<'de, B: PairingBackend> Deserialize<'de> for Contribution<B> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = ContributionWire::deserialize(deserializer)?;
        let shares = wire
            .contributions
            .iter()
            .map(EncryptedShareWire::decode::<B, D::Error>)
            .collect::<Result<Vec<_>, _>>()?;
        let commitments = wire
            .polynomial_commitments
            .iter()
            .map(|c| g2_from_hex::<B, D::Error>(c))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Contribution {
            contributor_id: scalar_from_wire::<B, D::Error>(&wire.contributor_id)?,
            contributor_public_key: g2_from_hex::<B, D::Error>(&wire.contributor_pk)?,
            shares,
            commitments: PublicPolynomial::from_commitments(commitments),
        })
    }
}

impl<B: PairingBackend> From<&PublicShare<B>> for PublicShareWire {
    fn from(share: &PublicShare<B>) -> Self {
        Self {
            id: scalar_to_hex(&share.id),
            public_share: g2_to_hex::<B>(&share.public_share),
        }
    }
}

impl<B: PairingBackend> Serialize for PublicShare<B> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        PublicShareWire::from(self).serialize(serializer)
    }
}

impl<'de, B: PairingBackend> Deserialize<'de> for PublicShare<B> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = PublicShareWire::deserialize(deserializer)?;
        Ok(PublicShare {
            id: scalar_from_wire::<B, D::Error>(&wire.id)?,
            public_share: g2_from_hex::<B, D::Error>(&wire.public_share)?,
        })
    }
}

impl<B: PairingBackend> From<&ContributionError<B>> for ContributionErrorWire {
    fn from(err: &ContributionError<B>) -> Self {
        Self {
            sender_id: err.sender.as_ref().map(scalar_to_hex),
            receiver_id: err.receiver.as_ref().map(scalar_to_hex),
            reason: err.reason.to_string(),
        }
    }
}

impl<B: PairingBackend> Serialize for ContributionError<B> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ContributionErrorWire::from(self).serialize(serializer)
    }
}

impl<'de, B: PairingBackend> Deserialize<'de> for ContributionError<B> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = ContributionErrorWire::deserialize(deserializer)?;
        let id = |encoded: &Option<String>| {
            encoded
                .as_deref()
                .map(scalar_from_wire::<B, D::Error>)
                .transpose()
        };
        Ok(ContributionError::new(
            id(&wire.sender_id)?,
            id(&wire.receiver_id)?,
            wire.reason.parse::<FailureReason>().map_err(de::Error::custom)?,
        ))
    }
}

/// Only the public part is written; the secret share has to be exported
/// explicitly with [`SecretScalar::to_hex`](crate::SecretScalar::to_hex).
impl<B: PairingBackend> Serialize for CalculatedShare<B> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        CalculatedShareWire {
            own_public_share: self.own_public_share.as_ref().map(g2_to_hex::<B>),
            public_shares: self.public_shares.iter().map(PublicShareWire::from).collect(),
            group_public_key: self.group_public_key.as_ref().map(g2_to_hex::<B>),
            errors: self.errors.iter().map(ContributionErrorWire::from).collect(),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};
    use serde_json::Value;

    use super::*;
    use crate::{
        CurvePoint, DistributedKeyGeneration, FieldElement, Fr, G2, Npvdkgrs, PairingEngine,
        ThresholdParameters,
    };

    fn round() -> (
        Vec<(Participant<PairingEngine>, crate::SecretScalar<Fr>)>,
        Vec<Contribution<PairingEngine>>,
    ) {
        let mut rng = StdRng::seed_from_u64(91);
        let dkg = Npvdkgrs::<PairingEngine>::new();
        let members: Vec<_> = (0..3)
            .map(|_| Participant::generate(&mut rng, &G2::generator()))
            .collect();
        let roster: Vec<_> = members.iter().map(|(p, _)| p.clone()).collect();
        let params = ThresholdParameters::new(3, 2).unwrap();
        let contributions = members
            .iter()
            .map(|(me, _)| {
                dkg.calculate_contribution(&mut rng, &params, me, None, &roster)
                    .unwrap()
            })
            .collect();
        (members, contributions)
    }

    #[test]
    fn contribution_json_layout() {
        let (_, contributions) = round();
        let value = serde_json::to_value(&contributions[0]).unwrap();
        assert!(value["contributorId"].is_string());
        assert!(value["contributorPk"].is_string());
        assert_eq!(value["polynomialCommitments"].as_array().unwrap().len(), 2);
        let entries = value["contributions"].as_array().unwrap();
        assert_eq!(entries.len(), 3);
        for entry in entries {
            assert!(entry["contributeeId"].is_string());
            assert!(entry["contributeePk"].is_string());
            let esh = entry["encryptedShare"].as_str().unwrap();
            assert_eq!(esh.split('.').count(), 3);
        }
    }

    #[test]
    fn contributions_survive_json_and_still_verify() {
        let (members, contributions) = round();
        let json = serde_json::to_string(&contributions).unwrap();
        let parsed: Vec<Contribution<PairingEngine>> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, contributions);

        let dkg = Npvdkgrs::<PairingEngine>::new();
        let (me, sk) = &members[1];
        let share = dkg.calculate_my_key(&parsed, &me.id, sk).unwrap();
        assert!(share.is_ok());
    }

    #[test]
    fn malformed_ciphertext_is_rejected_at_parse_time() {
        let (_, contributions) = round();
        let mut value = serde_json::to_value(&contributions[0]).unwrap();
        let esh = value["contributions"][0]["encryptedShare"]
            .as_str()
            .unwrap()
            .to_string();
        let truncated: String = esh.rsplitn(2, '.').nth(1).unwrap().to_string();
        value["contributions"][0]["encryptedShare"] = Value::String(truncated);

        let err = serde_json::from_value::<Contribution<PairingEngine>>(value).unwrap_err();
        assert!(err.to_string().contains("invalid ciphertext format"));
    }

    #[test]
    fn calculated_share_never_contains_secret() {
        let (members, contributions) = round();
        let dkg = Npvdkgrs::<PairingEngine>::new();
        let (me, sk) = &members[0];
        let share = dkg.calculate_my_key(&contributions, &me.id, sk).unwrap();
        let secret_hex = share.own_secret_share.as_ref().unwrap().to_hex();

        let json = serde_json::to_string(&share).unwrap();
        assert!(!json.contains(&secret_hex));
        let value: Value = serde_json::from_str(&json).unwrap();
        assert!(value["groupPublicKey"].is_string());
        assert!(value["ownPublicShare"].is_string());
        assert_eq!(value["publicShares"].as_array().unwrap().len(), 3);
        assert!(value["errors"].as_array().unwrap().is_empty());
    }

    #[test]
    fn contribution_error_roundtrip() {
        let err = ContributionError::<PairingEngine>::new(
            None,
            Some(Fr::from_u64(3)),
            FailureReason::InvalidShPhForMe,
        );
        let value = serde_json::to_value(&err).unwrap();
        assert!(value["senderId"].is_null());
        assert_eq!(value["reason"], "INVALID_SH_PH_FOR_ME");
        let back: ContributionError<PairingEngine> = serde_json::from_value(value).unwrap();
        assert_eq!(back, err);
    }

    #[test]
    fn off_curve_point_is_rejected() {
        let member = Participant::<PairingEngine>::new(Fr::from_u64(1), G2::generator());
        let mut value = serde_json::to_value(&member).unwrap();
        value["publicKey"] = Value::String("ff".repeat(96));
        assert!(serde_json::from_value::<Participant<PairingEngine>>(value).is_err());
    }
}
