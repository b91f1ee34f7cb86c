//! Error types for the crate.
//!
//! This module defines low-level backend errors returned by the concrete
//! arithmetic backend (blstrs) as well as the high-level protocol-facing
//! `Error` type used across the crate.
//!
//! Only fatal input problems are reported through these types. Failed share
//! verifications inside a key-generation round are data, see
//! [`ContributionError`](crate::ContributionError).
//!
//! # Examples
//!
//! ```rust
//! use npvdkgrs::Error;
//!
//! let err = Error::ParticipantCountMismatch { expected: 3, actual: 2 };
//! assert_eq!(err.to_string(), "participant count mismatch: expected 3, got 2");
//! ```

use thiserror::Error;

/// Errors bubbled up from the arithmetic backend.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("serialization failure: {0}")]
    Serialization(&'static str),
    #[error("math error: {0}")]
    Math(&'static str),
    #[error("{0}")]
    Other(String),
}

/// High-level errors returned by the PVSH and key-generation API.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("participant count mismatch: expected {expected}, got {actual}")]
    ParticipantCountMismatch { expected: usize, actual: usize },
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
    #[error("malformed input: {0}")]
    MalformedInput(String),
}

/// Why a contribution entry was rejected during key calculation.
///
/// These are collected into [`ContributionError`](crate::ContributionError)s
/// rather than returned as `Err`, so that a caller sees every problem of a
/// round at once. The `Display` form is stable and is what the wire format
/// carries.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum FailureReason {
    /// The PVSH pairing check failed against the Feldman-evaluated public share.
    #[error("Inconsistent (c, U, V)!")]
    InconsistentCiphertext,
    /// The recovered secret share does not match the recovered public share.
    #[error("INVALID_SH_PH_FOR_ME")]
    InvalidShPhForMe,
    /// The contribution targets a different set of `(id, public key)` pairs than the others.
    #[error("INCONSISTENT_CONTRIBUTEE_SET")]
    InconsistentContributeeSet,
    #[error("DUPLICATE_CONTRIBUTEE")]
    DuplicateContributee,
    /// The commitment vector length differs between contributions or is zero.
    #[error("INCONSISTENT_THRESHOLD")]
    InconsistentThreshold,
    #[error("DUPLICATE_CONTRIBUTOR")]
    DuplicateContributor,
    #[error("ZERO_ID")]
    ZeroId,
    /// Fewer contributees than the threshold, the group key would be underdetermined.
    #[error("NOT_ENOUGH_CONTRIBUTEES")]
    NotEnoughContributees,
    /// Interpolation failed for a reason not caught by the checks above.
    #[error("RECOVERY_FAILED: {0}")]
    RecoveryFailed(String),
}

impl std::str::FromStr for FailureReason {
    type Err = Error;

    /// Parses the `Display` form back, used when reading error reports.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let reason = match s {
            "Inconsistent (c, U, V)!" => Self::InconsistentCiphertext,
            "INVALID_SH_PH_FOR_ME" => Self::InvalidShPhForMe,
            "INCONSISTENT_CONTRIBUTEE_SET" => Self::InconsistentContributeeSet,
            "DUPLICATE_CONTRIBUTEE" => Self::DuplicateContributee,
            "INCONSISTENT_THRESHOLD" => Self::InconsistentThreshold,
            "DUPLICATE_CONTRIBUTOR" => Self::DuplicateContributor,
            "ZERO_ID" => Self::ZeroId,
            "NOT_ENOUGH_CONTRIBUTEES" => Self::NotEnoughContributees,
            other => match other.strip_prefix("RECOVERY_FAILED: ") {
                Some(detail) => Self::RecoveryFailed(detail.to_string()),
                None => return Err(Error::MalformedInput(format!("unknown failure reason: {other}"))),
            },
        };
        Ok(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_reasons_roundtrip_through_display() {
        let reasons = [
            FailureReason::InconsistentCiphertext,
            FailureReason::InvalidShPhForMe,
            FailureReason::InconsistentContributeeSet,
            FailureReason::DuplicateContributee,
            FailureReason::InconsistentThreshold,
            FailureReason::DuplicateContributor,
            FailureReason::ZeroId,
            FailureReason::NotEnoughContributees,
            FailureReason::RecoveryFailed("math error: interpolation ids must be distinct".into()),
        ];
        for reason in reasons {
            assert_eq!(reason.to_string().parse::<FailureReason>().unwrap(), reason);
        }
        assert!("whatever".parse::<FailureReason>().is_err());
    }

    #[test]
    fn backend_errors_convert() {
        let err: Error = BackendError::Math("boom").into();
        assert_eq!(err.to_string(), "backend error: math error: boom");
    }
}
