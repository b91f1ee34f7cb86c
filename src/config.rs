//! Configuration types for key-generation rounds.
//!
//! This module provides the threshold parameters of a round and the
//! domain-separation tags used by the hash functions of the PVSH engine and the
//! BLS signature helpers.
//!
//! # Example
//!
//! ```rust
//! use npvdkgrs::{HashDomains, ThresholdParameters};
//!
//! // 2-of-3 threshold round
//! let params = ThresholdParameters::new(3, 2).expect("valid params");
//! assert_eq!(params.threshold, 2);
//!
//! let domains = HashDomains::default();
//! assert_ne!(domains.q_point, domains.proof_point);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// Threshold parameters of a single key-generation or resharing round.
///
/// # Fields
///
/// - `parties`: Number of participants in the roster of the round (n).
/// - `threshold`: Number of shares needed to use the resulting key (t).
///
/// # Constraints
///
/// - `parties` must be at least 1
/// - `threshold` must be between 1 and `parties` (inclusive)
///
/// A resharing round carries the parameters of the *new* roster; the old
/// threshold only determines how many old members have to contribute.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ThresholdParameters {
    /// Number of participants receiving a share (n).
    pub parties: usize,
    /// Number of shares required to sign (t).
    pub threshold: usize,
}

impl ThresholdParameters {
    /// Creates and validates threshold parameters.
    ///
    /// # Example
    ///
    /// ```rust
    /// use npvdkgrs::ThresholdParameters;
    ///
    /// assert!(ThresholdParameters::new(3, 2).is_ok());
    /// assert!(ThresholdParameters::new(3, 4).is_err());
    /// ```
    pub fn new(parties: usize, threshold: usize) -> Result<Self, Error> {
        let params = Self { parties, threshold };
        params.validate()?;
        Ok(params)
    }

    /// Validates the threshold parameters.
    ///
    /// This checks that:
    /// - There is at least one participant
    /// - The threshold is non-zero
    /// - The threshold does not exceed the number of participants
    pub fn validate(&self) -> Result<(), Error> {
        if self.parties == 0 {
            return Err(Error::InvalidConfig(
                "need at least one participant".into(),
            ));
        }
        if self.threshold == 0 {
            return Err(Error::InvalidConfig(
                "threshold must be greater than 0".into(),
            ));
        }
        if self.threshold > self.parties {
            return Err(Error::InvalidConfig("t cannot exceed n".into()));
        }
        Ok(())
    }
}

/// Domain-separation tags for every hash function used by the crate.
///
/// All participants of a round must use identical tags, otherwise ciphertexts
/// neither verify nor decrypt. The defaults are versioned so that a future
/// change of the hashing scheme cannot be confused with the current one.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct HashDomains {
    /// Tag for `Q = H1(id || PK)`, binding a ciphertext to its recipient.
    pub q_point: Vec<u8>,
    /// Tag for `H = H1(Q || c || U)`, the proof base of a ciphertext.
    pub proof_point: Vec<u8>,
    /// Tag for the scalar derived from the pairing value (the one-time pad).
    pub mask_scalar: Vec<u8>,
    /// Tag for hashing signed messages to G1.
    pub message: Vec<u8>,
}

impl Default for HashDomains {
    fn default() -> Self {
        Self {
            q_point: b"NPVDKGRS-V01-PVSH-Q-BLS12381G1_XMD:SHA-256_SSWU_RO_".to_vec(),
            proof_point: b"NPVDKGRS-V01-PVSH-H-BLS12381G1_XMD:SHA-256_SSWU_RO_".to_vec(),
            mask_scalar: b"NPVDKGRS-V01-PVSH-MASK".to_vec(),
            message: b"BLS_SIG_BLS12381G1_XMD:SHA-256_SSWU_RO_NUL_".to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_threshold_above_parties() {
        let err = ThresholdParameters::new(3, 4).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(msg) if msg == "t cannot exceed n"));
    }

    #[test]
    fn rejects_zero_threshold_and_empty_roster() {
        assert!(ThresholdParameters::new(3, 0).is_err());
        assert!(ThresholdParameters::new(0, 0).is_err());
    }

    #[test]
    fn accepts_full_threshold() {
        let params = ThresholdParameters::new(4, 4).expect("t == n is valid");
        assert_eq!(params.parties, 4);
    }

    #[test]
    fn default_domains_are_distinct() {
        let d = HashDomains::default();
        assert_ne!(d.q_point, d.proof_point);
        assert_ne!(d.q_point, d.message);
        assert_ne!(d.mask_scalar, d.message);
    }
}
