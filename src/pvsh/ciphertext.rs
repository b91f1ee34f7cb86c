//! PVSH ciphertext and its wire format.
//!
//! A ciphertext is the triple `(c, U, V)`:
//!
//! - **c**: the masked secret `sh + eh` (scalar)
//! - **U**: `g2^r`, lets the recipient recompute the mask (G2)
//! - **V**: `H^(eh/r)`, the proof term checked by the pairing equation (G1)
//!
//! On the wire the three values are hex-encoded and joined with `.`:
//! `"<c_hex>.<U_hex>.<V_hex>"`. Any other field count is rejected with
//! `invalid ciphertext format`.

use std::fmt;
use std::str::FromStr;

use crate::{
    PairingBackend, point_from_hex, point_to_hex, scalar_from_hex, scalar_to_hex,
    errors::Error,
};

const SEPARATOR: char = '.';

/// Encrypted share produced by [`VerifiableHandoff::encode`](crate::VerifiableHandoff::encode).
///
/// # Example
///
/// ```rust
/// use npvdkgrs::{
///     Ciphertext, CurvePoint, FieldElement, Fr, G2, PairingEngine, Participant, Pvsh,
///     VerifiableHandoff,
/// };
/// use rand::thread_rng;
///
/// let mut rng = thread_rng();
/// let pvsh = Pvsh::<PairingEngine>::new();
/// let (member, _sk) = Participant::<PairingEngine>::generate(&mut rng, &G2::generator());
///
/// let sh = Fr::random(&mut rng);
/// let ciphertext = pvsh.encode(&mut rng, &member.id, &member.public_key, &sh).unwrap();
///
/// let wire = ciphertext.to_string();
/// assert_eq!(wire.split('.').count(), 3);
/// let parsed: Ciphertext<PairingEngine> = wire.parse().unwrap();
/// assert_eq!(parsed, ciphertext);
/// ```
#[derive(Debug)]
pub struct Ciphertext<B: PairingBackend> {
    pub c: B::Scalar,
    pub u: B::G2,
    pub v: B::G1,
}

impl<B: PairingBackend> Ciphertext<B> {
    /// Hex encodings of `c` and `U`, the inputs of the proof base `H`.
    pub(crate) fn c_hex(&self) -> String {
        scalar_to_hex(&self.c)
    }

    pub(crate) fn u_hex(&self) -> String {
        point_to_hex::<B::Scalar, B::G2>(&self.u)
    }
}

impl<B: PairingBackend> Clone for Ciphertext<B> {
    fn clone(&self) -> Self {
        Self {
            c: self.c,
            u: self.u,
            v: self.v,
        }
    }
}

impl<B: PairingBackend> PartialEq for Ciphertext<B> {
    fn eq(&self, other: &Self) -> bool {
        self.c == other.c && self.u == other.u && self.v == other.v
    }
}

impl<B: PairingBackend> fmt::Display for Ciphertext<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{SEPARATOR}{}{SEPARATOR}{}",
            self.c_hex(),
            self.u_hex(),
            point_to_hex::<B::Scalar, B::G1>(&self.v)
        )
    }
}

impl<B: PairingBackend> FromStr for Ciphertext<B> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(SEPARATOR).collect();
        let [c, u, v] = fields.as_slice() else {
            return Err(Error::MalformedInput("invalid ciphertext format".into()));
        };
        Ok(Self {
            c: scalar_from_hex(c)?,
            u: point_from_hex::<B::Scalar, B::G2>(u)?,
            v: point_from_hex::<B::Scalar, B::G1>(v)?,
        })
    }
}
