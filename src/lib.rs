//! # NPVDKGRS: Non-interactive Publicly Verifiable Distributed Key Generation with Resharing
//!
//! `n` mutually distrusting participants jointly derive a BLS key such that any
//! `t` of them can sign, without a dealer and without any interactive round.
//! Every message is publicly auditable: anyone can check that an encrypted
//! share is consistent with the published commitments without learning it.
//!
//! ## Overview
//!
//! The crate is built from two pieces:
//!
//! - **PVSH** (Publicly Verifiable Secret Handoff): pairing-based verifiable
//!   encryption of one scalar to a recipient's public key. See [`Pvsh`] and
//!   [`VerifiableHandoff`].
//! - **NPVDKGRS**: Shamir sharing with Feldman commitments on top of PVSH.
//!   Each contributor broadcasts one [`Contribution`]; each participant then
//!   verifies all of them and reconstructs its share and the group key. See
//!   [`Npvdkgrs`] and [`DistributedKeyGeneration`].
//!
//! Resharing re-runs the same round with a new roster and/or threshold, old
//! members seeding their polynomial with their current share. The group public
//! key is preserved.
//!
//! ## Architecture
//!
//! - **arith**: field, group and pairing abstractions ([`FieldElement`],
//!   [`CurvePoint`], [`PairingBackend`]), polynomials and Lagrange interpolation
//! - **[`SecretScalar`]**: zeroize-on-drop owner of secret scalars
//! - **pvsh**: [`Ciphertext`] and the [`Pvsh`] engine
//! - **dkg**: roster, contribution and result types, the [`Npvdkgrs`] scheme
//! - **[`bls`]**: threshold BLS signatures over the generated keys
//! - **config**: [`ThresholdParameters`] and [`HashDomains`]
//! - **errors**: [`Error`], [`BackendError`] and the collected [`FailureReason`]s
//!
//! ## Quick Example
//!
//! ```rust,no_run
//! use npvdkgrs::{
//!     DistributedKeyGeneration, G2, HashDomains, Npvdkgrs, PairingEngine, Participant,
//!     ThresholdParameters, bls,
//! };
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut rng = StdRng::from_entropy();
//! let dkg = Npvdkgrs::<PairingEngine>::new();
//! let params = ThresholdParameters::new(3, 2)?;
//!
//! // Every member publishes (id, PK)
//! let members: Vec<_> = (0..3)
//!     .map(|_| Participant::<PairingEngine>::generate(&mut rng, dkg.base()))
//!     .collect();
//! let roster: Vec<_> = members.iter().map(|(p, _)| p.clone()).collect();
//!
//! // Every member broadcasts a contribution
//! let mut contributions = Vec::new();
//! for (me, _) in &members {
//!     contributions.push(dkg.calculate_contribution(&mut rng, &params, me, None, &roster)?);
//! }
//!
//! // Every member verifies all contributions and derives its share
//! let mut partials: Vec<bls::PartialSignature<PairingEngine>> = Vec::new();
//! for (me, sk) in &members[..2] {
//!     let share = dkg.calculate_my_key(&contributions, &me.id, sk)?;
//!     assert!(share.is_ok());
//!     let sh = share.own_secret_share.as_ref().expect("member share");
//!     partials.push(bls::PartialSignature {
//!         signer_id: me.id,
//!         signature: bls::sign::<PairingEngine>(sh, b"msg", &HashDomains::default()),
//!     });
//! }
//!
//! let pg = dkg.calculate_my_key(&contributions, &members[0].0.id, &members[0].1)?
//!     .group_public_key
//!     .expect("group key");
//! let signature = bls::recover_signature(&partials)?;
//! assert!(bls::verify::<PairingEngine>(&pg, b"msg", &signature, dkg.base(), &HashDomains::default()));
//! # let _: &G2 = dkg.base();
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - **`blst`** (default): blstrs backend for BLS12-381
//!
//! ## Performance
//!
//! Rayon parallelizes the work that is independent per entry:
//! - Encrypting the sub-shares of a contribution
//! - Verifying and decrypting the contributions of a round
//! - Reconstructing the public share of every participant
//!
//! ## Security Considerations
//!
//! - **Ids** are self-declared, must be non-zero and unique; nothing here authenticates them.
//! - **Transport** of contributions is out of scope; every participant must see the same set.
//! - **Secrets** (`r`, masks, shares, keys) live in [`SecretScalar`] and are wiped on drop.
//!   They are never logged.

mod arith;
pub mod bls;
mod config;
mod dkg;
mod errors;
mod pvsh;
mod secret;
mod serde_impl;

pub use arith::*;
pub use config::*;
pub use dkg::*;
pub use errors::*;
pub use pvsh::*;
pub use secret::SecretScalar;
