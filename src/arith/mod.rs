//! Arithmetic layer: scalar field, curve groups, pairing and the Shamir
//! primitives built on top of them.
//!
//! # Architecture
//!
//! - **[`field`]**: Scalar field operations (Fr), hashing to scalars, hex encoding
//! - **[`group`]**: Elliptic curve point operations (G1, G2, GT), hashing to the curve
//! - **[`pairing`]**: Bilinear pairing operations - `e(G1, G2) -> GT`
//! - **[`poly`]**: Secret polynomials and their Feldman commitments (`share`)
//! - **[`lagrange`]**: Interpolation at zero for scalars and points (`recover`)
//!
//! # Backend Support
//!
//! | Feature | Backend | Curve | Status |
//! |---------|---------|-------|--------|
//! | `blst` (default) | blstrs | BLS12-381 | Stable |
//!
//! # Example
//!
//! ```rust
//! use rand::thread_rng;
//! use npvdkgrs::{CurvePoint, FieldElement, PairingBackend, PairingEngine};
//!
//! // Field operations
//! let mut rng = thread_rng();
//! let scalar = <PairingEngine as PairingBackend>::Scalar::random(&mut rng);
//! let inv = scalar.invert().expect("non-zero scalar");
//!
//! // Curve operations
//! let g1 = <PairingEngine as PairingBackend>::G1::generator();
//! let point = g1.mul_scalar(&scalar);
//!
//! // Pairing operation
//! let g2 = <PairingEngine as PairingBackend>::G2::generator();
//! let gt = PairingEngine::pairing(&point, &g2.mul_scalar(&inv));
//! assert_eq!(gt, PairingEngine::pairing(&g1, &g2));
//! ```

mod field;
pub use self::field::*;

mod group;
pub use self::group::*;

mod pairing;
pub use self::pairing::*;

mod poly;
pub use self::poly::*;

mod lagrange;
pub use self::lagrange::*;
