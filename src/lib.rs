//! Prime-field and short-Weierstrass elliptic curve arithmetic over 256-bit
//! integers, with secp256k1 as the built-in domain.
//!
//! Field elements carry their field at runtime and points carry their curve,
//! so mixing incompatible operands is a typed error instead of undefined
//! behavior. Points exist in either affine or Jacobian representation and
//! are converted explicitly; scalar multiplication of the secp256k1
//! generator is served from a precomputed doubling table.

pub mod arithmetic;
pub mod curve;
mod error;
pub mod parse;
pub mod table;

pub use arithmetic::{Coordinates, FieldElement, Point, PrimeField};
pub use curve::{Curve, CurveDomain};
pub use error::CurveError;

pub use bigint::U256;
