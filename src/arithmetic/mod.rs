mod field;
pub mod modular;
mod point;
mod scalar_mul;

pub use field::{FieldElement, PrimeField};
pub use point::{Coordinates, Point};
