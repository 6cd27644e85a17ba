use super::modular;
use super::point::Point;
use crate::error::CurveError;
use crate::table;

use bigint::U256;

impl Point {
    /// Computes scalar * self.
    ///
    /// Multiplications of the secp256k1 generator are served from the
    /// precomputed doubling table; everything else runs binary
    /// double-and-add over the bits of the scalar. The result is affine.
    pub fn scalar_mul(&self, scalar: &U256) -> Result<Point, CurveError> {
        if self.is_infinity() {
            return Ok(self.clone());
        }
        if scalar == &U256::ZERO {
            return Ok(self.curve().infinity());
        }
        if scalar == &U256::from_u8(2) {
            return self.double();
        }
        if let Some(doublings) = table::lookup(self.curve(), self) {
            return doublings.mul(self, scalar);
        }
        self.double_and_add(scalar)
    }

    /// Convenience entry point for small signed scalars.
    pub fn scalar_mul_signed(&self, scalar: i64) -> Result<Point, CurveError> {
        if scalar < 0 {
            return Err(CurveError::NegativeScalarUnsupported);
        }
        self.scalar_mul(&U256::from_u64(scalar as u64))
    }

    fn double_and_add(&self, scalar: &U256) -> Result<Point, CurveError> {
        let mut tally = Point::jacobian_infinity(*self.curve());
        let affine = if self.is_affine() {
            self.clone()
        } else {
            self.to_affine()?
        };
        let mut increment = affine.to_jacobian()?;
        for i in 0..modular::bit_length(scalar) {
            if modular::bit(scalar, i) {
                tally = tally.add(&increment)?;
            }
            // The mixed-add formula needs the increment back at Z = 1, so
            // the doubling runs through the affine representation.
            increment = increment.to_affine()?.double()?.to_jacobian()?;
        }
        tally.to_affine()
    }
}
