use super::modular;
use crate::error::CurveError;

use bigint::U256;

use std::fmt;

/// Integers modulo a 256-bit prime. Two fields are the same field exactly
/// when their moduli are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PrimeField(U256);

impl PrimeField {
    pub const fn new(modulus: U256) -> Self {
        Self(modulus)
    }

    pub fn modulus(&self) -> &U256 {
        &self.0
    }

    /// Wraps a canonical value into this field. Values at or above the
    /// modulus are rejected rather than reduced.
    pub fn element(&self, value: U256) -> Result<FieldElement, CurveError> {
        if value < self.0 {
            Ok(FieldElement { value, field: *self })
        } else {
            Err(CurveError::InvalidFieldElement)
        }
    }

    pub fn zero(&self) -> FieldElement {
        FieldElement {
            value: U256::ZERO,
            field: *self,
        }
    }

    pub fn one(&self) -> FieldElement {
        FieldElement {
            value: U256::ONE,
            field: *self,
        }
    }
}

impl fmt::Display for PrimeField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "F_{}", self.0)
    }
}

/// An immutable value in a [`PrimeField`], kept canonical (`0 <= value < p`)
/// by construction. Binary operations require both operands to share a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldElement {
    value: U256,
    field: PrimeField,
}

impl FieldElement {
    pub fn value(&self) -> &U256 {
        &self.value
    }

    pub fn field(&self) -> PrimeField {
        self.field
    }

    pub fn is_zero(&self) -> bool {
        self.value == U256::ZERO
    }

    fn require_same_field(&self, other: &Self) -> Result<(), CurveError> {
        if self.field == other.field {
            Ok(())
        } else {
            Err(CurveError::FieldMismatch)
        }
    }

    fn wrap(&self, value: U256) -> Self {
        Self {
            value,
            field: self.field,
        }
    }

    pub fn add(&self, rhs: &Self) -> Result<Self, CurveError> {
        self.require_same_field(rhs)?;
        Ok(self.wrap(modular::add_mod_u256(
            &self.value,
            &rhs.value,
            self.field.modulus(),
        )))
    }

    pub fn sub(&self, rhs: &Self) -> Result<Self, CurveError> {
        self.require_same_field(rhs)?;
        Ok(self.wrap(modular::sub_mod_u256(
            &self.value,
            &rhs.value,
            self.field.modulus(),
        )))
    }

    pub fn mul(&self, rhs: &Self) -> Result<Self, CurveError> {
        self.require_same_field(rhs)?;
        Ok(self.wrap(modular::mul_mod_u256(
            &self.value,
            &rhs.value,
            self.field.modulus(),
        )))
    }

    pub fn neg(&self) -> Self {
        self.wrap(modular::sub_mod_u256(
            &U256::ZERO,
            &self.value,
            self.field.modulus(),
        ))
    }

    pub fn inverse(&self) -> Result<Self, CurveError> {
        Ok(self.wrap(modular::inv_mod_u256(&self.value, self.field.modulus())?))
    }

    pub fn div(&self, rhs: &Self) -> Result<Self, CurveError> {
        self.require_same_field(rhs)?;
        self.mul(&rhs.inverse()?)
    }

    /// Raises to a small integer power by repeated multiplication.
    pub fn pow(&self, exponent: i32) -> Result<Self, CurveError> {
        if exponent < 0 {
            return Err(CurveError::NegativeExponentUnsupported);
        }
        let mut result = self.field.one();
        for _ in 0..exponent {
            result = result.mul(self)?;
        }
        Ok(result)
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} in {}", self.value, self.field)
    }
}
