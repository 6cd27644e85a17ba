//! Modular primitives over raw `U256` values.
//!
//! All functions assume canonical inputs (operands already reduced below the
//! modulus); the callers in `field.rs` enforce that invariant. Addition and
//! subtraction branch on operand magnitude instead of widening, so they never
//! produce a carry out of 256 bits.

use crate::error::CurveError;

use bigint::{Encoding, NonZero, Split, U256, U512};

/// (lhs + rhs) mod modulus, without wide addition.
///
/// With `rhs_mod = p - rhs`, the sum is either `lhs - rhs_mod` (when lhs
/// reaches past the modulus) or `rhs + lhs`, which fits in 256 bits because
/// `lhs < rhs_mod` in that branch.
pub fn add_mod_u256(lhs: &U256, rhs: &U256, modulus: &U256) -> U256 {
    let rhs_mod = modulus.wrapping_sub(rhs);
    if *lhs >= rhs_mod {
        lhs.wrapping_sub(&rhs_mod)
    } else {
        modulus.wrapping_sub(&rhs_mod).wrapping_add(lhs)
    }
}

/// (lhs - rhs) mod modulus, borrowing the modulus when lhs is smaller.
pub fn sub_mod_u256(lhs: &U256, rhs: &U256, modulus: &U256) -> U256 {
    if *lhs >= *rhs {
        lhs.wrapping_sub(rhs)
    } else {
        modulus.wrapping_sub(rhs).wrapping_add(lhs)
    }
}

/// (lhs * rhs) mod modulus via a full 512-bit product.
pub fn mul_mod_u256(lhs: &U256, rhs: &U256, modulus: &U256) -> U256 {
    // NOTE modulus is never zero, so unwrap is fine here
    let mod512 = NonZero::new(U512::from((U256::ZERO, *modulus))).unwrap();
    // U512::from((hi, lo)) puts its first element in the most significant
    // half; mul_wide returns (lo, hi)
    let (lo, hi) = lhs.mul_wide(rhs);
    let product = U512::from((hi, lo));
    // the remainder fits in the low half because the modulus is a U256
    let (_, rem) = (product % mod512).split();
    rem
}

/// Multiplicative inverse modulo a prime, by Fermat exponentiation to p - 2.
pub fn inv_mod_u256(value: &U256, modulus: &U256) -> Result<U256, CurveError> {
    if value == &U256::ZERO {
        return Err(CurveError::NoInverse);
    }
    let exponent = modulus.wrapping_sub(&U256::from_u8(2));
    let mut result = U256::ONE;
    let mut base = *value;
    for i in 0..bit_length(&exponent) {
        if bit(&exponent, i) {
            result = mul_mod_u256(&result, &base, modulus);
        }
        base = mul_mod_u256(&base, &base, modulus);
    }
    Ok(result)
}

/// Tests the bit with value 2^index.
pub(crate) fn bit(number: &U256, index: usize) -> bool {
    let bytes = number.to_be_bytes();
    (bytes[31 - index / 8] >> (index % 8)) & 1 == 1
}

/// Index of the highest set bit plus one; zero for zero.
pub(crate) fn bit_length(number: &U256) -> usize {
    let bytes = number.to_be_bytes();
    for (i, byte) in bytes.iter().enumerate() {
        if *byte != 0 {
            return (32 - i) * 8 - byte.leading_zeros() as usize;
        }
    }
    0
}
