//! The uncompressed wire format: one `0x04` tag byte followed by 32
//! big-endian bytes each for X and Y. Compressed points are not decoded.

use crate::arithmetic::{Coordinates, Point};
use crate::curve::Curve;
use crate::error::CurveError;

use bigint::{Encoding, U256};

pub const UNCOMPRESSED_TAG: u8 = 0x04;
const UNCOMPRESSED_LEN: usize = 65;

/// Decodes an uncompressed point on the given curve. Both coordinates are
/// validated against the curve's field.
pub fn point_from_uncompressed(curve: &Curve, bytes: &[u8]) -> Result<Point, CurveError> {
    let tag = *bytes.first().ok_or(CurveError::UnsupportedPointFormat(0))?;
    if tag != UNCOMPRESSED_TAG || bytes.len() != UNCOMPRESSED_LEN {
        return Err(CurveError::UnsupportedPointFormat(tag));
    }
    // NOTE the length check above makes both 32-byte conversions infallible
    let x = U256::from_be_slice(&bytes[1..33]);
    let y = U256::from_be_slice(&bytes[33..65]);
    curve.point(x, y)
}

/// Decodes an uncompressed point from its hex string form, with or without
/// a `0x` prefix.
pub fn point_from_uncompressed_hex(curve: &Curve, hex: &str) -> Result<Point, CurveError> {
    let stripped = hex.trim_start_matches("0x");
    // NOTE these checks avoid explicit panics in `from_be_hex`
    if stripped.len() != 2 * UNCOMPRESSED_LEN || !stripped.chars().all(|c| c.is_ascii_hexdigit())
    {
        return Err(CurveError::UnsupportedPointFormat(0));
    }
    // NOTE unwrap is fine here because the digits were just validated
    let tag = u8::from_str_radix(&stripped[0..2], 16).unwrap();
    if tag != UNCOMPRESSED_TAG {
        return Err(CurveError::UnsupportedPointFormat(tag));
    }
    let x = U256::from_be_hex(&stripped[2..66]);
    let y = U256::from_be_hex(&stripped[66..130]);
    curve.point(x, y)
}

/// Encodes an affine point into the uncompressed wire format. Infinity and
/// Jacobian points have no encoding here.
pub fn point_to_uncompressed(point: &Point) -> Result<Vec<u8>, CurveError> {
    match point.coordinates() {
        Coordinates::Affine {
            x: Some(x),
            y: Some(y),
        } => {
            let mut bytes = Vec::with_capacity(UNCOMPRESSED_LEN);
            bytes.push(UNCOMPRESSED_TAG);
            bytes.extend_from_slice(&x.value().to_be_bytes());
            bytes.extend_from_slice(&y.value().to_be_bytes());
            Ok(bytes)
        }
        _ => Err(CurveError::NotImplemented(
            "encoding a non-affine or infinite point",
        )),
    }
}
