//! Precomputed doublings of the secp256k1 base point.
//!
//! The embedded resource holds the 256 successive doublings 2^0 G .. 2^255 G
//! as affine hex coordinate pairs. It is parsed once, on first use, and the
//! cached table serves every later generator multiplication. A malformed
//! resource is a fatal error: there is no silent fallback to the general
//! double-and-add path.

use crate::arithmetic::{modular, Point};
use crate::curve::{Curve, CurveDomain};
use crate::error::CurveError;

use bigint::U256;
use once_cell::sync::Lazy;
use serde::Deserialize;

const SECP256K1_DOUBLINGS_JSON: &str =
    include_str!("../resources/secp256k1_base_point_doublings.json");

const TABLE_LEN: usize = 256;

#[derive(Deserialize)]
struct TableEntry(String, String);

/// An ordered sequence of precomputed doublings of one curve's generator,
/// each stored in Jacobian form with Z = 1 so it can serve as the rhs of a
/// mixed addition.
pub struct DoublingTable {
    curve: Curve,
    entries: Vec<Point>,
}

static SECP256K1_TABLE: Lazy<DoublingTable> = Lazy::new(|| {
    DoublingTable::from_resource(
        Curve::from_domain(CurveDomain::Secp256k1),
        SECP256K1_DOUBLINGS_JSON,
    )
    .expect("malformed secp256k1 base point doubling table resource")
});

/// Strategy lookup keyed by curve and point identity: only the secp256k1
/// generator currently has a registered table.
pub(crate) fn lookup(curve: &Curve, point: &Point) -> Option<&'static DoublingTable> {
    if curve.domain() == Some(CurveDomain::Secp256k1)
        && point.try_eq(&curve.generator()).unwrap_or(false)
    {
        Some(&SECP256K1_TABLE)
    } else {
        None
    }
}

/// The cached secp256k1 generator table. First use triggers the resource
/// load; see the module docs for the failure contract.
pub fn secp256k1_generator_table() -> &'static DoublingTable {
    &SECP256K1_TABLE
}

impl DoublingTable {
    fn from_resource(curve: Curve, json: &str) -> Result<Self, String> {
        let raw: Vec<TableEntry> = serde_json::from_str(json).map_err(|e| e.to_string())?;
        if raw.len() != TABLE_LEN {
            return Err(format!(
                "expected {} doublings, found {}",
                TABLE_LEN,
                raw.len()
            ));
        }
        let mut entries = Vec::with_capacity(TABLE_LEN);
        for TableEntry(x, y) in &raw {
            let point = curve
                .point(parse_coordinate(x)?, parse_coordinate(y)?)
                .map_err(|e| e.to_string())?
                .to_jacobian()
                .map_err(|e| e.to_string())?;
            entries.push(point);
        }
        Ok(Self { curve, entries })
    }

    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    pub fn entries(&self) -> &[Point] {
        &self.entries
    }

    /// Multiplies the table's generator by a scalar: for every set bit i of
    /// the scalar, entry i (that is, 2^i G) is accumulated by mixed
    /// addition. No doubling steps are needed because the table already
    /// encodes every power of two.
    pub fn mul(&self, point: &Point, scalar: &U256) -> Result<Point, CurveError> {
        if point.curve() != &self.curve || !point.try_eq(&self.curve.generator()).unwrap_or(false)
        {
            return Err(CurveError::TableDomainMismatch);
        }
        let mut tally = Point::jacobian_infinity(self.curve);
        for (i, entry) in self.entries.iter().enumerate() {
            if modular::bit(scalar, i) {
                tally = tally.add(entry)?;
            }
        }
        tally.to_affine()
    }
}

fn parse_coordinate(hex: &str) -> Result<U256, String> {
    // NOTE the length and digit checks avoid explicit panics in `from_be_hex`
    if hex.len() != 64 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("invalid coordinate: {hex}"));
    }
    Ok(U256::from_be_hex(hex))
}
