use crate::arithmetic::{FieldElement, Point, PrimeField};
use crate::error::CurveError;

use bigint::U256;

use std::fmt;

/// Named elliptic curve domain parameters, per SEC2: the sextuple
/// T = (p, a, b, G, n, h). The registry is process-wide and read-only;
/// secp256k1 is currently the only entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CurveDomain {
    Secp256k1,
}

impl CurveDomain {
    pub fn field(&self) -> PrimeField {
        match self {
            // 2^256 - 2^32 - 2^9 - 2^8 - 2^7 - 2^6 - 2^4 - 1
            Self::Secp256k1 => PrimeField::new(U256::from_be_hex(
                "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f",
            )),
        }
    }

    /// Coefficient a of y^2 = x^3 + ax + b.
    pub fn a(&self) -> U256 {
        match self {
            Self::Secp256k1 => U256::ZERO,
        }
    }

    /// Coefficient b of y^2 = x^3 + ax + b.
    pub fn b(&self) -> U256 {
        match self {
            Self::Secp256k1 => U256::from_u8(7),
        }
    }

    /// The base point in compressed form.
    pub fn generator_compressed(&self) -> &'static str {
        match self {
            Self::Secp256k1 => "0279BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798",
        }
    }

    pub fn generator_x(&self) -> U256 {
        match self {
            Self::Secp256k1 => U256::from_be_hex(
                "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
            ),
        }
    }

    pub fn generator_y(&self) -> U256 {
        match self {
            Self::Secp256k1 => U256::from_be_hex(
                "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8",
            ),
        }
    }

    /// The order n of the base point.
    pub fn order(&self) -> U256 {
        match self {
            Self::Secp256k1 => U256::from_be_hex(
                "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141",
            ),
        }
    }

    pub fn cofactor(&self) -> U256 {
        match self {
            Self::Secp256k1 => U256::ONE,
        }
    }
}

/// A short-Weierstrass curve over a prime field, built either from a named
/// [`CurveDomain`] or from explicit parameters (small test curves).
#[derive(Clone, Copy, Debug)]
pub struct Curve {
    domain: Option<CurveDomain>,
    field: PrimeField,
    g_x: FieldElement,
    g_y: FieldElement,
    a: U256,
    b: U256,
    n: U256,
    h: Option<U256>,
}

impl Curve {
    pub fn from_domain(domain: CurveDomain) -> Self {
        let field = domain.field();
        // NOTE unwraps are fine here because the registry constants are
        // canonical field elements by construction
        let g_x = field.element(domain.generator_x()).unwrap();
        let g_y = field.element(domain.generator_y()).unwrap();
        Self {
            domain: Some(domain),
            field,
            g_x,
            g_y,
            a: domain.a(),
            b: domain.b(),
            n: domain.order(),
            h: Some(domain.cofactor()),
        }
    }

    /// Builds a curve from explicit parameters. The generator coordinates
    /// must belong to the given field.
    pub fn with_params(
        field: PrimeField,
        g_x: FieldElement,
        g_y: FieldElement,
        a: U256,
        b: U256,
        n: U256,
        h: Option<U256>,
    ) -> Result<Self, CurveError> {
        if g_x.field() != field || g_y.field() != field {
            return Err(CurveError::FieldMismatch);
        }
        Ok(Self {
            domain: None,
            field,
            g_x,
            g_y,
            a,
            b,
            n,
            h,
        })
    }

    pub fn domain(&self) -> Option<CurveDomain> {
        self.domain
    }

    pub fn field(&self) -> PrimeField {
        self.field
    }

    pub fn a(&self) -> &U256 {
        &self.a
    }

    pub fn b(&self) -> &U256 {
        &self.b
    }

    pub fn order(&self) -> &U256 {
        &self.n
    }

    pub fn cofactor(&self) -> Option<&U256> {
        self.h.as_ref()
    }

    pub fn generator(&self) -> Point {
        Point::from_affine(*self, self.g_x, self.g_y)
    }

    pub fn generator_x(&self) -> &FieldElement {
        &self.g_x
    }

    pub fn generator_y(&self) -> &FieldElement {
        &self.g_y
    }

    pub fn infinity(&self) -> Point {
        Point::infinity(*self)
    }

    /// Validates both raw coordinates against the curve's field and wraps
    /// them into an affine point.
    pub fn point(&self, x: U256, y: U256) -> Result<Point, CurveError> {
        let x = self.field.element(x)?;
        let y = self.field.element(y)?;
        Ok(Point::from_affine(*self, x, y))
    }

    /// Wraps existing field elements into an affine point, rejecting
    /// coordinates from a foreign field.
    pub fn point_from_elements(
        &self,
        x: FieldElement,
        y: FieldElement,
    ) -> Result<Point, CurveError> {
        if x.field() != self.field || y.field() != self.field {
            return Err(CurveError::FieldMismatch);
        }
        Ok(Point::from_affine(*self, x, y))
    }
}

impl PartialEq for Curve {
    fn eq(&self, other: &Self) -> bool {
        if let (Some(lhs), Some(rhs)) = (self.domain, other.domain) {
            if lhs == rhs {
                return true;
            }
        }
        self.g_x == other.g_x
            && self.g_y == other.g_y
            && self.a == other.a
            && self.b == other.b
            && self.n == other.n
            && self.h == other.h
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "curve over {} with base point ({}, {}), a = {}, b = {}, order {}",
            self.field,
            self.g_x.value(),
            self.g_y.value(),
            self.a,
            self.b,
            self.n
        )?;
        if let Some(h) = &self.h {
            write!(f, " and cofactor {}", h)?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;

    pub(crate) fn toy_curve() -> Curve {
        // y^2 = x^3 + x over F_11 with G = (8, 6) of order 12
        let field = PrimeField::new(U256::from_u32(11));
        Curve::with_params(
            field,
            field.element(U256::from_u32(8)).unwrap(),
            field.element(U256::from_u32(6)).unwrap(),
            U256::ONE,
            U256::ZERO,
            U256::from_u32(12),
            None,
        )
        .unwrap()
    }

    #[test]
    fn init_with_domain() {
        let curve = Curve::from_domain(CurveDomain::Secp256k1);
        assert_eq!(curve.domain(), Some(CurveDomain::Secp256k1));
        assert_eq!(curve.field(), CurveDomain::Secp256k1.field());
        assert_eq!(curve.cofactor(), Some(&U256::ONE));
    }

    #[test]
    fn domain_curve_equals_explicit_curve() {
        let domain = CurveDomain::Secp256k1;
        let a = Curve::from_domain(domain);
        let field = domain.field();
        let b = Curve::with_params(
            field,
            field.element(domain.generator_x()).unwrap(),
            field.element(domain.generator_y()).unwrap(),
            domain.a(),
            domain.b(),
            domain.order(),
            Some(domain.cofactor()),
        )
        .unwrap();
        assert_eq!(a, b);
        assert_eq!(b, a);
        assert_ne!(a, toy_curve());
    }

    #[test]
    fn point_factory_validates_coordinates() {
        let curve = toy_curve();
        assert!(curve.point(U256::from_u32(5), U256::from_u32(8)).is_ok());
        assert!(matches!(
            curve.point(U256::from_u32(11), U256::from_u32(8)),
            Err(CurveError::InvalidFieldElement)
        ));

        let foreign = PrimeField::new(U256::from_u32(17))
            .element(U256::from_u32(5))
            .unwrap();
        let native = curve.field().element(U256::from_u32(5)).unwrap();
        assert!(matches!(
            curve.point_from_elements(foreign, native),
            Err(CurveError::FieldMismatch)
        ));
    }

    #[test]
    fn display_includes_the_cofactor_when_known() {
        let rendered = Curve::from_domain(CurveDomain::Secp256k1).to_string();
        assert!(rendered.contains("and cofactor"));

        // the toy curve has no recorded cofactor
        assert!(!toy_curve().to_string().contains("cofactor"));
    }

    #[test]
    fn generator_matches_domain_constants() {
        let curve = Curve::from_domain(CurveDomain::Secp256k1);
        let g = curve.generator();
        assert_eq!(
            g.affine_x().unwrap().value(),
            &CurveDomain::Secp256k1.generator_x()
        );
        assert_eq!(
            g.affine_y().unwrap().value(),
            &CurveDomain::Secp256k1.generator_y()
        );
    }
}
