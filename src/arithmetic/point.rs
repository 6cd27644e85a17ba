use super::field::FieldElement;
use crate::curve::Curve;
use crate::error::CurveError;

use std::fmt;

/// A point's coordinate representation. Points start affine at construction
/// and enter the Jacobian representation only through an explicit
/// [`Point::to_jacobian`] call.
///
/// Affine infinity is encoded by two absent coordinates; Jacobian infinity
/// is (1, 1, 0).
#[derive(Clone, Copy, Debug)]
pub enum Coordinates {
    Affine {
        x: Option<FieldElement>,
        y: Option<FieldElement>,
    },
    Jacobian {
        x: FieldElement,
        y: FieldElement,
        z: FieldElement,
    },
}

/// A point on a [`Curve`], in exactly one coordinate representation at a
/// time. Operations mixing representations are rejected with
/// [`CurveError::IncompatibleRepresentations`] rather than silently
/// miscomputed.
#[derive(Clone, Debug)]
pub struct Point {
    curve: Curve,
    coordinates: Coordinates,
}

impl Point {
    pub(crate) fn from_affine(curve: Curve, x: FieldElement, y: FieldElement) -> Self {
        Self {
            curve,
            coordinates: Coordinates::Affine {
                x: Some(x),
                y: Some(y),
            },
        }
    }

    pub(crate) fn from_jacobian(
        curve: Curve,
        x: FieldElement,
        y: FieldElement,
        z: FieldElement,
    ) -> Self {
        Self {
            curve,
            coordinates: Coordinates::Jacobian { x, y, z },
        }
    }

    pub(crate) fn infinity(curve: Curve) -> Self {
        Self {
            curve,
            coordinates: Coordinates::Affine { x: None, y: None },
        }
    }

    pub(crate) fn jacobian_infinity(curve: Curve) -> Self {
        let field = curve.field();
        Self::from_jacobian(curve, field.one(), field.one(), field.zero())
    }

    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    pub fn coordinates(&self) -> &Coordinates {
        &self.coordinates
    }

    pub fn is_affine(&self) -> bool {
        matches!(self.coordinates, Coordinates::Affine { .. })
    }

    pub fn affine_x(&self) -> Option<&FieldElement> {
        match &self.coordinates {
            Coordinates::Affine { x, .. } => x.as_ref(),
            Coordinates::Jacobian { .. } => None,
        }
    }

    pub fn affine_y(&self) -> Option<&FieldElement> {
        match &self.coordinates {
            Coordinates::Affine { y, .. } => y.as_ref(),
            Coordinates::Jacobian { .. } => None,
        }
    }

    pub fn is_infinity(&self) -> bool {
        let field = self.curve.field();
        match &self.coordinates {
            Coordinates::Affine { x, y } => x.is_none() && y.is_none(),
            Coordinates::Jacobian { x, y, z } => {
                *x == field.one() && *y == field.one() && z.is_zero()
            }
        }
    }

    /// (x, y) -> (x, -y); infinity maps to itself. No call path in this
    /// crate negates a Jacobian point, so that case stays unimplemented.
    pub fn negate(&self) -> Result<Self, CurveError> {
        match &self.coordinates {
            Coordinates::Affine {
                x: Some(x),
                y: Some(y),
            } => Ok(Self::from_affine(self.curve, *x, y.neg())),
            Coordinates::Affine { .. } => Ok(self.clone()),
            Coordinates::Jacobian { .. } => {
                Err(CurveError::NotImplemented("negation of a Jacobian point"))
            }
        }
    }

    /// Equality within a single representation; comparing an affine point
    /// against a Jacobian one is rejected.
    pub fn try_eq(&self, other: &Self) -> Result<bool, CurveError> {
        match (&self.coordinates, &other.coordinates) {
            (
                Coordinates::Affine { x: x1, y: y1 },
                Coordinates::Affine { x: x2, y: y2 },
            ) => Ok(self.curve == other.curve && x1 == x2 && y1 == y2),
            (
                Coordinates::Jacobian {
                    x: x1,
                    y: y1,
                    z: z1,
                },
                Coordinates::Jacobian {
                    x: x2,
                    y: y2,
                    z: z2,
                },
            ) => Ok(self.curve == other.curve && x1 == x2 && y1 == y2 && z1 == z2),
            _ => Err(CurveError::IncompatibleRepresentations),
        }
    }

    pub fn add(&self, rhs: &Self) -> Result<Self, CurveError> {
        if self.curve != rhs.curve {
            return Err(CurveError::CurveMismatch);
        }
        if self.is_infinity() {
            return Ok(rhs.clone());
        }
        if rhs.is_infinity() {
            return Ok(self.clone());
        }
        match (&self.coordinates, &rhs.coordinates) {
            (
                Coordinates::Affine {
                    x: Some(x1),
                    y: Some(y1),
                },
                Coordinates::Affine {
                    x: Some(x2),
                    y: Some(y2),
                },
            ) => self.affine_add(x1, y1, x2, y2),
            (
                Coordinates::Jacobian {
                    x: x1,
                    y: y1,
                    z: z1,
                },
                Coordinates::Jacobian {
                    x: x2,
                    y: y2,
                    z: z2,
                },
            ) => self.jacobian_add(x1, y1, z1, x2, y2, z2),
            _ => Err(CurveError::IncompatibleRepresentations),
        }
    }

    fn affine_add(
        &self,
        x1: &FieldElement,
        y1: &FieldElement,
        x2: &FieldElement,
        y2: &FieldElement,
    ) -> Result<Self, CurveError> {
        if x1 == x2 && y1 == y2 {
            return self.double();
        }
        // P and Q are mutual negatives
        if x1 == x2 && y1.add(y2)?.is_zero() {
            return Ok(self.curve.infinity());
        }
        let slope = y2.sub(y1)?.div(&x2.sub(x1)?)?;
        let x3 = slope.pow(2)?.sub(x1)?.sub(x2)?;
        let y3 = slope.mul(&x1.sub(&x3)?)?.sub(y1)?;
        Ok(Self::from_affine(self.curve, x3, y3))
    }

    /// Mixed Jacobian addition (Hankerson et al., algorithm 3.14). The rhs
    /// must carry Z = 1; P == Q and P == -Q are routed here to doubling and
    /// infinity before the chord formula, which cannot express them.
    fn jacobian_add(
        &self,
        x1: &FieldElement,
        y1: &FieldElement,
        z1: &FieldElement,
        x2: &FieldElement,
        y2: &FieldElement,
        z2: &FieldElement,
    ) -> Result<Self, CurveError> {
        let field = self.curve.field();
        if z1.is_zero() {
            return Err(CurveError::NotImplemented(
                "Jacobian addition with a degenerate accumulator",
            ));
        }
        if *z2 != field.one() {
            return Err(CurveError::NotImplemented(
                "general Jacobian addition (rhs must have Z = 1)",
            ));
        }

        let a = z1.mul(z1)?;
        let b = z1.mul(&a)?;
        let c = x2.mul(&a)?;
        let d = y2.mul(&b)?;

        // same affine x: the operands are equal or mutual negatives
        if c == *x1 {
            if d == *y1 {
                return self.double();
            }
            if d == y1.neg() {
                return Ok(Self::jacobian_infinity(self.curve));
            }
        }

        let e = c.sub(x1)?;
        let f = d.sub(y1)?;
        let g = e.mul(&e)?;
        let h = g.mul(&e)?;
        let i = x1.mul(&g)?;

        let x3 = f.mul(&f)?.sub(&h)?.sub(&i)?.sub(&i)?;
        let y3 = f.mul(&i.sub(&x3)?)?.sub(&y1.mul(&h)?)?;
        let z3 = z1.mul(&e)?;
        Ok(Self::from_jacobian(self.curve, x3, y3, z3))
    }

    pub fn double(&self) -> Result<Self, CurveError> {
        if self.is_infinity() {
            return Ok(self.clone());
        }
        let field = self.curve.field();
        let a = field.element(*self.curve.a())?;
        match &self.coordinates {
            Coordinates::Affine {
                x: Some(x),
                y: Some(y),
            } => {
                // y = 0 means the point equals its own negative
                if y.is_zero() {
                    return Err(CurveError::SelfNegationDouble);
                }
                // slope = (3x^2 + a) / 2y
                let xx = x.mul(x)?;
                let three_xx = xx.add(&xx)?.add(&xx)?;
                let slope = three_xx.add(&a)?.div(&y.add(y)?)?;
                let x3 = slope.pow(2)?.sub(x)?.sub(x)?;
                let y3 = slope.mul(&x.sub(&x3)?)?.sub(y)?;
                Ok(Self::from_affine(self.curve, x3, y3))
            }
            Coordinates::Affine { .. } => Ok(self.clone()),
            Coordinates::Jacobian { x, y, z } => {
                // negative of (X : Y : Z) is (X : -Y : Z)
                if *y == y.neg() {
                    return Err(CurveError::SelfNegationDouble);
                }
                let xx = x.mul(x)?;
                let three_xx = xx.add(&xx)?.add(&xx)?;
                let d = if a.is_zero() {
                    three_xx
                } else {
                    let zz = z.mul(z)?;
                    let zzzz = zz.mul(&zz)?;
                    three_xx.add(&a.mul(&zzzz)?)?
                };

                let yy = y.mul(y)?;
                let yyyy = yy.mul(&yy)?;
                let xyy = x.mul(&yy)?;
                let two_xyy = xyy.add(&xyy)?;
                let four_xyy = two_xyy.add(&two_xyy)?;
                let eight_xyy = four_xyy.add(&four_xyy)?;
                let four_yyyy = yyyy.add(&yyyy)?.add(&yyyy)?.add(&yyyy)?;
                let eight_yyyy = four_yyyy.add(&four_yyyy)?;

                let x3 = d.mul(&d)?.sub(&eight_xyy)?;
                let y3 = d.mul(&four_xyy.sub(&x3)?)?.sub(&eight_yyyy)?;
                let yz = y.mul(z)?;
                let z3 = yz.add(&yz)?;
                Ok(Self::from_jacobian(self.curve, x3, y3, z3))
            }
        }
    }

    /// (x, y) -> (x, y, 1); affine infinity -> (1, 1, 0).
    pub fn to_jacobian(&self) -> Result<Self, CurveError> {
        let field = self.curve.field();
        match &self.coordinates {
            Coordinates::Affine {
                x: Some(x),
                y: Some(y),
            } => Ok(Self::from_jacobian(self.curve, *x, *y, field.one())),
            Coordinates::Affine { .. } => Ok(Self::jacobian_infinity(self.curve)),
            Coordinates::Jacobian { .. } => Err(CurveError::AlreadyInRepresentation),
        }
    }

    /// Scales by Z^-2 and Z^-3; Z = 1 passes the coordinates through.
    pub fn to_affine(&self) -> Result<Self, CurveError> {
        let field = self.curve.field();
        match &self.coordinates {
            Coordinates::Jacobian { x, y, z } => {
                if self.is_infinity() {
                    return Ok(Self::infinity(self.curve));
                }
                if *z == field.one() {
                    return Ok(Self::from_affine(self.curve, *x, *y));
                }
                let zz = z.mul(z)?;
                let zzz = zz.mul(z)?;
                Ok(Self::from_affine(
                    self.curve,
                    x.div(&zz)?,
                    y.div(&zzz)?,
                ))
            }
            Coordinates::Affine { .. } => Err(CurveError::AlreadyInRepresentation),
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_infinity() {
            return write!(f, "Infinity");
        }
        match &self.coordinates {
            Coordinates::Affine {
                x: Some(x),
                y: Some(y),
            } => write!(f, "({}, {})", x.value(), y.value()),
            Coordinates::Affine { .. } => write!(f, "Infinity"),
            Coordinates::Jacobian { x, y, z } => {
                write!(f, "({}, {}, {})", x.value(), y.value(), z.value())
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::curve::test::toy_curve;
    use crate::curve::{Curve, CurveDomain};

    use bigint::U256;

    fn toy_point(x: u32, y: u32) -> Point {
        toy_curve()
            .point(U256::from_u32(x), U256::from_u32(y))
            .unwrap()
    }

    #[test]
    fn infinity_is_the_identity() {
        let curve = toy_curve();
        let inf = curve.infinity();
        let p = toy_point(5, 8);

        assert!(inf.is_infinity());
        assert!(inf.add(&p).unwrap().try_eq(&p).unwrap());
        assert!(p.add(&inf).unwrap().try_eq(&p).unwrap());
        assert!(inf.add(&inf).unwrap().is_infinity());
    }

    #[test]
    fn negation() {
        let p = toy_point(5, 8);
        let minus_p = p.negate().unwrap();
        assert!(minus_p.try_eq(&toy_point(5, 3)).unwrap());

        let inf = toy_curve().infinity();
        assert!(inf.negate().unwrap().is_infinity());

        // P + -P = infinity
        assert!(p.add(&minus_p).unwrap().is_infinity());
    }

    #[test]
    fn jacobian_negation_is_unsupported() {
        let p = toy_point(5, 8).to_jacobian().unwrap();
        assert!(matches!(
            p.negate(),
            Err(CurveError::NotImplemented(_))
        ));
    }

    #[test]
    fn addition_of_mutual_negatives() {
        // (x, y) + (x, -y) = infinity
        let sum = toy_point(5, 8).add(&toy_point(5, 3)).unwrap();
        assert!(sum.is_infinity());
    }

    #[test]
    fn addition_commutes() {
        let p = toy_point(5, 3);
        let q = toy_point(9, 10);
        let sum = toy_point(9, 1);
        assert!(p.add(&q).unwrap().try_eq(&sum).unwrap());
        assert!(q.add(&p).unwrap().try_eq(&sum).unwrap());
    }

    #[test]
    fn adding_a_point_to_itself_doubles() {
        let p = toy_point(5, 3);
        let expected = toy_point(5, 8);
        assert!(p.add(&p).unwrap().try_eq(&expected).unwrap());
        assert!(p.double().unwrap().try_eq(&expected).unwrap());
        assert!(toy_point(9, 10).double().unwrap().try_eq(&expected).unwrap());
    }

    #[test]
    fn points_on_different_curves_do_not_mix() {
        let p = toy_point(5, 3);
        let g = Curve::from_domain(CurveDomain::Secp256k1).generator();
        assert!(matches!(p.add(&g), Err(CurveError::CurveMismatch)));
    }

    #[test]
    fn representations_do_not_mix() {
        let p = toy_point(5, 3);
        let q = toy_point(9, 10).to_jacobian().unwrap();
        assert!(matches!(
            p.add(&q),
            Err(CurveError::IncompatibleRepresentations)
        ));
        assert!(matches!(
            p.try_eq(&q),
            Err(CurveError::IncompatibleRepresentations)
        ));
    }

    #[test]
    fn representation_round_trip() {
        for (x, y) in [(5u32, 8u32), (5, 3), (9, 10), (9, 1), (8, 6)] {
            let p = toy_point(x, y);
            let round_tripped = p.to_jacobian().unwrap().to_affine().unwrap();
            assert!(round_tripped.try_eq(&p).unwrap());
        }

        let inf = toy_curve().infinity();
        let jacobian_inf = inf.to_jacobian().unwrap();
        assert!(jacobian_inf.is_infinity());
        assert!(jacobian_inf.to_affine().unwrap().is_infinity());
    }

    #[test]
    fn conversion_to_the_current_representation_fails() {
        let p = toy_point(5, 3);
        assert!(matches!(
            p.to_affine(),
            Err(CurveError::AlreadyInRepresentation)
        ));
        let q = p.to_jacobian().unwrap();
        assert!(matches!(
            q.to_jacobian(),
            Err(CurveError::AlreadyInRepresentation)
        ));
    }

    #[test]
    fn secp256k1_generator_doubles_to_the_documented_point() {
        let curve = Curve::from_domain(CurveDomain::Secp256k1);
        let g2 = curve.generator().double().unwrap();
        assert_eq!(
            g2.affine_x().unwrap().value(),
            &U256::from_be_hex("c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5")
        );
        assert_eq!(
            g2.affine_y().unwrap().value(),
            &U256::from_be_hex("1ae168fea63dc339a3c58419466ceaeef7f632653266d0e1236431a950cfe52a")
        );
    }

    #[test]
    fn secp256k1_g_plus_2g_through_the_jacobian_path() {
        let curve = Curve::from_domain(CurveDomain::Secp256k1);
        let g = curve.generator();
        let g2 = g.double().unwrap();

        let sum = g2
            .to_jacobian()
            .unwrap()
            .add(&g.to_jacobian().unwrap())
            .unwrap()
            .to_affine()
            .unwrap();
        assert_eq!(
            sum.affine_x().unwrap().value(),
            &U256::from_be_hex("f9308a019258c31049344f85f89d5229b531c845836f99b08601f113bce036f9")
        );
        assert_eq!(
            sum.affine_y().unwrap().value(),
            &U256::from_be_hex("388f7b0f632de8140fe337e62a37f3566500a99934c2231b6cb9fd7584b8e672")
        );

        // affine chord agrees
        let affine_sum = g2.add(&g).unwrap();
        assert!(affine_sum.try_eq(&sum).unwrap());
    }

    #[test]
    fn jacobian_double_matches_affine_double() {
        let curve = Curve::from_domain(CurveDomain::Secp256k1);
        let g = curve.generator();
        let via_affine = g.double().unwrap();
        let via_jacobian = g
            .to_jacobian()
            .unwrap()
            .double()
            .unwrap()
            .to_affine()
            .unwrap();
        assert!(via_affine.try_eq(&via_jacobian).unwrap());

        // toy curve has a nonzero coefficient a, covering the a*Z^4 term
        let p = toy_point(9, 10);
        let via_affine = p.double().unwrap();
        let via_jacobian = p
            .to_jacobian()
            .unwrap()
            .double()
            .unwrap()
            .to_affine()
            .unwrap();
        assert!(via_affine.try_eq(&via_jacobian).unwrap());
    }

    #[test]
    fn doubling_a_self_negating_point_fails() {
        // (0, 0) lies on the toy curve and equals its own negative; both
        // representations report the same error
        let p = toy_point(0, 0);
        assert!(matches!(p.double(), Err(CurveError::SelfNegationDouble)));

        let p = p.to_jacobian().unwrap();
        assert!(matches!(p.double(), Err(CurveError::SelfNegationDouble)));
    }

    #[test]
    fn jacobian_addition_requires_a_unit_rhs_z() {
        let curve = Curve::from_domain(CurveDomain::Secp256k1);
        let g = curve.generator().to_jacobian().unwrap();
        // 2G via the Jacobian double keeps Z != 1
        let g2 = g.double().unwrap();
        assert!(matches!(
            g.add(&g2),
            Err(CurveError::NotImplemented(_))
        ));
    }
}
