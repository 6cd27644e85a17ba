use thiserror::Error;

/// Precondition failures surfaced by field, curve and point operations.
///
/// Every operation in this crate is pure computation over immutable values,
/// so none of these are retriable and none leave partial state behind.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveError {
    #[error("operands belong to different prime fields")]
    FieldMismatch,
    #[error("points lie on different curves")]
    CurveMismatch,
    #[error("value is not a canonical field element (expected 0 <= value < p)")]
    InvalidFieldElement,
    #[error("zero has no multiplicative inverse")]
    NoInverse,
    #[error("negative exponents are not supported")]
    NegativeExponentUnsupported,
    #[error("operands use different coordinate representations")]
    IncompatibleRepresentations,
    #[error("point is already in the requested representation")]
    AlreadyInRepresentation,
    #[error("cannot double a point that equals its own negative")]
    SelfNegationDouble,
    #[error("negative scalars are not supported")]
    NegativeScalarUnsupported,
    #[error("precomputed table does not cover this curve and point")]
    TableDomainMismatch,
    #[error("unsupported point format tag: {0:#04x}")]
    UnsupportedPointFormat(u8),
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),
}
