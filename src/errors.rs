//! Geometry errors

use crate::float_types::Real;
use uuid::Uuid;

/// Everything that can go wrong while building or querying implicit geometry.
///
/// All variants are raised synchronously by the offending call and depend only
/// on the input geometry, so retrying never helps.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// (InvalidExpression) A curve definition is malformed or has the wrong arity
    #[error("(InvalidExpression) {0}")]
    InvalidExpression(String),
    /// (PointNotOnCurve) A segment endpoint lies off its base curve beyond tolerance
    #[error("(PointNotOnCurve) ({x}, {y}) is not on the base curve (|f| = {residual})")]
    PointNotOnCurve { x: Real, y: Real, residual: Real },
    /// (UndefinedNormal) The gradient vanishes at the query point
    #[error("(UndefinedNormal) gradient magnitude is zero at ({x}, {y})")]
    UndefinedNormal { x: Real, y: Real },
    /// (OpenBoundary) A region was built from a boundary whose ends do not meet
    #[error("(OpenBoundary) boundary ends are {gap} apart")]
    OpenBoundary { gap: Real },
    /// (UnsupportedMask) A membership predicate has no persistent form
    #[error("(UnsupportedMask) {0}")]
    UnsupportedMask(String),
    /// (UnresolvedReference) A record references a curve the lookup table does not know
    #[error("(UnresolvedReference) no curve with id {0}")]
    UnresolvedReference(Uuid),
    /// (UnknownStrategy) No field strategy is registered under this tag
    #[error("(UnknownStrategy) no field strategy registered as '{0}'")]
    UnknownStrategy(String),
}
