//! Membership predicates restricting a segment to part of its base curve.

use crate::aabb::Aabb;
use crate::float_types::Real;
use nalgebra::{Point2, Vector2};
use std::fmt::{self, Debug};
use std::sync::Arc;

/// Signature of a caller-supplied membership predicate.
pub type MaskFn = dyn Fn(Real, Real) -> bool + Send + Sync;

/// Which on-curve points belong to a segment.
///
/// Only `Custom` has no persistent form.
#[derive(Clone)]
pub enum Mask {
    /// Every point of the base curve.
    Full,
    /// Points with `normal · p <= offset`.
    HalfPlane { normal: Vector2<Real>, offset: Real },
    /// Points inside the (closed) box.
    Rectangle(Aabb),
    /// The stretch of the base curve between two endpoints; the segment's
    /// span decides membership.
    Between { start: Point2<Real>, end: Point2<Real> },
    Custom(Arc<MaskFn>),
}

impl Mask {
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(Real, Real) -> bool + Send + Sync + 'static,
    {
        Mask::Custom(Arc::new(predicate))
    }

    /// Evaluates predicates that do not depend on the segment's span.
    /// `Between` always admits here; the span narrows it.
    pub fn admits(&self, x: Real, y: Real, tol: Real) -> bool {
        match self {
            Mask::Full | Mask::Between { .. } => true,
            Mask::HalfPlane { normal, offset } => {
                let len = normal.norm();
                normal.x * x + normal.y * y <= offset + tol * len
            },
            Mask::Rectangle(bounds) => bounds.contains_point(x, y, tol),
            Mask::Custom(predicate) => predicate(x, y),
        }
    }

    pub const fn kind_name(&self) -> &'static str {
        match self {
            Mask::Full => "full",
            Mask::HalfPlane { .. } => "half_plane",
            Mask::Rectangle(_) => "rectangle",
            Mask::Between { .. } => "between",
            Mask::Custom(_) => "custom",
        }
    }
}

impl Debug for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mask::Full => write!(f, "Full"),
            Mask::HalfPlane { normal, offset } => f
                .debug_struct("HalfPlane")
                .field("normal", normal)
                .field("offset", offset)
                .finish(),
            Mask::Rectangle(bounds) => f.debug_tuple("Rectangle").field(bounds).finish(),
            Mask::Between { start, end } => f
                .debug_struct("Between")
                .field("start", start)
                .field("end", end)
                .finish(),
            Mask::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}
