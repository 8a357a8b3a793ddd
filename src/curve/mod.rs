//! Implicit curves: the zero-sets of `f(x, y)`.
//!
//! A [`Curve`] is one of a closed set of variants, all dispatched through
//! [`CurveOps`]:
//! - **Algebraic**: a [`Polynomial`] evaluated in closed form
//! - **Procedural**: an opaque numeric callback
//! - **Combinator**: a union / intersection / difference / blend of two curves
//! - **Segment**: a curve restricted to part of its zero-set
//!
//! Curves are immutable and shared as `Arc<Curve>`, so composites form a DAG
//! in which a reused sub-curve is stored once. Because children must exist
//! before their parent is built, a cycle cannot be constructed.

pub mod combinator;
pub mod polynomial;
pub mod procedural;

pub use combinator::{CombineOp, Combinator};
pub use polynomial::{Exponents, LineKind, Polynomial, PolynomialShape};
pub use procedural::Procedural;

use crate::aabb::Aabb;
use crate::errors::GeometryError;
use crate::float_types::{EPSILON, Real};
use crate::segment::Segment;
use crate::traits::CurveOps;
use nalgebra::{Point2, Vector2};
use std::sync::Arc;
use uuid::Uuid;

/// The variant payload of a [`Curve`].
#[derive(Debug, Clone)]
pub enum CurveKind {
    Algebraic(Polynomial),
    Procedural(Procedural),
    Combinator(Combinator),
    Segment(Segment),
}

/// An implicit curve with a stable identity.
///
/// The id survives persistence round trips and is what composite records use
/// to reference their children.
#[derive(Debug, Clone)]
pub struct Curve {
    id: Uuid,
    kind: CurveKind,
}

impl Curve {
    fn wrap(kind: CurveKind) -> Arc<Self> {
        Arc::new(Self {
            id: Uuid::new_v4(),
            kind,
        })
    }

    pub(crate) fn with_id(id: Uuid, kind: CurveKind) -> Arc<Self> {
        Arc::new(Self { id, kind })
    }

    pub const fn id(&self) -> Uuid {
        self.id
    }

    pub const fn kind(&self) -> &CurveKind {
        &self.kind
    }

    /// The polynomial behind an algebraic curve, looking through segments.
    pub fn polynomial(&self) -> Option<&Polynomial> {
        match &self.kind {
            CurveKind::Algebraic(p) => Some(p),
            CurveKind::Segment(s) => s.base().polynomial(),
            _ => None,
        }
    }

    /// Lower bound on `|∇f|` over the positive side, when one is known: every
    /// point with `0 < f <= t` lies within `t / slope` of the bounding box.
    /// Segments have none, since their box covers only part of the zero-set.
    pub fn exterior_slope(&self) -> Option<Real> {
        match &self.kind {
            CurveKind::Algebraic(p) => p.exterior_slope(),
            CurveKind::Combinator(c) => c.exterior_slope(),
            CurveKind::Procedural(_) | CurveKind::Segment(_) => None,
        }
    }

    /// Coefficient-level shape of an algebraic curve; `General` otherwise.
    pub fn shape(&self) -> PolynomialShape {
        self.polynomial()
            .map_or(PolynomialShape::General, Polynomial::shape)
    }

    // ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
    // Algebraic constructors
    // ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~

    /// Arbitrary polynomial from `((i, j), coefficient)` terms for `x^i · y^j`.
    pub fn polynomial_from_terms(
        terms: impl IntoIterator<Item = (Exponents, Real)>,
    ) -> Result<Arc<Self>, GeometryError> {
        Ok(Self::wrap(CurveKind::Algebraic(Polynomial::new(terms)?)))
    }

    /// The infinite line through `p0` and `p1`.
    ///
    /// Normalized so that `|f|` is the Euclidean distance to the line, with
    /// the negative side on the left of the direction `p0 → p1`.
    pub fn line_through(p0: Point2<Real>, p1: Point2<Real>) -> Result<Arc<Self>, GeometryError> {
        let d = p1 - p0;
        let len = d.norm();
        if !len.is_finite() || len <= EPSILON {
            return Err(GeometryError::InvalidExpression(format!(
                "line needs two distinct points, got ({}, {}) and ({}, {})",
                p0.x, p0.y, p1.x, p1.y
            )));
        }
        // Right-hand normal, so the left side is negative.
        let n = Vector2::new(d.y, -d.x) / len;
        let c = -n.dot(&p0.coords);
        Self::polynomial_from_terms([((1, 0), n.x), ((0, 1), n.y), ((0, 0), c)])
    }

    /// Circle scaled as `((x-cx)² + (y-cy)² - r²) / 2r`, so the gradient has
    /// unit length on the curve.
    pub fn circle(center: Point2<Real>, radius: Real) -> Result<Arc<Self>, GeometryError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(GeometryError::InvalidExpression(format!(
                "circle radius must be positive, got {radius}"
            )));
        }
        let k = 1.0 / (2.0 * radius);
        let (cx, cy) = (center.x, center.y);
        Self::polynomial_from_terms([
            ((2, 0), k),
            ((0, 2), k),
            ((1, 0), -2.0 * cx * k),
            ((0, 1), -2.0 * cy * k),
            ((0, 0), (cx * cx + cy * cy - radius * radius) * k),
        ])
    }

    /// Axis-aligned ellipse with semi-axes `a` (x) and `b` (y), scaled by
    /// `min(a, b) / 2` to keep the gradient near unit length.
    pub fn ellipse(center: Point2<Real>, a: Real, b: Real) -> Result<Arc<Self>, GeometryError> {
        if !(a.is_finite() && b.is_finite()) || a <= 0.0 || b <= 0.0 {
            return Err(GeometryError::InvalidExpression(format!(
                "ellipse semi-axes must be positive, got {a} and {b}"
            )));
        }
        let s = 0.5 * a.min(b);
        let (ka, kb) = (s / (a * a), s / (b * b));
        let (cx, cy) = (center.x, center.y);
        Self::polynomial_from_terms([
            ((2, 0), ka),
            ((0, 2), kb),
            ((1, 0), -2.0 * cx * ka),
            ((0, 1), -2.0 * cy * kb),
            ((0, 0), ka * cx * cx + kb * cy * cy - s),
        ])
    }

    // ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
    // Other variants
    // ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~

    /// Curve backed by a caller-supplied function. `bounds` of `None` means
    /// unbounded.
    pub fn procedural<F>(name: impl Into<String>, func: F, bounds: Option<Aabb>) -> Arc<Self>
    where
        F: Fn(Real, Real) -> Real + Send + Sync + 'static,
    {
        Self::wrap(CurveKind::Procedural(Procedural::new(name, func, bounds)))
    }

    /// Wraps a segment so it can take part in combinators.
    pub fn from_segment(segment: Segment) -> Arc<Self> {
        Self::wrap(CurveKind::Segment(segment))
    }

    /// `min(L, R)`
    pub fn union(left: &Arc<Self>, right: &Arc<Self>) -> Arc<Self> {
        Self::combine(left, right, CombineOp::Union, 0.0)
    }

    /// `max(L, R)`
    pub fn intersect(left: &Arc<Self>, right: &Arc<Self>) -> Arc<Self> {
        Self::combine(left, right, CombineOp::Intersect, 0.0)
    }

    /// `max(L, -R)`
    pub fn difference(left: &Arc<Self>, right: &Arc<Self>) -> Arc<Self> {
        Self::combine(left, right, CombineOp::Difference, 0.0)
    }

    /// Smooth union; `smoothing == 0` is the sharp union.
    ///
    /// ## Errors
    /// [`GeometryError::InvalidExpression`] for negative or non-finite smoothing.
    pub fn blend(
        left: &Arc<Self>,
        right: &Arc<Self>,
        smoothing: Real,
    ) -> Result<Arc<Self>, GeometryError> {
        if !smoothing.is_finite() || smoothing < 0.0 {
            return Err(GeometryError::InvalidExpression(format!(
                "blend smoothing must be a non-negative real, got {smoothing}"
            )));
        }
        Ok(Self::combine(left, right, CombineOp::Blend, smoothing))
    }

    fn combine(left: &Arc<Self>, right: &Arc<Self>, op: CombineOp, smoothing: Real) -> Arc<Self> {
        Self::wrap(CurveKind::Combinator(Combinator {
            left: Arc::clone(left),
            right: Arc::clone(right),
            op,
            smoothing,
        }))
    }
}

impl CurveOps for Curve {
    fn value(&self, x: Real, y: Real) -> Real {
        match &self.kind {
            CurveKind::Algebraic(p) => p.value(x, y),
            CurveKind::Procedural(p) => p.value(x, y),
            CurveKind::Combinator(c) => c.value(x, y),
            CurveKind::Segment(s) => s.base().value(x, y),
        }
    }

    fn gradient(&self, x: Real, y: Real) -> Vector2<Real> {
        match &self.kind {
            CurveKind::Algebraic(p) => p.gradient(x, y),
            CurveKind::Procedural(p) => p.gradient(x, y),
            CurveKind::Combinator(c) => c.gradient(x, y),
            CurveKind::Segment(s) => s.base().gradient(x, y),
        }
    }

    fn bounding_box(&self) -> Aabb {
        match &self.kind {
            CurveKind::Algebraic(p) => p.bounding_box(),
            CurveKind::Procedural(p) => p.bounds(),
            CurveKind::Combinator(c) => c.bounding_box(),
            CurveKind::Segment(s) => s.bounding_box(),
        }
    }

    /// Segments narrow "on the curve" to their masked part.
    fn on_boundary(&self, x: Real, y: Real, tol: Real) -> bool {
        match &self.kind {
            CurveKind::Segment(s) => s.contains(x, y, tol),
            _ => self.value(x, y).abs() <= tol,
        }
    }
}
