use crate::aabb::Aabb;
use crate::errors::GeometryError;
use crate::float_types::{EPSILON, Real};
use nalgebra::{Point2, Unit, Vector2};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The contract every curve variant satisfies.
///
/// Sign convention: `value < 0` is interior, `value > 0` exterior and `value == 0`
/// on the curve. `value` is pure and total: it never panics on finite input,
/// but may return NaN or ±∞ at the edge of a variant's domain.
pub trait CurveOps: Send + Sync {
    /// f(x, y)
    fn value(&self, x: Real, y: Real) -> Real;

    /// (∂f/∂x, ∂f/∂y)
    fn gradient(&self, x: Real, y: Real) -> Vector2<Real>;

    /// Conservative axis-aligned extent of the zero-set.
    fn bounding_box(&self) -> Aabb;

    /// Batched evaluation; element `i` of the result is `value(points[i])`.
    #[cfg(not(feature = "parallel"))]
    fn evaluate(&self, points: &[Point2<Real>]) -> Vec<Real> {
        points.iter().map(|p| self.value(p.x, p.y)).collect()
    }

    /// Batched evaluation; element `i` of the result is `value(points[i])`.
    #[cfg(feature = "parallel")]
    fn evaluate(&self, points: &[Point2<Real>]) -> Vec<Real> {
        points.par_iter().map(|p| self.value(p.x, p.y)).collect()
    }

    /// Unit outward normal, i.e. the normalized gradient.
    ///
    /// ## Errors
    /// [`GeometryError::UndefinedNormal`] where the gradient magnitude is ≈ 0.
    fn normal(&self, x: Real, y: Real) -> Result<Unit<Vector2<Real>>, GeometryError> {
        let g = self.gradient(x, y);
        let norm = g.norm();
        if !norm.is_finite() || norm <= EPSILON {
            return Err(GeometryError::UndefinedNormal { x, y });
        }
        Ok(Unit::new_unchecked(g / norm))
    }

    /// `|f(x, y)| <= tol`
    fn on_boundary(&self, x: Real, y: Real, tol: Real) -> bool {
        self.value(x, y).abs() <= tol
    }

    /// Unit tangent with the interior on its left, `(-∂f/∂y, ∂f/∂x)` normalized.
    fn tangent(&self, x: Real, y: Real) -> Option<Vector2<Real>> {
        let g = self.gradient(x, y);
        let norm = g.norm();
        if !norm.is_finite() || norm <= EPSILON {
            return None;
        }
        Some(Vector2::new(-g.y, g.x) / norm)
    }
}
