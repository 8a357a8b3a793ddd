//! Curves given by an opaque numeric callback.

use crate::aabb::Aabb;
use crate::float_types::Real;
use nalgebra::Vector2;
use std::fmt::{self, Debug};
use std::sync::Arc;

/// Signature of a user-supplied implicit function.
pub type CurveFn = dyn Fn(Real, Real) -> Real + Send + Sync;

/// A curve whose `f(x, y)` is a caller-supplied closure.
///
/// The gradient is a central finite difference. Bounds are whatever the caller
/// promises; without them the curve is treated as unbounded.
#[derive(Clone)]
pub struct Procedural {
    name: String,
    func: Arc<CurveFn>,
    bounds: Aabb,
    placeholder: bool,
}

impl Procedural {
    pub fn new<F>(name: impl Into<String>, func: F, bounds: Option<Aabb>) -> Self
    where
        F: Fn(Real, Real) -> Real + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
            bounds: bounds.unwrap_or_else(Aabb::infinite),
            placeholder: false,
        }
    }

    /// Stand-in produced when a persisted procedural curve cannot be resolved;
    /// evaluates to NaN everywhere.
    pub(crate) fn placeholder(name: impl Into<String>, bounds: Aabb) -> Self {
        Self {
            name: name.into(),
            func: Arc::new(|_, _| Real::NAN),
            bounds,
            placeholder: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// True when this curve lost its callback in a persistence round trip.
    pub const fn is_placeholder(&self) -> bool {
        self.placeholder
    }

    #[inline]
    pub fn value(&self, x: Real, y: Real) -> Real {
        (self.func)(x, y)
    }

    pub fn gradient(&self, x: Real, y: Real) -> Vector2<Real> {
        let hx = step(x);
        let hy = step(y);
        let gx = (self.value(x + hx, y) - self.value(x - hx, y)) / (2.0 * hx);
        let gy = (self.value(x, y + hy) - self.value(x, y - hy)) / (2.0 * hy);
        Vector2::new(gx, gy)
    }
}

/// Central-difference step: cube root of machine epsilon, scaled to |t|.
#[inline]
fn step(t: Real) -> Real {
    Real::EPSILON.cbrt() * t.abs().max(1.0)
}

impl Debug for Procedural {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Procedural")
            .field("name", &self.name)
            .field("bounds", &self.bounds)
            .field("placeholder", &self.placeholder)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_difference_gradient_matches_closed_form() {
        let p = Procedural::new("paraboloid", |x, y| x * x + 3.0 * y * y - 1.0, None);
        let g = p.gradient(0.5, -0.25);
        assert!((g.x - 1.0).abs() < 1e-6);
        assert!((g.y + 1.5).abs() < 1e-6);
        assert!(!p.bounds().is_bounded());
    }

    #[test]
    fn placeholder_is_nan() {
        let p = Procedural::placeholder("lost", Aabb::infinite());
        assert!(p.value(0.0, 0.0).is_nan());
        assert!(p.is_placeholder());
    }
}
