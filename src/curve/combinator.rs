//! Constructive combinations of two curves.

use crate::aabb::Aabb;
use crate::curve::Curve;
use crate::float_types::{EPSILON, Real};
use crate::traits::CurveOps;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombineOp {
    /// `min(L, R)`
    Union,
    /// `max(L, R)`
    Intersect,
    /// `max(L, -R)`
    Difference,
    /// `(L + R - sqrt((L - R)² + s²)) / 2`
    Blend,
}

/// Two shared child curves folded by a [`CombineOp`].
#[derive(Debug, Clone)]
pub struct Combinator {
    pub(crate) left: Arc<Curve>,
    pub(crate) right: Arc<Curve>,
    pub(crate) op: CombineOp,
    pub(crate) smoothing: Real,
}

impl Combinator {
    pub const fn left(&self) -> &Arc<Curve> {
        &self.left
    }

    pub const fn right(&self) -> &Arc<Curve> {
        &self.right
    }

    pub const fn op(&self) -> CombineOp {
        self.op
    }

    pub const fn smoothing(&self) -> Real {
        self.smoothing
    }

    pub fn value(&self, x: Real, y: Real) -> Real {
        let l = self.left.value(x, y);
        let r = self.right.value(x, y);
        match self.op {
            CombineOp::Union => l.min(r),
            CombineOp::Intersect => l.max(r),
            CombineOp::Difference => l.max(-r),
            CombineOp::Blend => {
                let d = l - r;
                0.5 * (l + r - (d * d + self.smoothing * self.smoothing).sqrt())
            },
        }
    }

    /// Gradient of the controlling operand; the mean of both children's
    /// gradients on the tie set.
    pub fn gradient(&self, x: Real, y: Real) -> Vector2<Real> {
        let l = self.left.value(x, y);
        let r = self.right.value(x, y);
        let gl = self.left.gradient(x, y);
        let gr = self.right.gradient(x, y);

        match self.op {
            CombineOp::Union => pick(l, r, gl, gr, l < r),
            CombineOp::Intersect => pick(l, r, gl, gr, l > r),
            CombineOp::Difference => pick(l, -r, gl, -gr, l > -r),
            CombineOp::Blend => {
                let d = l - r;
                let h = (d * d + self.smoothing * self.smoothing).sqrt();
                if h <= EPSILON {
                    return (gl + gr) * 0.5;
                }
                let w = d / h;
                (gl * (1.0 - w) + gr * (1.0 + w)) * 0.5
            },
        }
    }

    pub fn bounding_box(&self) -> Aabb {
        let a = self.left.bounding_box();
        let b = self.right.bounding_box();
        match self.op {
            CombineOp::Union => a.union(&b),
            CombineOp::Intersect => a.intersection(&b),
            CombineOp::Difference => a,
            // The blend vanishes only where both operands are positive with
            // min(L, R) <= s/2, i.e. within (s/2) / slope of an operand.
            CombineOp::Blend if self.smoothing == 0.0 => a.union(&b),
            CombineOp::Blend => match self.exterior_slope() {
                Some(slope) => a.union(&b).expanded(0.5 * self.smoothing / slope),
                None => Aabb::infinite(),
            },
        }
    }

    /// Unions and blends keep the bound of their weaker operand; the other
    /// operations give none.
    pub fn exterior_slope(&self) -> Option<Real> {
        match self.op {
            CombineOp::Union | CombineOp::Blend => {
                let l = self.left.exterior_slope()?;
                let r = self.right.exterior_slope()?;
                Some(l.min(r))
            },
            CombineOp::Intersect | CombineOp::Difference => None,
        }
    }
}

#[inline]
fn pick(
    a: Real,
    b: Real,
    ga: Vector2<Real>,
    gb: Vector2<Real>,
    a_controls: bool,
) -> Vector2<Real> {
    if is_tie(a, b) {
        (ga + gb) * 0.5
    } else if a_controls {
        ga
    } else {
        gb
    }
}

#[inline]
fn is_tie(a: Real, b: Real) -> bool {
    (a - b).abs() <= EPSILON * a.abs().max(b.abs()).max(1.0)
}
