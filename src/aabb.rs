use crate::float_types::Real;
use nalgebra::Point2;

/// Axis-aligned bounding box in the plane.
///
/// Sides may be infinite: unbounded curves report `±∞` on the unbounded axis so
/// that external spatial indexes stay conservative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub mins: Point2<Real>,
    pub maxs: Point2<Real>,
}

impl Aabb {
    #[inline]
    pub const fn new(mins: Point2<Real>, maxs: Point2<Real>) -> Self {
        Self { mins, maxs }
    }

    /// The whole plane.
    pub const fn infinite() -> Self {
        Self {
            mins: Point2::new(Real::NEG_INFINITY, Real::NEG_INFINITY),
            maxs: Point2::new(Real::INFINITY, Real::INFINITY),
        }
    }

    /// The empty box; the identity for [`Aabb::union`].
    pub const fn empty() -> Self {
        Self {
            mins: Point2::new(Real::INFINITY, Real::INFINITY),
            maxs: Point2::new(Real::NEG_INFINITY, Real::NEG_INFINITY),
        }
    }

    /// Smallest box containing every point.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point2<Real>>) -> Self {
        points.into_iter().fold(Self::empty(), |acc, p| acc.including(p))
    }

    #[inline]
    pub fn including(&self, p: &Point2<Real>) -> Self {
        Self {
            mins: Point2::new(self.mins.x.min(p.x), self.mins.y.min(p.y)),
            maxs: Point2::new(self.maxs.x.max(p.x), self.maxs.y.max(p.y)),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mins.x > self.maxs.x || self.mins.y > self.maxs.y
    }

    #[inline]
    pub fn is_bounded(&self) -> bool {
        !self.is_empty()
            && self.mins.x.is_finite()
            && self.mins.y.is_finite()
            && self.maxs.x.is_finite()
            && self.maxs.y.is_finite()
    }

    pub fn union(&self, other: &Self) -> Self {
        Self {
            mins: Point2::new(self.mins.x.min(other.mins.x), self.mins.y.min(other.mins.y)),
            maxs: Point2::new(self.maxs.x.max(other.maxs.x), self.maxs.y.max(other.maxs.y)),
        }
    }

    pub fn intersection(&self, other: &Self) -> Self {
        Self {
            mins: Point2::new(self.mins.x.max(other.mins.x), self.mins.y.max(other.mins.y)),
            maxs: Point2::new(self.maxs.x.min(other.maxs.x), self.maxs.y.min(other.maxs.y)),
        }
    }

    /// Grows every side by `margin`.
    pub fn expanded(&self, margin: Real) -> Self {
        if self.is_empty() {
            return *self;
        }
        Self {
            mins: Point2::new(self.mins.x - margin, self.mins.y - margin),
            maxs: Point2::new(self.maxs.x + margin, self.maxs.y + margin),
        }
    }

    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.maxs.x >= other.mins.x
            && self.mins.x <= other.maxs.x
            && self.maxs.y >= other.mins.y
            && self.mins.y <= other.maxs.y
    }

    /// Closed containment test, widened by `tol` on every side.
    #[inline]
    pub fn contains_point(&self, x: Real, y: Real, tol: Real) -> bool {
        x >= self.mins.x - tol
            && x <= self.maxs.x + tol
            && y >= self.mins.y - tol
            && y <= self.maxs.y + tol
    }

    #[inline]
    pub fn width(&self) -> Real {
        self.maxs.x - self.mins.x
    }

    #[inline]
    pub fn height(&self) -> Real {
        self.maxs.y - self.mins.y
    }

    #[inline]
    pub fn center(&self) -> Point2<Real> {
        Point2::new(
            (self.mins.x + self.maxs.x) * 0.5,
            (self.mins.y + self.maxs.y) * 0.5,
        )
    }

    /// Length of the diagonal; infinite for unbounded boxes, zero when empty.
    pub fn diagonal(&self) -> Real {
        if self.is_empty() {
            return 0.0;
        }
        self.width().hypot(self.height())
    }
}
