//! Polyline helpers shared by segments, regions and fields.

use crate::float_types::Real;
use nalgebra::Point2;

/// Distance from `p` to the closed segment `a`–`b`, and the clamped
/// parameter of the closest point.
#[inline]
pub fn point_segment_distance(p: &Point2<Real>, a: &Point2<Real>, b: &Point2<Real>) -> (Real, Real) {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 == 0.0 {
        return ((p - a).norm(), 0.0);
    }
    let t = ((p - a).dot(&ab) / len2).clamp(0.0, 1.0);
    let closest = a + ab * t;
    ((p - closest).norm(), t)
}

/// Distance from `p` to an open polyline; infinite for an empty one.
pub fn polyline_distance(p: &Point2<Real>, points: &[Point2<Real>]) -> Real {
    match points {
        [] => Real::INFINITY,
        [only] => (p - only).norm(),
        _ => points
            .windows(2)
            .map(|w| point_segment_distance(p, &w[0], &w[1]).0)
            .fold(Real::INFINITY, Real::min),
    }
}

/// Total length of a polyline.
pub fn polyline_length(points: &[Point2<Real>]) -> Real {
    points.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
}

/// Appends `next` to `ring`, dropping its first vertex when it duplicates the
/// current last vertex within `tol`.
pub fn append_chained(ring: &mut Vec<Point2<Real>>, next: &[Point2<Real>], tol: Real) {
    let skip = match (ring.last(), next.first()) {
        (Some(last), Some(first)) if (last - first).norm() <= tol => 1,
        _ => 0,
    };
    ring.extend_from_slice(&next[skip.min(next.len())..]);
}
