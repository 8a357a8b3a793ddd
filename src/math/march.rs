//! Predictor/corrector tracing along the zero-set of a curve.
//!
//! Each step moves `step` along the unit tangent and projects back onto the
//! curve with Newton iterations. Points are produced in arclength order, so a
//! traced polyline never needs re-sorting.

use crate::config::SamplingConfig;
use crate::float_types::{EPSILON, Real};
use crate::math::polyline::point_segment_distance;
use crate::traits::CurveOps;
use nalgebra::{Point2, Vector2};

/// Which way to walk along a curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Along `(-∂f/∂y, ∂f/∂x)`: counterclockwise around a negative interior.
    Forward,
    Backward,
}

impl Direction {
    #[inline]
    const fn sign(self) -> Real {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }
}

/// Why a walk stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceOutcome {
    /// The requested target was reached; it is the last point.
    ReachedTarget,
    /// The walk came back to its start; the start is repeated as last point.
    Closed,
    /// The next point failed the membership predicate.
    LeftMask,
    /// Vanishing gradient or failed projection.
    Stalled,
    StepLimit,
}

#[derive(Debug, Clone)]
pub struct Trace {
    pub points: Vec<Point2<Real>>,
    pub length: Real,
    pub outcome: TraceOutcome,
}

impl Trace {
    fn finish(points: Vec<Point2<Real>>, length: Real, outcome: TraceOutcome) -> Self {
        Self {
            points,
            length,
            outcome,
        }
    }
}

/// Newton projection of `p` onto the zero-set of `curve`, stepping along the
/// gradient. `None` where the gradient vanishes or the result stays more than
/// `tolerance` off the curve in value.
pub fn project<C: CurveOps + ?Sized>(
    curve: &C,
    p: Point2<Real>,
    iterations: usize,
    tolerance: Real,
) -> Option<Point2<Real>> {
    let mut q = p;
    for _ in 0..iterations {
        let f = curve.value(q.x, q.y);
        if !f.is_finite() {
            return None;
        }
        if f.abs() <= tolerance * 1e-3 {
            return Some(q);
        }
        let g = curve.gradient(q.x, q.y);
        let n2 = g.norm_squared();
        if !n2.is_finite() || n2 <= EPSILON {
            return None;
        }
        q -= g * (f / n2);
    }
    (curve.value(q.x, q.y).abs() <= tolerance).then_some(q)
}

pub struct Marcher<'a, C: CurveOps + ?Sized> {
    curve: &'a C,
    step: Real,
    capture: Real,
    tolerance: Real,
    max_steps: usize,
    newton_iterations: usize,
}

impl<'a, C: CurveOps + ?Sized> Marcher<'a, C> {
    /// `extent` is the length scale of the part of the curve to be traced;
    /// the march step is derived from it and `config`.
    pub fn new(curve: &'a C, config: &SamplingConfig, extent: Real) -> Self {
        let step = config.step_for_extent(extent);
        Self {
            curve,
            step,
            capture: (0.5 * step).max(config.tolerance),
            tolerance: config.tolerance,
            max_steps: config.max_march_steps,
            newton_iterations: config.newton_iterations,
        }
    }

    pub const fn step(&self) -> Real {
        self.step
    }

    /// Newton projection of `p` onto the zero-set.
    pub fn project(&self, p: Point2<Real>) -> Option<Point2<Real>> {
        project(self.curve, p, self.newton_iterations, self.tolerance)
    }

    /// Walks from `start` until `target` is passed, the curve closes, `admits`
    /// rejects a point, or the step budget runs out.
    pub fn walk(
        &self,
        start: Point2<Real>,
        direction: Direction,
        target: Option<&Point2<Real>>,
        admits: &dyn Fn(&Point2<Real>) -> bool,
    ) -> Trace {
        let sign = direction.sign();
        let mut points = vec![start];
        let mut length = 0.0;
        let mut p = start;
        let mut heading: Option<Vector2<Real>> = None;

        for _ in 0..self.max_steps {
            let Some(tangent) = self.curve.tangent(p.x, p.y) else {
                log::trace!("march stalled at ({}, {}): vanishing gradient", p.x, p.y);
                return Trace::finish(points, length, TraceOutcome::Stalled);
            };
            let mut t = tangent * sign;
            if let Some(h) = heading {
                if t.dot(&h) < 0.0 {
                    t = -t;
                }
            }

            let Some(next) = self.project(p + t * self.step) else {
                log::trace!("march stalled at ({}, {}): projection failed", p.x, p.y);
                return Trace::finish(points, length, TraceOutcome::Stalled);
            };
            let chord = next - p;
            let advance = chord.norm();
            if advance <= 0.5 * self.tolerance {
                return Trace::finish(points, length, TraceOutcome::Stalled);
            }

            if let Some(target) = target {
                if self.passes(&p, &next, target) {
                    length += (target - p).norm();
                    points.push(*target);
                    return Trace::finish(points, length, TraceOutcome::ReachedTarget);
                }
            }
            if length > 2.0 * self.step && self.passes(&p, &next, &start) {
                length += (start - p).norm();
                points.push(start);
                return Trace::finish(points, length, TraceOutcome::Closed);
            }
            if !admits(&next) {
                return Trace::finish(points, length, TraceOutcome::LeftMask);
            }

            length += advance;
            points.push(next);
            heading = Some(chord / advance);
            p = next;
        }

        Trace::finish(points, length, TraceOutcome::StepLimit)
    }

    /// Whether the chord `p → next` runs past `q` in the direction of travel.
    fn passes(&self, p: &Point2<Real>, next: &Point2<Real>, q: &Point2<Real>) -> bool {
        let ahead = (q - p).dot(&(next - p)) > 0.0;
        ahead && point_segment_distance(q, p, next).0 <= self.capture
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::Curve;
    use crate::float_types::{PI, TAU};

    #[test]
    fn unit_circle_closes_counterclockwise() {
        let circle = Curve::circle(Point2::origin(), 1.0).unwrap();
        let marcher = Marcher::new(circle.as_ref(), &SamplingConfig::default(), 2.0);
        let trace = marcher.walk(Point2::new(1.0, 0.0), Direction::Forward, None, &|_| true);
        assert_eq!(trace.outcome, TraceOutcome::Closed);
        assert!((trace.length - TAU).abs() < 1e-3);
        // First step goes up: counterclockwise.
        assert!(trace.points[1].y > 0.0);
    }

    #[test]
    fn walk_stops_at_target() {
        let circle = Curve::circle(Point2::origin(), 1.0).unwrap();
        let marcher = Marcher::new(circle.as_ref(), &SamplingConfig::default(), 2.0);
        let target = Point2::new(0.0, 1.0);
        let forward = marcher.walk(Point2::new(1.0, 0.0), Direction::Forward, Some(&target), &|_| true);
        let backward = marcher.walk(Point2::new(1.0, 0.0), Direction::Backward, Some(&target), &|_| true);
        assert_eq!(forward.outcome, TraceOutcome::ReachedTarget);
        assert_eq!(backward.outcome, TraceOutcome::ReachedTarget);
        assert!((forward.length - PI / 2.0).abs() < 1e-3);
        assert!((backward.length - 1.5 * PI).abs() < 1e-3);
        assert_eq!(forward.points.last(), Some(&target));
    }

    #[test]
    fn projection_fails_at_singular_point() {
        // f = x^2 + y^2 has a vanishing gradient at its only zero.
        let point_curve = Curve::polynomial_from_terms([((2, 0), 1.0), ((0, 2), 1.0)]).unwrap();
        let marcher = Marcher::new(point_curve.as_ref(), &SamplingConfig::default(), 1.0);
        let trace = marcher.walk(Point2::origin(), Direction::Forward, None, &|_| true);
        assert_eq!(trace.outcome, TraceOutcome::Stalled);
    }
}
