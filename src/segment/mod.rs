//! A curve restricted to part of its zero-set.
//!
//! A [`Segment`] shares its base curve and adds a membership [`Mask`]. It never
//! redefines the base's field: `value` is the base's `value` everywhere.
//!
//! Every segment also carries its [`Span`], the covered stretch of the base in
//! traversal order, and the polyline derived from it. Polylines always come from
//! the span's own parameterization (or a monotone arclength march), never from
//! re-ordering scattered samples.

pub mod mask;
pub mod span;

pub use mask::{Mask, MaskFn};
pub use span::Span;

use crate::aabb::Aabb;
use crate::config::SamplingConfig;
use crate::curve::{Curve, LineKind, PolynomialShape};
use crate::errors::GeometryError;
use crate::float_types::{Real, TAU};
use crate::math::march::{Direction, Marcher, Trace, TraceOutcome, project};
use crate::math::polyline::polyline_length;
use crate::traits::CurveOps;
use nalgebra::{Point2, Vector2};
use span::{conic_param, conic_point};
use std::sync::Arc;

const MEMBERSHIP_NEWTON_ITERATIONS: usize = 16;

#[derive(Debug, Clone)]
pub struct Segment {
    base: Arc<Curve>,
    mask: Mask,
    span: Span,
    samples: usize,
    path: Arc<[Point2<Real>]>,
}

impl Segment {
    fn assemble(base: &Arc<Curve>, mask: Mask, span: Span, samples: usize) -> Self {
        let path: Arc<[Point2<Real>]> = span.polyline(samples).into();
        Self {
            base: Arc::clone(base),
            mask,
            span,
            samples,
            path,
        }
    }

    /// Rebuilds a segment from stored parts without re-tracing its base.
    pub(crate) fn from_parts(base: &Arc<Curve>, mask: Mask, span: Span, samples: usize) -> Self {
        Self::assemble(base, mask, span, samples)
    }

    // ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
    // Constructors
    // ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~

    /// Straight segment from `p0` to `p1` on a fresh line base.
    pub fn line(p0: Point2<Real>, p1: Point2<Real>) -> Result<Self, GeometryError> {
        let base = Curve::line_through(p0, p1)?;
        Self::between(&base, p0, p1)
    }

    /// The part of `base` connecting `p0` to `p1`, with default sampling.
    pub fn between(
        base: &Arc<Curve>,
        p0: Point2<Real>,
        p1: Point2<Real>,
    ) -> Result<Self, GeometryError> {
        Self::between_with(base, p0, p1, &SamplingConfig::default())
    }

    /// The part of `base` connecting `p0` to `p1`.
    ///
    /// Lines use the parametric interval between the endpoints. On closed
    /// conics and traced curves the shorter arc wins; arcs of equal length
    /// (within tolerance for conics, within one march step when traced) resolve
    /// to the counterclockwise one.
    ///
    /// ## Errors
    /// - [`GeometryError::PointNotOnCurve`] when an endpoint is off `base`, or
    ///   `p1` cannot be reached from `p0` along the curve
    /// - [`GeometryError::InvalidExpression`] when the endpoints coincide
    pub fn between_with(
        base: &Arc<Curve>,
        p0: Point2<Real>,
        p1: Point2<Real>,
        config: &SamplingConfig,
    ) -> Result<Self, GeometryError> {
        let tol = config.tolerance;
        check_on_curve(base, &p0, tol)?;
        check_on_curve(base, &p1, tol)?;
        if (p1 - p0).norm() <= tol {
            return Err(GeometryError::InvalidExpression(format!(
                "segment endpoints coincide at ({}, {}); use Segment::closed_loop",
                p0.x, p0.y
            )));
        }

        let mask = Mask::Between { start: p0, end: p1 };
        let span = match base.shape() {
            PolynomialShape::Line { .. } => Span::Linear { start: p0, end: p1 },
            PolynomialShape::Circle { center, radius } => {
                conic_between(center, Vector2::new(radius, radius), p0, p1, config)
            },
            PolynomialShape::Ellipse { center, semi_axes } => {
                conic_between(center, semi_axes, p0, p1, config)
            },
            PolynomialShape::General => traced_between(base, p0, p1, config)?,
        };
        Ok(Self::assemble(base, mask, span, config.segment_samples))
    }

    /// The whole of a closed `base`, starting and ending at `start`.
    pub fn closed_loop(base: &Arc<Curve>, start: Point2<Real>) -> Result<Self, GeometryError> {
        Self::closed_loop_with(base, start, &SamplingConfig::default())
    }

    /// ## Errors
    /// - [`GeometryError::PointNotOnCurve`] when `start` is off `base`
    /// - [`GeometryError::InvalidExpression`] when the curve through `start`
    ///   does not close up
    pub fn closed_loop_with(
        base: &Arc<Curve>,
        start: Point2<Real>,
        config: &SamplingConfig,
    ) -> Result<Self, GeometryError> {
        check_on_curve(base, &start, config.tolerance)?;
        let span = match base.shape() {
            PolynomialShape::Circle { center, radius } => {
                full_conic(center, Vector2::new(radius, radius), start)
            },
            PolynomialShape::Ellipse { center, semi_axes } => full_conic(center, semi_axes, start),
            PolynomialShape::Line { .. } => {
                return Err(GeometryError::InvalidExpression(
                    "a line never closes into a loop".into(),
                ));
            },
            PolynomialShape::General => {
                let marcher = Marcher::new(base.as_ref(), config, base.bounding_box().diagonal());
                let trace = marcher.walk(start, Direction::Forward, None, &|_| true);
                if trace.outcome != TraceOutcome::Closed {
                    log::warn!(
                        "trace from ({}, {}) ended with {:?} after {} points",
                        start.x,
                        start.y,
                        trace.outcome,
                        trace.points.len()
                    );
                    return Err(GeometryError::InvalidExpression(format!(
                        "curve through ({}, {}) does not close",
                        start.x, start.y
                    )));
                }
                traced(trace, marcher.step())
            },
        };
        Ok(Self::assemble(base, Mask::Full, span, config.segment_samples))
    }

    /// The whole of a circle or ellipse, starting at its rightmost point.
    pub fn full(base: &Arc<Curve>) -> Result<Self, GeometryError> {
        Self::full_with(base, &SamplingConfig::default())
    }

    pub fn full_with(base: &Arc<Curve>, config: &SamplingConfig) -> Result<Self, GeometryError> {
        let start = match base.shape() {
            PolynomialShape::Circle { center, radius } => center + Vector2::new(radius, 0.0),
            PolynomialShape::Ellipse { center, semi_axes } => center + Vector2::new(semi_axes.x, 0.0),
            _ => {
                return Err(GeometryError::InvalidExpression(
                    "full loop needs a circle or ellipse; use closed_loop with a start point".into(),
                ));
            },
        };
        Self::closed_loop_with(base, start, config)
    }

    /// The part of `base` admitted by `mask`, traced from `start` to `end`.
    ///
    /// The walk follows whichever direction stays inside the mask; if both
    /// reach `end`, the shorter walk wins.
    pub fn with_mask(
        base: &Arc<Curve>,
        mask: Mask,
        start: Point2<Real>,
        end: Point2<Real>,
    ) -> Result<Self, GeometryError> {
        Self::with_mask_with(base, mask, start, end, &SamplingConfig::default())
    }

    pub fn with_mask_with(
        base: &Arc<Curve>,
        mask: Mask,
        start: Point2<Real>,
        end: Point2<Real>,
        config: &SamplingConfig,
    ) -> Result<Self, GeometryError> {
        match mask {
            Mask::Between { start: p0, end: p1 } => return Self::between_with(base, p0, p1, config),
            Mask::Full => return Self::closed_loop_with(base, start, config),
            _ => {},
        }
        let tol = config.tolerance;
        check_on_curve(base, &start, tol)?;
        check_on_curve(base, &end, tol)?;
        for p in [&start, &end] {
            if !mask.admits(p.x, p.y, tol) {
                return Err(GeometryError::InvalidExpression(format!(
                    "{} mask rejects endpoint ({}, {})",
                    mask.kind_name(),
                    p.x,
                    p.y
                )));
            }
        }

        let extent = mask_extent(&mask, base, &start, &end);
        let marcher = Marcher::new(base.as_ref(), config, extent);
        let admits = |p: &Point2<Real>| mask.admits(p.x, p.y, tol);
        let span = shorter_trace(&marcher, start, end, &admits)
            .map(|trace| traced(trace, marcher.step()))
            .ok_or_else(|| not_reachable(base, &end))?;
        Ok(Self::assemble(base, mask, span, config.segment_samples))
    }

    // ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
    // Queries
    // ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~

    pub const fn base(&self) -> &Arc<Curve> {
        &self.base
    }

    pub const fn mask(&self) -> &Mask {
        &self.mask
    }

    pub const fn span(&self) -> &Span {
        &self.span
    }

    /// Polyline resolution per full turn the segment was built with.
    pub const fn samples(&self) -> usize {
        self.samples
    }

    pub fn start(&self) -> Point2<Real> {
        self.span.start()
    }

    pub fn end(&self) -> Point2<Real> {
        self.span.end()
    }

    /// `f` of the base curve, unchanged.
    pub fn value(&self, x: Real, y: Real) -> Real {
        self.base.value(x, y)
    }

    /// Within distance `tol` of the base curve, and admitted by the membership
    /// predicate.
    ///
    /// Distance is measured to the Newton projection of the point onto the
    /// base, so curves whose gradient is far from unit length are held to the
    /// same distance as normalized ones.
    pub fn contains(&self, x: Real, y: Real, tol: Real) -> bool {
        let p = Point2::new(x, y);
        let f = self.base.value(x, y);
        // First-order distance |f| / |∇f| rules out far points cheaply.
        if !f.is_finite() || f.abs() > 2.0 * tol * self.base.gradient(x, y).norm() {
            return false;
        }
        let projected = project(self.base.as_ref(), p, MEMBERSHIP_NEWTON_ITERATIONS, tol);
        if !projected.is_some_and(|q| (q - p).norm() <= tol) {
            return false;
        }
        match &self.mask {
            Mask::Between { .. } => self.span.admits(&p, tol),
            mask => mask.admits(x, y, tol),
        }
    }

    /// Ordered vertices from start to end.
    pub fn polyline(&self) -> &[Point2<Real>] {
        &self.path
    }

    /// Ordered vertices at `samples` per full turn, re-derived from the span's
    /// parameterization. Traced spans keep their stored path.
    pub fn polyline_with(&self, samples: usize) -> Vec<Point2<Real>> {
        if samples == self.samples {
            return self.path.to_vec();
        }
        self.span.polyline(samples)
    }

    pub fn length(&self) -> Real {
        polyline_length(&self.path)
    }

    /// Distance from `(x, y)` to the covered stretch of the base curve.
    pub fn distance(&self, x: Real, y: Real) -> Real {
        self.span.distance(&Point2::new(x, y), &self.path)
    }

    pub fn bounding_box(&self) -> Aabb {
        self.span.bounding_box(&self.path)
    }

    /// Axis alignment of a straight segment, read from the base polynomial's
    /// coefficients; `None` for anything but a line span.
    pub fn line_kind(&self) -> Option<LineKind> {
        match (&self.span, self.base.shape()) {
            (Span::Linear { .. }, PolynomialShape::Line { kind, .. }) => Some(kind),
            _ => None,
        }
    }

    /// `(a, b, c)` of the base line `a·x + b·y + c = 0` for a straight segment.
    pub fn line_coefficients(&self) -> Option<(Real, Real, Real)> {
        match (&self.span, self.base.shape()) {
            (Span::Linear { .. }, PolynomialShape::Line { a, b, c, .. }) => Some((a, b, c)),
            _ => None,
        }
    }
}

fn check_on_curve(base: &Curve, p: &Point2<Real>, tol: Real) -> Result<(), GeometryError> {
    if base.on_boundary(p.x, p.y, tol) {
        Ok(())
    } else {
        Err(GeometryError::PointNotOnCurve {
            x: p.x,
            y: p.y,
            residual: base.value(p.x, p.y),
        })
    }
}

fn not_reachable(base: &Curve, p: &Point2<Real>) -> GeometryError {
    log::warn!("({}, {}) is not reachable along the base curve", p.x, p.y);
    GeometryError::PointNotOnCurve {
        x: p.x,
        y: p.y,
        residual: base.value(p.x, p.y),
    }
}

fn full_conic(center: Point2<Real>, semi_axes: Vector2<Real>, start: Point2<Real>) -> Span {
    Span::Conic {
        center,
        semi_axes,
        start_param: conic_param(&center, &semi_axes, &start),
        sweep: TAU,
        start,
        end: start,
    }
}

fn conic_between(
    center: Point2<Real>,
    semi_axes: Vector2<Real>,
    p0: Point2<Real>,
    p1: Point2<Real>,
    config: &SamplingConfig,
) -> Span {
    let t0 = conic_param(&center, &semi_axes, &p0);
    let t1 = conic_param(&center, &semi_axes, &p1);
    let ccw = (t1 - t0).rem_euclid(TAU);
    let cw = ccw - TAU;

    let arc_length = |sweep: Real| {
        if semi_axes.x == semi_axes.y {
            sweep.abs() * semi_axes.x
        } else {
            let n = ((config.segment_samples.max(8) as Real) * sweep.abs() / TAU).ceil().max(2.0) as usize;
            let points: Vec<_> = (0..=n)
                .map(|i| conic_point(&center, &semi_axes, t0 + sweep * (i as Real) / (n as Real)))
                .collect();
            polyline_length(&points)
        }
    };
    let (ccw_len, cw_len) = (arc_length(ccw), arc_length(cw));
    let sweep = if ccw_len <= cw_len + config.tolerance { ccw } else { cw };
    log::trace!("conic arc lengths ccw={ccw_len} cw={cw_len}, sweep {sweep}");

    Span::Conic {
        center,
        semi_axes,
        start_param: t0,
        sweep,
        start: p0,
        end: p1,
    }
}

fn traced_between(
    base: &Arc<Curve>,
    p0: Point2<Real>,
    p1: Point2<Real>,
    config: &SamplingConfig,
) -> Result<Span, GeometryError> {
    let bounds = base.bounding_box();
    let extent = if bounds.is_bounded() {
        bounds.diagonal()
    } else {
        (p1 - p0).norm()
    };
    let marcher = Marcher::new(base.as_ref(), config, extent);
    shorter_trace(&marcher, p0, p1, &|_| true)
        .map(|trace| traced(trace, marcher.step()))
        .ok_or_else(|| not_reachable(base, &p1))
}

/// Walks both ways from `start` towards `end`. The shorter successful walk
/// wins; lengths within one step of each other go to the forward walk.
fn shorter_trace<C: CurveOps + ?Sized>(
    marcher: &Marcher<'_, C>,
    start: Point2<Real>,
    end: Point2<Real>,
    admits: &dyn Fn(&Point2<Real>) -> bool,
) -> Option<Trace> {
    let reached = |direction| {
        let trace = marcher.walk(start, direction, Some(&end), admits);
        (trace.outcome == TraceOutcome::ReachedTarget).then_some(trace)
    };
    match (reached(Direction::Forward), reached(Direction::Backward)) {
        (Some(forward), Some(backward)) => {
            log::debug!(
                "traced arc lengths forward={} backward={}",
                forward.length,
                backward.length
            );
            if forward.length <= backward.length + marcher.step() {
                Some(forward)
            } else {
                Some(backward)
            }
        },
        (forward, backward) => forward.or(backward),
    }
}

fn traced(trace: Trace, step: Real) -> Span {
    Span::Traced {
        path: trace.points.into(),
        proximity: step,
    }
}

/// Length scale for tracing a masked part of `base`.
fn mask_extent(mask: &Mask, base: &Curve, start: &Point2<Real>, end: &Point2<Real>) -> Real {
    let bounds = match mask {
        Mask::Rectangle(b) => b.intersection(&base.bounding_box()),
        _ => base.bounding_box(),
    };
    if bounds.is_bounded() {
        bounds.diagonal()
    } else {
        (end - start).norm()
    }
}
