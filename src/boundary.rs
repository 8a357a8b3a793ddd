//! Ordered chains of segments.

use crate::aabb::Aabb;
use crate::config::SamplingConfig;
use crate::curve::{Curve, LineKind};
use crate::errors::GeometryError;
use crate::float_types::{Real, tolerance};
use crate::math::polyline::append_chained;
use crate::segment::{Segment, Span};
use nalgebra::Point2;
use std::sync::Arc;

/// Shape metadata recognized at construction, used by regions to skip sampling.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryShape {
    /// Four axis-aligned edges.
    Rectangle(Aabb),
    /// Straight edges through these vertices, in traversal order (not repeated
    /// at the end).
    Polygon(Vec<Point2<Real>>),
    /// One full circle.
    Circle { center: Point2<Real>, radius: Real },
}

/// An ordered chain of segments, possibly closed.
///
/// Each segment is expected to end where the next begins; this is not
/// enforced here. A boundary has no inside or outside of its own; that is a
/// [`Region`](crate::region::Region)'s business.
#[derive(Debug, Clone)]
pub struct Boundary {
    segments: Vec<Segment>,
    shape: Option<BoundaryShape>,
}

impl Boundary {
    /// Chains `segments` in order and detects known shapes, with joints
    /// matched within the global [`tolerance`].
    pub fn new(segments: Vec<Segment>) -> Self {
        Self::with_tolerance(segments, tolerance())
    }

    /// [`Boundary::new`] with joints matched within `tol`.
    pub fn with_tolerance(segments: Vec<Segment>, tol: Real) -> Self {
        let shape = detect_shape(&segments, tol);
        if let Some(shape) = &shape {
            log::trace!("boundary of {} segments recognized as {:?}", segments.len(), shape);
        }
        Self { segments, shape }
    }

    /// Counterclockwise rectangle spanning `min`–`max`.
    pub fn rectangle(min: Point2<Real>, max: Point2<Real>) -> Result<Self, GeometryError> {
        if !(min.x < max.x && min.y < max.y) {
            return Err(GeometryError::InvalidExpression(format!(
                "rectangle corners must satisfy min < max, got ({}, {}) and ({}, {})",
                min.x, min.y, max.x, max.y
            )));
        }
        Self::polygon(&[
            min,
            Point2::new(max.x, min.y),
            max,
            Point2::new(min.x, max.y),
        ])
    }

    /// Closed polygon through `points`; a repeated closing vertex is ignored.
    pub fn polygon(points: &[Point2<Real>]) -> Result<Self, GeometryError> {
        let mut vertices = points.to_vec();
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        if vertices.len() < 3 {
            return Err(GeometryError::InvalidExpression(format!(
                "polygon needs at least 3 distinct vertices, got {}",
                vertices.len()
            )));
        }
        let segments = vertices
            .iter()
            .zip(vertices.iter().cycle().skip(1))
            .map(|(a, b)| Segment::line(*a, *b))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(segments))
    }

    /// One full circle, starting at its rightmost point.
    pub fn circle(center: Point2<Real>, radius: Real) -> Result<Self, GeometryError> {
        let base = Curve::circle(center, radius)?;
        Ok(Self::new(vec![Segment::full(&base)?]))
    }

    /// One full circle or ellipse sampled with `config`.
    pub fn conic_loop(base: &Arc<Curve>, config: &SamplingConfig) -> Result<Self, GeometryError> {
        Ok(Self::new(vec![Segment::full_with(base, config)?]))
    }

    /// Retries shape detection within `tol` if none was recognized.
    pub(crate) fn redetect(self, tol: Real) -> Self {
        if self.shape.is_some() {
            return self;
        }
        Self::with_tolerance(self.segments, tol)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub const fn shape(&self) -> Option<&BoundaryShape> {
        self.shape.as_ref()
    }

    pub fn start(&self) -> Option<Point2<Real>> {
        self.segments.first().map(Segment::start)
    }

    pub fn end(&self) -> Option<Point2<Real>> {
        self.segments.last().map(Segment::end)
    }

    /// Distance between the end of the last segment and the start of the
    /// first; infinite for an empty boundary.
    pub fn closing_gap(&self) -> Real {
        match (self.start(), self.end()) {
            (Some(start), Some(end)) => (end - start).norm(),
            _ => Real::INFINITY,
        }
    }

    /// Whether the chain ends where it starts, within `tol`.
    pub fn closed(&self, tol: Real) -> bool {
        self.closing_gap() <= tol
    }

    /// Whether `(x, y)` lies on any segment. Curve membership, not area.
    pub fn contains(&self, x: Real, y: Real, tol: Real) -> bool {
        self.segments.iter().any(|s| s.contains(x, y, tol))
    }

    /// Pseudo-distance `min |f_base(x, y)|` over all segments, for contour
    /// display only. It carries no inside/outside sign.
    pub fn evaluate(&self, x: Real, y: Real) -> Real {
        self.segments
            .iter()
            .map(|s| s.value(x, y).abs())
            .fold(Real::INFINITY, Real::min)
    }

    /// Euclidean distance to the nearest segment.
    pub fn distance(&self, x: Real, y: Real) -> Real {
        self.segments
            .iter()
            .map(|s| s.distance(x, y))
            .fold(Real::INFINITY, Real::min)
    }

    /// Concatenated segment polylines in traversal order, shared joints kept
    /// once. A closed boundary does not repeat its first vertex.
    pub fn polyline(&self, tol: Real) -> Vec<Point2<Real>> {
        self.chain(self.segments.iter().map(|s| s.polyline().to_vec()), tol)
    }

    /// [`Boundary::polyline`] with every segment re-sampled at
    /// `config.segment_samples`.
    pub fn polyline_with(&self, config: &SamplingConfig) -> Vec<Point2<Real>> {
        let samples = config.segment_samples;
        self.chain(
            self.segments.iter().map(|s| s.polyline_with(samples)),
            config.tolerance,
        )
    }

    fn chain(&self, pieces: impl Iterator<Item = Vec<Point2<Real>>>, tol: Real) -> Vec<Point2<Real>> {
        let mut ring = Vec::new();
        for piece in pieces {
            append_chained(&mut ring, &piece, tol);
        }
        if ring.len() > 1 && self.closed(tol) {
            if let (Some(first), Some(last)) = (ring.first(), ring.last()) {
                if (last - first).norm() <= tol {
                    ring.pop();
                }
            }
        }
        ring
    }

    pub fn bounding_box(&self) -> Aabb {
        self.segments
            .iter()
            .fold(Aabb::empty(), |acc, s| acc.union(&s.bounding_box()))
    }
}

/// Recognizes rectangles, straight-edged polygons and full circles from the
/// segments' spans and base coefficients.
fn detect_shape(segments: &[Segment], tol: Real) -> Option<BoundaryShape> {
    if let [only] = segments {
        if let Span::Conic {
            center,
            semi_axes,
            ..
        } = only.span()
        {
            if only.span().is_full_loop() && semi_axes.x == semi_axes.y {
                return Some(BoundaryShape::Circle {
                    center: *center,
                    radius: semi_axes.x,
                });
            }
        }
        return None;
    }

    if segments.len() < 3 || segments.iter().any(|s| s.line_kind().is_none()) {
        return None;
    }
    let chained = segments
        .iter()
        .zip(segments.iter().cycle().skip(1))
        .all(|(a, b)| (a.end() - b.start()).norm() <= tol);
    if !chained {
        return None;
    }
    let vertices: Vec<Point2<Real>> = segments.iter().map(Segment::start).collect();

    let axis_aligned = segments.len() == 4
        && segments
            .iter()
            .all(|s| matches!(s.line_kind(), Some(LineKind::Horizontal | LineKind::Vertical)))
        && segments
            .windows(2)
            .all(|w| w[0].line_kind() != w[1].line_kind());
    if axis_aligned {
        return Some(BoundaryShape::Rectangle(Aabb::from_points(&vertices)));
    }
    Some(BoundaryShape::Polygon(vertices))
}
