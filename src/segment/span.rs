//! The stretch of a base curve a segment covers, in traversal order.

use crate::aabb::Aabb;
use crate::float_types::{Real, TAU};
use crate::math::polyline::{point_segment_distance, polyline_distance};
use nalgebra::{Point2, Vector2};
use std::sync::Arc;

/// How a segment's extent along its base curve is parameterized.
#[derive(Debug, Clone)]
pub enum Span {
    /// Straight piece of a line base.
    Linear {
        start: Point2<Real>,
        end: Point2<Real>,
    },
    /// Arc of an axis-aligned conic `center + (a·cos t, b·sin t)`, from
    /// `start_param` through the signed `sweep` (positive is counterclockwise).
    Conic {
        center: Point2<Real>,
        semi_axes: Vector2<Real>,
        start_param: Real,
        sweep: Real,
        start: Point2<Real>,
        end: Point2<Real>,
    },
    /// Numerically traced polyline; membership is proximity to it.
    Traced {
        path: Arc<[Point2<Real>]>,
        proximity: Real,
    },
}

impl Span {
    pub fn start(&self) -> Point2<Real> {
        match self {
            Span::Linear { start, .. } | Span::Conic { start, .. } => *start,
            Span::Traced { path, .. } => path.first().copied().unwrap_or_else(Point2::origin),
        }
    }

    pub fn end(&self) -> Point2<Real> {
        match self {
            Span::Linear { end, .. } | Span::Conic { end, .. } => *end,
            Span::Traced { path, .. } => path.last().copied().unwrap_or_else(Point2::origin),
        }
    }

    /// Vertices from start to end. `samples` is the vertex count for a full
    /// turn of a conic; traced spans return their stored path.
    pub fn polyline(&self, samples: usize) -> Vec<Point2<Real>> {
        match self {
            Span::Linear { start, end } => vec![*start, *end],
            Span::Conic {
                center,
                semi_axes,
                start_param,
                sweep,
                start,
                end,
            } => {
                let n = ((samples.max(8) as Real) * sweep.abs() / TAU).ceil().max(2.0) as usize;
                let mut points = Vec::with_capacity(n + 1);
                points.push(*start);
                for i in 1..n {
                    let t = start_param + sweep * (i as Real) / (n as Real);
                    points.push(conic_point(center, semi_axes, t));
                }
                points.push(*end);
                points
            },
            Span::Traced { path, .. } => path.to_vec(),
        }
    }

    /// Whether an on-curve point lies within this span, widened by `tol`.
    pub fn admits(&self, p: &Point2<Real>, tol: Real) -> bool {
        match self {
            Span::Linear { start, end } => {
                let d = end - start;
                let len = d.norm();
                let t = (p - start).dot(&d) / (len * len);
                let slack = tol / len;
                (-slack..=1.0 + slack).contains(&t)
            },
            Span::Conic {
                center,
                semi_axes,
                start_param,
                sweep,
                ..
            } => {
                if sweep.abs() >= TAU {
                    return true;
                }
                let phi = conic_param(center, semi_axes, p);
                let rel = if *sweep >= 0.0 {
                    (phi - start_param).rem_euclid(TAU)
                } else {
                    (start_param - phi).rem_euclid(TAU)
                };
                let slack = tol / semi_axes.x.min(semi_axes.y);
                rel <= sweep.abs() + slack || rel >= TAU - slack
            },
            Span::Traced { path, proximity } => polyline_distance(p, path) <= proximity.max(tol),
        }
    }

    /// Distance from `p` to this span. Closed form for lines and circular
    /// arcs; `path` is the fallback polyline for everything else.
    pub fn distance(&self, p: &Point2<Real>, path: &[Point2<Real>]) -> Real {
        match self {
            Span::Linear { start, end } => point_segment_distance(p, start, end).0,
            Span::Conic {
                center,
                semi_axes,
                start,
                end,
                ..
            } if semi_axes.x == semi_axes.y => {
                let radius = semi_axes.x;
                let offset = p - center;
                let r = offset.norm();
                if r > 0.0 && self.admits(&(center + offset * (radius / r)), 0.0) {
                    (r - radius).abs()
                } else if r == 0.0 && self.is_full_loop() {
                    radius
                } else {
                    (p - start).norm().min((p - end).norm())
                }
            },
            _ => polyline_distance(p, path),
        }
    }

    pub fn is_full_loop(&self) -> bool {
        matches!(self, Span::Conic { sweep, .. } if sweep.abs() >= TAU)
    }

    /// Box of the span's extent.
    pub fn bounding_box(&self, path: &[Point2<Real>]) -> Aabb {
        match self {
            Span::Linear { start, end } => Aabb::from_points([start, end]),
            Span::Conic {
                center, semi_axes, ..
            } if self.is_full_loop() => Aabb::new(center - semi_axes, center + semi_axes),
            Span::Conic { semi_axes, sweep, .. } => {
                // Chords of the sampled arc sit inside the curve by at most the sagitta.
                let n = path.len().saturating_sub(1).max(1) as Real;
                let half_step = 0.5 * sweep.abs() / n;
                let sagitta = semi_axes.x.max(semi_axes.y) * (1.0 - half_step.cos());
                Aabb::from_points(path).expanded(sagitta)
            },
            Span::Traced { proximity, .. } => Aabb::from_points(path).expanded(*proximity),
        }
    }
}

#[inline]
pub(crate) fn conic_point(center: &Point2<Real>, semi_axes: &Vector2<Real>, t: Real) -> Point2<Real> {
    Point2::new(center.x + semi_axes.x * t.cos(), center.y + semi_axes.y * t.sin())
}

/// Eccentric-anomaly parameter of `p` relative to the conic.
#[inline]
pub(crate) fn conic_param(center: &Point2<Real>, semi_axes: &Vector2<Real>, p: &Point2<Real>) -> Real {
    ((p.y - center.y) / semi_axes.y).atan2((p.x - center.x) / semi_axes.x)
}
