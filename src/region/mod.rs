//! Filled areas: one closed outer boundary minus zero or more closed holes.
//!
//! Membership comes in two distinct questions, never one flag:
//! - [`Region::contains`]: is the point in the filled area?
//! - [`Region::contains_boundary`]: is the point on one of the boundary curves?
//!
//! Points on the outer boundary are interior; points on a hole boundary are
//! exterior (a hole boundary wins if a point touches both). Elsewhere the
//! answer is even-odd ray casting against each boundary's ordered edge ring.
//! Accuracy is the on-curve tolerance for straight and circular boundaries and
//! the sagitta of the sampled polyline for other curves.

mod area;
mod raycast;

use crate::aabb::Aabb;
use crate::boundary::{Boundary, BoundaryShape};
use crate::config::SamplingConfig;
use crate::errors::GeometryError;
use crate::float_types::Real;
use nalgebra::Point2;
use raycast::Ring;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Immutable; editing operations return a new region.
#[derive(Debug, Clone)]
pub struct Region {
    outer: Boundary,
    holes: Vec<Boundary>,
    config: SamplingConfig,
    outer_ring: Ring,
    hole_rings: Vec<Ring>,
}

impl Region {
    /// ## Errors
    /// [`GeometryError::OpenBoundary`] when the outer boundary or any hole
    /// does not close within the default tolerance.
    pub fn new(outer: Boundary, holes: Vec<Boundary>) -> Result<Self, GeometryError> {
        Self::with_config(outer, holes, SamplingConfig::default())
    }

    /// Holes are expected inside `outer` and disjoint from each other; that is
    /// not checked, and violating it gives well-defined but unintuitive results.
    pub fn with_config(
        outer: Boundary,
        holes: Vec<Boundary>,
        config: SamplingConfig,
    ) -> Result<Self, GeometryError> {
        for boundary in std::iter::once(&outer).chain(&holes) {
            let gap = boundary.closing_gap();
            if !(gap <= config.tolerance) {
                return Err(GeometryError::OpenBoundary { gap });
            }
        }

        let outer = outer.redetect(config.tolerance);
        let holes: Vec<Boundary> = holes
            .into_iter()
            .map(|h| h.redetect(config.tolerance))
            .collect();
        let outer_ring = Ring::from_boundary(&outer);
        let hole_rings: Vec<Ring> = holes.iter().map(Ring::from_boundary).collect();
        log::debug!(
            "region: outer ring of {} edges, {} holes ({} edges)",
            outer_ring.edge_count(),
            hole_rings.len(),
            hole_rings.iter().map(Ring::edge_count).sum::<usize>()
        );

        Ok(Self {
            outer,
            holes,
            config,
            outer_ring,
            hole_rings,
        })
    }

    pub const fn outer(&self) -> &Boundary {
        &self.outer
    }

    pub fn holes(&self) -> &[Boundary] {
        &self.holes
    }

    pub const fn config(&self) -> &SamplingConfig {
        &self.config
    }

    /// A new region with `hole` appended.
    pub fn with_hole(&self, hole: Boundary) -> Result<Self, GeometryError> {
        let mut holes = self.holes.clone();
        holes.push(hole);
        Self::with_config(self.outer.clone(), holes, self.config)
    }

    /// The outer boundary alone.
    pub fn without_holes(&self) -> Self {
        Self {
            outer: self.outer.clone(),
            holes: Vec::new(),
            config: self.config,
            outer_ring: self.outer_ring.clone(),
            hole_rings: Vec::new(),
        }
    }

    // ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
    // Membership
    // ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~

    /// Whether `(x, y)` lies in the filled area. Points on the outer boundary
    /// count as inside, points on a hole boundary as outside. NaN is outside.
    pub fn contains(&self, x: Real, y: Real) -> bool {
        if x.is_nan() || y.is_nan() {
            return false;
        }
        let tol = self.config.tolerance;
        if self.holes.iter().any(|h| h.contains(x, y, tol)) {
            return false;
        }
        if self.outer.contains(x, y, tol) {
            return true;
        }
        encloses(&self.outer, &self.outer_ring, x, y)
            && !self
                .holes
                .iter()
                .zip(&self.hole_rings)
                .any(|(hole, ring)| encloses(hole, ring, x, y))
    }

    /// [`Region::contains`] over a batch of points.
    #[cfg(not(feature = "parallel"))]
    pub fn contains_many(&self, points: &[Point2<Real>]) -> Vec<bool> {
        points.iter().map(|p| self.contains(p.x, p.y)).collect()
    }

    /// [`Region::contains`] over a batch of points.
    #[cfg(feature = "parallel")]
    pub fn contains_many(&self, points: &[Point2<Real>]) -> Vec<bool> {
        points.par_iter().map(|p| self.contains(p.x, p.y)).collect()
    }

    /// Whether `(x, y)` lies on the outer boundary or on any hole boundary.
    pub fn contains_boundary(&self, x: Real, y: Real) -> bool {
        let tol = self.config.tolerance;
        self.outer.contains(x, y, tol) || self.holes.iter().any(|h| h.contains(x, y, tol))
    }

    // ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
    // Measures
    // ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~

    /// Area of the outer boundary minus the area of every hole.
    pub fn area(&self) -> Real {
        let tol = self.config.tolerance;
        let outer = area::enclosed_area(&self.outer, tol);
        let holes: Real = self.holes.iter().map(|h| area::enclosed_area(h, tol)).sum();
        outer - holes
    }

    /// Total length of all boundary segments.
    pub fn perimeter(&self) -> Real {
        std::iter::once(&self.outer)
            .chain(&self.holes)
            .flat_map(Boundary::segments)
            .map(|s| s.length())
            .sum()
    }

    /// Unsigned distance to the nearest boundary segment.
    pub fn distance_to_boundary(&self, x: Real, y: Real) -> Real {
        self.holes
            .iter()
            .map(|h| h.distance(x, y))
            .fold(self.outer.distance(x, y), Real::min)
    }

    pub fn bounding_box(&self) -> Aabb {
        self.outer.bounding_box()
    }

    // ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
    // Extraction
    // ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~

    /// Ordered outer and hole polylines.
    pub fn polylines(&self) -> (Vec<Point2<Real>>, Vec<Vec<Point2<Real>>>) {
        let tol = self.config.tolerance;
        (
            self.outer.polyline(tol),
            self.holes.iter().map(|h| h.polyline(tol)).collect(),
        )
    }

    /// Outer and hole polylines re-sampled at `config.segment_samples`, joints
    /// matched within `config.tolerance`.
    pub fn polylines_with(&self, config: &SamplingConfig) -> (Vec<Point2<Real>>, Vec<Vec<Point2<Real>>>) {
        (
            self.outer.polyline_with(config),
            self.holes.iter().map(|h| h.polyline_with(config)).collect(),
        )
    }

    /// The region as a `geo` polygon for downstream rendering.
    pub fn to_geo_polygon(&self) -> geo::Polygon<Real> {
        let (outer, holes) = self.polylines();
        area::to_geo_polygon(&outer, &holes)
    }

    pub fn to_geo_polygon_with(&self, config: &SamplingConfig) -> geo::Polygon<Real> {
        let (outer, holes) = self.polylines_with(config);
        area::to_geo_polygon(&outer, &holes)
    }
}

/// Parity test with shape fast paths. Points on the boundary itself have
/// already been settled by the caller.
fn encloses(boundary: &Boundary, ring: &Ring, x: Real, y: Real) -> bool {
    match boundary.shape() {
        Some(BoundaryShape::Rectangle(b)) => {
            x > b.mins.x && x < b.maxs.x && y > b.mins.y && y < b.maxs.y
        },
        Some(BoundaryShape::Circle { center, radius }) => (Point2::new(x, y) - center).norm() < *radius,
        _ => ring.encloses(x, y),
    }
}
