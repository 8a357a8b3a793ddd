//! Even-odd ray casting against a boundary's edge ring.
//!
//! The ray leaves the query point towards `+x`. An edge is crossed when exactly
//! one of its endpoints has `y <= py`, i.e. `min(y0, y1) <= py < max(y0, y1)`:
//! at a shared vertex only the edge whose lower end sits there counts, so a
//! ray through a vertex is counted once or not at all, never twice. Horizontal
//! edges are never crossed transversally and are skipped.

use crate::aabb::Aabb;
use crate::boundary::Boundary;
use crate::curve::LineKind;
use crate::float_types::Real;
use nalgebra::Point2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Edge {
    /// `x = const`, read from the line's coefficients.
    Vertical { x: Real, y0: Real, y1: Real },
    /// Never crossed transversally.
    Horizontal,
    Oblique { a: Point2<Real>, b: Point2<Real> },
}

impl Edge {
    #[inline]
    fn crosses(&self, px: Real, py: Real) -> bool {
        match *self {
            Edge::Vertical { x, y0, y1 } => straddles(y0, y1, py) && x > px,
            Edge::Horizontal => false,
            Edge::Oblique { a, b } => {
                straddles(a.y, b.y, py) && {
                    let x = a.x + (py - a.y) * (b.x - a.x) / (b.y - a.y);
                    x > px
                }
            },
        }
    }
}

#[inline]
fn straddles(y0: Real, y1: Real, py: Real) -> bool {
    (y0 <= py) != (y1 <= py)
}

/// A closed boundary flattened into edges, vertices in traversal order.
#[derive(Debug, Clone)]
pub(crate) struct Ring {
    edges: Vec<Edge>,
    bounds: Aabb,
}

impl Ring {
    /// Walks the boundary's segments in order. Straight axis-aligned segments
    /// become exact edges; everything else contributes its ordered polyline.
    /// Consecutive edges share their joint vertex, and a final edge closes any
    /// residual gap back to the start.
    pub(crate) fn from_boundary(boundary: &Boundary) -> Self {
        let mut edges = Vec::new();
        let Some(first) = boundary.start() else {
            return Self {
                edges,
                bounds: Aabb::empty(),
            };
        };
        let mut cursor = first;
        let mut bounds = Aabb::empty().including(&first);

        for segment in boundary.segments() {
            let path = segment.polyline();
            let end = *path.last().unwrap_or(&cursor);
            match (segment.line_kind(), segment.line_coefficients()) {
                (Some(LineKind::Vertical), Some((a, _, c))) => {
                    edges.push(Edge::Vertical {
                        x: -c / a,
                        y0: cursor.y,
                        y1: end.y,
                    });
                    cursor = end;
                },
                (Some(LineKind::Horizontal), _) => {
                    edges.push(Edge::Horizontal);
                    cursor = end;
                },
                _ => {
                    for p in path.iter().skip(1) {
                        edges.push(Edge::Oblique { a: cursor, b: *p });
                        cursor = *p;
                    }
                },
            }
            bounds = bounds.union(&Aabb::from_points(path));
        }
        if cursor != first {
            edges.push(Edge::Oblique { a: cursor, b: first });
        }

        Self { edges, bounds }
    }

    pub(crate) fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of edges the `+x` ray from `(px, py)` crosses.
    pub(crate) fn crossings(&self, px: Real, py: Real) -> usize {
        self.edges.iter().filter(|e| e.crosses(px, py)).count()
    }

    /// Odd crossing count.
    pub(crate) fn encloses(&self, px: Real, py: Real) -> bool {
        if !self.bounds.contains_point(px, py, 0.0) {
            return false;
        }
        self.crossings(px, py) % 2 == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> Ring {
        let boundary = Boundary::polygon(&[
            Point2::new(0.0, -1.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(-1.0, 0.0),
        ])
        .unwrap();
        Ring::from_boundary(&boundary)
    }

    #[test]
    fn ray_through_vertex_counts_once() {
        // The ray from the origin passes exactly through the (1, 0) vertex.
        let ring = diamond();
        assert_eq!(ring.crossings(0.0, 0.0), 1);
        assert!(ring.encloses(0.0, 0.0));
        // Ray through the top vertex from the left grazes it: zero crossings.
        assert_eq!(ring.crossings(-5.0, 1.0), 0);
    }

    #[test]
    fn square_uses_exact_axis_edges() {
        let boundary = Boundary::rectangle(Point2::new(0.0, 0.0), Point2::new(4.0, 4.0)).unwrap();
        let ring = Ring::from_boundary(&boundary);
        assert_eq!(ring.edge_count(), 4);
        let verticals = ring
            .edges
            .iter()
            .filter(|e| matches!(e, Edge::Vertical { .. }))
            .count();
        assert_eq!(verticals, 2);
        assert!(ring.encloses(1.0, 1.0));
        assert!(!ring.encloses(5.0, 1.0));
        // Ray along the bottom edge: both verticals have their lower end on it.
        assert_eq!(ring.crossings(-1.0, 0.0), 2);
        assert_eq!(ring.crossings(1.0, 0.0), 1);
    }
}
