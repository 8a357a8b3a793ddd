//! Enclosed area of a closed boundary.

use crate::boundary::{Boundary, BoundaryShape};
use crate::float_types::{PI, Real};
use geo::{Area, Coord, LineString, Polygon as GeoPolygon};
use nalgebra::Point2;

/// Area enclosed by `boundary`, regardless of orientation.
///
/// Recognized shapes are measured exactly; anything else goes through the
/// shoelace formula on the boundary's ordered polyline.
pub(crate) fn enclosed_area(boundary: &Boundary, tol: Real) -> Real {
    match boundary.shape() {
        Some(BoundaryShape::Rectangle(b)) => {
            log::trace!("area fast path: rectangle");
            b.width() * b.height()
        },
        Some(BoundaryShape::Circle { radius, .. }) => {
            log::trace!("area fast path: circle");
            PI * radius * radius
        },
        Some(BoundaryShape::Polygon(vertices)) => {
            log::trace!("area fast path: {} stored vertices", vertices.len());
            shoelace(vertices)
        },
        None => {
            let ring = boundary.polyline(tol);
            log::trace!("area by sampling {} vertices", ring.len());
            shoelace(&ring)
        },
    }
}

/// Unsigned shoelace area of a ring (closing edge implied).
pub(crate) fn shoelace(ring: &[Point2<Real>]) -> Real {
    if ring.len() < 3 {
        return 0.0;
    }
    to_geo_polygon(ring, &[]).unsigned_area()
}

pub(crate) fn to_geo_polygon(exterior: &[Point2<Real>], interiors: &[Vec<Point2<Real>>]) -> GeoPolygon<Real> {
    GeoPolygon::new(
        to_line_string(exterior),
        interiors.iter().map(|ring| to_line_string(ring)).collect(),
    )
}

fn to_line_string(ring: &[Point2<Real>]) -> LineString<Real> {
    LineString::new(ring.iter().map(|p| Coord { x: p.x, y: p.y }).collect())
}
