mod support;

use approx::assert_abs_diff_eq;
use implicit2d::curve::LineKind;
use implicit2d::float_types::{PI, Real, TAU};
use implicit2d::{Aabb, Curve, CurveOps, GeometryError, Mask, Segment, Span};
use nalgebra::Vector2;
use std::sync::Arc;
use support::*;

fn unit_circle() -> Arc<Curve> {
    Curve::circle(p(0.0, 0.0), 1.0).unwrap()
}

fn procedural_circle() -> Arc<Curve> {
    Curve::procedural(
        "unit circle",
        |x, y| x * x + y * y - 1.0,
        Some(Aabb::new(p(-1.5, -1.5), p(1.5, 1.5))),
    )
}

#[test]
fn straight_segment_is_bounded_by_its_endpoints() {
    let s = Segment::line(p(0.0, 0.0), p(3.0, 4.0)).unwrap();
    assert_eq!(s.start(), p(0.0, 0.0));
    assert_eq!(s.end(), p(3.0, 4.0));
    assert_abs_diff_eq!(s.length(), 5.0, epsilon = 1e-12);
    assert!(s.contains(1.5, 2.0, 1e-9));
    // On the base line but past the end.
    assert!(s.base().on_boundary(6.0, 8.0, 1e-9));
    assert!(!s.contains(6.0, 8.0, 1e-9));
    assert_eq!(s.line_kind(), Some(LineKind::Oblique));
}

#[test]
fn segment_value_is_the_base_value() {
    let circle = unit_circle();
    let s = Segment::between(&circle, p(1.0, 0.0), p(0.0, 1.0)).unwrap();
    for q in lattice(-2.0, 2.0, 10) {
        assert_eq!(s.value(q.x, q.y), circle.value(q.x, q.y));
    }
    // Wrapped as a curve it still reports the base field.
    let wrapped = Curve::from_segment(s);
    assert_eq!(wrapped.value(0.3, 0.2), circle.value(0.3, 0.2));
    assert!(wrapped.on_boundary(0.6, 0.8, 1e-9));
    assert!(!wrapped.on_boundary(0.6, -0.8, 1e-9));
}

#[test]
fn endpoint_off_the_curve_is_rejected() {
    let circle = unit_circle();
    let err = Segment::between(&circle, p(1.0, 0.0), p(2.0, 0.0)).unwrap_err();
    match err {
        GeometryError::PointNotOnCurve { x, y, residual } => {
            assert_eq!((x, y), (2.0, 0.0));
            assert!(residual > 0.0);
        },
        other => panic!("expected PointNotOnCurve, got {other:?}"),
    }
}

#[test]
fn coincident_endpoints_are_rejected() {
    let circle = unit_circle();
    assert!(matches!(
        Segment::between(&circle, p(1.0, 0.0), p(1.0, 0.0)),
        Err(GeometryError::InvalidExpression(_))
    ));
}

#[test]
fn half_circle_tie_goes_counterclockwise() {
    let circle = unit_circle();
    let s = Segment::between(&circle, p(1.0, 0.0), p(-1.0, 0.0)).unwrap();
    match s.span() {
        Span::Conic { sweep, .. } => assert_abs_diff_eq!(*sweep, PI, epsilon = 1e-9),
        other => panic!("expected a conic span, got {other:?}"),
    }
    assert!(s.contains(0.0, 1.0, 1e-9));
    assert!(!s.contains(0.0, -1.0, 1e-9));
    assert_abs_diff_eq!(s.length(), PI, epsilon = 1e-3);
}

#[test]
fn shorter_arc_wins() {
    let circle = unit_circle();
    let s = Segment::between(&circle, p(1.0, 0.0), p(0.0, -1.0)).unwrap();
    match s.span() {
        Span::Conic { sweep, .. } => assert_abs_diff_eq!(*sweep, -PI / 2.0, epsilon = 1e-9),
        other => panic!("expected a conic span, got {other:?}"),
    }
    let h = (0.5 as Real).sqrt();
    assert!(s.contains(h, -h, 1e-9));
    assert!(!s.contains(-h, h, 1e-9));
    // Polyline runs from start to end.
    let path = s.polyline();
    assert_eq!(path.first(), Some(&p(1.0, 0.0)));
    assert_eq!(path.last(), Some(&p(0.0, -1.0)));
}

#[test]
fn full_circle_loop() {
    let circle = unit_circle();
    let s = Segment::full(&circle).unwrap();
    assert_eq!(s.start(), s.end());
    assert!(s.span().is_full_loop());
    assert_abs_diff_eq!(s.length(), TAU, epsilon = 1e-3);
    assert!(s.contains(0.0, -1.0, 1e-9));
    assert_eq!(s.bounding_box(), Aabb::new(p(-1.0, -1.0), p(1.0, 1.0)));
}

#[test]
fn full_loop_needs_a_conic() {
    let line = Curve::line_through(p(0.0, 0.0), p(1.0, 1.0)).unwrap();
    assert!(matches!(
        Segment::full(&line),
        Err(GeometryError::InvalidExpression(_))
    ));
    assert!(matches!(
        Segment::closed_loop(&line, p(0.0, 0.0)),
        Err(GeometryError::InvalidExpression(_))
    ));
}

#[test]
fn traced_half_circle_tie_goes_forward() {
    init_logger();
    let circle = procedural_circle();
    let s = Segment::between(&circle, p(1.0, 0.0), p(-1.0, 0.0)).unwrap();
    assert!(matches!(s.span(), Span::Traced { .. }));
    assert_eq!(s.start(), p(1.0, 0.0));
    assert_eq!(s.end(), p(-1.0, 0.0));
    assert!(s.contains(0.0, 1.0, 1e-6));
    assert!(!s.contains(0.0, -1.0, 1e-6));
    assert_abs_diff_eq!(s.length(), PI, epsilon = 1e-2);
}

#[test]
fn traced_shorter_arc_wins() {
    let circle = procedural_circle();
    let s = Segment::between(&circle, p(1.0, 0.0), p(0.0, -1.0)).unwrap();
    assert_abs_diff_eq!(s.length(), PI / 2.0, epsilon = 1e-2);
    let h = (0.5 as Real).sqrt();
    assert!(s.contains(h, -h, 1e-6));
    assert!(!s.contains(-h, h, 1e-6));
}

#[test]
fn traced_closed_loop() {
    let circle = procedural_circle();
    let s = Segment::closed_loop(&circle, p(0.0, 1.0)).unwrap();
    assert_eq!(s.start(), s.end());
    assert_abs_diff_eq!(s.length(), TAU, epsilon = 1e-2);
}

#[test]
fn half_plane_mask_selects_the_upper_arc() {
    let circle = unit_circle();
    let upper = Mask::HalfPlane {
        normal: Vector2::new(0.0, -1.0),
        offset: 0.0,
    };
    let s = Segment::with_mask(&circle, upper, p(1.0, 0.0), p(-1.0, 0.0)).unwrap();
    assert!(s.contains(0.0, 1.0, 1e-6));
    assert!(!s.contains(0.0, -1.0, 1e-6));
    assert_abs_diff_eq!(s.length(), PI, epsilon = 1e-2);
    assert!(s.polyline().iter().all(|q| q.y >= -1e-9));
}

#[test]
fn custom_mask_selects_the_lower_arc() {
    let circle = unit_circle();
    let lower = Mask::custom(|_, y| y <= 1e-9);
    let s = Segment::with_mask(&circle, lower, p(1.0, 0.0), p(-1.0, 0.0)).unwrap();
    assert!(s.contains(0.0, -1.0, 1e-6));
    assert!(!s.contains(0.0, 1.0, 1e-6));
}

#[test]
fn mask_rejecting_an_endpoint_fails() {
    let circle = unit_circle();
    let right = Mask::Rectangle(Aabb::new(p(0.5, -2.0), p(2.0, 2.0)));
    assert!(Segment::with_mask(&circle, right, p(1.0, 0.0), p(-1.0, 0.0)).is_err());
}

#[test]
fn distance_to_a_straight_segment() {
    let s = Segment::line(p(0.0, 0.0), p(4.0, 0.0)).unwrap();
    assert_abs_diff_eq!(s.distance(2.0, 3.0), 3.0, epsilon = 1e-12);
    assert_abs_diff_eq!(s.distance(6.0, 0.0), 2.0, epsilon = 1e-12);
    assert_eq!(s.line_kind(), Some(LineKind::Horizontal));
    let (a, b, c) = s.line_coefficients().unwrap();
    assert_eq!(a, 0.0);
    assert_abs_diff_eq!(b.abs(), 1.0, epsilon = 1e-12);
    assert_eq!(c, 0.0);
}

#[test]
fn distance_to_a_circular_arc() {
    let circle = unit_circle();
    let s = Segment::between(&circle, p(1.0, 0.0), p(0.0, 1.0)).unwrap();
    assert_abs_diff_eq!(s.distance(2.0, 2.0), (8.0 as Real).sqrt() - 1.0, epsilon = 1e-12);
    // Nearest point is the end of the arc.
    assert_abs_diff_eq!(s.distance(-1.0, 1.0), 1.0, epsilon = 1e-12);
}

#[test]
fn arc_bounding_box_is_conservative() {
    let circle = unit_circle();
    let s = Segment::between(&circle, p(1.0, 0.0), p(0.0, 1.0)).unwrap();
    let bb = s.bounding_box();
    let h = (0.5 as Real).sqrt();
    assert!(bb.contains_point(h, h, 0.0));
    assert!(bb.mins.x > -0.1 && bb.mins.y > -0.1);
    assert!(bb.maxs.x <= 1.01 && bb.maxs.y <= 1.01);
}
