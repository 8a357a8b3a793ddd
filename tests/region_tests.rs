mod support;

use approx::assert_abs_diff_eq;
use geo::Area;
use implicit2d::float_types::{PI, Real};
use implicit2d::{Aabb, Boundary, BoundaryShape, Curve, Field, GeometryError, Region, SamplingConfig, Segment};
use nalgebra::Point2;
use support::*;

fn square_with_square_hole() -> Region {
    Region::new(rect(0.0, 0.0, 10.0, 10.0), vec![rect(3.0, 3.0, 7.0, 7.0)]).unwrap()
}

#[test]
fn square_scenario() {
    let region = rect_region(0.0, 0.0, 4.0, 4.0);
    assert!(region.contains(1.0, 1.0));
    assert!(!region.contains(5.0, 5.0));
    assert!(region.contains_boundary(0.0, 2.0));
    // The boundary counts as interior.
    assert!(region.contains(0.0, 2.0));
    assert!(!region.contains_boundary(1.0, 1.0));
    assert_abs_diff_eq!(region.area(), 16.0, epsilon = 1e-12);
}

#[test]
fn square_with_hole_scenario() {
    let region = square_with_square_hole();
    assert!(region.contains(1.0, 1.0));
    assert!(!region.contains(5.0, 5.0));
    assert!(!region.contains(15.0, 15.0));
    assert_abs_diff_eq!(region.area(), 84.0, epsilon = 1e-9);
}

#[test]
fn hole_boundary_is_exterior() {
    let region = square_with_square_hole();
    assert!(!region.contains(3.0, 5.0));
    assert!(!region.contains(7.0, 7.0));
    assert!(region.contains_boundary(3.0, 5.0));
    assert!(region.contains(10.0, 5.0));
    assert!(region.contains_boundary(10.0, 5.0));
}

#[test]
fn square_minus_unit_circle() {
    let region = Region::new(
        rect(0.0, 0.0, 10.0, 10.0),
        vec![Boundary::circle(p(5.0, 5.0), 1.0).unwrap()],
    )
    .unwrap();
    assert_abs_diff_eq!(region.area(), 100.0 - PI, epsilon = 1e-2);
    assert!(!region.contains(5.0, 5.0));
    assert!(!region.contains(5.5, 5.5));
    assert!(region.contains(5.0, 6.5));
    assert!(!region.contains(6.0, 5.0));
}

#[test]
fn convex_polygon_agrees_with_half_spaces() {
    let hexagon = [
        p(0.0, 0.0),
        p(4.0, -1.0),
        p(6.0, 2.0),
        p(4.0, 5.0),
        p(1.0, 5.0),
        p(-1.0, 2.0),
    ];
    let region = Region::new(Boundary::polygon(&hexagon).unwrap(), vec![]).unwrap();
    assert_abs_diff_eq!(region.area(), 29.0, epsilon = 1e-9);

    let edges: Vec<(Point2<Real>, Point2<Real>)> = hexagon
        .iter()
        .zip(hexagon.iter().cycle().skip(1))
        .map(|(a, b)| (*a, *b))
        .collect();
    let mut checked = 0;
    for q in lattice(-2.0, 7.0, 60) {
        let sides: Vec<Real> = edges
            .iter()
            .map(|(a, b)| {
                let d = b - a;
                (d.x * (q.y - a.y) - d.y * (q.x - a.x)) / d.norm()
            })
            .collect();
        if sides.iter().any(|s| s.abs() < 1e-3) {
            continue;
        }
        let reference = sides.iter().all(|s| *s > 0.0);
        assert_eq!(region.contains(q.x, q.y), reference, "at ({}, {})", q.x, q.y);
        checked += 1;
    }
    assert!(checked > 3000);
}

#[test]
fn rays_through_vertices_count_once() {
    let diamond = Boundary::polygon(&[p(0.0, -1.0), p(1.0, 0.0), p(0.0, 1.0), p(-1.0, 0.0)]).unwrap();
    let region = Region::new(diamond, vec![]).unwrap();
    assert!(region.contains(-0.5, 0.0));
    assert!(region.contains(0.0, 0.5));
    assert!(region.contains(1.0, 0.0));
    assert!(!region.contains(1.5, 0.0));
    assert!(!region.contains(-1.5, 0.0));
    assert!(!region.contains(0.0, 1.5));
    assert!(!region.contains(-3.0, 1.0));
}

#[test]
fn l_shape_uses_exact_axis_edges() {
    let l = Boundary::polygon(&[
        p(0.0, 0.0),
        p(4.0, 0.0),
        p(4.0, 2.0),
        p(2.0, 2.0),
        p(2.0, 4.0),
        p(0.0, 4.0),
    ])
    .unwrap();
    let region = Region::new(l, vec![]).unwrap();
    assert!(region.contains(1.0, 1.0));
    assert!(region.contains(3.0, 1.0));
    assert!(region.contains(1.0, 3.0));
    assert!(!region.contains(3.0, 3.0));
    // Rays along the inner horizontal edge.
    assert!(region.contains(1.0, 2.0));
    assert!(!region.contains(-1.0, 2.0));
    assert!(!region.contains(5.0, 2.0));
    assert_abs_diff_eq!(region.area(), 12.0, epsilon = 1e-9);
}

#[test]
fn ellipse_area_by_sampling() {
    let ellipse = Curve::ellipse(p(0.0, 0.0), 3.0, 1.0).unwrap();
    let region = Region::new(Boundary::conic_loop(&ellipse, &SamplingConfig::default()).unwrap(), vec![]).unwrap();
    assert_abs_diff_eq!(region.area(), 3.0 * PI, epsilon = 1e-2);
    assert!(region.contains(2.5, 0.0));
    assert!(!region.contains(2.5, 0.9));
}

#[test]
fn traced_boundary_area_and_containment() {
    init_logger();
    let circle = Curve::procedural(
        "unit circle",
        |x, y| x * x + y * y - 1.0,
        Some(Aabb::new(p(-1.5, -1.5), p(1.5, 1.5))),
    );
    let outer = Boundary::new(vec![Segment::closed_loop(&circle, p(1.0, 0.0)).unwrap()]);
    let region = Region::new(outer, vec![]).unwrap();
    assert_abs_diff_eq!(region.area(), PI, epsilon = 1e-2);
    assert!(region.contains(0.0, 0.0));
    assert!(region.contains(0.5, 0.5));
    assert!(!region.contains(1.2, 0.0));
    assert!(!region.contains(0.8, 0.8));
}

#[test]
fn open_boundary_is_rejected() {
    let open = Boundary::new(vec![
        Segment::line(p(0.0, 0.0), p(1.0, 0.0)).unwrap(),
        Segment::line(p(1.0, 0.0), p(1.0, 1.0)).unwrap(),
    ]);
    match Region::new(open, vec![]) {
        Err(GeometryError::OpenBoundary { gap }) => {
            assert_abs_diff_eq!(gap, (2.0 as Real).sqrt(), epsilon = 1e-12)
        },
        other => panic!("expected OpenBoundary, got {other:?}"),
    }
    assert!(matches!(
        Region::new(Boundary::new(vec![]), vec![]),
        Err(GeometryError::OpenBoundary { .. })
    ));
}

#[test]
fn nan_is_outside() {
    let region = rect_region(0.0, 0.0, 4.0, 4.0);
    assert!(!region.contains(Real::NAN, 1.0));
    assert!(!region.contains(1.0, Real::NAN));
}

#[test]
fn batch_containment_matches_pointwise() {
    let region = square_with_square_hole();
    let points = lattice(-1.0, 11.0, 30);
    let batch = region.contains_many(&points);
    for (inside, q) in batch.iter().zip(&points) {
        assert_eq!(*inside, region.contains(q.x, q.y));
    }
}

#[test]
fn measures() {
    let region = square_with_square_hole();
    assert_abs_diff_eq!(region.perimeter(), 56.0, epsilon = 1e-9);
    assert_abs_diff_eq!(region.distance_to_boundary(5.0, 5.0), 2.0, epsilon = 1e-12);
    assert_abs_diff_eq!(region.distance_to_boundary(1.0, 5.0), 1.0, epsilon = 1e-12);
    assert_eq!(region.bounding_box(), Aabb::new(p(0.0, 0.0), p(10.0, 10.0)));
}

#[test]
fn editing_returns_new_regions() {
    let solid = rect_region(0.0, 0.0, 10.0, 10.0);
    let holed = solid.with_hole(rect(3.0, 3.0, 7.0, 7.0)).unwrap();
    assert_abs_diff_eq!(solid.area(), 100.0, epsilon = 1e-9);
    assert_abs_diff_eq!(holed.area(), 84.0, epsilon = 1e-9);
    assert_eq!(holed.holes().len(), 1);
    let filled = holed.without_holes();
    assert!(filled.contains(5.0, 5.0));
    assert!(!holed.contains(5.0, 5.0));
}

#[test]
fn geo_polygon_export() {
    let polygon = square_with_square_hole().to_geo_polygon();
    assert_eq!(polygon.interiors().len(), 1);
    assert_abs_diff_eq!(polygon.unsigned_area(), 84.0, epsilon = 1e-9);
}

#[test]
fn geometry_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Curve>();
    assert_send_sync::<Boundary>();
    assert_send_sync::<Region>();
    assert_send_sync::<Field>();

    let region = std::sync::Arc::new(square_with_square_hole());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let region = std::sync::Arc::clone(&region);
            std::thread::spawn(move || region.contains(1.0 + i as Real, 1.0))
        })
        .collect();
    for h in handles {
        assert!(h.join().unwrap());
    }
}

/// `0.01 (x² + y² - 1)`: the unit circle with |∇f| = 0.02 on the curve.
fn shallow_circle() -> std::sync::Arc<Curve> {
    Curve::polynomial_from_terms([((2, 0), 0.01), ((0, 2), 0.01), ((0, 0), -0.01)]).unwrap()
}

#[test]
fn boundary_membership_is_measured_in_distance() {
    // |∇f| is 0.01 at the major vertex of this ellipse.
    let ellipse = Curve::ellipse(p(0.0, 0.0), 100.0, 1.0).unwrap();
    let outer = Boundary::conic_loop(&ellipse, &SamplingConfig::default()).unwrap();
    let region = Region::new(outer, vec![]).unwrap();
    let tol = region.config().tolerance;

    assert!(region.contains_boundary(100.0, 0.0));
    assert!(region.contains_boundary(100.0 + 0.5 * tol, 0.0));
    assert!(!region.contains_boundary(100.0 + 50.0 * tol, 0.0));
    assert!(!region.contains(100.0 + 50.0 * tol, 0.0));

    for i in -200..=200 {
        let x = 100.0 + (i as Real + 0.25) * 0.5 * tol;
        if region.contains_boundary(x, 0.0) {
            assert!(region.distance_to_boundary(x, 0.0) <= tol, "x = {x}");
        }
    }
}

#[test]
fn shallow_hole_boundary_is_held_to_distance() {
    let hole = Boundary::conic_loop(&shallow_circle(), &SamplingConfig::default()).unwrap();
    let region = Region::new(rect(-5.0, -5.0, 5.0, 5.0), vec![hole]).unwrap();
    let tol = region.config().tolerance;

    // Within tolerance in value but 40 tolerances away in distance.
    let x = 1.0 + 40.0 * tol;
    assert!(!region.contains_boundary(x, 0.0));
    assert!(region.contains(x, 0.0));

    assert!(region.contains_boundary(1.0 + 0.5 * tol, 0.0));
    assert!(!region.contains(1.0 + 0.5 * tol, 0.0));
    assert!(!region.contains(0.0, 0.0));
}

#[test]
fn polylines_follow_the_requested_resolution() {
    let circle = Curve::circle(p(5.0, 5.0), 1.0).unwrap();
    let hole = Boundary::conic_loop(&circle, &SamplingConfig::default()).unwrap();
    let region = Region::new(rect(0.0, 0.0, 10.0, 10.0), vec![hole]).unwrap();

    let (outer, holes) = region.polylines();
    assert_eq!(outer.len(), 4);
    assert_eq!(holes[0].len(), 256);

    let coarse = SamplingConfig::default().with_segment_samples(32);
    let (outer, holes) = region.polylines_with(&coarse);
    assert_eq!(outer.len(), 4);
    assert_eq!(holes[0].len(), 32);

    let fine = SamplingConfig::default().with_segment_samples(1024);
    let (_, holes) = region.polylines_with(&fine);
    assert_eq!(holes[0].len(), 1024);
    assert!(holes[0].iter().all(|q| approx_eq((q - p(5.0, 5.0)).norm(), 1.0, 1e-12)));

    // Coarser rings cut more off the hole.
    let coarse_area = region.to_geo_polygon_with(&coarse).unsigned_area();
    let fine_area = region.to_geo_polygon_with(&fine).unsigned_area();
    assert!(coarse_area > fine_area);
    assert_abs_diff_eq!(fine_area, 100.0 - PI, epsilon = 1e-3);
}

#[test]
fn shape_detection_uses_the_region_tolerance() {
    // The second edge starts 5e-4 above the first one's end.
    let outer = Boundary::new(vec![
        Segment::line(p(0.0, 0.0), p(4.0, 0.0)).unwrap(),
        Segment::line(p(4.0, 5e-4), p(4.0, 4.0)).unwrap(),
        Segment::line(p(4.0, 4.0), p(0.0, 4.0)).unwrap(),
        Segment::line(p(0.0, 4.0), p(0.0, 0.0)).unwrap(),
    ]);
    assert!(outer.shape().is_none());

    let config = SamplingConfig::default().with_tolerance(1e-3);
    let region = Region::with_config(outer, vec![], config).unwrap();
    assert_eq!(
        region.outer().shape(),
        Some(&BoundaryShape::Rectangle(Aabb::new(p(0.0, 0.0), p(4.0, 4.0))))
    );
    assert_abs_diff_eq!(region.area(), 16.0, epsilon = 1e-12);
}
