//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use implicit2d::{Boundary, Region, float_types::Real};
use nalgebra::Point2;

/// Routes `log` output through the test harness; safe to call repeatedly.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

pub fn p(x: Real, y: Real) -> Point2<Real> {
    Point2::new(x, y)
}

/// Axis-aligned rectangle boundary from corner coordinates.
pub fn rect(x0: Real, y0: Real, x1: Real, y1: Real) -> Boundary {
    Boundary::rectangle(p(x0, y0), p(x1, y1)).unwrap()
}

/// Region bounded by a single rectangle.
pub fn rect_region(x0: Real, y0: Real, x1: Real, y1: Real) -> Region {
    Region::new(rect(x0, y0, x1, y1), vec![]).unwrap()
}

/// `n x n` lattice of points over `[min, max]²`, offset so that no point lands
/// on a whole or half-integer coordinate.
pub fn lattice(min: Real, max: Real, n: usize) -> Vec<Point2<Real>> {
    let step = (max - min) / n as Real;
    let jitter = 0.0173 * step;
    (0..n)
        .flat_map(|i| {
            (0..n).map(move |j| p(min + i as Real * step + jitter, min + j as Real * step + 1.3 * jitter))
        })
        .collect()
}
