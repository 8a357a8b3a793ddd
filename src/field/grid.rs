//! Regular sampling lattice over an axis-aligned box.

use crate::aabb::Aabb;
use crate::float_types::Real;
use nalgebra::Point2;

/// `nx * ny` nodes spanning `bounds`, corners included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    bounds: Aabb,
    nx: usize,
    ny: usize,
}

impl Grid {
    /// Fewer than two nodes along an axis are raised to two.
    pub fn new(bounds: Aabb, nx: usize, ny: usize) -> Self {
        Self {
            bounds,
            nx: nx.max(2),
            ny: ny.max(2),
        }
    }

    pub const fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Nodes along x, at least two.
    pub const fn nx(&self) -> usize {
        self.nx
    }

    /// Nodes along y, at least two.
    pub const fn ny(&self) -> usize {
        self.ny
    }

    pub const fn len(&self) -> usize {
        self.nx * self.ny
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Node spacing along x and y.
    pub fn spacing(&self) -> (Real, Real) {
        (
            self.bounds.width() / (self.nx - 1) as Real,
            self.bounds.height() / (self.ny - 1) as Real,
        )
    }

    /// Position of the node at row-major index `i`.
    #[inline]
    pub fn point(&self, i: usize) -> Point2<Real> {
        let (dx, dy) = self.spacing();
        let ix = i % self.nx;
        let iy = i / self.nx;
        Point2::new(
            self.bounds.mins.x + ix as Real * dx,
            self.bounds.mins.y + iy as Real * dy,
        )
    }
}
