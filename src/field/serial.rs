//! Serial grid sampling

use crate::field::traits::GridSampler;
use crate::field::{Field, Grid};
use crate::float_types::Real;

pub struct SerialGridSampler;

impl SerialGridSampler {
    pub const fn new() -> Self {
        Self
    }
}

impl Default for SerialGridSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl GridSampler for SerialGridSampler {
    fn sample(&self, field: &Field, grid: &Grid) -> Vec<Real> {
        (0..grid.len())
            .map(|i| {
                let p = grid.point(i);
                field.evaluate(p.x, p.y)
            })
            .collect()
    }
}
