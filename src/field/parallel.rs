//! Parallel grid sampling

use crate::field::traits::GridSampler;
use crate::field::{Field, Grid};
use crate::float_types::Real;
use rayon::prelude::*;

pub struct ParallelGridSampler;

impl ParallelGridSampler {
    pub const fn new() -> Self {
        Self
    }
}

impl Default for ParallelGridSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl GridSampler for ParallelGridSampler {
    fn sample(&self, field: &Field, grid: &Grid) -> Vec<Real> {
        (0..grid.len())
            .into_par_iter()
            .map(|i| {
                let p = grid.point(i);
                field.evaluate(p.x, p.y)
            })
            .collect()
    }
}
