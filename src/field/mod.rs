//! Scalar fields derived from regions.
//!
//! A [`FieldStrategy`] turns a [`Region`] into a [`Field`]; strategies are
//! looked up by tag in a [`FieldRegistry`], which is the extension point for
//! new kinds of field. Grid sampling sits behind [`GridSampler`] with a serial
//! and a parallel implementation.

pub mod grid;
pub mod registry;
pub mod strategies;
pub mod traits;

#[cfg(not(feature = "parallel"))]
pub mod serial;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use grid::Grid;
pub use registry::FieldRegistry;
pub use strategies::{OccupancyFill, SignedDistance};
pub use traits::{FieldStrategy, GridSampler};

#[cfg(not(feature = "parallel"))]
pub use serial::SerialGridSampler;

#[cfg(feature = "parallel")]
pub use parallel::ParallelGridSampler;

use crate::float_types::Real;
use crate::region::Region;
use std::sync::Arc;

/// Evaluation rule of a field, applied to its source region.
pub type FieldRule = dyn Fn(&Region, Real, Real) -> Real + Send + Sync;

/// A scalar function over the plane backed by a shared, immutable region.
#[derive(Clone)]
pub struct Field {
    source: Arc<Region>,
    tag: String,
    rule: Arc<FieldRule>,
}

impl Field {
    pub fn new<F>(source: Arc<Region>, tag: impl Into<String>, rule: F) -> Self
    where
        F: Fn(&Region, Real, Real) -> Real + Send + Sync + 'static,
    {
        Self {
            source,
            tag: tag.into(),
            rule: Arc::new(rule),
        }
    }

    pub fn source(&self) -> &Arc<Region> {
        &self.source
    }

    /// Tag of the strategy that produced this field.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[inline]
    pub fn evaluate(&self, x: Real, y: Real) -> Real {
        (self.rule)(&self.source, x, y)
    }

    /// Values at every node of `grid`, row-major.
    pub fn sample(&self, grid: &Grid) -> Vec<Real> {
        #[cfg(not(feature = "parallel"))]
        let sampler = SerialGridSampler::new();
        #[cfg(feature = "parallel")]
        let sampler = ParallelGridSampler::new();

        log::debug!("sampling '{}' field on a {}x{} grid", self.tag, grid.nx(), grid.ny());
        sampler.sample(self, grid)
    }
}

impl std::fmt::Debug for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field").field("tag", &self.tag).finish_non_exhaustive()
    }
}
