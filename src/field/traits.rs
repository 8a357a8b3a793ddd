//! Traits at the field seams: strategies that turn a region into a field, and
//! samplers that evaluate a field over a grid.

use crate::field::{Field, Grid};
use crate::float_types::Real;
use crate::region::Region;
use std::sync::Arc;

/// A plug-in that derives a scalar [`Field`] from a [`Region`].
///
/// Strategies are stateless with respect to the region: generating never
/// mutates it, so one region can back any number of fields at once.
pub trait FieldStrategy: Send + Sync {
    /// Registry key, e.g. `"signed_distance"`.
    fn tag(&self) -> &str;

    fn generate(&self, region: &Arc<Region>) -> Field;
}

/// Evaluates a field at every node of a grid.
pub trait GridSampler {
    /// Values in row-major order: index `iy * nx + ix`.
    fn sample(&self, field: &Field, grid: &Grid) -> Vec<Real>;
}
