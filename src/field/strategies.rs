//! Built-in field strategies.

use crate::field::Field;
use crate::field::traits::FieldStrategy;
use crate::float_types::Real;
use crate::region::Region;
use std::sync::Arc;

/// Distance to the nearest boundary segment, negative inside the region.
///
/// Straight and circular segments are measured in closed form; other curves
/// through their ordered polyline.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignedDistance;

impl SignedDistance {
    pub const TAG: &'static str = "signed_distance";
}

impl FieldStrategy for SignedDistance {
    fn tag(&self) -> &str {
        Self::TAG
    }

    fn generate(&self, region: &Arc<Region>) -> Field {
        Field::new(Arc::clone(region), Self::TAG, |region: &Region, x, y| {
            let d = region.distance_to_boundary(x, y);
            if region.contains(x, y) { -d } else { d }
        })
    }
}

/// `inside` where the region contains the point, `outside` elsewhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OccupancyFill {
    pub inside: Real,
    pub outside: Real,
}

impl OccupancyFill {
    pub const TAG: &'static str = "occupancy";

    pub const fn new(inside: Real, outside: Real) -> Self {
        Self { inside, outside }
    }
}

impl Default for OccupancyFill {
    fn default() -> Self {
        Self::new(1.0, 0.0)
    }
}

impl FieldStrategy for OccupancyFill {
    fn tag(&self) -> &str {
        Self::TAG
    }

    fn generate(&self, region: &Arc<Region>) -> Field {
        let Self { inside, outside } = *self;
        Field::new(Arc::clone(region), Self::TAG, move |region: &Region, x, y| {
            if region.contains(x, y) { inside } else { outside }
        })
    }
}
