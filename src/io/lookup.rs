//! Caller-supplied resolution of curve ids.

use crate::curve::Curve;
use std::hash::BuildHasher;
use std::sync::Arc;
use uuid::Uuid;

/// Maps curve ids found in records back to live curves. The owning scene
/// layer supplies it; records never embed their children.
pub trait CurveLookup {
    fn resolve(&self, id: &Uuid) -> Option<Arc<Curve>>;
}

impl<S: BuildHasher> CurveLookup for hashbrown::HashMap<Uuid, Arc<Curve>, S> {
    fn resolve(&self, id: &Uuid) -> Option<Arc<Curve>> {
        self.get(id).cloned()
    }
}

impl<S: BuildHasher> CurveLookup for std::collections::HashMap<Uuid, Arc<Curve>, S> {
    fn resolve(&self, id: &Uuid) -> Option<Arc<Curve>> {
        self.get(id).cloned()
    }
}

/// Linear scan; convenient for a handful of curves.
impl CurveLookup for Vec<Arc<Curve>> {
    fn resolve(&self, id: &Uuid) -> Option<Arc<Curve>> {
        self.iter().find(|c| c.id() == *id).cloned()
    }
}

/// Looks in `first`, then in `second`.
pub(crate) struct Chained<'a> {
    pub first: &'a dyn CurveLookup,
    pub second: &'a dyn CurveLookup,
}

impl CurveLookup for Chained<'_> {
    fn resolve(&self, id: &Uuid) -> Option<Arc<Curve>> {
        self.first.resolve(id).or_else(|| self.second.resolve(id))
    }
}
