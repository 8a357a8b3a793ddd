//! Tag-keyed lookup of field strategies.

use crate::errors::GeometryError;
use crate::field::Field;
use crate::field::strategies::{OccupancyFill, SignedDistance};
use crate::field::traits::FieldStrategy;
use crate::region::Region;
use hashbrown::HashMap;
use std::sync::Arc;

/// Strategies by tag. A fresh registry knows `signed_distance` and
/// `occupancy` (1 inside, 0 outside).
#[derive(Clone)]
pub struct FieldRegistry {
    strategies: HashMap<String, Arc<dyn FieldStrategy>>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(SignedDistance));
        registry.register(Arc::new(OccupancyFill::default()));
        registry
    }

    pub fn empty() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    /// Adds `strategy` under its tag, returning whatever it replaced.
    pub fn register(&mut self, strategy: Arc<dyn FieldStrategy>) -> Option<Arc<dyn FieldStrategy>> {
        let tag = strategy.tag().to_owned();
        log::debug!("registering field strategy '{tag}'");
        self.strategies.insert(tag, strategy)
    }

    pub fn get(&self, tag: &str) -> Option<&Arc<dyn FieldStrategy>> {
        self.strategies.get(tag)
    }

    /// Registered tags, sorted.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.strategies.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// Generates the field registered under `tag` for `region`.
    pub fn generate(&self, tag: &str, region: &Arc<Region>) -> Result<Field, GeometryError> {
        self.get(tag)
            .map(|strategy| strategy.generate(region))
            .ok_or_else(|| GeometryError::UnknownStrategy(tag.to_owned()))
    }
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FieldRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldRegistry").field("tags", &self.tags()).finish()
    }
}
