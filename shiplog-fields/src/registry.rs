//! Validated set of entity descriptors, indexed by slug.
//!
//! Built once at startup from configuration. Every descriptor is checked on
//! construction, so a registry that exists is structurally sound. Lookups are
//! by slug through an in-memory index.

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::Deserialize;
use tracing::debug;

use crate::error::{FieldsError, Result};
use crate::types::EntityDef;

/// Immutable, validated collection of entity descriptors in declaration order.
#[derive(Debug, Clone)]
pub struct EntityRegistry {
    entities: Vec<EntityDef>,
    slug_index: HashMap<String, usize>,
}

#[derive(Deserialize)]
struct EntitiesFile {
    entities: Vec<EntityDef>,
}

impl EntityRegistry {
    /// Validate every descriptor and index them by slug.
    pub fn new(entities: Vec<EntityDef>) -> Result<Self> {
        let mut slug_index = HashMap::with_capacity(entities.len());
        for (idx, entity) in entities.iter().enumerate() {
            entity.validate()?;
            if slug_index.insert(entity.slug.clone(), idx).is_some() {
                return Err(FieldsError::DuplicateSlug {
                    slug: entity.slug.clone(),
                });
            }
        }

        debug!(entities = entities.len(), "entity registry built");

        Ok(Self {
            entities,
            slug_index,
        })
    }

    /// Parse a YAML document with a top-level `entities:` list.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let file: EntitiesFile = serde_yaml_ng::from_str(yaml)?;
        Self::new(file.entities)
    }

    /// Get an entity descriptor by slug.
    pub fn get(&self, slug: &str) -> Option<&EntityDef> {
        self.slug_index.get(slug).map(|&i| &self.entities[i])
    }

    /// Get an entity descriptor by its singular name.
    pub fn get_by_name(&self, name: &str) -> Option<&EntityDef> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// All entity descriptors, in declaration order.
    pub fn all(&self) -> &[EntityDef] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Shared registry that can be replaced wholesale at runtime.
///
/// Readers get a consistent snapshot; a reload either publishes a fully
/// validated registry or leaves the current one in place.
#[derive(Debug)]
pub struct RegistryHandle {
    inner: ArcSwap<EntityRegistry>,
}

impl RegistryHandle {
    pub fn new(registry: EntityRegistry) -> Self {
        Self {
            inner: ArcSwap::from_pointee(registry),
        }
    }

    /// Snapshot of the current registry.
    pub fn load(&self) -> Arc<EntityRegistry> {
        self.inner.load_full()
    }

    /// Build a registry from `entities` and publish it.
    pub fn reload(&self, entities: Vec<EntityDef>) -> Result<()> {
        let registry = EntityRegistry::new(entities)?;
        debug!(entities = registry.len(), "entity registry reloaded");
        self.store(registry);
        Ok(())
    }

    /// Publish an already validated registry.
    pub fn store(&self, registry: EntityRegistry) {
        self.inner.store(Arc::new(registry));
    }
}
