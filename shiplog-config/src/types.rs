//! Configuration document and its validated form

use serde::{Deserialize, Serialize};
use shiplog_fields::{EntityDef, EntityRegistry, RegistryHandle};
use shiplog_plans::{CatalogHandle, PlanCatalog, PricingConfig};

use crate::error::ConfigResult;

/// The merged configuration document before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiplogConfig {
    #[serde(default)]
    pub entities: Vec<EntityDef>,
    pub pricing: PricingConfig,
}

impl ShiplogConfig {
    /// Validate both halves and build their indexes.
    pub fn validate(self) -> ConfigResult<LoadedConfiguration> {
        let registry = EntityRegistry::new(self.entities)?;
        let catalog = PlanCatalog::new(self.pricing)?;
        Ok(LoadedConfiguration { registry, catalog })
    }
}

/// A fully validated configuration.
#[derive(Debug)]
pub struct LoadedConfiguration {
    pub registry: EntityRegistry,
    pub catalog: PlanCatalog,
}

impl LoadedConfiguration {
    /// Wrap both halves in swappable handles for long-running services.
    pub fn into_handles(self) -> (RegistryHandle, CatalogHandle) {
        (
            RegistryHandle::new(self.registry),
            CatalogHandle::new(self.catalog),
        )
    }
}
