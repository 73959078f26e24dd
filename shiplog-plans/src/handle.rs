//! Atomically replaceable catalog for processes that reload pricing.

use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::info;

use crate::catalog::PlanCatalog;
use crate::error::Result;
use crate::types::PricingConfig;

/// Shared [`PlanCatalog`] with lock-free reads and whole-catalog swaps.
///
/// Readers hold an `Arc<PlanCatalog>` snapshot for as long as they need it. A
/// reload validates the new configuration completely before publishing, so no
/// reader ever sees a partially built index.
#[derive(Debug)]
pub struct CatalogHandle {
    inner: ArcSwap<PlanCatalog>,
}

impl CatalogHandle {
    pub fn new(catalog: PlanCatalog) -> Self {
        Self {
            inner: ArcSwap::from_pointee(catalog),
        }
    }

    /// Snapshot of the current catalog.
    pub fn load(&self) -> Arc<PlanCatalog> {
        self.inner.load_full()
    }

    /// Build a catalog from `config` and publish it. On error the current
    /// catalog stays in place.
    pub fn reload(&self, config: PricingConfig) -> Result<()> {
        let catalog = PlanCatalog::new(config)?;
        info!(plans = catalog.plans().len(), "plan catalog reloaded");
        self.store(catalog);
        Ok(())
    }

    /// Publish an already validated catalog.
    pub fn store(&self, catalog: PlanCatalog) {
        self.inner.store(Arc::new(catalog));
    }
}

impl From<PlanCatalog> for CatalogHandle {
    fn from(catalog: PlanCatalog) -> Self {
        Self::new(catalog)
    }
}
