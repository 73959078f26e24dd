//! Subscription plan catalog and entitlement evaluator
//!
//! `shiplog-plans` maps a tenant's subscription tier to its usage limits and
//! answers admission questions before an action that would increase usage.
//!
//! ```
//! use shiplog_plans::{PlanCatalog, PricingConfig};
//!
//! let config: PricingConfig = serde_json::from_value(serde_json::json!({
//!     "default_limits": { "entities": 4 },
//!     "plans": [
//!         { "id": "free", "name": "Free", "price": { "monthly": 0 }, "limits": { "entities": 4 } },
//!         { "id": "pro", "name": "Pro", "price": { "monthly": 19 }, "limits": { "entities": -1 } }
//!     ]
//! }))?;
//! let catalog = PlanCatalog::new(config)?;
//!
//! assert!(catalog.within_limit(Some("free"), "entities", 3));
//! assert!(!catalog.within_limit(Some("free"), "entities", 4));
//! assert!(catalog.within_limit(Some("pro"), "entities", 10_000));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The catalog does not count or enforce usage. Callers own their counters and
//! increment them only after `within_limit` returns true.

pub mod catalog;
pub mod error;
pub mod handle;
pub mod types;

pub use catalog::PlanCatalog;
pub use error::{PlansError, Result};
pub use handle::CatalogHandle;
pub use types::{Limit, Limits, Plan, Price, PricingConfig, PricingModel, UNLIMITED};
