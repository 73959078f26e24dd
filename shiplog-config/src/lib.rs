//! ShipLog configuration loading using Figment
//!
//! Merges the built-in entity and pricing configuration with files and
//! environment overrides, then validates the result into an
//! [`EntityRegistry`](shiplog_fields::EntityRegistry) and a
//! [`PlanCatalog`](shiplog_plans::PlanCatalog).
//!
//! # Quick Start
//!
//! ```no_run
//! use shiplog_config::load_configuration;
//!
//! let config = load_configuration()?;
//! let entry = config.registry.get("build_journal_entries").unwrap();
//! println!("{} list columns", entry.list_fields().len());
//! assert!(config.catalog.within_limit(Some("free"), "entities", 3));
//! # Ok::<(), shiplog_config::ConfigError>(())
//! ```
//!
//! # Sources
//!
//! Lowest precedence first:
//!
//! 1. Built-in defaults: the build journal entity and the free/starter/pro/team plans
//! 2. Global: `~/.shiplog/shiplog.{toml,yaml,yml,json}`
//! 3. Project: `./.shiplog/shiplog.{toml,yaml,yml,json}`
//! 4. An explicit file passed to [`load_configuration_from`]
//! 5. Environment variables prefixed `SHIPLOG_`, `__` separating nested keys
//!
//! Maps merge key by key. Lists such as `plans` or `entities` are replaced
//! whole by a higher source.
//!
//! ```yaml
//! pricing:
//!   model: free-trial
//!   trial_days: 7
//!   plans:
//!     - id: starter
//!       name: Starter
//!       price: { monthly: 9, yearly: 79 }
//!       price_id: "${STRIPE_PRICE_STARTER}"
//!       limits: { entities: 20 }
//! ```
//!
//! ```bash
//! export SHIPLOG_PRICING__TRIAL_DAYS=14     # → pricing.trial_days
//! ```
//!
//! # Variable Substitution
//!
//! After merging, `${VAR}` and `${VAR:-default}` inside any string value are
//! replaced from the process environment. Unset variables without a default
//! become empty strings, which the catalog treats as "no price id".

use std::path::Path;

/// Built-in configuration values
pub mod defaults;
/// File discovery for configuration files
pub mod discovery;
/// Environment variable substitution
pub mod env_substitution;
/// Error types and handling
pub mod error;
/// Figment-backed configuration provider
pub mod provider;
/// Configuration document types
pub mod types;

pub use defaults::ConfigDefaults;
pub use discovery::{ConfigFile, ConfigFormat, ConfigScope, FileDiscovery, CONFIG_DIR_NAME};
pub use env_substitution::EnvVarProcessor;
pub use error::{ConfigError, ConfigResult};
pub use provider::{ConfigProvider, ENV_PREFIX};
pub use types::{LoadedConfiguration, ShiplogConfig};

/// Load and validate configuration from every standard source.
pub fn load_configuration() -> ConfigResult<LoadedConfiguration> {
    ConfigProvider::new().build()
}

/// Like [`load_configuration`], with `path` merged above the discovered files.
pub fn load_configuration_from(path: impl AsRef<Path>) -> ConfigResult<LoadedConfiguration> {
    ConfigProvider::new().with_file(path.as_ref()).build()
}
