//! Configuration provider using Figment

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Json, Toml, Yaml},
    Figment,
};
use serde_json::Value;
use shiplog_fields::RegistryHandle;
use shiplog_plans::CatalogHandle;
use tracing::{debug, info, trace};

use crate::{
    defaults::ConfigDefaults,
    discovery::{ConfigFile, ConfigFormat, ConfigScope, FileDiscovery},
    env_substitution::EnvVarProcessor,
    error::{ConfigError, ConfigResult},
    types::{LoadedConfiguration, ShiplogConfig},
};

/// Prefix for environment overrides; `__` separates nested keys.
pub const ENV_PREFIX: &str = "SHIPLOG_";

/// Configuration provider using figment
///
/// Sources, lowest precedence first: built-in defaults, global file, project
/// file, explicit file, `SHIPLOG_` environment variables. Nothing is cached;
/// every call reads the sources again.
#[derive(Debug, Clone, Default)]
pub struct ConfigProvider {
    discovery: FileDiscovery,
    explicit_file: Option<PathBuf>,
    strict_env: bool,
}

impl ConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom discovery instead of the home and working directories.
    pub fn with_discovery(mut self, discovery: FileDiscovery) -> Self {
        self.discovery = discovery;
        self
    }

    /// Merge this file above the discovered ones. It must exist.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit_file = Some(path.into());
        self
    }

    /// Fail on `${VAR}` references to unset variables instead of substituting "".
    pub fn strict_env(mut self, strict: bool) -> Self {
        self.strict_env = strict;
        self
    }

    /// Merge every source and substitute environment references.
    pub fn load(&self) -> ConfigResult<ShiplogConfig> {
        let figment = self.build_figment()?;
        let mut raw: Value = figment.extract()?;

        let processor = EnvVarProcessor::new(self.strict_env)?;
        processor.substitute_value(&mut raw)?;

        let config: ShiplogConfig = serde_json::from_value(raw)?;
        debug!(
            entities = config.entities.len(),
            plans = config.pricing.plans.len(),
            "configuration merged"
        );
        Ok(config)
    }

    /// Load and validate.
    pub fn build(&self) -> ConfigResult<LoadedConfiguration> {
        let loaded = self.load()?.validate()?;
        info!(
            entities = loaded.registry.len(),
            plans = loaded.catalog.plans().len(),
            "configuration loaded"
        );
        Ok(loaded)
    }

    /// Re-read every source and swap both handles.
    ///
    /// Both halves are validated before either handle changes, so a failure
    /// leaves the running configuration untouched. The two swaps are not one
    /// atomic step: between them a reader can see the new registry next to
    /// the old catalog. Each snapshot is still internally consistent.
    pub fn reload(&self, registry: &RegistryHandle, catalog: &CatalogHandle) -> ConfigResult<()> {
        let loaded = self.build()?;
        registry.store(loaded.registry);
        catalog.store(loaded.catalog);
        Ok(())
    }

    fn build_figment(&self) -> ConfigResult<Figment> {
        debug!("Building figment configuration with precedence order");

        let mut figment = ConfigDefaults::figment();

        for config_file in self.discovery.discover_all() {
            trace!(
                "Loading config file: {} ({:?})",
                config_file.path.display(),
                config_file.format
            );
            figment = figment.merge(Self::load_config_file(&config_file));
        }

        if let Some(path) = &self.explicit_file {
            figment = figment.merge(Self::load_config_file(&Self::explicit(path)?));
        }

        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    fn explicit(path: &Path) -> ConfigResult<ConfigFile> {
        if !path.is_file() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let format =
            ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            })?;
        Ok(ConfigFile::new(
            path.to_path_buf(),
            format,
            ConfigScope::Explicit,
        ))
    }

    fn load_config_file(config_file: &ConfigFile) -> Figment {
        let path = &config_file.path;

        match config_file.format {
            ConfigFormat::Toml => Figment::from(Toml::file(path)),
            ConfigFormat::Yaml => Figment::from(Yaml::file(path)),
            ConfigFormat::Json => Figment::from(Json::file(path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn isolated() -> ConfigProvider {
        ConfigProvider::new().with_discovery(FileDiscovery::with_directories(None, None))
    }

    #[test]
    #[serial]
    fn test_defaults_only() {
        let config = isolated().load().unwrap();
        assert_eq!(config.entities.len(), 1);
        assert_eq!(config.pricing.plans.len(), 4);
    }

    #[test]
    #[serial]
    fn test_explicit_file_must_exist() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("shiplog.yaml");
        let err = isolated().with_file(&missing).load().unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    #[serial]
    fn test_explicit_file_needs_known_extension() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("shiplog.ini");
        fs::write(&path, "").unwrap();
        let err = isolated().with_file(&path).load().unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat { .. }));
    }

    #[test]
    #[serial]
    fn test_explicit_file_overrides_project_file() {
        let project = TempDir::new().unwrap();
        fs::write(
            project.path().join("shiplog.toml"),
            "[pricing]\ntrial_days = 7\nmodel = \"free-trial\"\n",
        )
        .unwrap();
        let explicit = project.path().join("override.json");
        fs::write(&explicit, r#"{ "pricing": { "trial_days": 14 } }"#).unwrap();

        let config = ConfigProvider::new()
            .with_discovery(FileDiscovery::with_directories(
                Some(project.path().to_path_buf()),
                None,
            ))
            .with_file(&explicit)
            .load()
            .unwrap();

        assert_eq!(config.pricing.trial_days, Some(14));
        assert_eq!(
            config.pricing.model,
            shiplog_plans::PricingModel::FreeTrial
        );
        assert_eq!(config.pricing.plans.len(), 4);
    }

    #[test]
    #[serial]
    fn test_environment_overrides_nested_key() {
        std::env::set_var("SHIPLOG_PRICING__TRIAL_DAYS", "30");
        let config = isolated().load();
        std::env::remove_var("SHIPLOG_PRICING__TRIAL_DAYS");

        assert_eq!(config.unwrap().pricing.trial_days, Some(30));
    }

    #[test]
    #[serial]
    fn test_strict_env_rejects_unset_price_variable() {
        for var in ["STRIPE_PRICE_STARTER", "STRIPE_PRICE_PRO", "STRIPE_PRICE_TEAM"] {
            std::env::remove_var(var);
        }
        let err = isolated().strict_env(true).load().unwrap_err();
        assert!(matches!(err, ConfigError::EnvironmentError { .. }));
    }
}
