//! Error types for the ShipLog configuration loader

use std::path::PathBuf;

use shiplog_fields::FieldsError;
use shiplog_plans::PlansError;
use thiserror::Error;

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An explicitly requested configuration file does not exist
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Configuration file format not supported
    #[error("Unsupported configuration file format: {path}")]
    UnsupportedFormat { path: PathBuf },

    /// Merging or reading configuration sources failed
    #[error("Failed to parse configuration: {source}")]
    ParseError {
        #[source]
        source: Box<figment::Error>,
    },

    /// The merged configuration does not have the expected shape
    #[error("Invalid configuration shape: {source}")]
    Shape {
        #[source]
        source: serde_json::Error,
    },

    /// Environment variable substitution failed
    #[error("Environment variable error: {message}")]
    EnvironmentError { message: String },

    /// An entity descriptor is structurally invalid
    #[error("Invalid entity configuration: {0}")]
    Entities(#[from] FieldsError),

    /// The pricing configuration is structurally invalid
    #[error("Invalid pricing configuration: {0}")]
    Pricing(#[from] PlansError),
}

impl ConfigError {
    pub fn environment_error(message: impl Into<String>) -> Self {
        ConfigError::EnvironmentError {
            message: message.into(),
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        ConfigError::ParseError {
            source: Box::new(error),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(error: serde_json::Error) -> Self {
        ConfigError::Shape { source: error }
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_error_wraps_source() {
        let err = ConfigError::from(PlansError::NoPlans);
        assert_eq!(
            err.to_string(),
            "Invalid pricing configuration: pricing configuration declares no plans"
        );
    }

    #[test]
    fn test_environment_error_display() {
        let err = ConfigError::environment_error("Environment variable 'X' not found");
        assert!(err.to_string().contains("'X'"));
    }
}
