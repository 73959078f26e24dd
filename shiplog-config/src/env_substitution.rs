//! Environment variable substitution in configuration values
//!
//! Supports patterns:
//! - `${VAR_NAME}` - Replace with environment variable value, empty string if not set
//! - `${VAR_NAME:-default}` - Replace with environment variable value, or default if not set
//!
//! This is how billing price ids reach the plan catalog: the configuration
//! declares `price_id: "${STRIPE_PRICE_STARTER}"` and the deployment supplies
//! the value.

use regex::Regex;
use serde_json::Value;
use tracing::trace;

use crate::error::{ConfigError, ConfigResult};

/// Environment variable substitution processor
pub struct EnvVarProcessor {
    /// Compiled regex for matching environment variable patterns
    var_regex: Regex,
    /// Whether to return errors for missing variables (true) or empty strings (false)
    strict_mode: bool,
}

impl EnvVarProcessor {
    /// Matches `${VAR_NAME}` and `${VAR_NAME:-default_value}`
    const ENV_VAR_PATTERN: &'static str = r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}";

    /// Create a processor.
    ///
    /// In strict mode a missing variable without a default is an error;
    /// otherwise it becomes an empty string.
    pub fn new(strict_mode: bool) -> ConfigResult<Self> {
        let var_regex = Regex::new(Self::ENV_VAR_PATTERN).map_err(|e| {
            ConfigError::environment_error(format!(
                "Failed to compile environment variable regex: {e}"
            ))
        })?;

        Ok(Self {
            var_regex,
            strict_mode,
        })
    }

    /// Missing variables become empty strings
    pub fn lenient() -> ConfigResult<Self> {
        Self::new(false)
    }

    /// Missing variables without defaults are errors
    pub fn strict() -> ConfigResult<Self> {
        Self::new(true)
    }

    /// Recursively substitute every string inside a JSON value.
    pub fn substitute_value(&self, value: &mut Value) -> ConfigResult<()> {
        match value {
            Value::String(s) => {
                if self.contains_patterns(s) {
                    *s = self.substitute_string(s)?;
                }
            }
            Value::Array(arr) => {
                for item in arr.iter_mut() {
                    self.substitute_value(item)?;
                }
            }
            Value::Object(obj) => {
                for (_, val) in obj.iter_mut() {
                    self.substitute_value(val)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Substitute all patterns in a single string.
    pub fn substitute_string(&self, s: &str) -> ConfigResult<String> {
        if self.strict_mode {
            for caps in self.var_regex.captures_iter(s) {
                let var_name = &caps[1];
                if std::env::var(var_name).is_err() && caps.get(2).is_none() {
                    return Err(ConfigError::environment_error(format!(
                        "Environment variable '{var_name}' not found and no default provided"
                    )));
                }
            }
        }

        let result = self
            .var_regex
            .replace_all(s, |caps: &regex::Captures| {
                let var_name = &caps[1];
                match std::env::var(var_name) {
                    Ok(value) => {
                        trace!(var = var_name, "environment variable substituted");
                        value
                    }
                    Err(_) => match caps.get(2) {
                        Some(default) => {
                            trace!(var = var_name, "environment variable default used");
                            default.as_str().to_string()
                        }
                        None => {
                            trace!(var = var_name, "environment variable not set, substituting empty string");
                            String::new()
                        }
                    },
                }
            })
            .to_string();

        Ok(result)
    }

    /// Check if string contains substitution patterns
    pub fn contains_patterns(&self, s: &str) -> bool {
        self.var_regex.is_match(s)
    }
}
