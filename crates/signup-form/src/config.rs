//! Form configuration
//!
//! Loaded from TOML, for example:
//!
//! ```toml
//! store_url = "http://127.0.0.1:5555"
//! request_timeout_ms = 5000
//!
//! [schema]
//! email_required = true
//! age_order = "coerce-first"
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use signup_schema::{Schema, SchemaOptions};
use std::path::Path;
use std::time::Duration;

/// Default record store base URL
pub const DEFAULT_STORE_URL: &str = "http://127.0.0.1:5555";

/// Default per-request deadline in milliseconds
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Form session configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Base URL of the record store
    pub store_url: String,
    /// Deadline for each create/list call
    pub request_timeout_ms: u64,
    /// Validation schema knobs
    pub schema: SchemaOptions,
}

impl FormConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With store URL
    #[inline]
    #[must_use]
    pub fn with_store_url(mut self, url: impl Into<String>) -> Self {
        self.store_url = url.into();
        self
    }

    /// With request timeout
    #[inline]
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// With schema options
    #[inline]
    #[must_use]
    pub fn with_schema(mut self, schema: SchemaOptions) -> Self {
        self.schema = schema;
        self
    }

    /// Request timeout as a duration
    #[inline]
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Validation schema built from the options
    #[must_use]
    pub fn build_schema(&self) -> Schema {
        Schema::with_options(self.schema)
    }

    /// Parse and validate TOML text
    ///
    /// # Errors
    /// - `ConfigError::Parse` if the TOML does not match
    /// - `ConfigError::InvalidValue` if a value is out of range
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    ///
    /// # Errors
    /// `ConfigError::Io` if the file cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ConfigError::io_error(path, e))?;
        tracing::debug!("loaded config from {}", path.display());
        Self::from_toml_str(&text)
    }

    /// Check value ranges
    ///
    /// # Errors
    /// `ConfigError::InvalidValue` naming the first bad key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "store_url",
                reason: "must not be empty".to_string(),
            });
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "request_timeout_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.schema.name_max_len == 0 {
            return Err(ConfigError::InvalidValue {
                key: "schema.name_max_len",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.schema.age_max < 1 {
            return Err(ConfigError::InvalidValue {
                key: "schema.age_max",
                reason: format!("must be at least 1, got {}", self.schema.age_max),
            });
        }
        Ok(())
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            store_url: DEFAULT_STORE_URL.to_string(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            schema: SchemaOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use signup_schema::AgeOrder;

    #[test]
    fn defaults() {
        let config = FormConfig::new();
        assert_eq!(config.store_url, DEFAULT_STORE_URL);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert!(config.schema.email_required);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = FormConfig::from_toml_str(
            r#"
            request_timeout_ms = 2500

            [schema]
            age_order = "required-first"
            "#,
        )
        .unwrap();

        assert_eq!(config.store_url, DEFAULT_STORE_URL);
        assert_eq!(config.request_timeout_ms, 2500);
        assert_eq!(config.schema.age_order, AgeOrder::RequiredFirst);
        assert_eq!(config.schema.name_max_len, 15);
    }

    #[test]
    fn zero_timeout_rejected() {
        let err = FormConfig::from_toml_str("request_timeout_ms = 0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                key: "request_timeout_ms",
                ..
            }
        ));
    }

    #[test]
    fn malformed_toml_rejected() {
        let err = FormConfig::from_toml_str("store_url = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn builders_chain() {
        let config = FormConfig::new()
            .with_store_url("http://store.test")
            .with_request_timeout(Duration::from_millis(750));

        assert_eq!(config.store_url, "http://store.test");
        assert_eq!(config.request_timeout_ms, 750);
        assert!(config.validate().is_ok());
    }
}
