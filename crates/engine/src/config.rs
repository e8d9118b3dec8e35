//! Registry configuration via `emustore.toml`
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! working configuration. Tests usually build `RegistryConfig` directly.

use emustore_core::{Error, Result, DEFAULT_SCOPE};
use emustore_primitives::RetryConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Conventional config file name.
pub const CONFIG_FILE_NAME: &str = "emustore.toml";

/// Registry configuration loaded from `emustore.toml`.
///
/// # Example
///
/// ```toml
/// default_scope = "global"
///
/// [update_retry]
/// max_retries = 1000
/// base_delay_ms = 0
/// max_delay_ms = 10
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Scope used when a caller passes `None`.
    #[serde(default = "default_scope_str")]
    pub default_scope: String,
    /// Retry policy handed to every store the registry creates.
    ///
    /// An update that loses its compare-and-swap more than
    /// `update_retry.max_retries` times in a row returns
    /// `Error::UpdateConflict` instead of committing. `max_retries` must be
    /// at least 1; the default of 1000 is never exhausted in practice.
    #[serde(default)]
    pub update_retry: RetryConfig,
}

fn default_scope_str() -> String {
    DEFAULT_SCOPE.to_string()
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            default_scope: default_scope_str(),
            update_retry: RetryConfig::default(),
        }
    }
}

impl RegistryConfig {
    /// Set the scope used when a caller passes `None`.
    pub fn with_default_scope(mut self, scope: impl Into<String>) -> Self {
        self.default_scope = scope.into();
        self
    }

    /// Set the retry policy for optimistic updates.
    pub fn with_update_retry(mut self, retry: RetryConfig) -> Self {
        self.update_retry = retry;
        self
    }

    /// Check invariants that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns an error if `default_scope` is empty or if
    /// `update_retry.max_retries` is 0.
    pub fn validate(&self) -> Result<()> {
        if self.default_scope.is_empty() {
            return Err(Error::config("default_scope must not be empty"));
        }
        if self.update_retry.max_retries == 0 {
            return Err(Error::config("update_retry.max_retries must be at least 1"));
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# emustore registry configuration
#
# Scope used when a store is requested without one.
default_scope = "global"

# Optimistic update retry policy.
# An update whose key changed between read and commit is retried
# up to max_retries times (at least 1) with exponential backoff.
# Delays of 0 ms only yield the thread. Running out of retries
# makes the update fail with a conflict error.
[update_retry]
max_retries = 1000
base_delay_ms = 0
max_delay_ms = 10
"#
    }

    /// Parse and validate config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or fails validation.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: RegistryConfig = toml::from_str(content)
            .map_err(|e| Error::config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            Error::config(format!(
                "Failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }
}
