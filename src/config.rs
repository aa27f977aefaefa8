//! Client configuration
//!
//! Parses TOML configuration files and provides typed access to settings.
//! Every field has a default, so an empty file (or [`ClientConfig::default`])
//! talks to the public API with a 60 second timeout.

use crate::error::{PplxError, PplxResult};
use crate::transport::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Upper limit accepted for `timeout_seconds`
pub const MAX_TIMEOUT_SECONDS: u64 = 600;

/// Root configuration structure
///
/// Connection fields are private; use the accessors and `with_*` setters.
/// Values set programmatically are checked by [`ClientConfig::validate`] when
/// a [`Client`](crate::Client) is built from them.
#[derive(Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    base_url: String,
    #[serde(default = "default_timeout_seconds")]
    timeout_seconds: u64,
    /// Complete `Authorization` header value, e.g. `Bearer pplx-...`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    api_key: Option<String>,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
            api_key: None,
            observability: ObservabilityConfig::default(),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("observability", &self.observability)
            .finish()
    }
}

/// Observability configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ClientConfig {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Point the client at another host (a proxy, or a mock server in tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    /// - [`PplxError::ConfigFileRead`] if the file cannot be read
    /// - [`PplxError::ConfigParseFailed`] if it is not valid TOML for this shape
    /// - [`PplxError::Config`] if a value is out of range
    pub fn from_file<P: AsRef<Path>>(path: P) -> PplxResult<Self> {
        let path_display = path.as_ref().display().to_string();

        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|source| PplxError::ConfigFileRead {
                path: path_display.clone(),
                source,
            })?;

        let config: Self = toml::from_str(&content).map_err(|source| {
            PplxError::ConfigParseFailed {
                path: path_display.clone(),
                source,
            }
        })?;

        config.validate().map_err(|e| {
            PplxError::Config(format!("{} (in '{}')", e, path_display))
        })?;

        tracing::debug!(path = %path_display, base_url = %config.base_url, "Loaded client configuration");
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> PplxResult<()> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(PplxError::Config(format!(
                "base_url '{}' must start with http:// or https://",
                self.base_url
            )));
        }

        if self.timeout_seconds == 0 || self.timeout_seconds > MAX_TIMEOUT_SECONDS {
            return Err(PplxError::Config(format!(
                "timeout_seconds must be between 1 and {} (got {})",
                MAX_TIMEOUT_SECONDS, self.timeout_seconds
            )));
        }

        if let Some(key) = &self.api_key
            && key.trim().is_empty()
        {
            return Err(PplxError::Config(
                "api_key must not be blank; remove it to leave the token unset".to_string(),
            ));
        }

        Ok(())
    }
}

impl FromStr for ClientConfig {
    type Err = PplxError;

    fn from_str(toml_str: &str) -> Result<Self, Self::Err> {
        let config: ClientConfig =
            toml::from_str(toml_str).map_err(|source| PplxError::ConfigParseFailed {
                path: "<string>".to_string(),
                source,
            })?;

        config.validate()?;
        Ok(config)
    }
}
