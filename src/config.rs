//! Client configuration
//!
//! Settings for talking to one TAMS endpoint, loadable from YAML:
//!
//! ```yaml
//! base_url: https://tams.example.com/v6.0
//! timeout_secs: 30
//! default_limit: 50
//! headers:
//!   X-Api-Version: "6.0"
//! ```

use crate::error::{Error, Result};
use crate::query::DEFAULT_LIMIT;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Configuration for a TAMS client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL all endpoint paths are appended to
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Page size used when the caller does not pick one
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

fn default_user_agent() -> String {
    format!("tams-client/{}", env!("CARGO_PKG_VERSION"))
}

impl ClientConfig {
    /// Create a config with defaults for everything but the base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: default_timeout_secs(),
            default_limit: default_limit(),
            user_agent: default_user_agent(),
            headers: HashMap::new(),
        }
    }

    /// Create a new config builder
    pub fn builder(base_url: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::new(base_url),
        }
    }

    /// Load a config from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load a config from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: ClientConfig = serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("Failed to parse config YAML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the config
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(Error::config("base_url cannot be empty"));
        }
        let url = Url::parse(&self.base_url)
            .map_err(|e| Error::config(format!("Invalid base_url '{}': {e}", self.base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "base_url must use http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.default_limit == 0 {
            return Err(Error::config("default_limit must be greater than zero"));
        }
        if self.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be greater than zero"));
        }
        Ok(())
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Builder for client config
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout_secs = timeout.as_secs().max(1);
        self
    }

    /// Set the default page size
    pub fn default_limit(mut self, limit: u32) -> Self {
        self.config.default_limit = limit;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build and validate the config
    pub fn build(self) -> Result<ClientConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
