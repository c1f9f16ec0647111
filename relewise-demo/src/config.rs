//! Demo configuration, loaded from TOML with environment overrides

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Configuration for the demo server and CLI
#[derive(Debug, Clone, Deserialize)]
pub struct DemoConfig {
    /// Address the server listens on
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// HTTP timeout for search API calls (seconds)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Maximum tracing level: "error", "warn", "info", "debug" or "trace"
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Values used to prefill the form
    #[serde(default)]
    pub defaults: FormDefaults,
}

fn default_bind_addr() -> String { "0.0.0.0:8080".to_string() }
fn default_request_timeout_secs() -> u64 { 30 }
fn default_log_level() -> String { "info".to_string() }

/// Prefilled form values
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FormDefaults {
    pub dataset_id: Option<String>,
    pub api_key: Option<String>,
    pub server_url: Option<String>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            request_timeout_secs: default_request_timeout_secs(),
            log_level: default_log_level(),
            defaults: FormDefaults::default(),
        }
    }
}

impl DemoConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Load from `path`; a missing file yields the defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    /// Apply `RELEWISE_*` environment overrides
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |key: &str| lookup(key).filter(|value| !value.is_empty());

        if let Some(value) = lookup("RELEWISE_DATASET_ID") {
            self.defaults.dataset_id = Some(value);
        }
        if let Some(value) = lookup("RELEWISE_API_KEY") {
            self.defaults.api_key = Some(value);
        }
        if let Some(value) = lookup("RELEWISE_SERVER_URL") {
            self.defaults.server_url = Some(value);
        }
        if let Some(value) = lookup("RELEWISE_BIND_ADDR") {
            self.bind_addr = value;
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
