//! Gateway configuration
//!
//! Loaded from an optional JSON file; `HOST`, `PORT`, `DATA_API_URL` and
//! `DATA_API_KEY` in the environment override whatever the file says.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Base URL of the PostgREST-style data API
    #[serde(default)]
    pub data_api_url: Option<String>,

    /// Service key sent as `apikey` and bearer token
    #[serde(default)]
    pub data_api_key: Option<String>,

    /// Delay before a created deposit is marked confirmed
    #[serde(default = "default_confirmation_delay")]
    pub confirmation_delay_ms: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_confirmation_delay() -> u64 {
    2_000
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_api_url: None,
            data_api_key: None,
            confirmation_delay_ms: default_confirmation_delay(),
        }
    }
}

impl GatewayConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply overrides from the process environment
    pub fn with_env(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`; unset or blank values keep the
    /// current setting
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = var("HOST") {
            self.host = host;
        }
        if let Some(port) = var("PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("PORT '{}' is not a port", port)))?;
        }
        if let Some(url) = var("DATA_API_URL") {
            self.data_api_url = Some(url);
        }
        if let Some(key) = var("DATA_API_KEY") {
            self.data_api_key = Some(key);
        }
        Ok(self)
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn confirmation_delay(&self) -> Duration {
        Duration::from_millis(self.confirmation_delay_ms)
    }
}

/// Configuration errors
#[derive(Debug, Clone)]
pub enum ConfigError {
    Io { path: String, error: String },
    Parse(String),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { path, error } => {
                write!(f, "Failed to read config file '{}': {}", path, error)
            }
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
            ConfigError::Invalid(e) => write!(f, "Invalid config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::from_json("{}").unwrap();

        assert_eq!(config.addr(), "0.0.0.0:8080");
        assert_eq!(config.confirmation_delay(), Duration::from_secs(2));
        assert!(config.data_api_url.is_none());
    }

    #[test]
    fn test_env_overrides_file() {
        let config = GatewayConfig::from_json(r#"{ "port": 3000, "data_api_url": "http://file" }"#)
            .unwrap()
            .with_overrides(env(&[
                ("PORT", "9000"),
                ("DATA_API_KEY", "secret"),
                ("HOST", "  "),
            ]))
            .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.data_api_url.as_deref(), Some("http://file"));
        assert_eq!(config.data_api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_bad_port() {
        let err = GatewayConfig::default()
            .with_overrides(env(&[("PORT", "eighty")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            GatewayConfig::from_json("[1, 2"),
            Err(ConfigError::Parse(_))
        ));
    }
}
