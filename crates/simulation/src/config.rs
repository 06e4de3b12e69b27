//! Configuration loading for the simulation
//!
//! A JSON file tunes:
//! - where and under which key the agent catalog is persisted
//! - the RNG seed (omit for entropy)
//! - cadence, injection probability and window size of each live feed

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Storage key of the persisted simulation state
pub const DEFAULT_STORAGE_KEY: &str = "umbra.simulation_state.v1";

/// Root configuration for the simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Directory for file-backed storage
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,

    /// Seed for every random source; `None` draws from entropy
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub marketplace: MarketplaceConfig,

    #[serde(default)]
    pub pools: PoolsConfig,

    #[serde(default)]
    pub defi: DefiConfig,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_state_dir() -> PathBuf {
    PathBuf::from(".umbra")
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            state_dir: default_state_dir(),
            seed: None,
            dashboard: DashboardConfig::default(),
            marketplace: MarketplaceConfig::default(),
            pools: PoolsConfig::default(),
            defi: DefiConfig::default(),
        }
    }
}

impl SimulationConfig {
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
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject feeds that could never tick or never show anything
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::Invalid("storage_key must not be empty".to_string()));
        }

        for (name, feed, windowed) in [
            ("dashboard.transactions", &self.dashboard.transactions, true),
            ("dashboard.price", &self.dashboard.price, false),
            ("marketplace.logs", &self.marketplace.logs, true),
            ("pools.mix", &self.pools.mix, true),
            ("defi.lending", &self.defi.lending, false),
        ] {
            feed.validate(name, windowed)?;
        }
        Ok(())
    }
}

/// Cadence and shape of one live feed
///
/// In a config file each feed may name only the fields it changes; the
/// rest keep that feed's defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeedConfig {
    pub interval_ms: u64,
    /// Chance that a tick injects a record, in `[0, 1]`
    pub probability: f64,
    /// Maximum number of records kept in the window; 0 for feeds without one
    pub capacity: usize,
}

/// Partial feed settings as written in a config file
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FeedOverride {
    interval_ms: Option<u64>,
    probability: Option<f64>,
    capacity: Option<usize>,
}

impl FeedOverride {
    fn apply(self, base: FeedConfig) -> FeedConfig {
        FeedConfig {
            interval_ms: self.interval_ms.unwrap_or(base.interval_ms),
            probability: self.probability.unwrap_or(base.probability),
            capacity: self.capacity.unwrap_or(base.capacity),
        }
    }
}

fn feed_over<'de, D>(deserializer: D, base: FeedConfig) -> Result<FeedConfig, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(FeedOverride::deserialize(deserializer)?.apply(base))
}

macro_rules! feed_field {
    ($name:ident, $default:ident) => {
        fn $name<'de, D>(deserializer: D) -> Result<FeedConfig, D::Error>
        where
            D: Deserializer<'de>,
        {
            feed_over(deserializer, $default())
        }
    };
}

feed_field!(dashboard_transactions, default_dashboard_transactions);
feed_field!(dashboard_price, default_dashboard_price);
feed_field!(marketplace_logs, default_marketplace_logs);
feed_field!(pool_mix, default_pool_mix);
feed_field!(defi_lending, default_defi_lending);

impl FeedConfig {
    pub const fn new(interval_ms: u64, probability: f64, capacity: usize) -> Self {
        Self {
            interval_ms,
            probability,
            capacity,
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    fn validate(&self, name: &str, windowed: bool) -> Result<(), ConfigError> {
        if self.interval_ms == 0 {
            return Err(ConfigError::Invalid(format!("{}: interval_ms must be > 0", name)));
        }
        if windowed && self.capacity == 0 {
            return Err(ConfigError::Invalid(format!("{}: capacity must be > 0", name)));
        }
        if !(0.0..=1.0).contains(&self.probability) {
            return Err(ConfigError::Invalid(format!(
                "{}: probability {} outside [0, 1]",
                name, self.probability
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_dashboard_transactions", deserialize_with = "dashboard_transactions")]
    pub transactions: FeedConfig,
    #[serde(default = "default_dashboard_price", deserialize_with = "dashboard_price")]
    pub price: FeedConfig,
    /// Bulk history generated on load
    #[serde(default = "default_dashboard_history")]
    pub initial_transactions: usize,
    /// How many active agents the dashboard shows
    #[serde(default = "default_dashboard_agents")]
    pub agent_limit: usize,
    #[serde(default = "default_portfolio_value")]
    pub portfolio_value: Decimal,
}

fn default_dashboard_transactions() -> FeedConfig {
    FeedConfig::new(2_000, 0.3, 10)
}

fn default_dashboard_price() -> FeedConfig {
    FeedConfig::new(3_000, 1.0, 0)
}

fn default_dashboard_history() -> usize {
    8
}

fn default_dashboard_agents() -> usize {
    3
}

fn default_portfolio_value() -> Decimal {
    dec!(12450.80)
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            transactions: default_dashboard_transactions(),
            price: default_dashboard_price(),
            initial_transactions: default_dashboard_history(),
            agent_limit: default_dashboard_agents(),
            portfolio_value: default_portfolio_value(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketplaceConfig {
    #[serde(default = "default_marketplace_logs", deserialize_with = "marketplace_logs")]
    pub logs: FeedConfig,
}

fn default_marketplace_logs() -> FeedConfig {
    FeedConfig::new(2_000, 0.6, 6)
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            logs: default_marketplace_logs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolsConfig {
    #[serde(default = "default_pool_mix", deserialize_with = "pool_mix")]
    pub mix: FeedConfig,
    #[serde(default = "default_pool_history")]
    pub initial_transactions: usize,
}

fn default_pool_mix() -> FeedConfig {
    FeedConfig::new(2_500, 0.5, 8)
}

fn default_pool_history() -> usize {
    5
}

impl Default for PoolsConfig {
    fn default() -> Self {
        Self {
            mix: default_pool_mix(),
            initial_transactions: default_pool_history(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefiConfig {
    #[serde(default = "default_defi_lending", deserialize_with = "defi_lending")]
    pub lending: FeedConfig,
}

fn default_defi_lending() -> FeedConfig {
    FeedConfig::new(5_000, 1.0, 0)
}

impl Default for DefiConfig {
    fn default() -> Self {
        Self {
            lending: default_defi_lending(),
        }
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
