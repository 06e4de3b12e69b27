//! Error types for the simulation crate

use thiserror::Error;
use umbra_ports::StorageError;

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

pub type Result<T> = std::result::Result<T, SimulationError>;
