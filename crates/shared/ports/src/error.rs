use thiserror::Error;

/// Failures of a durable key-value backend
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage quota exceeded for key '{key}'")]
    QuotaExceeded { key: String },

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;
