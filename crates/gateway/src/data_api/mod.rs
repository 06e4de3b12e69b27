//! Data API port
//!
//! The proxy functions only ever need three operations against the managed
//! database: equality-filtered select, insert and patch. Rows are loose
//! JSON objects since each table has its own schema.

mod memory;
mod rest;

pub use memory::InMemoryDataApi;
pub use rest::RestDataApi;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// One table row
pub type Row = Value;

/// Data API errors
#[derive(Error, Debug)]
pub enum DataApiError {
    #[error("Missing data API credentials")]
    MissingCredentials,

    #[error("Data API rejected the request ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("Data API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid data API response: {0}")]
    InvalidResponse(String),
}

impl DataApiError {
    /// Response body of a rejected request, or the error text otherwise
    pub fn detail(&self) -> String {
        match self {
            DataApiError::Rejected { body, .. } => body.clone(),
            other => other.to_string(),
        }
    }
}

pub type DataApiResult<T> = std::result::Result<T, DataApiError>;

/// Equality filter on one column (`column=eq.value`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub column: String,
    pub value: String,
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl ToString) -> Self {
        Self {
            column: column.into(),
            value: value.to_string(),
        }
    }

    /// Query parameter pair in PostgREST syntax
    pub fn to_query(&self) -> (String, String) {
        (self.column.clone(), format!("eq.{}", self.value))
    }

    /// Whether `row` satisfies the filter, comparing textual forms
    pub fn matches(&self, row: &Row) -> bool {
        match row.get(&self.column) {
            Some(Value::String(s)) => *s == self.value,
            Some(Value::Null) | None => false,
            Some(other) => other.to_string() == self.value,
        }
    }
}

#[async_trait]
pub trait DataApi: Send + Sync {
    /// Fail fast when the backend cannot be reached at all
    fn ready(&self) -> DataApiResult<()> {
        Ok(())
    }

    /// Rows of `table` matching every filter
    async fn select(&self, table: &str, filters: &[Filter]) -> DataApiResult<Vec<Row>>;

    /// Insert `row`, returning the stored representation
    async fn insert(&self, table: &str, row: Row) -> DataApiResult<Vec<Row>>;

    /// Merge `patch` into every row matching the filters
    async fn update(&self, table: &str, filters: &[Filter], patch: Row) -> DataApiResult<()>;
}

#[async_trait]
impl<D: DataApi + ?Sized> DataApi for std::sync::Arc<D> {
    fn ready(&self) -> DataApiResult<()> {
        (**self).ready()
    }

    async fn select(&self, table: &str, filters: &[Filter]) -> DataApiResult<Vec<Row>> {
        (**self).select(table, filters).await
    }

    async fn insert(&self, table: &str, row: Row) -> DataApiResult<Vec<Row>> {
        (**self).insert(table, row).await
    }

    async fn update(&self, table: &str, filters: &[Filter], patch: Row) -> DataApiResult<()> {
        (**self).update(table, filters, patch).await
    }
}
