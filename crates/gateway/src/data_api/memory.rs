//! In-memory data API

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

use super::{DataApi, DataApiError, DataApiResult, Filter, Row};

/// Table store backed by DashMap
///
/// Inserted rows get an `id` and a `created_at` unless they carry one.
/// Tables can be told to reject inserts, and the whole store can act as if
/// it had no credentials; tests use both to reach the failure paths.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDataApi {
    tables: Arc<DashMap<String, Vec<Row>>>,
    rejections: Arc<DashMap<String, String>>,
    offline: Arc<AtomicBool>,
}

impl InMemoryDataApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append rows to `table` as-is
    pub fn seed(&self, table: &str, rows: impl IntoIterator<Item = Row>) {
        self.tables
            .entry(table.to_string())
            .or_default()
            .extend(rows);
    }

    /// Snapshot of every row of `table`
    pub fn rows(&self, table: &str) -> Vec<Row> {
        self.tables
            .get(table)
            .map(|t| t.value().clone())
            .unwrap_or_default()
    }

    /// Make every insert into `table` fail with `body`
    pub fn reject_inserts(&self, table: &str, body: impl Into<String>) {
        self.rejections.insert(table.to_string(), body.into());
    }

    /// Fail every call with [`DataApiError::MissingCredentials`]
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }
}

#[async_trait]
impl DataApi for InMemoryDataApi {
    fn ready(&self) -> DataApiResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(DataApiError::MissingCredentials);
        }
        Ok(())
    }

    async fn select(&self, table: &str, filters: &[Filter]) -> DataApiResult<Vec<Row>> {
        self.ready()?;
        Ok(self
            .tables
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| filters.iter().all(|f| f.matches(row)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insert(&self, table: &str, mut row: Row) -> DataApiResult<Vec<Row>> {
        self.ready()?;
        if let Some(body) = self.rejections.get(table) {
            return Err(DataApiError::Rejected {
                status: 409,
                body: body.value().clone(),
            });
        }

        let Some(fields) = row.as_object_mut() else {
            return Err(DataApiError::Rejected {
                status: 400,
                body: "row must be a JSON object".to_string(),
            });
        };
        fields
            .entry("id")
            .or_insert_with(|| json!(Uuid::new_v4().to_string()));
        fields
            .entry("created_at")
            .or_insert_with(|| json!(Utc::now().to_rfc3339()));

        self.tables
            .entry(table.to_string())
            .or_default()
            .push(row.clone());
        Ok(vec![row])
    }

    async fn update(&self, table: &str, filters: &[Filter], patch: Row) -> DataApiResult<()> {
        self.ready()?;
        let Value::Object(patch) = patch else {
            return Err(DataApiError::Rejected {
                status: 400,
                body: "patch must be a JSON object".to_string(),
            });
        };

        if let Some(mut rows) = self.tables.get_mut(table) {
            for row in rows.iter_mut().filter(|r| filters.iter().all(|f| f.matches(r))) {
                if let Some(fields) = row.as_object_mut() {
                    for (key, value) in &patch {
                        fields.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_assigns_id_and_created_at() {
        let api = InMemoryDataApi::new();
        let rows = api
            .insert("user_agents", json!({ "agent_id": "agent-1" }))
            .await
            .unwrap();

        assert!(rows[0]["id"].is_string());
        assert!(rows[0]["created_at"].is_string());
        assert_eq!(api.rows("user_agents").len(), 1);
    }

    #[tokio::test]
    async fn test_select_and_update() {
        let api = InMemoryDataApi::new();
        api.seed(
            "pool_statistics",
            vec![
                json!({ "id": 1, "pool_type": "main", "active_mixers": 10 }),
                json!({ "id": 2, "pool_type": "side", "active_mixers": 3 }),
            ],
        );

        let main = api
            .select("pool_statistics", &[Filter::eq("pool_type", "main")])
            .await
            .unwrap();
        assert_eq!(main.len(), 1);

        api.update(
            "pool_statistics",
            &[Filter::eq("id", 1)],
            json!({ "active_mixers": 11 }),
        )
        .await
        .unwrap();

        let rows = api.rows("pool_statistics");
        assert_eq!(rows[0]["active_mixers"], 11);
        assert_eq!(rows[1]["active_mixers"], 3);
    }

    #[tokio::test]
    async fn test_rejected_inserts() {
        let api = InMemoryDataApi::new();
        api.reject_inserts("privacy_deposits", "quota exceeded");

        let err = api
            .insert("privacy_deposits", json!({}))
            .await
            .unwrap_err();
        assert_eq!(err.detail(), "quota exceeded");
        assert!(api.rows("privacy_deposits").is_empty());
    }

    #[tokio::test]
    async fn test_offline_store_fails() {
        let api = InMemoryDataApi::new();
        api.set_offline(true);

        assert!(matches!(api.ready(), Err(DataApiError::MissingCredentials)));
        assert!(api.select("ai_agents", &[]).await.is_err());

        api.set_offline(false);
        assert!(api.ready().is_ok());
    }

    #[tokio::test]
    async fn test_unknown_table_is_empty() {
        let api = InMemoryDataApi::new();
        assert!(api.select("nothing", &[]).await.unwrap().is_empty());
    }
}
