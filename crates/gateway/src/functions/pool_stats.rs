use serde_json::Value;
use std::sync::Arc;
use umbra_core::{PoolStatistics, privacy_score};

use super::{MAIN_POOL, count_field, decimal_field};
use crate::data_api::{DataApi, Filter, Row};
use crate::error::{FunctionError, Result};

/// Reports the main pool, or fixed figures while none is recorded
pub struct GetPoolStatsUseCase<D: DataApi> {
    data_api: Arc<D>,
}

impl<D: DataApi> GetPoolStatsUseCase<D> {
    pub fn new(data_api: Arc<D>) -> Self {
        Self { data_api }
    }

    pub async fn execute(&self) -> Result<PoolStatistics> {
        let pools = self
            .data_api
            .select("pool_statistics", &[Filter::eq("pool_type", MAIN_POOL)])
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Pool statistics query failed");
                FunctionError::PoolStatisticsUnavailable
            })?;

        Ok(match pools.first() {
            Some(pool) => statistics(pool),
            None => PoolStatistics::fallback(),
        })
    }
}

fn statistics(pool: &Row) -> PoolStatistics {
    let total_pool_size = decimal_field(pool, "total_pool_size");
    let active_mixers = count_field(pool, "active_mixers");
    let anonymity_set = count_field(pool, "anonymity_set");

    PoolStatistics {
        total_pool_size,
        active_mixers,
        anonymity_set,
        total_deposits: count_field(pool, "total_deposits"),
        total_withdrawals: count_field(pool, "total_withdrawals"),
        privacy_score: privacy_score(total_pool_size, active_mixers, anonymity_set),
        updated_at: pool.get("updated_at").and_then(Value::as_str).map(str::to_string),
    }
}
