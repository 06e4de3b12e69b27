use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::values::{Amount, SIMULATED_ETH_PRICE};

/// Running counters displayed on the privacy pools page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolCounters {
    /// Total pool size in USD
    pub total_pool_size: Decimal,
    pub active_mixers: u64,
    pub anonymity_set: u64,
}

impl Default for PoolCounters {
    fn default() -> Self {
        Self {
            total_pool_size: dec!(12_450_000),
            active_mixers: 128,
            anonymity_set: 4_500,
        }
    }
}

impl PoolCounters {
    /// Account for one mixed deposit of `amount` ETH
    pub fn record_deposit(&mut self, amount: Amount) {
        self.total_pool_size += amount * SIMULATED_ETH_PRICE;
        self.active_mixers += 1;
        self.anonymity_set += 1;
    }

    pub fn privacy_score(&self) -> u32 {
        privacy_score(self.total_pool_size, self.active_mixers, self.anonymity_set)
    }
}

/// Aggregate statistics of the main privacy pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolStatistics {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_pool_size: Decimal,
    pub active_mixers: u64,
    pub anonymity_set: u64,
    pub total_deposits: u64,
    pub total_withdrawals: u64,
    pub privacy_score: u32,
    /// Last update exactly as the data API stored it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl PoolStatistics {
    /// Figures reported when no pool has been recorded yet
    pub fn fallback() -> Self {
        Self {
            total_pool_size: dec!(52_000_000),
            active_mixers: 2_345,
            anonymity_set: 10_000,
            total_deposits: 15_420,
            total_withdrawals: 12_350,
            privacy_score: 85,
            updated_at: None,
        }
    }
}

/// Privacy score out of 100.
///
/// Pool size contributes up to 40 points (saturating at 100M USD), active
/// mixers up to 30 (at 5,000) and the anonymity set up to 30 (at 20,000).
pub fn privacy_score(total_pool_size: Decimal, active_mixers: u64, anonymity_set: u64) -> u32 {
    let size = (total_pool_size / dec!(100_000_000) * dec!(40)).min(dec!(40));
    let mixers = (Decimal::from(active_mixers) / dec!(5_000) * dec!(30)).min(dec!(30));
    let anonymity = (Decimal::from(anonymity_set) / dec!(20_000) * dec!(30)).min(dec!(30));

    (size + mixers + anonymity)
        .max(Decimal::ZERO)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(0)
}
