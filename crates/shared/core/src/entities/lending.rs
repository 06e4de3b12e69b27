use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the simulated lending market table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LendingMarket {
    pub asset: String,
    /// Supply APY percentage
    pub supply_apy: Decimal,
    /// Borrow APY percentage
    pub borrow_apy: Decimal,
    /// Total supplied, in millions of USD
    pub total_supplied: Decimal,
    /// Utilization percentage
    pub utilization: u32,
}
