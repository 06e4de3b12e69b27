use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::agent::Agent;

/// Header figures of the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_value: Decimal,
    pub average_apy: Decimal,
    pub active_agents: usize,
    pub privacy_status: String,
}

impl Default for PortfolioSummary {
    fn default() -> Self {
        Self {
            total_value: Decimal::ZERO,
            average_apy: Decimal::ZERO,
            active_agents: 0,
            privacy_status: "Protected".to_string(),
        }
    }
}

impl PortfolioSummary {
    /// Build the summary for a set of running agents
    pub fn for_agents(total_value: Decimal, agents: &[Agent]) -> Self {
        Self {
            total_value,
            average_apy: average_apy(agents),
            active_agents: agents.len(),
            privacy_status: "Maximum".to_string(),
        }
    }
}

/// Mean of the agents' average APY, two decimal places; zero for no agents
pub fn average_apy(agents: &[Agent]) -> Decimal {
    if agents.is_empty() {
        return dec!(0);
    }
    let total: Decimal = agents
        .iter()
        .map(|a| a.performance_metrics.average_apy)
        .sum();
    (total / Decimal::from(agents.len())).round_dp(2)
}
