use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::capabilities::{AgentType, Capabilities};
use crate::values::AgentId;

/// Trust classification of an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustModel {
    Trustless,
    Verified,
    Community,
}

/// How an agent is billed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingModel {
    Free,
    Subscription,
    Performance,
    OneTime,
}

/// Agent lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    /// Agent is executing
    Active,
    /// Agent is deployed but not executing
    Idle,
    /// Agent is still being trained
    Training,
}

impl AgentStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, AgentStatus::Active)
    }
}

/// Performance metrics reported for an agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    /// Total executions; only ever increases
    pub total_executions: u64,
    /// Success rate as a percentage (0-100)
    pub success_rate: Decimal,
    /// Average yield percentage
    pub average_apy: Decimal,
    /// Total value under management in USD
    pub total_value_locked: u64,
}

/// A simulated autonomous strategy entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub description: String,
    pub agent_type: AgentType,
    pub capabilities: Capabilities,
    pub reputation_score: u32,
    pub performance_metrics: PerformanceMetrics,
    /// Simulated proof commitment (`0x` + 64 hex chars)
    pub zk_proof_commitment: String,
    pub trust_model: TrustModel,
    pub pricing_model: PricingModel,
    pub status: AgentStatus,
}

impl Agent {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Mark the agent active and count one more execution.
    ///
    /// Not idempotent: every call adds exactly one execution, even when the
    /// agent is already active.
    pub fn record_activation(&mut self) {
        self.status = AgentStatus::Active;
        self.performance_metrics.total_executions =
            self.performance_metrics.total_executions.saturating_add(1);
    }

    /// Case-insensitive match of `query` against the name or the type name.
    /// The query is trimmed; an empty query matches everything.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&query) || self.agent_type.as_str().contains(&query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_agent(status: AgentStatus) -> Agent {
        Agent {
            id: "agent-9".to_string(),
            name: "Arbitrage Hunter".to_string(),
            description: "test".to_string(),
            agent_type: AgentType::Arbitrage,
            capabilities: Capabilities::Arbitrage {
                exchanges: vec!["Uniswap".to_string()],
                speed: "<50ms".to_string(),
            },
            reputation_score: 92,
            performance_metrics: PerformanceMetrics {
                total_executions: 10,
                success_rate: dec!(90.5),
                average_apy: dec!(33.3),
                total_value_locked: 1_000,
            },
            zk_proof_commitment: "0x00".to_string(),
            trust_model: TrustModel::Community,
            pricing_model: PricingModel::Performance,
            status,
        }
    }

    #[test]
    fn test_record_activation_counts_every_call() {
        let mut agent = sample_agent(AgentStatus::Idle);

        agent.record_activation();
        assert!(agent.is_active());
        assert_eq!(agent.performance_metrics.total_executions, 11);

        agent.record_activation();
        assert_eq!(agent.performance_metrics.total_executions, 12);
    }

    #[test]
    fn test_matches_query() {
        let agent = sample_agent(AgentStatus::Active);

        assert!(agent.matches_query(""));
        assert!(agent.matches_query("  HUNTER "));
        assert!(agent.matches_query("arbitrage"));
        assert!(!agent.matches_query("privacy"));
    }

    #[test]
    fn test_serialized_shape() {
        let agent = sample_agent(AgentStatus::Training);
        let json = serde_json::to_value(&agent).unwrap();

        assert_eq!(json["agent_type"], "arbitrage");
        assert_eq!(json["trust_model"], "community");
        assert_eq!(json["status"], "training");
        assert_eq!(json["performance_metrics"]["totalExecutions"], 10);
        assert!(json["performance_metrics"].get("successRate").is_some());
    }
}
