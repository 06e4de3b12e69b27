use chrono::SecondsFormat;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use umbra_ports::Clock;

use super::present;
use crate::data_api::{DataApi, Filter, Row};
use crate::error::{FunctionError, Result};

/// Body of `activate-agent`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivateAgentCommand {
    #[serde(default)]
    pub user_wallet: Option<String>,
    #[serde(default)]
    pub agent_id: Option<String>,
}

/// Outcome of an activation request
#[derive(Debug, Clone, PartialEq)]
pub enum AgentActivation {
    /// The wallet already had this agent active; carries the existing row
    AlreadyActive(Row),
    Activated { activation: Row, agent: Row },
}

impl AgentActivation {
    pub fn message(&self) -> &'static str {
        match self {
            AgentActivation::AlreadyActive(_) => "Agent already activated",
            AgentActivation::Activated { .. } => "Agent activated successfully",
        }
    }

    /// Response `data` payload
    pub fn data(&self) -> Value {
        match self {
            AgentActivation::AlreadyActive(existing) => existing.clone(),
            AgentActivation::Activated { activation, agent } => {
                json!({ "activation": activation, "agent": agent })
            }
        }
    }
}

/// Records that a wallet activated a catalog agent
pub struct ActivateAgentUseCase<D: DataApi, C: Clock> {
    data_api: Arc<D>,
    clock: Arc<C>,
}

impl<D: DataApi, C: Clock> ActivateAgentUseCase<D, C> {
    pub fn new(data_api: Arc<D>, clock: Arc<C>) -> Self {
        Self { data_api, clock }
    }

    pub async fn execute(&self, command: ActivateAgentCommand) -> Result<AgentActivation> {
        let (Some(user_wallet), Some(agent_id)) =
            (present(&command.user_wallet), present(&command.agent_id))
        else {
            return Err(FunctionError::MissingParameters("userWallet and agentId"));
        };

        let agent = self
            .data_api
            .select("ai_agents", &[Filter::eq("id", agent_id)])
            .await?
            .into_iter()
            .next()
            .ok_or(FunctionError::AgentNotFound)?;

        let existing = self
            .data_api
            .select(
                "user_agents",
                &[
                    Filter::eq("user_wallet", user_wallet),
                    Filter::eq("agent_id", agent_id),
                    Filter::eq("status", "active"),
                ],
            )
            .await?;
        if let Some(row) = existing.into_iter().next() {
            tracing::debug!(agent_id, user_wallet, "Agent already active for wallet");
            return Ok(AgentActivation::AlreadyActive(row));
        }

        let row = json!({
            "user_wallet": user_wallet,
            "agent_id": agent_id,
            "status": "active",
            "activated_at": self.clock.now().to_rfc3339_opts(SecondsFormat::Millis, true),
        });
        let activation = self
            .data_api
            .insert("user_agents", row)
            .await
            .map_err(|e| FunctionError::downstream("Failed to activate agent", e))?
            .into_iter()
            .next()
            .unwrap_or(Value::Null);

        self.count_execution(agent_id, &agent).await;

        tracing::info!(agent_id, user_wallet, "Agent activated");
        Ok(AgentActivation::Activated { activation, agent })
    }

    /// Bump `performance_metrics.totalExecutions`, keeping the other metrics
    async fn count_execution(&self, agent_id: &str, agent: &Row) {
        let mut metrics = agent
            .get("performance_metrics")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        let executions = metrics
            .get("totalExecutions")
            .and_then(Value::as_u64)
            .unwrap_or(0);
        metrics.insert("totalExecutions".to_string(), json!(executions + 1));

        if let Err(e) = self
            .data_api
            .update(
                "ai_agents",
                &[Filter::eq("id", agent_id)],
                json!({ "performance_metrics": metrics }),
            )
            .await
        {
            tracing::warn!(agent_id, error = %e, "Failed to update agent executions");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_api::InMemoryDataApi;
    use umbra_clock::SystemClock;

    fn setup() -> (Arc<InMemoryDataApi>, ActivateAgentUseCase<InMemoryDataApi, SystemClock>) {
        let api = Arc::new(InMemoryDataApi::new());
        api.seed(
            "ai_agents",
            vec![json!({
                "id": "agent-4",
                "name": "Cross-Chain Bridge Agent",
                "performance_metrics": { "totalExecutions": 12, "successRate": 97.5 }
            })],
        );
        let use_case = ActivateAgentUseCase::new(api.clone(), Arc::new(SystemClock));
        (api, use_case)
    }

    fn command(wallet: &str, agent: &str) -> ActivateAgentCommand {
        ActivateAgentCommand {
            user_wallet: Some(wallet.to_string()),
            agent_id: Some(agent.to_string()),
        }
    }

    #[tokio::test]
    async fn test_activate_records_and_counts() {
        let (api, use_case) = setup();

        let outcome = use_case.execute(command("0xabc", "agent-4")).await.unwrap();

        assert_eq!(outcome.message(), "Agent activated successfully");
        let data = outcome.data();
        assert_eq!(data["activation"]["status"], "active");
        assert_eq!(data["agent"]["id"], "agent-4");

        let agent = &api.rows("ai_agents")[0];
        assert_eq!(agent["performance_metrics"]["totalExecutions"], 13);
        assert_eq!(agent["performance_metrics"]["successRate"], 97.5);
    }

    #[tokio::test]
    async fn test_second_activation_returns_existing() {
        let (api, use_case) = setup();
        use_case.execute(command("0xabc", "agent-4")).await.unwrap();

        let outcome = use_case.execute(command("0xabc", "agent-4")).await.unwrap();

        assert!(matches!(outcome, AgentActivation::AlreadyActive(_)));
        assert_eq!(outcome.message(), "Agent already activated");
        assert_eq!(api.rows("user_agents").len(), 1);
        assert_eq!(api.rows("ai_agents")[0]["performance_metrics"]["totalExecutions"], 13);
    }

    #[tokio::test]
    async fn test_unknown_agent() {
        let (api, use_case) = setup();

        let err = use_case.execute(command("0xabc", "agent-99")).await.unwrap_err();

        assert!(matches!(err, FunctionError::AgentNotFound));
        assert!(api.rows("user_agents").is_empty());
    }

    #[tokio::test]
    async fn test_missing_parameters() {
        let (_, use_case) = setup();

        let err = use_case
            .execute(ActivateAgentCommand {
                user_wallet: Some("0xabc".to_string()),
                agent_id: Some(String::new()),
            })
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Missing required parameters: userWallet and agentId");
    }

    #[tokio::test]
    async fn test_rejected_insert() {
        let (api, use_case) = setup();
        api.reject_inserts("user_agents", "permission denied");

        let err = use_case.execute(command("0xabc", "agent-4")).await.unwrap_err();

        assert_eq!(err.to_string(), "Failed to activate agent: permission denied");
        assert_eq!(api.rows("ai_agents")[0]["performance_metrics"]["totalExecutions"], 12);
    }
}
