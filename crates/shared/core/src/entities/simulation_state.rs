use serde::{Deserialize, Serialize};

use super::agent::Agent;

/// Durable state of the simulation: the agent catalog plus a write stamp
///
/// Serialized as `{"agents": [...], "lastUpdated": <unix millis>}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationState {
    pub agents: Vec<Agent>,
    /// Unix timestamp in milliseconds of the last write
    pub last_updated: i64,
}

impl SimulationState {
    pub fn new(agents: Vec<Agent>, last_updated: i64) -> Self {
        Self {
            agents,
            last_updated,
        }
    }

    pub fn agent(&self, agent_id: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == agent_id)
    }

    pub fn agent_mut(&mut self, agent_id: &str) -> Option<&mut Agent> {
        self.agents.iter_mut().find(|a| a.id == agent_id)
    }

    /// Agents with status `active`, catalog order preserved
    pub fn active_agents(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter().filter(|a| a.is_active())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
