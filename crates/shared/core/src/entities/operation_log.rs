use serde::{Deserialize, Serialize};

/// Severity of an agent operation log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogKind {
    Info,
    Success,
    Warning,
}

/// One line of the marketplace "live operations" log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationLog {
    /// Monotonic id within one feed
    pub id: u64,
    pub agent_name: String,
    pub action: String,
    /// Profit label for success entries, e.g. `+$124.50`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profit: Option<String>,
    #[serde(rename = "type")]
    pub kind: LogKind,
    /// Wall-clock time, `HH:MM:SS`
    pub timestamp: String,
}
