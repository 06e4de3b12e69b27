use serde::{Deserialize, Serialize};

/// Category of agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentType {
    Strategy,
    RiskManagement,
    Arbitrage,
    Liquidity,
    Privacy,
}

impl AgentType {
    pub const ALL: [AgentType; 5] = [
        AgentType::Strategy,
        AgentType::RiskManagement,
        AgentType::Arbitrage,
        AgentType::Liquidity,
        AgentType::Privacy,
    ];

    /// Wire name, identical to the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentType::Strategy => "strategy",
            AgentType::RiskManagement => "risk_management",
            AgentType::Arbitrage => "arbitrage",
            AgentType::Liquidity => "liquidity",
            AgentType::Privacy => "privacy",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

impl std::fmt::Display for AgentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-specific capability payload of an agent
///
/// Each variant carries the attributes that make sense for one [`AgentType`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Capabilities {
    Strategy {
        strategies: Vec<String>,
        risk: String,
    },
    #[serde(rename_all = "camelCase")]
    RiskManagement {
        monitoring: String,
        reaction_time: String,
    },
    Arbitrage {
        exchanges: Vec<String>,
        speed: String,
    },
    Liquidity {
        protocols: Vec<String>,
        rebalancing: String,
    },
    Privacy {
        features: Vec<String>,
    },
}

impl Capabilities {
    /// The agent type this payload belongs to
    pub fn agent_type(&self) -> AgentType {
        match self {
            Capabilities::Strategy { .. } => AgentType::Strategy,
            Capabilities::RiskManagement { .. } => AgentType::RiskManagement,
            Capabilities::Arbitrage { .. } => AgentType::Arbitrage,
            Capabilities::Liquidity { .. } => AgentType::Liquidity,
            Capabilities::Privacy { .. } => AgentType::Privacy,
        }
    }

    pub fn strategies(&self) -> Option<&[String]> {
        match self {
            Capabilities::Strategy { strategies, .. } => Some(strategies),
            _ => None,
        }
    }

    pub fn exchanges(&self) -> Option<&[String]> {
        match self {
            Capabilities::Arbitrage { exchanges, .. } => Some(exchanges),
            _ => None,
        }
    }

    pub fn protocols(&self) -> Option<&[String]> {
        match self {
            Capabilities::Liquidity { protocols, .. } => Some(protocols),
            _ => None,
        }
    }

    pub fn features(&self) -> Option<&[String]> {
        match self {
            Capabilities::Privacy { features } => Some(features),
            _ => None,
        }
    }

    /// Declared risk appetite (strategy agents only)
    pub fn risk(&self) -> Option<&str> {
        match self {
            Capabilities::Strategy { risk, .. } => Some(risk),
            _ => None,
        }
    }

    /// Free-form list of every attribute, for display
    pub fn labels(&self) -> Vec<String> {
        match self {
            Capabilities::Strategy { strategies, risk } => {
                let mut labels = strategies.clone();
                labels.push(format!("Risk: {}", risk));
                labels
            }
            Capabilities::RiskManagement {
                monitoring,
                reaction_time,
            } => vec![
                format!("Monitoring: {}", monitoring),
                format!("Reaction: {}", reaction_time),
            ],
            Capabilities::Arbitrage { exchanges, speed } => {
                let mut labels = exchanges.clone();
                labels.push(format!("Speed: {}", speed));
                labels
            }
            Capabilities::Liquidity {
                protocols,
                rebalancing,
            } => {
                let mut labels = protocols.clone();
                labels.push(format!("Rebalancing: {}", rebalancing));
                labels
            }
            Capabilities::Privacy { features } => features.clone(),
        }
    }
}
