//! Agent operation log feed of the marketplace page

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use umbra_core::{LogKind, OperationLog, Timestamp};

use super::{FeedWindow, passes};
use crate::config::FeedConfig;

/// Agent name used when no agents are loaded
pub const SYSTEM_AGENT: &str = "System";

/// Shape of one log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogTemplate {
    pub action: &'static str,
    pub kind: LogKind,
    pub profit: Option<&'static str>,
}

pub const LOG_TEMPLATES: [LogTemplate; 6] = [
    LogTemplate {
        action: "Rebalancing Liquidity Pool",
        kind: LogKind::Info,
        profit: None,
    },
    LogTemplate {
        action: "Harvested Yield",
        kind: LogKind::Success,
        profit: Some("+$124.50"),
    },
    LogTemplate {
        action: "Executed Arbitrage Trade",
        kind: LogKind::Success,
        profit: Some("+$42.10"),
    },
    LogTemplate {
        action: "Detected Slippage Spike",
        kind: LogKind::Warning,
        profit: None,
    },
    LogTemplate {
        action: "Verifying ZK Proof",
        kind: LogKind::Info,
        profit: None,
    },
    LogTemplate {
        action: "Scanning Mempool",
        kind: LogKind::Info,
        profit: None,
    },
];

pub struct OperationLogFeed {
    window: FeedWindow<OperationLog>,
    probability: f64,
    agent_names: Vec<String>,
    next_id: u64,
    rng: StdRng,
}

impl OperationLogFeed {
    pub fn new(config: FeedConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn with_seed(config: FeedConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: FeedConfig, rng: StdRng) -> Self {
        Self {
            window: FeedWindow::new(config.capacity),
            probability: config.probability,
            agent_names: Vec::new(),
            next_id: 1,
            rng,
        }
    }

    /// Names the log attributes actions to
    pub fn set_agents(&mut self, names: Vec<String>) {
        self.agent_names = names;
    }

    pub fn tick(&mut self, now: Timestamp) -> Option<OperationLog> {
        if !passes(&mut self.rng, self.probability) {
            return None;
        }

        let agent_name = self
            .agent_names
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_else(|| SYSTEM_AGENT.to_string());
        let template = LOG_TEMPLATES
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(LOG_TEMPLATES[0]);

        let entry = OperationLog {
            id: self.next_id,
            agent_name,
            action: template.action.to_string(),
            profit: template.profit.map(str::to_string),
            kind: template.kind,
            timestamp: now.format("%H:%M:%S").to_string(),
        };
        self.next_id += 1;

        self.window.push(entry.clone());
        Some(entry)
    }

    pub fn window(&self) -> &FeedWindow<OperationLog> {
        &self.window
    }

    pub fn entries(&self) -> Vec<OperationLog> {
        self.window.to_vec()
    }
}
