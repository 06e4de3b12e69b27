//! Persisted agent catalog
//!
//! The store imitates a backend for agent activation. It holds no cache:
//! every call reads the durable record, applies its change and writes the
//! whole state back. Two processes sharing one storage key therefore race
//! and the last write wins.

use parking_lot::Mutex;
use rand::SeedableRng;
use rand::rngs::StdRng;
use umbra_core::{Agent, SimulationState};
use umbra_ports::{Clock, KeyValueStore};

use crate::config::DEFAULT_STORAGE_KEY;
use crate::error::Result;
use crate::generators::generate_agents;

/// Outcome of [`SimulationStore::activate`]
#[derive(Debug, Clone, PartialEq)]
pub enum Activation {
    /// The agent after activation
    Activated(Agent),
    /// No agent with that id; nothing was written
    NotFound,
}

impl Activation {
    pub fn agent(&self) -> Option<&Agent> {
        match self {
            Activation::Activated(agent) => Some(agent),
            Activation::NotFound => None,
        }
    }
}

pub struct SimulationStore<S: KeyValueStore, C: Clock> {
    storage: S,
    clock: C,
    key: String,
    rng: Mutex<StdRng>,
}

impl<S: KeyValueStore, C: Clock> SimulationStore<S, C> {
    pub fn new(storage: S, clock: C) -> Self {
        Self::with_rng(storage, clock, StdRng::from_entropy())
    }

    /// Store with a deterministic catalog generator
    pub fn with_seed(storage: S, clock: C, seed: u64) -> Self {
        Self::with_rng(storage, clock, StdRng::seed_from_u64(seed))
    }

    fn with_rng(storage: S, clock: C, rng: StdRng) -> Self {
        Self {
            storage,
            clock,
            key: DEFAULT_STORAGE_KEY.to_string(),
            rng: Mutex::new(rng),
        }
    }

    /// Persist under a different key
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Current state, synthesizing and persisting a fresh catalog when the
    /// record is absent or unreadable
    pub fn load(&self) -> Result<SimulationState> {
        if let Some(raw) = self.storage.get(&self.key)? {
            match SimulationState::from_json(&raw) {
                Ok(state) => return Ok(state),
                Err(e) => {
                    log::warn!(
                        "Discarding unreadable simulation state under '{}': {}",
                        self.key,
                        e
                    );
                }
            }
        }

        let agents = generate_agents(&mut *self.rng.lock());
        let state = SimulationState::new(agents, self.clock.now().timestamp_millis());
        self.save(&state)?;
        log::info!(
            "Generated simulation state with {} agents under '{}'",
            state.agents.len(),
            self.key
        );
        Ok(state)
    }

    pub fn list_agents(&self) -> Result<Vec<Agent>> {
        Ok(self.load()?.agents)
    }

    /// Agents with status `active`, in catalog order
    pub fn list_active_agents(&self) -> Result<Vec<Agent>> {
        Ok(self.load()?.active_agents().cloned().collect())
    }

    /// Mark an agent active and count one execution.
    ///
    /// Every call counts, including calls on an already active agent.
    pub fn activate(&self, agent_id: &str) -> Result<Activation> {
        let mut state = self.load()?;

        let Some(agent) = state.agent_mut(agent_id) else {
            log::debug!("Activation of unknown agent '{}'", agent_id);
            return Ok(Activation::NotFound);
        };
        agent.record_activation();
        let activated = agent.clone();

        state.last_updated = self.clock.now().timestamp_millis();
        self.save(&state)?;

        log::info!(
            "Activated {} ({} executions)",
            activated.id,
            activated.performance_metrics.total_executions
        );
        Ok(Activation::Activated(activated))
    }

    /// Drop the durable record; the next load regenerates the catalog
    pub fn reset(&self) -> Result<()> {
        self.storage.delete(&self.key)?;
        log::info!("Reset simulation state under '{}'", self.key);
        Ok(())
    }

    fn save(&self, state: &SimulationState) -> Result<()> {
        let json = state.to_json()?;
        self.storage.set(&self.key, &json)?;
        Ok(())
    }
}
