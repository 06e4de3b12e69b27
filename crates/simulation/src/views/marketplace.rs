//! Agent marketplace: catalog browsing, activation and the live log

use parking_lot::Mutex;
use std::sync::Arc;
use umbra_core::{Agent, AgentType, OperationLog};
use umbra_ports::{Clock, KeyValueStore};

use super::feed_seed;
use crate::config::{FeedConfig, SimulationConfig};
use crate::error::Result;
use crate::feed::OperationLogFeed;
use crate::scheduler::Scheduler;
use crate::session::FeedSession;
use crate::store::{Activation, SimulationStore};

const LOG_TICKER: &str = "marketplace.logs";

/// Agent type selector of the marketplace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AgentFilter {
    #[default]
    All,
    Type(AgentType),
}

impl AgentFilter {
    pub fn matches(&self, agent: &Agent) -> bool {
        match self {
            AgentFilter::All => true,
            AgentFilter::Type(agent_type) => agent.agent_type == *agent_type,
        }
    }

    /// `all` or an agent type name
    pub fn parse(value: &str) -> Option<Self> {
        if value == "all" {
            return Some(AgentFilter::All);
        }
        AgentType::parse(value).map(AgentFilter::Type)
    }
}

pub struct MarketplaceView<K: KeyValueStore, C: Clock, S: Scheduler> {
    store: Arc<SimulationStore<K, C>>,
    session: FeedSession<S>,
    log_config: FeedConfig,
    logs: Arc<Mutex<OperationLogFeed>>,
    agents: Vec<Agent>,
    filter: AgentFilter,
    search: String,
}

impl<K, C, S> MarketplaceView<K, C, S>
where
    K: KeyValueStore + 'static,
    C: Clock + Clone + 'static,
    S: Scheduler,
{
    pub fn new(store: Arc<SimulationStore<K, C>>, scheduler: S, config: &SimulationConfig) -> Self {
        let log_config = config.marketplace.logs;
        let logs = match feed_seed(config.seed, 3) {
            Some(seed) => OperationLogFeed::with_seed(log_config, seed),
            None => OperationLogFeed::new(log_config),
        };

        Self {
            store,
            session: FeedSession::new(scheduler),
            log_config,
            logs: Arc::new(Mutex::new(logs)),
            agents: Vec::new(),
            filter: AgentFilter::All,
            search: String::new(),
        }
    }

    /// Start the log ticker; entries are attributed to `System` until the
    /// catalog is loaded
    pub fn mount(&mut self) {
        self.restart_log_ticker();
        self.session.mount();
    }

    pub fn unmount(&mut self) {
        self.session.unmount();
    }

    pub fn load(&mut self) -> Result<()> {
        self.agents = self.store.list_agents()?;
        self.on_agents_changed();
        Ok(())
    }

    /// Activate through the store and reload the catalog
    pub fn activate(&mut self, agent_id: &str) -> Result<Activation> {
        let outcome = self.store.activate(agent_id)?;
        if let Activation::Activated(_) = &outcome {
            self.load()?;
        }
        Ok(outcome)
    }

    fn on_agents_changed(&mut self) {
        let names = self.agents.iter().map(|a| a.name.clone()).collect();
        self.logs.lock().set_agents(names);
        self.restart_log_ticker();
    }

    fn restart_log_ticker(&mut self) {
        let logs = self.logs.clone();
        let clock = self.store.clock().clone();
        self.session
            .register(LOG_TICKER, self.log_config.interval(), move || {
                logs.lock().tick(clock.now());
            });
    }

    pub fn set_filter(&mut self, filter: AgentFilter) {
        self.filter = filter;
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    /// Catalog after the type filter and the search query
    pub fn visible_agents(&self) -> Vec<&Agent> {
        self.agents
            .iter()
            .filter(|a| self.filter.matches(a))
            .filter(|a| a.matches_query(&self.search))
            .collect()
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn logs(&self) -> Vec<OperationLog> {
        self.logs.lock().entries()
    }

    pub fn session(&self) -> &FeedSession<S> {
        &self.session
    }
}
