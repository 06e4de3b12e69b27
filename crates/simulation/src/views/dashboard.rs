//! Dashboard: running agents, recent transactions and the portfolio ticker

use parking_lot::Mutex;
use std::sync::Arc;
use umbra_core::{Agent, PortfolioSummary, Transaction};
use umbra_ports::{Clock, KeyValueStore};

use super::feed_seed;
use crate::config::{DashboardConfig, SimulationConfig};
use crate::error::Result;
use crate::feed::{PriceTicker, TransactionFeed};
use crate::scheduler::Scheduler;
use crate::session::FeedSession;
use crate::store::SimulationStore;

pub struct DashboardView<K: KeyValueStore, C: Clock, S: Scheduler> {
    store: Arc<SimulationStore<K, C>>,
    config: DashboardConfig,
    session: FeedSession<S>,
    agents: Vec<Agent>,
    loaded: bool,
    transactions: Arc<Mutex<TransactionFeed>>,
    price: Arc<Mutex<PriceTicker>>,
}

impl<K, C, S> DashboardView<K, C, S>
where
    K: KeyValueStore + 'static,
    C: Clock + Clone + 'static,
    S: Scheduler,
{
    pub fn new(store: Arc<SimulationStore<K, C>>, scheduler: S, config: &SimulationConfig) -> Self {
        let dashboard = config.dashboard.clone();

        let transactions = match feed_seed(config.seed, 1) {
            Some(seed) => TransactionFeed::with_seed(dashboard.transactions, seed),
            None => TransactionFeed::new(dashboard.transactions),
        };
        let price = match feed_seed(config.seed, 2) {
            Some(seed) => PriceTicker::with_seed(dashboard.portfolio_value, seed),
            None => PriceTicker::new(dashboard.portfolio_value),
        };

        let mut view = Self {
            store,
            config: dashboard,
            session: FeedSession::new(scheduler),
            agents: Vec::new(),
            loaded: false,
            transactions: Arc::new(Mutex::new(transactions)),
            price: Arc::new(Mutex::new(price)),
        };
        view.register_tickers();
        view
    }

    fn register_tickers(&mut self) {
        let feed = self.transactions.clone();
        let clock = self.store.clock().clone();
        self.session.register(
            "dashboard.transactions",
            self.config.transactions.interval(),
            move || {
                feed.lock().tick(clock.now());
            },
        );

        let price = self.price.clone();
        self.session
            .register("dashboard.price", self.config.price.interval(), move || {
                price.lock().tick();
            });
    }

    /// Show the page in its loading state; tickers wait for [`load`](Self::load)
    pub fn mount(&mut self) {
        self.session.set_loading(true);
        self.session.mount();
    }

    /// Fetch the running agents and fresh history, then start the tickers
    ///
    /// On failure the view stays in its loading state.
    pub fn load(&mut self) -> Result<()> {
        self.session.set_loading(true);

        let agents: Vec<Agent> = self
            .store
            .list_active_agents()?
            .into_iter()
            .take(self.config.agent_limit)
            .collect();
        let now = self.store.clock().now();

        self.transactions
            .lock()
            .seed_history(self.config.initial_transactions, now);
        self.price.lock().reset(self.config.portfolio_value);
        self.agents = agents;
        self.loaded = true;

        self.session.set_loading(false);
        log::info!("Dashboard loaded with {} running agents", self.agents.len());
        Ok(())
    }

    pub fn unmount(&mut self) {
        self.session.unmount();
    }

    pub fn is_loading(&self) -> bool {
        self.session.is_loading()
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.transactions.lock().transactions()
    }

    pub fn portfolio(&self) -> PortfolioSummary {
        if !self.loaded {
            return PortfolioSummary::default();
        }
        PortfolioSummary::for_agents(self.price.lock().value(), &self.agents)
    }

    pub fn session(&self) -> &FeedSession<S> {
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualScheduler;
    use crate::storage::InMemoryStorage;
    use rust_decimal_macros::dec;
    use std::time::Duration;
    use umbra_clock::WorldClock;

    fn view() -> (
        DashboardView<InMemoryStorage, Arc<WorldClock>, Arc<ManualScheduler>>,
        Arc<ManualScheduler>,
    ) {
        let clock = WorldClock::fixed(None);
        let scheduler = Arc::new(ManualScheduler::with_clock(clock.clone()));
        let store = Arc::new(SimulationStore::with_seed(InMemoryStorage::new(), clock, 5));
        let mut config = SimulationConfig::default();
        config.seed = Some(5);
        config.dashboard.transactions.probability = 1.0;

        (DashboardView::new(store, scheduler.clone(), &config), scheduler)
    }

    #[test]
    fn test_no_ticks_while_loading() {
        let (mut view, scheduler) = view();
        view.mount();

        assert_eq!(scheduler.advance(Duration::from_secs(30)), 0);
        assert!(view.transactions().is_empty());
        assert_eq!(view.portfolio(), PortfolioSummary::default());
    }

    #[test]
    fn test_load_populates_and_starts_tickers() {
        let (mut view, scheduler) = view();
        view.mount();
        view.load().unwrap();

        let ids: Vec<_> = view.agents().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["agent-1", "agent-2", "agent-3"]);
        assert_eq!(view.transactions().len(), 8);

        let portfolio = view.portfolio();
        assert_eq!(portfolio.total_value, dec!(12450.80));
        assert_eq!(portfolio.active_agents, 3);
        assert_eq!(portfolio.privacy_status, "Maximum");

        scheduler.advance(Duration::from_millis(6_000));
        // Three transaction ticks at p = 1, window capped at 10
        assert_eq!(view.transactions().len(), 10);
        assert_ne!(view.portfolio().total_value, dec!(12450.80));
    }

    #[test]
    fn test_injected_transactions_carry_tick_time() {
        let (mut view, scheduler) = view();
        view.mount();
        view.load().unwrap();
        let newest_before = view.transactions()[0].timestamp;

        scheduler.advance(Duration::from_millis(2_000));

        let newest = &view.transactions()[0];
        assert!(newest.timestamp >= newest_before);
        assert_eq!(
            (newest.timestamp - view.store.clock().now()).num_milliseconds(),
            0
        );
    }

    #[test]
    fn test_unmount_freezes_window() {
        let (mut view, scheduler) = view();
        view.mount();
        view.load().unwrap();
        scheduler.advance(Duration::from_millis(2_000));
        let before = view.transactions();

        view.unmount();
        scheduler.advance(Duration::from_secs(60));

        assert_eq!(view.transactions(), before);
    }
}
