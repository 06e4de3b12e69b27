//! Privacy pools: live mixing activity and local stealth addresses

use parking_lot::Mutex;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use umbra_core::{PoolCounters, Transaction};
use umbra_ports::Clock;

use super::feed_seed;
use crate::config::{PoolsConfig, SimulationConfig};
use crate::feed::PoolMixFeed;
use crate::generators::generate_stealth_address;
use crate::scheduler::Scheduler;
use crate::session::FeedSession;

/// Pools page. Has no loading phase: the mix feed starts with the mount.
pub struct PoolsView<C: Clock, S: Scheduler> {
    clock: C,
    config: PoolsConfig,
    session: FeedSession<S>,
    mix: Arc<Mutex<PoolMixFeed>>,
    rng: StdRng,
    stealth_address: Option<String>,
}

impl<C, S> PoolsView<C, S>
where
    C: Clock + Clone + 'static,
    S: Scheduler,
{
    pub fn new(clock: C, scheduler: S, config: &SimulationConfig) -> Self {
        let pools = config.pools.clone();
        let mix = match feed_seed(config.seed, 4) {
            Some(seed) => PoolMixFeed::with_seed(pools.mix, seed),
            None => PoolMixFeed::new(pools.mix),
        };
        let rng = match feed_seed(config.seed, 5) {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            clock,
            config: pools,
            session: FeedSession::new(scheduler),
            mix: Arc::new(Mutex::new(mix)),
            rng,
            stealth_address: None,
        }
    }

    pub fn mount(&mut self) {
        self.mix
            .lock()
            .seed_history(self.config.initial_transactions, self.clock.now());

        let mix = self.mix.clone();
        let clock = self.clock.clone();
        self.session
            .register("pools.mix", self.config.mix.interval(), move || {
                mix.lock().tick(clock.now());
            });
        self.session.mount();
    }

    pub fn unmount(&mut self) {
        self.session.unmount();
    }

    /// Draw a fresh one-time address and keep it as the current one
    pub fn generate_stealth_address(&mut self) -> &str {
        let address = generate_stealth_address(&mut self.rng);
        log::debug!("Generated stealth address {}", address);
        self.stealth_address.insert(address)
    }

    pub fn stealth_address(&self) -> Option<&str> {
        self.stealth_address.as_deref()
    }

    pub fn counters(&self) -> PoolCounters {
        self.mix.lock().counters().clone()
    }

    pub fn privacy_score(&self) -> u32 {
        self.mix.lock().counters().privacy_score()
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.mix.lock().transactions()
    }

    pub fn session(&self) -> &FeedSession<S> {
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualScheduler;
    use std::time::Duration;
    use umbra_clock::WorldClock;
    use umbra_core::{TransactionStatus, TransactionType};

    fn view() -> (PoolsView<Arc<WorldClock>, Arc<ManualScheduler>>, Arc<ManualScheduler>) {
        let clock = WorldClock::fixed(None);
        let scheduler = Arc::new(ManualScheduler::with_clock(clock.clone()));
        let mut config = SimulationConfig::default();
        config.seed = Some(21);
        config.pools.mix.probability = 1.0;
        (PoolsView::new(clock, scheduler.clone(), &config), scheduler)
    }

    #[test]
    fn test_mount_seeds_history() {
        let (mut view, _) = view();
        view.mount();
        assert_eq!(view.transactions().len(), 5);
        assert_eq!(view.counters(), PoolCounters::default());
    }

    #[test]
    fn test_mix_ticks_update_counters() {
        let (mut view, scheduler) = view();
        view.mount();

        scheduler.advance(Duration::from_millis(2_500 * 4));

        let txs = view.transactions();
        assert_eq!(txs.len(), 8);
        assert!(txs[..4].iter().all(|t| t.tx_type == TransactionType::Deposit
            && t.status == TransactionStatus::Success));
        let counters = view.counters();
        assert_eq!(counters.active_mixers, 132);
        assert_eq!(counters.anonymity_set, 4_504);
        assert!(counters.total_pool_size > PoolCounters::default().total_pool_size);
    }

    #[test]
    fn test_stealth_address() {
        let (mut view, _) = view();
        assert!(view.stealth_address().is_none());

        let first = view.generate_stealth_address().to_string();
        let second = view.generate_stealth_address().to_string();

        assert_eq!(first.len(), 42);
        assert_ne!(first, second);
        assert_eq!(view.stealth_address(), Some(second.as_str()));
    }
}
