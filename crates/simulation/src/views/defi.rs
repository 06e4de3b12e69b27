//! DeFi protocols page

use parking_lot::Mutex;
use std::sync::Arc;
use umbra_core::LendingMarket;

use super::feed_seed;
use crate::config::{FeedConfig, SimulationConfig};
use crate::feed::LendingMarketTicker;
use crate::scheduler::Scheduler;
use crate::session::FeedSession;

pub struct DefiView<S: Scheduler> {
    config: FeedConfig,
    session: FeedSession<S>,
    ticker: Arc<Mutex<LendingMarketTicker>>,
}

impl<S: Scheduler> DefiView<S> {
    pub fn new(scheduler: S, config: &SimulationConfig) -> Self {
        let ticker = match feed_seed(config.seed, 6) {
            Some(seed) => LendingMarketTicker::with_seed(seed),
            None => LendingMarketTicker::new(),
        };

        Self {
            config: config.defi.lending,
            session: FeedSession::new(scheduler),
            ticker: Arc::new(Mutex::new(ticker)),
        }
    }

    pub fn mount(&mut self) {
        let ticker = self.ticker.clone();
        self.session
            .register("defi.lending", self.config.interval(), move || {
                ticker.lock().tick();
            });
        self.session.mount();
    }

    pub fn unmount(&mut self) {
        self.session.unmount();
    }

    pub fn markets(&self) -> Vec<LendingMarket> {
        self.ticker.lock().markets().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualScheduler;
    use std::time::Duration;

    #[test]
    fn test_table_refreshes_while_mounted() {
        let scheduler = Arc::new(ManualScheduler::new());
        let mut config = SimulationConfig::default();
        config.seed = Some(3);
        let mut view = DefiView::new(scheduler.clone(), &config);

        let initial = view.markets();
        scheduler.advance(Duration::from_secs(10));
        assert_eq!(view.markets(), initial);

        view.mount();
        scheduler.advance(Duration::from_millis(5_000));
        let refreshed = view.markets();
        assert_ne!(refreshed, initial);

        view.unmount();
        scheduler.advance(Duration::from_secs(30));
        assert_eq!(view.markets(), refreshed);
    }
}
