//! Live mixing activity of the privacy pools page

use umbra_core::{PoolCounters, Timestamp, Transaction, TransactionStatus, TransactionType};

use super::{FeedWindow, TransactionFeed};
use crate::config::FeedConfig;

/// Deposits entering the pool, plus the counters they move
///
/// Every injected record is a successful deposit; each one grows the pool
/// by its USD value and adds one mixer and one member to the anonymity set.
pub struct PoolMixFeed {
    deposits: TransactionFeed,
    counters: PoolCounters,
}

impl PoolMixFeed {
    pub fn new(config: FeedConfig) -> Self {
        Self::from_feed(TransactionFeed::new(config))
    }

    pub fn with_seed(config: FeedConfig, seed: u64) -> Self {
        Self::from_feed(TransactionFeed::with_seed(config, seed))
    }

    fn from_feed(feed: TransactionFeed) -> Self {
        Self {
            deposits: feed.forcing(
                Some(TransactionType::Deposit),
                Some(TransactionStatus::Success),
            ),
            counters: PoolCounters::default(),
        }
    }

    pub fn seed_history(&mut self, count: usize, now: Timestamp) {
        self.deposits.seed_history(count, now);
    }

    pub fn tick(&mut self, now: Timestamp) -> Option<Transaction> {
        let deposit = self.deposits.tick(now)?;
        self.counters.record_deposit(deposit.amount);
        Some(deposit)
    }

    pub fn counters(&self) -> &PoolCounters {
        &self.counters
    }

    pub fn window(&self) -> &FeedWindow<Transaction> {
        self.deposits.window()
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.deposits.transactions()
    }
}
