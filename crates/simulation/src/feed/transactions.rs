//! Live transaction feed

use rand::SeedableRng;
use rand::rngs::StdRng;
use umbra_core::{Timestamp, Transaction, TransactionStatus, TransactionType};

use super::{FeedWindow, passes};
use crate::config::FeedConfig;
use crate::generators::{generate_transaction, generate_transactions};

/// Window of recent transactions that grows at random
///
/// Each tick passes the probability gate with chance `probability`; a
/// passing tick generates one transaction stamped with the tick time,
/// applies any forced type or status and prepends it.
pub struct TransactionFeed {
    window: FeedWindow<Transaction>,
    probability: f64,
    forced_type: Option<TransactionType>,
    forced_status: Option<TransactionStatus>,
    ticks: u64,
    injected: u64,
    rng: StdRng,
}

impl TransactionFeed {
    pub fn new(config: FeedConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create with a specific seed for reproducible runs
    pub fn with_seed(config: FeedConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: FeedConfig, rng: StdRng) -> Self {
        Self {
            window: FeedWindow::new(config.capacity),
            probability: config.probability,
            forced_type: None,
            forced_status: None,
            ticks: 0,
            injected: 0,
            rng,
        }
    }

    /// Override type and status of every injected transaction
    pub fn forcing(
        mut self,
        tx_type: Option<TransactionType>,
        status: Option<TransactionStatus>,
    ) -> Self {
        self.forced_type = tx_type;
        self.forced_status = status;
        self
    }

    /// Replace the window with `count` bulk transactions from the past week
    pub fn seed_history(&mut self, count: usize, now: Timestamp) {
        let history = generate_transactions(&mut self.rng, count, now);
        self.window.replace(history);
    }

    /// Advance one tick; returns the injected transaction, if any
    pub fn tick(&mut self, now: Timestamp) -> Option<Transaction> {
        self.ticks += 1;
        if !passes(&mut self.rng, self.probability) {
            return None;
        }

        let mut tx = generate_transaction(&mut self.rng, now);
        if let Some(tx_type) = self.forced_type {
            tx.tx_type = tx_type;
        }
        tx.refresh(now, self.forced_status);

        self.injected += 1;
        self.window.push(tx.clone());
        Some(tx)
    }

    pub fn window(&self) -> &FeedWindow<Transaction> {
        &self.window
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.window.to_vec()
    }

    /// Ticks seen so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Ticks that injected a transaction
    pub fn injected(&self) -> u64 {
        self.injected
    }
}
