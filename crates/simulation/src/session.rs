//! Ticker lifecycle of one view
//!
//! Tickers run iff the view is mounted and not loading. Every change to
//! either flag starts or stops the whole set at once.

use std::sync::Arc;
use std::time::Duration;

use crate::scheduler::{Scheduler, TickHandle};

type TickFn = Arc<dyn Fn() + Send + Sync + 'static>;

struct Ticker {
    name: String,
    period: Duration,
    tick: TickFn,
}

pub struct FeedSession<S: Scheduler> {
    scheduler: S,
    tickers: Vec<Ticker>,
    handles: Vec<TickHandle>,
    mounted: bool,
    loading: bool,
}

impl<S: Scheduler> FeedSession<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            tickers: Vec::new(),
            handles: Vec::new(),
            mounted: false,
            loading: false,
        }
    }

    /// Add a ticker, replacing any ticker with the same name.
    ///
    /// A running ticker of that name is restarted with the new closure.
    pub fn register<F>(&mut self, name: &str, period: Duration, tick: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.stop_one(name);
        self.tickers.retain(|t| t.name != name);

        let ticker = Ticker {
            name: name.to_string(),
            period,
            tick: Arc::new(tick),
        };
        if self.is_running() {
            let handle = self.start(&ticker);
            self.handles.push(handle);
        }
        self.tickers.push(ticker);
    }

    pub fn mount(&mut self) {
        self.mounted = true;
        self.sync();
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
        self.sync();
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        self.sync();
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_running(&self) -> bool {
        self.mounted && !self.loading
    }

    /// Names of tickers currently scheduled
    pub fn running(&self) -> Vec<&str> {
        self.handles
            .iter()
            .filter(|h| h.is_active())
            .map(|h| h.name())
            .collect()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    fn sync(&mut self) {
        if !self.is_running() {
            if !self.handles.is_empty() {
                log::debug!("Stopping {} tickers", self.handles.len());
            }
            // Dropping a handle cancels it
            self.handles.clear();
            return;
        }

        if self.handles.is_empty() {
            self.handles = self.tickers.iter().map(|t| self.start(t)).collect();
        }
    }

    fn start(&self, ticker: &Ticker) -> TickHandle {
        let tick = ticker.tick.clone();
        self.scheduler
            .schedule(&ticker.name, ticker.period, Box::new(move || tick()))
    }

    fn stop_one(&mut self, name: &str) {
        self.handles.retain(|h| h.name() != name);
    }
}
