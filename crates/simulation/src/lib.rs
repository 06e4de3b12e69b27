//! Umbra Simulation
//!
//! Mock data layer of the Umbra privacy DeFi concept.
//!
//! # Architecture
//!
//! - **Generators**: randomized but schema-valid agents, transactions and
//!   lending markets
//! - **Store**: the agent catalog, persisted through an injected
//!   [`KeyValueStore`](umbra_ports::KeyValueStore)
//! - **Feeds**: bounded most-recent-first windows advanced tick by tick
//! - **Schedulers**: drive feed ticks from tokio timers or virtual time
//! - **Views**: one per page, tying feeds to a mount/loading lifecycle
//!
//! # Example
//!
//! ```ignore
//! use umbra_sim::{InMemoryStorage, SimulationStore};
//! use umbra_clock::SystemClock;
//!
//! let store = SimulationStore::new(InMemoryStorage::new(), SystemClock);
//! let state = store.load()?;
//! store.activate("agent-4")?;
//! ```

pub mod config;
pub mod error;
pub mod feed;
pub mod generators;
pub mod scheduler;
pub mod session;
pub mod storage;
pub mod store;
pub mod views;

pub use config::{ConfigError, DEFAULT_STORAGE_KEY, FeedConfig, SimulationConfig};
pub use error::{Result, SimulationError};
pub use feed::{
    FeedWindow, LendingMarketTicker, OperationLogFeed, PoolMixFeed, PriceTicker, TransactionFeed,
};
pub use scheduler::{IntervalScheduler, ManualScheduler, Scheduler, TickHandle};
pub use session::FeedSession;
pub use storage::{FileStorage, InMemoryStorage};
pub use store::{Activation, SimulationStore};
pub use views::{AgentFilter, DashboardView, DefiView, MarketplaceView, PoolsView};
