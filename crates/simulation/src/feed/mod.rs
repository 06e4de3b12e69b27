//! Live feeds
//!
//! Each feed is a plain state machine advanced by `tick(now)`. Timers live
//! elsewhere (see [`crate::scheduler`]); views share a feed with its ticker
//! through `Arc<Mutex<_>>`.
//!
//! Every feed owns its random source: `new` draws from entropy and
//! `with_seed` makes a run reproducible.

mod lending;
mod operation_log;
mod pool;
mod price;
mod transactions;
mod window;

pub use lending::LendingMarketTicker;
pub use operation_log::{LOG_TEMPLATES, LogTemplate, OperationLogFeed, SYSTEM_AGENT};
pub use pool::PoolMixFeed;
pub use price::PriceTicker;
pub use transactions::TransactionFeed;
pub use window::FeedWindow;

use rand::Rng;

/// Probability gate shared by the injecting feeds
pub(crate) fn passes<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> bool {
    rng.r#gen::<f64>() < probability
}
