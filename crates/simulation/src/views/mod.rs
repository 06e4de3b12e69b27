//! Page-level view models
//!
//! Each view owns the feeds of one page and a [`FeedSession`](crate::session::FeedSession)
//! that runs their tickers while the page is mounted.

mod dashboard;
mod defi;
mod marketplace;
mod pools;

pub use dashboard::DashboardView;
pub use defi::DefiView;
pub use marketplace::{AgentFilter, MarketplaceView};
pub use pools::PoolsView;

/// Per-feed seed, so the feeds of one seeded run draw independent streams
pub(crate) fn feed_seed(seed: Option<u64>, salt: u64) -> Option<u64> {
    seed.map(|s| s.wrapping_mul(0x9E37_79B9_7F4A_7C15).wrapping_add(salt))
}
