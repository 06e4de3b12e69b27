use chrono::{Duration, Utc};
use parking_lot::RwLock;
use std::sync::Arc;
use umbra_core::Timestamp;
use umbra_ports::Clock;

/// Controllable simulation clock
///
/// Time stands still until it is moved through [`advance`](Self::advance)
/// or [`set_time`](Self::set_time). Feed schedulers driven by tests move
/// this clock tick by tick, so every record a feed stamps carries the
/// tick's virtual time.
#[derive(Debug)]
pub struct WorldClock {
    now: RwLock<Timestamp>,
}

impl WorldClock {
    /// Create a frozen clock
    ///
    /// # Arguments
    /// * `initial_time` - Optional starting time. If None, uses current wall time.
    pub fn fixed(initial_time: Option<Timestamp>) -> Arc<Self> {
        Arc::new(Self {
            now: RwLock::new(initial_time.unwrap_or_else(Utc::now)),
        })
    }

    /// Move simulated time forward by `duration`
    pub fn advance(&self, duration: Duration) {
        *self.now.write() += duration;
    }

    /// Explicitly set the simulation time
    ///
    /// Warning: This can move time backwards. Use with caution.
    pub fn set_time(&self, time: Timestamp) {
        *self.now.write() = time;
    }
}

impl Clock for WorldClock {
    fn now(&self) -> Timestamp {
        *self.now.read()
    }

    fn name(&self) -> &str {
        "WorldClock"
    }
}
