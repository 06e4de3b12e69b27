use chrono::Utc;
use umbra_core::Timestamp;
use umbra_ports::Clock;

/// Wall clock used by the CLI and the gateway server
///
/// Feeds stamped with this clock show real local activity; tests use
/// [`WorldClock`](crate::WorldClock) instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }

    fn name(&self) -> &str {
        "SystemClock"
    }
}
