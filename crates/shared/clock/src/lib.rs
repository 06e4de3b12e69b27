//! Umbra Clock Infrastructure
//!
//! Provides time abstractions for live runs and tests:
//!
//! - [`SystemClock`] returns wall-clock time.
//! - [`WorldClock`] is a frozen simulation clock moved by hand.
//!
//! ## Usage
//!
//! ```ignore
//! use umbra_clock::WorldClock;
//! use chrono::Duration;
//!
//! let world = WorldClock::fixed(None);
//! world.advance(Duration::seconds(2)); // Jump forward one feed tick
//! ```

mod system;
mod world;

pub use system::SystemClock;
pub use world::WorldClock;

// Re-export the Clock trait for convenience
pub use umbra_ports::Clock;
