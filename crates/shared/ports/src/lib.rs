//! Umbra Ports
//!
//! Port definitions (traits) for the Umbra simulation.
//! These define the boundaries between domain logic and infrastructure.

mod clock;
mod error;
mod storage;

pub use clock::Clock;
pub use error::{StorageError, StorageResult};
pub use storage::KeyValueStore;
