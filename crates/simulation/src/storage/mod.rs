//! Storage backends for the simulation state

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::InMemoryStorage;
