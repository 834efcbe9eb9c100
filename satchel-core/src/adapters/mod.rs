//! Concrete implementations of the core ports

pub mod json_store;
pub mod memory;

pub use json_store::JsonFileStore;
pub use memory::{CollectingNotifier, MemoryStore};
