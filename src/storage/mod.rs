//! Durable key-value slots and the ledger persistence gateway on top of them.

pub mod gateway;
pub mod json_backend;
pub mod memory;

use crate::errors::Result;

/// Minimal durable key-value contract: whole values, read and overwritten atomically.
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `None` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;
    /// Replaces the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;
    /// Deletes `key`; removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

pub use gateway::{LedgerStore, STORAGE_KEY};
pub use json_backend::{write_atomic, JsonFileStore};
pub use memory::MemoryStore;
