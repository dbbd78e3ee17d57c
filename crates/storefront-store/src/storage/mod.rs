//! # Storage Backends
//!
//! The cart lives in a single durable key-value slot. Backends implement
//! [`KeyValueStorage`] and are injected into the store, so tests run against
//! memory and the host app against disk.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       KeyValueStorage                                   │
//! │                 get(key) / set(key, value) / remove(key)                │
//! │                                                                         │
//! │        ┌──────────────────────┐        ┌──────────────────────┐         │
//! │        │    MemoryStorage     │        │     FileStorage      │         │
//! │        │  shared HashMap      │        │  <dir>/<key>.json    │         │
//! │        │  optional quota      │        │  atomic rename       │         │
//! │        └──────────────────────┘        └──────────────────────┘         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All calls are synchronous and run to completion.

mod file;
mod memory;

pub use file::FileStorage;
pub(crate) use file::default_data_dir;
pub use memory::MemoryStorage;

use crate::error::StorageResult;

/// A durable string-to-string slot store.
pub trait KeyValueStorage {
    /// Reads a slot. A missing slot is `Ok(None)`, not an error.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Writes a slot, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Deletes a slot. Deleting a missing slot succeeds.
    fn remove(&mut self, key: &str) -> StorageResult<()>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for Box<S> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}
