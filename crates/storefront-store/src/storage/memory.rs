//! In-memory storage backend.
//!
//! Clones share the same slots, so a test can hand one handle to a
//! `CartStore` and inspect what was written through another.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::KeyValueStorage;
use crate::error::{StorageError, StorageResult};

#[derive(Debug, Default)]
struct Slots {
    values: HashMap<String, String>,
    /// Byte budget over all keys and values, like a browser's storage quota.
    quota: Option<usize>,
    unavailable: bool,
}

impl Slots {
    fn used_bytes_without(&self, key: &str) -> usize {
        self.values
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

/// A `HashMap`-backed slot store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: Arc<Mutex<Slots>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that rejects writes once `bytes` would be exceeded.
    pub fn with_quota(bytes: usize) -> Self {
        let storage = Self::default();
        storage.set_quota(Some(bytes));
        storage
    }

    /// Changes the quota on every handle sharing these slots.
    pub fn set_quota(&self, bytes: Option<usize>) {
        if let Ok(mut slots) = self.slots.lock() {
            slots.quota = bytes;
        }
    }

    /// Makes every call fail with `Unavailable` (e.g. storage disabled by
    /// the browser) until switched back.
    pub fn set_unavailable(&self, unavailable: bool) {
        if let Ok(mut slots) = self.slots.lock() {
            slots.unavailable = unavailable;
        }
    }

    /// Writes a raw value directly, bypassing quota and availability.
    pub fn seed(&self, key: &str, value: &str) {
        if let Ok(mut slots) = self.slots.lock() {
            slots.values.insert(key.to_string(), value.to_string());
        }
    }

    /// Reads a raw value directly, bypassing availability.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.slots
            .lock()
            .ok()
            .and_then(|slots| slots.values.get(key).cloned())
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, Slots>> {
        let slots = self
            .slots
            .lock()
            .map_err(|_| StorageError::Unavailable("memory storage lock poisoned".to_string()))?;

        if slots.unavailable {
            return Err(StorageError::Unavailable("memory storage disabled".to_string()));
        }
        Ok(slots)
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.lock()?.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let mut slots = self.lock()?;

        if let Some(quota) = slots.quota {
            let needed = slots.used_bytes_without(key) + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    quota,
                });
            }
        }

        slots.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.lock()?.values.remove(key);
        Ok(())
    }
}
