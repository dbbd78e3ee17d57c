//! # Store Error Types
//!
//! Error types for storage, persistence and configuration.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / quota / lock poisoning                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StorageError ──────────┐                                               │
//! │                         ▼                                               │
//! │  serde_json::Error ──► PersistenceError                                 │
//! │                         │                                               │
//! │                         ▼                                               │
//! │  CartStore: logged, swallowed. The in-memory cart stays authoritative.  │
//! │                                                                         │
//! │  toml / io ─────────► ConfigError ──► returned to the host at startup   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use storefront_core::ValidationError;
use thiserror::Error;

// =============================================================================
// Storage Error
// =============================================================================

/// Key-value slot read/write failures.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("I/O error on slot '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The write would exceed the storage quota.
    ///
    /// ## When This Occurs
    /// - A very large cart in a size-limited store
    /// - Other slots already using most of the quota
    #[error("Storage quota exceeded writing '{key}': need {needed} bytes, quota is {quota}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },

    /// The backend cannot be used at all right now.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// The slot key is unusable.
    #[error("Invalid storage key: {0}")]
    InvalidKey(#[from] ValidationError),
}

impl StorageError {
    pub fn io(key: impl Into<String>, source: std::io::Error) -> Self {
        StorageError::Io {
            key: key.into(),
            source,
        }
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

// =============================================================================
// Persistence Error
// =============================================================================

/// Cart record encode/decode failures.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The stored record is not valid JSON, or the cart could not be encoded.
    #[error("Cart record is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The stored record is valid JSON but not an array of line items.
    #[error("Cart record is a JSON {found}, expected an array")]
    NotACollection { found: &'static str },
}

/// Result type for persistence operations.
pub type PersistenceResult<T> = Result<T, PersistenceError>;

// =============================================================================
// Config Error
// =============================================================================

/// Configuration load/save failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The configuration parsed but holds unusable values.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_message() {
        let err = StorageError::QuotaExceeded {
            key: "cart".to_string(),
            needed: 6000,
            quota: 5000,
        };
        assert_eq!(
            err.to_string(),
            "Storage quota exceeded writing 'cart': need 6000 bytes, quota is 5000"
        );
    }

    #[test]
    fn test_storage_error_is_transparent_in_persistence() {
        let err: PersistenceError = StorageError::Unavailable("disabled".to_string()).into();
        assert_eq!(err.to_string(), "Storage unavailable: disabled");
    }

    #[test]
    fn test_not_a_collection_message() {
        let err = PersistenceError::NotACollection { found: "object" };
        assert_eq!(err.to_string(), "Cart record is a JSON object, expected an array");
    }
}
