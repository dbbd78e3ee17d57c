//! # storefront-store: Cart Store & Persistence
//!
//! The stateful half of the storefront cart. Wraps the pure
//! [`storefront_core::Cart`] in a [`CartStore`] that validates UI input,
//! logs what it rejects, and writes every accepted change to a key-value slot.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           UI screens                                    │
//! │        product tiles · cart page · header badge · checkout              │
//! └───────────────────────────────┬─────────────────────────────────────────┘
//!                                 │ add_to_cart / update_quantity / ...
//!                                 ▼
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CartStore ──► storefront_core::Cart (mutations, invariants)            │
//! │      │    ──► storefront_core::totals (subtotal, tax, shipping, total)  │
//! │      ▼                                                                  │
//! │  CartPersistence ── JSON array ──► KeyValueStorage                      │
//! │                                     ├── MemoryStorage                   │
//! │                                     └── FileStorage (<dir>/<key>.json)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use storefront_core::{Money, Price, Product, ProductId};
//! use storefront_store::{CartStore, MemoryStorage};
//!
//! let mut store = CartStore::open(MemoryStorage::new());
//! store.add_to_cart(&Product::new(1, "Headphones", "$299.99"));
//! store.add_to_cart(&Product::new(2, "Cable", Price::from_major(10)));
//! store.update_quantity(&ProductId::from(2), 3);
//!
//! assert_eq!(store.cart_count(), 4);
//! assert_eq!(store.cart_total(), Money::from_minor(32999));
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod persistence;
pub mod storage;
pub mod store;

pub use config::StoreConfig;
pub use error::{
    ConfigError, ConfigResult, PersistenceError, PersistenceResult, StorageError, StorageResult,
};
pub use persistence::CartPersistence;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::CartStore;
