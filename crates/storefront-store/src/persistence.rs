//! # Persistence Adapter
//!
//! Serializes the cart into one key-value slot and reads it back.
//!
//! ## Record Layout
//! ```json
//! [
//!   {"id": 1, "name": "Headphones", "price": "$299.99", "image": "hp.png",
//!    "category": "audio", "quantity": 2},
//!   {"id": "case-7", "name": "Case", "price": 199, "quantity": 1}
//! ]
//! ```
//!
//! ## Load Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  slot missing ───────────────────────────────────► empty cart           │
//! │  storage error / not JSON / not an array ────────► empty cart (warn)    │
//! │  array ──► each entry parsed on its own                                 │
//! │              ├── valid line item ──► kept                               │
//! │              └── anything else ────► dropped (warn), rest survives      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `load` never fails and `save` never fails: both log and carry on. The
//! `try_` variants expose the underlying error for callers that want it.

use serde_json::Value;
use storefront_core::{Cart, LineItem};
use tracing::{debug, error, warn};

use crate::error::{PersistenceError, PersistenceResult};
use crate::storage::KeyValueStorage;

/// Reads and writes a cart in one storage slot.
#[derive(Debug)]
pub struct CartPersistence<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> CartPersistence<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        CartPersistence {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Loads the stored cart, reporting why a record was unusable.
    pub fn try_load(&self) -> PersistenceResult<Cart> {
        let Some(raw) = self.storage.get(&self.key)? else {
            debug!(key = %self.key, "No stored cart");
            return Ok(Cart::new());
        };

        let entries = match serde_json::from_str::<Value>(&raw)? {
            Value::Array(entries) => entries,
            other => {
                return Err(PersistenceError::NotACollection {
                    found: json_kind(&other),
                })
            }
        };

        let total = entries.len();
        let items: Vec<LineItem> = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value(entry) {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!(key = %self.key, index, error = %e, "Dropping unreadable stored line item");
                    None
                }
            })
            .collect();

        let cart = Cart::from_items(items);
        debug!(key = %self.key, stored = total, loaded = cart.len(), "Cart loaded");
        Ok(cart)
    }

    /// Loads the stored cart, falling back to an empty one.
    pub fn load(&self) -> Cart {
        self.try_load().unwrap_or_else(|e| {
            warn!(key = %self.key, error = %e, "Stored cart unusable, starting empty");
            Cart::new()
        })
    }

    /// Writes the cart, reporting failures.
    pub fn try_save(&mut self, cart: &Cart) -> PersistenceResult<()> {
        let json = serde_json::to_string(cart)?;
        self.storage.set(&self.key, &json)?;
        Ok(())
    }

    /// Writes the cart, logging failures.
    ///
    /// ## Returns
    /// `true` if the write landed.
    pub fn save(&mut self, cart: &Cart) -> bool {
        match self.try_save(cart) {
            Ok(()) => {
                debug!(key = %self.key, lines = cart.len(), "Cart saved");
                true
            }
            Err(e) => {
                error!(key = %self.key, error = %e, "Failed to save cart; keeping in-memory state");
                false
            }
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use storefront_core::{Price, Product, ProductId};

    fn persistence() -> (CartPersistence<MemoryStorage>, MemoryStorage) {
        let storage = MemoryStorage::new();
        (CartPersistence::new(storage.clone(), "cart"), storage)
    }

    fn sample_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_item(
            &Product::new(1, "Headphones", "$299.99")
                .with_image("hp.png")
                .with_category("audio"),
        )
        .unwrap();
        cart.add_item(&Product::new(1, "Headphones", "$299.99")).unwrap();
        cart.add_item(&Product::new("case-7", "Case", Price::from_major(199)))
            .unwrap();
        cart.add_item(&Product::new(3, "Cable", Price::from_minor(2550)))
            .unwrap();
        cart
    }

    #[test]
    fn test_round_trip() {
        let (mut p, _) = persistence();
        let cart = sample_cart();

        assert!(p.save(&cart));
        assert_eq!(p.try_load().unwrap(), cart);
    }

    #[test]
    fn test_round_trip_empty() {
        let (mut p, storage) = persistence();
        assert!(p.save(&Cart::new()));
        assert_eq!(storage.peek("cart").as_deref(), Some("[]"));
        assert!(p.load().is_empty());
    }

    #[test]
    fn test_missing_slot_is_empty() {
        let (p, _) = persistence();
        assert!(p.try_load().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_records_load_empty() {
        for raw in ["{not json", "null", "{}", "\"cart\"", "42", "true"] {
            let (p, storage) = persistence();
            storage.seed("cart", raw);
            assert!(p.try_load().is_err(), "{raw} should be rejected");
            assert!(p.load().is_empty(), "{raw} should load empty");
        }
    }

    #[test]
    fn test_not_a_collection_reports_kind() {
        let (p, storage) = persistence();
        storage.seed("cart", r#"{"items": []}"#);
        assert!(matches!(
            p.try_load(),
            Err(PersistenceError::NotACollection { found: "object" })
        ));
    }

    #[test]
    fn test_bad_entries_dropped_individually() {
        let (p, storage) = persistence();
        storage.seed(
            "cart",
            r#"[
                {"id": 1, "name": "Kept", "price": 10, "quantity": 2},
                {"name": "No id", "price": 5, "quantity": 1},
                {"id": 2, "price": 5, "quantity": "3"},
                {"id": 3, "price": 5, "quantity": 0},
                null,
                {"id": 1, "price": 10, "quantity": 9},
                {"id": "x", "price": "$5.50", "quantity": 1}
            ]"#,
        );

        let cart = p.load();
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.quantity_of(&ProductId::from(1)), 2);
        assert_eq!(cart.quantity_of(&ProductId::from("x")), 1);
    }

    #[test]
    fn test_storage_failure_on_load_is_empty() {
        let (p, storage) = persistence();
        storage.seed("cart", "[]");
        storage.set_unavailable(true);

        assert!(matches!(p.try_load(), Err(PersistenceError::Storage(_))));
        assert!(p.load().is_empty());
    }

    #[test]
    fn test_save_failure_is_swallowed() {
        let storage = MemoryStorage::with_quota(8);
        let mut p = CartPersistence::new(storage.clone(), "cart");

        assert!(!p.save(&sample_cart()));
        assert!(matches!(
            p.try_save(&sample_cart()),
            Err(PersistenceError::Storage(_))
        ));
        assert_eq!(storage.peek("cart"), None);
    }

    #[test]
    fn test_key_is_respected() {
        let storage = MemoryStorage::new();
        let mut p = CartPersistence::new(storage.clone(), "guest-cart");
        p.save(&sample_cart());

        assert!(storage.peek("guest-cart").is_some());
        assert!(storage.peek("cart").is_none());
        assert_eq!(p.key(), "guest-cart");
    }
}
