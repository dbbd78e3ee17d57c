//! # Cart Store
//!
//! The single authoritative cart for a session. Screens call the store,
//! never the persistence adapter, and never hold a mutable cart of their own.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  UI call                 Store                  Effect                  │
//! │  ───────                 ─────                  ──────                  │
//! │                                                                         │
//! │  add_to_cart(p) ───────► add_item ────────────► Cart::add_item ──► save │
//! │  update_quantity(id,n) ► set_quantity ────────► Cart::set_quantity ► save│
//! │  remove_from_cart(id) ─► remove_item ─────────► Cart::remove_item ► save│
//! │  clear_cart() ─────────► clear ───────────────► Cart::clear ──────► save│
//! │  cart_total() ─────────► subtotal ────────────► totals::subtotal        │
//! │  cart_count() ─────────► item_count ──────────► totals::item_count      │
//! │                                                                         │
//! │  Rejected input: warn!, no change, no save, returns false               │
//! │  Failed save:    error!, in-memory change kept, returns true            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every derived figure is recomputed from the current cart on each call.

use storefront_core::{
    totals, Cart, CartTotals, CoreError, Money, Pricing, Product, ProductId, TaxRate,
    DEFAULT_CART_KEY,
};
use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::error::{ConfigError, ConfigResult};
use crate::persistence::CartPersistence;
use crate::storage::{FileStorage, KeyValueStorage};

/// Owns the cart and writes it through to storage after each change.
#[derive(Debug)]
pub struct CartStore<S: KeyValueStorage> {
    cart: Cart,
    persistence: CartPersistence<S>,
    pricing: Pricing,
}

impl<S: KeyValueStorage> CartStore<S> {
    /// Opens the store on the default `cart` slot with default pricing.
    pub fn open(storage: S) -> Self {
        Self::with_options(storage, DEFAULT_CART_KEY, Pricing::default())
    }

    /// Opens the store, restoring whatever cart the slot holds.
    pub fn with_options(storage: S, key: impl Into<String>, pricing: Pricing) -> Self {
        let persistence = CartPersistence::new(storage, key);
        let cart = persistence.load();

        info!(
            key = persistence.key(),
            lines = cart.len(),
            items = totals::item_count(&cart),
            "Cart store opened"
        );

        CartStore {
            cart,
            persistence,
            pricing,
        }
    }

    pub fn from_config(storage: S, config: &StoreConfig) -> Self {
        Self::with_options(storage, config.storage_key(), config.pricing())
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds one unit of `product`.
    ///
    /// ## Returns
    /// `false` if the product was rejected (no id, blank id, negative price).
    pub fn add_item(&mut self, product: &Product) -> bool {
        match self.cart.add_item(product) {
            Ok(quantity) => {
                debug!(product_id = ?product.id, quantity, "Added to cart");
                self.persist();
                true
            }
            Err(e) => {
                warn!(product_id = ?product.id, "Rejected add to cart: {}", e);
                false
            }
        }
    }

    /// Removes the line for `id`. Removing an absent id is accepted.
    pub fn remove_item(&mut self, id: &ProductId) -> bool {
        match self.cart.remove_item(id) {
            Ok(removed) => {
                debug!(product_id = %id, removed, "Removed from cart");
                self.persist();
                true
            }
            Err(e) => {
                warn!(product_id = %id, "Rejected remove from cart: {}", e);
                false
            }
        }
    }

    /// Sets the quantity of the line for `id`; 0 removes it.
    ///
    /// An id that is not in the cart is accepted and leaves it unchanged.
    ///
    /// ## Returns
    /// `false` for a blank id or a negative quantity.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: i64) -> bool {
        match self.cart.set_quantity(id, quantity) {
            Ok(()) => {
                debug!(product_id = %id, quantity, "Quantity updated");
            }
            Err(CoreError::ItemNotInCart(_)) => {
                debug!(product_id = %id, quantity, "Quantity update for product not in cart");
            }
            Err(e) => {
                warn!(product_id = %id, quantity, "Rejected quantity update: {}", e);
                return false;
            }
        }

        self.persist();
        true
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.cart.clear();
        debug!("Cart cleared");
        self.persist();
    }

    /// Replaces the in-memory cart with what the slot holds now.
    pub fn reload(&mut self) {
        self.cart = self.persistence.load();
        debug!(lines = self.cart.len(), "Cart reloaded from storage");
    }

    /// Writes the cart. Failures are logged by the adapter and the in-memory
    /// cart is kept as is.
    fn persist(&mut self) -> bool {
        self.persistence.save(&self.cart)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Read-only view of the current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Owned copy of the current cart, detached from the store.
    pub fn snapshot(&self) -> Cart {
        self.cart.clone()
    }

    pub fn pricing(&self) -> Pricing {
        self.pricing
    }

    pub fn storage(&self) -> &S {
        self.persistence.storage()
    }

    pub fn subtotal(&self) -> Money {
        totals::subtotal(&self.cart)
    }

    pub fn item_count(&self) -> i64 {
        totals::item_count(&self.cart)
    }

    pub fn tax(&self) -> Money {
        self.tax_at(self.pricing.tax_rate)
    }

    /// Tax at a rate other than the configured one.
    pub fn tax_at(&self, rate: TaxRate) -> Money {
        totals::tax(&self.cart, rate)
    }

    pub fn shipping(&self) -> Money {
        totals::shipping(&self.cart, self.pricing.shipping_fee)
    }

    pub fn total(&self) -> Money {
        totals::total(&self.cart, self.pricing.tax_rate, self.pricing.shipping_fee)
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals::compute(&self.cart, &self.pricing)
    }

    pub fn quantity_of(&self, id: &ProductId) -> i64 {
        self.cart.quantity_of(id)
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.cart.contains(id)
    }

    // =========================================================================
    // UI Names
    // =========================================================================

    pub fn add_to_cart(&mut self, product: &Product) -> bool {
        self.add_item(product)
    }

    pub fn remove_from_cart(&mut self, id: &ProductId) -> bool {
        self.remove_item(id)
    }

    pub fn update_quantity(&mut self, id: &ProductId, quantity: i64) -> bool {
        self.set_quantity(id, quantity)
    }

    pub fn clear_cart(&mut self) {
        self.clear()
    }

    /// Pre-tax, pre-shipping total shown in the cart badge.
    pub fn cart_total(&self) -> Money {
        self.subtotal()
    }

    pub fn cart_count(&self) -> i64 {
        self.item_count()
    }
}

impl CartStore<FileStorage> {
    /// Opens the store on disk at the configured (or platform) data directory.
    pub fn open_on_disk(config: &StoreConfig) -> ConfigResult<Self> {
        let dir = config
            .data_dir()
            .ok_or_else(|| ConfigError::Invalid("No data directory available".into()))?;

        info!(?dir, "Opening file-backed cart store");
        Ok(Self::from_config(FileStorage::new(dir), config))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use storefront_core::Price;

    fn store() -> (CartStore<MemoryStorage>, MemoryStorage) {
        let storage = MemoryStorage::new();
        (CartStore::open(storage.clone()), storage)
    }

    fn product(id: i64, price: impl Into<Price>) -> Product {
        Product::new(id, format!("Product {}", id), price)
    }

    fn id(id: i64) -> ProductId {
        ProductId::from(id)
    }

    #[test]
    fn test_repeated_adds_merge() {
        let (mut store, _) = store();
        for _ in 0..4 {
            assert!(store.add_item(&product(7, Price::from_major(10))));
        }

        assert_eq!(store.cart().len(), 1);
        assert_eq!(store.quantity_of(&id(7)), 4);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (mut store, _) = store();
        store.add_item(&product(1, Price::from_major(10)));
        store.add_item(&product(2, Price::from_major(20)));

        assert!(store.remove_item(&id(1)));
        let after_first = store.snapshot();
        assert!(store.remove_item(&id(1)));

        assert_eq!(store.cart(), &after_first);
        assert!(store.contains(&id(2)));
    }

    #[test]
    fn test_zero_quantity_equals_remove() {
        let (mut a, _) = store();
        let (mut b, _) = store();
        for s in [&mut a, &mut b] {
            s.add_item(&product(1, Price::from_major(10)));
            s.add_item(&product(2, Price::from_major(20)));
        }

        a.set_quantity(&id(1), 0);
        b.remove_item(&id(1));

        assert_eq!(a.cart(), b.cart());
        assert!(!a.contains(&id(1)));
    }

    #[test]
    fn test_mixed_price_formats() {
        let (mut store, _) = store();
        store.add_item(&product(1, Price::from_major(10)));
        store.add_item(&product(1, Price::from_major(10)));
        store.add_item(&product(2, "$5.50"));

        assert_eq!(store.subtotal(), Money::from_minor(2550));
        assert_eq!(store.item_count(), 3);
        assert_eq!(store.cart_total(), store.subtotal());
        assert_eq!(store.cart_count(), 3);
    }

    #[test]
    fn test_state_survives_reopen() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::open(storage.clone());
        store.add_item(&product(1, "$299.99"));
        store.add_item(&product(2, Price::from_minor(2550)));
        store.set_quantity(&id(2), 3);

        let reopened = CartStore::open(storage);
        assert_eq!(reopened.cart(), store.cart());
        assert_eq!(reopened.subtotal(), store.subtotal());
    }

    #[test]
    fn test_corrupt_or_absent_record_opens_empty() {
        for raw in [None, Some("not json"), Some("{}"), Some("null")] {
            let storage = MemoryStorage::new();
            if let Some(raw) = raw {
                storage.seed("cart", raw);
            }
            let store = CartStore::open(storage);

            assert!(store.cart().is_empty());
            assert_eq!(store.subtotal(), Money::zero());
            assert_eq!(store.item_count(), 0);
        }
    }

    #[test]
    fn test_add_set_remove_scenario() {
        let (mut store, storage) = store();
        let p = product(1, Price::from_major(100));

        store.add_to_cart(&p);
        store.add_to_cart(&p);
        assert_eq!(store.quantity_of(&id(1)), 2);
        assert_eq!(store.subtotal(), Money::from_major(200));

        store.update_quantity(&id(1), 5);
        assert_eq!(store.subtotal(), Money::from_major(500));

        store.remove_from_cart(&id(1));
        assert!(store.cart().is_empty());
        assert_eq!(store.subtotal(), Money::zero());
        assert_eq!(storage.peek("cart").as_deref(), Some("[]"));
    }

    #[test]
    fn test_invalid_inputs_are_no_ops() {
        let (mut store, storage) = store();
        store.add_item(&product(1, Price::from_major(10)));
        let before = store.snapshot();
        let record = storage.peek("cart");

        let no_id = Product {
            id: None,
            ..product(9, Price::from_major(1))
        };
        assert!(!store.add_item(&no_id));
        assert!(!store.add_item(&product(0, Price::from_major(1))));
        assert!(!store.add_item(&Product::new("", "Blank", "5")));
        assert!(!store.add_item(&product(2, "-$3.00")));
        assert!(!store.remove_item(&ProductId::from("")));
        assert!(!store.set_quantity(&id(1), -1));
        assert!(!store.set_quantity(&id(0), 2));

        assert_eq!(store.cart(), &before);
        assert_eq!(storage.peek("cart"), record);
    }

    #[test]
    fn test_set_quantity_on_absent_id_is_accepted() {
        let (mut store, _) = store();
        store.add_item(&product(1, Price::from_major(10)));

        assert!(store.set_quantity(&id(42), 3));
        assert!(!store.contains(&id(42)));
        assert_eq!(store.item_count(), 1);
    }

    #[test]
    fn test_unparsable_price_counts_zero() {
        let (mut store, _) = store();
        store.add_item(&product(1, "Call for price"));
        store.add_item(&product(2, Price::from_major(10)));

        assert_eq!(store.item_count(), 2);
        assert_eq!(store.subtotal(), Money::from_major(10));
    }

    #[test]
    fn test_clear() {
        let (mut store, storage) = store();
        store.add_item(&product(1, Price::from_major(10)));
        store.clear_cart();

        assert!(store.cart().is_empty());
        assert_eq!(storage.peek("cart").as_deref(), Some("[]"));
    }

    #[test]
    fn test_checkout_figures() {
        let (mut store, _) = store();
        assert_eq!(store.shipping(), Money::zero());
        assert_eq!(store.total(), Money::zero());

        store.add_item(&product(1, Price::from_major(1000)));

        assert_eq!(store.tax(), Money::from_major(180));
        assert_eq!(store.tax_at(TaxRate::from_bps(500)), Money::from_major(50));
        assert_eq!(store.shipping(), Money::from_major(99));
        assert_eq!(store.total(), Money::from_major(1279));

        let totals = store.totals();
        assert_eq!(totals.line_count, 1);
        assert_eq!(totals.item_count, 1);
        assert_eq!(totals.total, store.total());
    }

    #[test]
    fn test_config_pricing_and_key() {
        let storage = MemoryStorage::new();
        let mut config = StoreConfig::default();
        config.cart.storage_key = "kiosk-cart".to_string();
        config.pricing.tax_rate_bps = 0;
        config.pricing.shipping_fee_minor = 0;

        let mut store = CartStore::from_config(storage.clone(), &config);
        store.add_item(&product(1, Price::from_major(10)));

        assert_eq!(store.total(), Money::from_major(10));
        assert!(storage.peek("kiosk-cart").is_some());
        assert!(storage.peek("cart").is_none());
    }

    #[test]
    fn test_failed_save_keeps_memory_state() {
        let storage = MemoryStorage::with_quota(16);
        let mut store = CartStore::open(storage.clone());

        assert!(store.add_item(&product(1, Price::from_major(10))));
        assert_eq!(store.quantity_of(&id(1)), 1);
        assert_eq!(storage.peek("cart"), None);

        assert!(store.set_quantity(&id(1), 4));
        assert_eq!(store.item_count(), 4);
    }

    #[test]
    fn test_reload_discards_unsaved_state() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::open(storage.clone());
        store.add_item(&product(1, Price::from_major(10)));

        storage.set_unavailable(true);
        store.add_item(&product(2, Price::from_major(20)));
        assert_eq!(store.cart().len(), 2);

        storage.set_unavailable(false);
        store.reload();
        assert_eq!(store.cart().len(), 1);
        assert!(!store.contains(&id(2)));
    }

    #[test]
    fn test_reload_picks_up_external_writes() {
        let storage = MemoryStorage::new();
        let mut first = CartStore::open(storage.clone());
        let mut second = CartStore::open(storage.clone());

        second.add_item(&product(5, Price::from_major(1)));
        assert!(first.cart().is_empty());

        first.reload();
        assert_eq!(first.quantity_of(&id(5)), 1);
    }

    #[test]
    fn test_open_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = StoreConfig::default();
        config.cart.data_dir = Some(dir.path().to_path_buf());

        let mut store = CartStore::open_on_disk(&config).unwrap();
        store.add_item(&product(1, "₹1,299"));
        store.add_item(&product(1, "₹1,299"));
        assert!(dir.path().join("cart.json").exists());

        let reopened = CartStore::open_on_disk(&config).unwrap();
        assert_eq!(reopened.quantity_of(&id(1)), 2);
        assert_eq!(reopened.subtotal(), Money::from_major(2598));
        assert_eq!(reopened.storage().dir(), dir.path());
    }
}
