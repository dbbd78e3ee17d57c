//! # Cart
//!
//! The in-memory cart: an ordered collection of line items keyed by product id.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  UI Action               Cart Method               Effect               │
//! │  ─────────               ───────────               ──────               │
//! │                                                                         │
//! │  "Add to Cart" ────────► add_item(product) ──────► qty += 1 or push     │
//! │                                                                         │
//! │  Quantity stepper ─────► set_quantity(id, n) ────► qty = n (0 = remove) │
//! │                                                                         │
//! │  Trash icon ───────────► remove_item(id) ────────► retain(id != x)      │
//! │                                                                         │
//! │  Order placed ─────────► clear() ────────────────► items.clear()        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! After every operation that returns `Ok`:
//! - ids are unique (adding an existing id increments its quantity)
//! - every quantity is ≥ 1
//!
//! An operation that returns `Err` leaves the cart untouched.

use std::collections::HashSet;

use serde::Serialize;
use tracing::warn;

use crate::error::{CoreError, CoreResult};
use crate::types::{LineItem, Product, ProductId};
use crate::validation::{validate_line_quantity, validate_new_quantity, validate_product_id};

/// The shopping cart.
///
/// Serializes as a bare JSON array of line items (the persisted record
/// layout). Stored records are read back through [`Cart::from_items`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Builds a cart from previously stored line items.
    ///
    /// Entries that break an invariant are dropped one by one instead of
    /// discarding the whole cart:
    /// - blank ids (`0`, `""`)
    /// - quantities below 1
    /// - repeated ids (the first occurrence wins)
    pub fn from_items(items: impl IntoIterator<Item = LineItem>) -> Self {
        let mut seen = HashSet::new();
        let mut kept = Vec::new();

        for item in items {
            if item.id.is_blank() {
                warn!("Dropping stored line item with blank id");
                continue;
            }
            if let Err(e) = validate_line_quantity(item.quantity) {
                warn!(product_id = %item.id, quantity = item.quantity, "Dropping stored line item: {}", e);
                continue;
            }
            if !seen.insert(item.id.clone()) {
                warn!(product_id = %item.id, "Dropping duplicate stored line item");
                continue;
            }
            kept.push(item);
        }

        Cart { items: kept }
    }

    /// Adds a product or increments its quantity if already present.
    ///
    /// ## Returns
    /// The item's quantity after the add.
    ///
    /// ## Errors
    /// - `Validation` if the product has no usable id
    /// - `InvalidPrice` if the price normalizes to a negative amount
    pub fn add_item(&mut self, product: &Product) -> CoreResult<i64> {
        let id = validate_product_id(product.id.as_ref())?;

        if let Some(price) = &product.price {
            if price.normalize().is_some_and(|m| m.is_negative()) {
                return Err(CoreError::InvalidPrice {
                    id: id.to_string(),
                    price: price.to_string(),
                });
            }
        }

        if let Some(item) = self.items.iter_mut().find(|i| &i.id == id) {
            item.quantity = item.quantity.saturating_add(1);
            return Ok(item.quantity);
        }

        self.items.push(LineItem::from_product(id.clone(), product, 1));
        Ok(1)
    }

    /// Removes the item with the given id.
    ///
    /// ## Returns
    /// `true` if an item was removed, `false` if the id was not in the cart
    /// (which is not an error).
    pub fn remove_item(&mut self, id: &ProductId) -> CoreResult<bool> {
        validate_product_id(Some(id))?;

        let initial_len = self.items.len();
        self.items.retain(|i| &i.id != id);
        Ok(self.items.len() != initial_len)
    }

    /// Sets the quantity of an item.
    ///
    /// ## Behavior
    /// - Quantity 0: same as [`Cart::remove_item`]
    /// - No upper bound
    ///
    /// ## Errors
    /// - `Validation` for a blank id or a negative quantity
    /// - `ItemNotInCart` if a non-zero quantity targets an absent id
    pub fn set_quantity(&mut self, id: &ProductId, quantity: i64) -> CoreResult<()> {
        validate_product_id(Some(id))?;
        validate_new_quantity(quantity)?;

        if quantity == 0 {
            self.remove_item(id)?;
            return Ok(());
        }

        match self.items.iter_mut().find(|i| &i.id == id) {
            Some(item) => {
                item.quantity = quantity;
                Ok(())
            }
            None => Err(CoreError::ItemNotInCart(id.to_string())),
        }
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns the line item for `id`, if present.
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Returns the quantity held for `id`, 0 when absent.
    pub fn quantity_of(&self, id: &ProductId) -> i64 {
        self.get(id).map_or(0, |i| i.quantity)
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.items.iter()
    }

    /// Number of distinct products (not units).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
