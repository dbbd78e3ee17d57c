//! # Derivation Functions
//!
//! Pure computations over a cart snapshot. Nothing here is cached: every
//! call walks the current line items, so a total can never go stale.
//!
//! ## Checkout Summary
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Headphones               x2                 ₹2,598.00                  │
//! │  Phone case               x1                   ₹199.00                  │
//! │  ─────────────────────────────────────────────────────                  │
//! │  Subtotal        subtotal(cart)             ₹2,797.00                   │
//! │  Tax (18%)       tax(cart, rate)              ₹503.46                   │
//! │  Shipping        shipping(cart, fee)           ₹99.00                   │
//! │  ─────────────────────────────────────────────────────                  │
//! │  Total           total(cart, rate, fee)     ₹3,399.46                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Malformed Lines
//! A line whose price cannot be normalized contributes nothing to the
//! subtotal. It still counts towards [`item_count`].

use serde::Serialize;
use tracing::debug;

use crate::cart::Cart;
use crate::money::Money;
use crate::types::{Pricing, TaxRate};

/// Sum of `price × quantity` over all lines with a readable price.
///
/// ```rust
/// use storefront_core::{totals, Cart, Price, Product};
///
/// let mut cart = Cart::new();
/// cart.add_item(&Product::new(1, "Tee", Price::from_major(10))).unwrap();
/// cart.add_item(&Product::new(1, "Tee", Price::from_major(10))).unwrap();
/// cart.add_item(&Product::new(2, "Cap", "$5.50")).unwrap();
///
/// assert_eq!(totals::subtotal(&cart).minor(), 2550);
/// ```
pub fn subtotal(cart: &Cart) -> Money {
    cart.iter()
        .filter_map(|item| {
            let line = item.line_total();
            if line.is_none() {
                debug!(product_id = %item.id, "Skipping line with unreadable price");
            }
            line
        })
        .sum()
}

/// Sum of all quantities.
pub fn item_count(cart: &Cart) -> i64 {
    cart.iter()
        .fold(0_i64, |count, item| count.saturating_add(item.quantity))
}

/// Tax on the subtotal, rounded half up to the minor unit.
pub fn tax(cart: &Cart, rate: TaxRate) -> Money {
    subtotal(cart).calculate_tax(rate)
}

/// The flat fee for a non-empty cart, zero otherwise.
pub fn shipping(cart: &Cart, flat_fee: Money) -> Money {
    if cart.is_empty() {
        Money::zero()
    } else {
        flat_fee
    }
}

/// Subtotal + tax + shipping.
pub fn total(cart: &Cart, rate: TaxRate, flat_fee: Money) -> Money {
    subtotal(cart) + tax(cart, rate) + shipping(cart, flat_fee)
}

/// All derived figures of a cart in one snapshot, for summary panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Distinct products.
    pub line_count: usize,
    /// Units across all products.
    pub item_count: i64,
    pub subtotal: Money,
    pub tax: Money,
    pub shipping: Money,
    pub total: Money,
}

impl CartTotals {
    pub fn compute(cart: &Cart, pricing: &Pricing) -> Self {
        let subtotal = subtotal(cart);
        let tax = subtotal.calculate_tax(pricing.tax_rate);
        let shipping = shipping(cart, pricing.shipping_fee);

        CartTotals {
            line_count: cart.len(),
            item_count: item_count(cart),
            subtotal,
            tax,
            shipping,
            total: subtotal + tax + shipping,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::price::Price;
    use crate::types::{LineItem, Product, ProductId};

    fn line(id: i64, price: Price, quantity: i64) -> LineItem {
        LineItem::from_product(
            ProductId::from(id),
            &Product::new(id, "item", price),
            quantity,
        )
    }

    fn mixed_cart() -> Cart {
        Cart::from_items(vec![
            line(1, Price::from_major(10), 2),
            line(2, Price::from("$5.50"), 1),
        ])
    }

    #[test]
    fn test_subtotal_mixed_price_shapes() {
        assert_eq!(subtotal(&mixed_cart()), Money::from_minor(2550));
    }

    #[test]
    fn test_item_count() {
        assert_eq!(item_count(&mixed_cart()), 3);
    }

    #[test]
    fn test_unreadable_price_is_skipped() {
        let cart = Cart::from_items(vec![
            line(1, Price::from_major(10), 2),
            line(2, Price::from("TBD"), 4),
        ]);
        assert_eq!(subtotal(&cart), Money::from_minor(2000));
        assert_eq!(item_count(&cart), 6);
    }

    #[test]
    fn test_missing_price_is_skipped() {
        let no_price = LineItem {
            price: None,
            ..line(3, Price::from_major(1), 1)
        };
        let cart = Cart::from_items(vec![no_price]);
        assert!(subtotal(&cart).is_zero());
    }

    #[test]
    fn test_empty_cart() {
        let cart = Cart::new();
        assert!(subtotal(&cart).is_zero());
        assert_eq!(item_count(&cart), 0);
        assert!(shipping(&cart, Money::from_major(99)).is_zero());
        assert!(total(&cart, TaxRate::from_bps(1800), Money::from_major(99)).is_zero());
    }

    #[test]
    fn test_tax_shipping_total() {
        let cart = mixed_cart();
        let rate = TaxRate::from_bps(1800);
        let fee = Money::from_major(99);

        // 18% of 25.50 = 4.59
        assert_eq!(tax(&cart, rate), Money::from_minor(459));
        assert_eq!(shipping(&cart, fee), fee);
        assert_eq!(total(&cart, rate, fee), Money::from_minor(2550 + 459 + 9900));
    }

    #[test]
    fn test_totals_snapshot_matches_functions() {
        let cart = mixed_cart();
        let pricing = Pricing::default();
        let totals = CartTotals::compute(&cart, &pricing);

        assert_eq!(totals.line_count, 2);
        assert_eq!(totals.item_count, 3);
        assert_eq!(totals.subtotal, subtotal(&cart));
        assert_eq!(totals.tax, tax(&cart, pricing.tax_rate));
        assert_eq!(totals.shipping, pricing.shipping_fee);
        assert_eq!(
            totals.total,
            total(&cart, pricing.tax_rate, pricing.shipping_fee)
        );
    }

    #[test]
    fn test_totals_follow_cart_changes() {
        let mut cart = Cart::new();
        let tee = Product::new(1, "Tee", Price::from_major(100));
        cart.add_item(&tee).unwrap();
        assert_eq!(subtotal(&cart), Money::from_major(100));

        cart.set_quantity(&ProductId::from(1), 5).unwrap();
        assert_eq!(subtotal(&cart), Money::from_major(500));
    }
}
