//! # Domain Types
//!
//! Core domain types used throughout the cart engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   add_item    ┌─────────────────┐                  │
//! │  │    Product      │ ────────────► │    LineItem     │                  │
//! │  │  ─────────────  │   (snapshot)  │  ─────────────  │                  │
//! │  │  id?            │               │  id             │                  │
//! │  │  name?          │               │  name?          │                  │
//! │  │  price?         │               │  price?         │                  │
//! │  │  image?         │               │  image?         │                  │
//! │  │  category?      │               │  category?      │                  │
//! │  └─────────────────┘               │  quantity ≥ 1   │                  │
//! │   (external catalog)               └─────────────────┘                  │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │   ProductId     │   │     Price       │   │    TaxRate      │        │
//! │  │  Int(1)         │   │  Amount(10)     │   │  bps (u32)      │        │
//! │  │  Text("sku-1")  │   │  Formatted("$") │   │  1800 = 18%     │        │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A line item copies the descriptive product fields at the moment the
//! product is added. Later catalog changes never reach a cart that already
//! holds the item.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::price::Price;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so the storefront's 18% GST is 1800 bps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for configuration input).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Product Id
// =============================================================================

/// Unique product identifier.
///
/// Catalogs use both numeric ids (`1`) and string ids (`"sku-1"`). The two
/// forms never compare equal: `1` and `"1"` are different products.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Int(i64),
    Text(String),
}

impl ProductId {
    /// Returns true for ids that cannot identify a product: `0` and `""`.
    pub fn is_blank(&self) -> bool {
        match self {
            ProductId::Int(n) => *n == 0,
            ProductId::Text(s) => s.is_empty(),
        }
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Int(n) => write!(f, "{}", n),
            ProductId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ProductId {
    fn from(n: i64) -> Self {
        ProductId::Int(n)
    }
}

impl From<i32> for ProductId {
    fn from(n: i32) -> Self {
        ProductId::Int(i64::from(n))
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        ProductId::Text(s.to_string())
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        ProductId::Text(s)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product descriptor handed to the cart by the catalog.
///
/// Every field is optional at this boundary; the cart validates the id when
/// the product is added.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Option<ProductId>,
    pub name: Option<String>,
    pub price: Option<Price>,
    pub image: Option<String>,
    pub category: Option<String>,
}

impl Product {
    /// Creates a product with an id, a name and a price.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: impl Into<Price>) -> Self {
        Product {
            id: Some(id.into()),
            name: Some(name.into()),
            price: Some(price.into()),
            image: None,
            category: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One product entry in the cart plus its quantity.
///
/// This is also the persisted record layout:
/// `{id, name, price, image, category, quantity}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Price exactly as the catalog supplied it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Always ≥ 1 while the item is in a cart.
    pub quantity: i64,
}

impl LineItem {
    /// Snapshots a product into a line item with the given quantity.
    pub fn from_product(id: ProductId, product: &Product, quantity: i64) -> Self {
        LineItem {
            id,
            name: product.name.clone(),
            price: product.price.clone(),
            image: product.image.clone(),
            category: product.category.clone(),
            quantity,
        }
    }

    /// Normalized unit price, `None` when the price is missing or unreadable.
    pub fn unit_price(&self) -> Option<Money> {
        self.price.as_ref().and_then(Price::normalize)
    }

    /// Unit price × quantity, `None` when the unit price is unreadable.
    pub fn line_total(&self) -> Option<Money> {
        self.unit_price().map(|p| p.multiply_quantity(self.quantity))
    }
}

// =============================================================================
// Pricing
// =============================================================================

/// The charges applied on top of the subtotal at checkout.
///
/// Each screen may use its own fee, so pricing is always passed in rather
/// than read from a global.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pricing {
    pub tax_rate: TaxRate,
    pub shipping_fee: Money,
}

impl Pricing {
    pub const fn new(tax_rate: TaxRate, shipping_fee: Money) -> Self {
        Pricing {
            tax_rate,
            shipping_fee,
        }
    }
}

impl Default for Pricing {
    /// 18% tax and a flat 99.00 shipping fee.
    fn default() -> Self {
        Pricing {
            tax_rate: TaxRate::from_bps(crate::DEFAULT_TAX_RATE_BPS),
            shipping_fee: Money::from_minor(crate::DEFAULT_SHIPPING_FEE_MINOR),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
