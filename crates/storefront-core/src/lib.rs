//! # storefront-core: Pure Cart Logic
//!
//! This crate is the heart of the storefront cart. It contains the cart
//! model and every derived figure as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Storefront Cart Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    UI Screens (external)                        │   │
//! │  │   Dashboard tiles ──► Product view ──► Cart ──► Checkout        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ add_to_cart, update_quantity, ...     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              storefront-store (CartStore, persistence)          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐  ┌─────────┐  ┌─────────┐  ┌─────────┐  ┌──────┐  │   │
//! │  │   │  types  │  │  money  │  │  price  │  │  cart   │  │totals│  │   │
//! │  │   │LineItem │  │  Money  │  │normalize│  │  Cart   │  │ tax  │  │   │
//! │  │   └─────────┘  └─────────┘  └─────────┘  └─────────┘  └──────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ProductId, Product, LineItem, TaxRate, Pricing)
//! - [`money`] - Money type with integer arithmetic
//! - [`price`] - Catalog price shapes and their normalization
//! - [`cart`] - The cart collection and its mutations
//! - [`totals`] - Subtotal, item count, tax, shipping, total
//! - [`error`] - Domain error types
//! - [`validation`] - Boundary validation
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{totals, Cart, Money, Price, Product, ProductId, TaxRate};
//!
//! let mut cart = Cart::new();
//! let phone = Product::new(1, "Phone", Price::from_major(100));
//! cart.add_item(&phone).unwrap();
//! cart.add_item(&phone).unwrap();
//! assert_eq!(totals::subtotal(&cart), Money::from_major(200));
//!
//! cart.set_quantity(&ProductId::from(1), 5).unwrap();
//! assert_eq!(totals::subtotal(&cart), Money::from_major(500));
//!
//! let tax = totals::tax(&cart, TaxRate::from_bps(1800));
//! assert_eq!(tax, Money::from_major(90));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod price;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::Cart;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use price::Price;
pub use totals::CartTotals;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default tax rate in basis points (18% GST on the storefront).
pub const DEFAULT_TAX_RATE_BPS: u32 = 1800;

/// Default flat shipping fee in minor units (99.00).
///
/// Screens may charge a different fee; this is only the fallback.
pub const DEFAULT_SHIPPING_FEE_MINOR: i64 = 9900;

/// Default key of the storage slot holding the cart.
pub const DEFAULT_CART_KEY: &str = "cart";
