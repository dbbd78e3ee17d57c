//! # Validation Module
//!
//! Input validation at the cart boundary.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: UI screens                                                    │
//! │  ├── Quantity steppers (e.g. capped at 10)                              │
//! │  └── Disabled buttons on empty carts                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Cart (Rust)                                                   │
//! │  └── THIS MODULE: ids, quantities, storage keys                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Persistence                                                   │
//! │  └── Per-entry sanitization of whatever was stored before               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ```rust
//! use storefront_core::validation::{validate_new_quantity, validate_product_id};
//! use storefront_core::ProductId;
//!
//! assert!(validate_product_id(Some(&ProductId::from(1))).is_ok());
//! assert!(validate_product_id(None).is_err());
//! assert!(validate_new_quantity(0).is_ok());
//! assert!(validate_new_quantity(-1).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::ProductId;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length of a storage slot key.
const MAX_KEY_LEN: usize = 64;

// =============================================================================
// Identifier Validators
// =============================================================================

/// Validates a product id supplied by a caller.
///
/// ## Rules
/// - Must be present
/// - Must not be blank (`0` or `""`)
pub fn validate_product_id(id: Option<&ProductId>) -> ValidationResult<&ProductId> {
    match id {
        Some(id) if !id.is_blank() => Ok(id),
        _ => Err(ValidationError::Required {
            field: "product id".to_string(),
        }),
    }
}

/// Validates the key of the storage slot holding the cart.
///
/// The key doubles as a file name for file-backed storage, so it is limited to
/// letters, digits, hyphens, underscores and dots.
///
/// ```rust
/// use storefront_core::validation::validate_storage_key;
///
/// assert!(validate_storage_key("cart").is_ok());
/// assert!(validate_storage_key("").is_err());
/// assert!(validate_storage_key("../cart").is_err());
/// ```
pub fn validate_storage_key(key: &str) -> ValidationResult<()> {
    if key.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "storage key".to_string(),
        });
    }

    if key.len() > MAX_KEY_LEN {
        return Err(ValidationError::OutOfRange {
            field: "storage key length".to_string(),
            min: 1,
            max: MAX_KEY_LEN as i64,
        });
    }

    let valid_chars = key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.');
    if !valid_chars || key.starts_with('.') {
        return Err(ValidationError::InvalidFormat {
            field: "storage key".to_string(),
            reason: "must contain only letters, numbers, hyphens, underscores and dots, and not start with a dot".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity passed to a quantity update.
///
/// ## Rules
/// - Must be non-negative (0 means "remove")
/// - No upper bound: caps are a UI policy
pub fn validate_new_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates the quantity of a line item held in a cart.
///
/// ## Rules
/// - Must be positive (> 0): a zero quantity is never stored
pub fn validate_line_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_id() {
        assert!(validate_product_id(Some(&ProductId::from(1))).is_ok());
        assert!(validate_product_id(Some(&ProductId::from("sku-9"))).is_ok());

        assert!(validate_product_id(None).is_err());
        assert!(validate_product_id(Some(&ProductId::from(0))).is_err());
        assert!(validate_product_id(Some(&ProductId::from(""))).is_err());
    }

    #[test]
    fn test_validate_storage_key() {
        assert!(validate_storage_key("cart").is_ok());
        assert!(validate_storage_key("cart-v2.guest_1").is_ok());

        assert!(validate_storage_key("   ").is_err());
        assert!(validate_storage_key("my cart").is_err());
        assert!(validate_storage_key("a/b").is_err());
        assert!(validate_storage_key(".hidden").is_err());
        assert!(validate_storage_key(&"k".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_new_quantity() {
        assert!(validate_new_quantity(0).is_ok());
        assert!(validate_new_quantity(1).is_ok());
        assert!(validate_new_quantity(10_000).is_ok());
        assert!(validate_new_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_line_quantity() {
        assert!(validate_line_quantity(1).is_ok());
        assert!(validate_line_quantity(0).is_err());
        assert!(validate_line_quantity(-3).is_err());
    }
}
