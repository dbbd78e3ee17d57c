//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                     │
//! │  ├── CoreError        - Cart rule violations                            │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  storefront-store errors (separate crate)                               │
//! │  ├── StorageError     - Key-value slot read/write failures              │
//! │  └── PersistenceError - Cart record encode/decode failures              │
//! │                                                                         │
//! │  CartStore swallows all of them: UI code never sees an error, the cart  │
//! │  simply does not change and a log line is written.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Cart rule violations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The product is not in the cart.
    ///
    /// Returned by quantity updates against an id the cart does not hold.
    /// Removing an absent id is not an error.
    #[error("Product {0} not in cart")]
    ItemNotInCart(String),

    /// The product price normalizes to a negative amount.
    #[error("Invalid price for product {id}: {price}")]
    InvalidPrice { id: String, price: String },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised at the cart boundary before any state changes.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be positive")]
    MustBePositive { field: String },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., a price string with no number in it).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::ItemNotInCart("42".to_string());
        assert_eq!(err.to_string(), "Product 42 not in cart");

        let err = CoreError::InvalidPrice {
            id: "7".to_string(),
            price: "-$3.00".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid price for product 7: -$3.00");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "product id".to_string(),
        };
        assert_eq!(err.to_string(), "product id is required");

        let err = ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: i64::MAX,
        };
        assert_eq!(
            err.to_string(),
            format!("quantity must be between 0 and {}", i64::MAX)
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::Required {
            field: "id".to_string(),
        }
        .into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
