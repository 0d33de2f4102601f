//! # Error Types
//!
//! Domain-specific error types for brew-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  brew-core errors (this file)                                          │
//! │  ├── CoreError        - Business rule failures                         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  brew-store errors (separate crate)                                    │
//! │  └── StoreError       - Key-value store failures                       │
//! │                                                                         │
//! │  Terminal errors (in app)                                              │
//! │  └── ApiError         - What the operator sees                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError ─┐                                  │
//! │                          StoreError ─┴──► ApiError → Operator          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (code, id, quantities)
//! 3. Errors are enum variants, never String
//! 4. Every failure leaves the domain value it was raised from unchanged

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. None of them is fatal:
/// the operation is abandoned and the application stays interactive.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id does not exist in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Discount code does not exist in the registry.
    #[error("Discount code not found: {0}")]
    DiscountNotFound(String),

    /// Code is unknown, inactive, or malformed when applied to a cart.
    #[error("Invalid or inactive discount code: {0}")]
    InvalidDiscountCode(String),

    /// Insufficient stock to complete a sale.
    ///
    /// ## When This Occurs
    /// - Checkout with the `enforce` stock policy
    /// - A cart line asks for more units than the catalog holds
    ///
    /// ## User Workflow
    /// ```text
    /// Cart: Smoothie × 45
    ///      │
    ///      ▼
    /// checkout(Card) → stock check: available=40
    ///      │
    ///      ▼
    /// InsufficientStock { product: "Smoothie", available: 40, requested: 45 }
    ///      │
    ///      ▼
    /// Operator sees: "Only 40 Smoothie in stock"
    /// ```
    #[error("Insufficient stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    /// Checkout or payment was attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Cart operation referenced a product that has no line in the cart.
    #[error("Product {0} is not in the cart")]
    NotInCart(String),

    /// Cart cannot be edited while the payment step is open.
    #[error("Payment is in progress; cancel it before changing the order")]
    PaymentInProgress,

    /// Payment cancel requested while no payment step is open.
    #[error("No payment is pending")]
    NoPaymentPending,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any mutation happens, so a rejected draft never causes a
/// partial write.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Text that should hold a number does not parse.
    #[error("{field} is not a valid number: '{value}'")]
    InvalidNumber { field: String, value: String },

    /// Invalid format (e.g., illegal characters in a code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., duplicate discount code).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

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
        let err = CoreError::InsufficientStock {
            product: "Smoothie".to_string(),
            available: 40,
            requested: 45,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Smoothie: available 40, requested 45"
        );

        let err = CoreError::InvalidDiscountCode("DOESNOTEXIST".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid or inactive discount code: DOESNOTEXIST"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::InvalidNumber {
            field: "price".to_string(),
            value: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "price is not a valid number: 'abc'");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Duplicate {
            field: "code".to_string(),
            value: "SAVE5".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
