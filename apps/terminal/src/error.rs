//! # API Error Type
//!
//! Unified error type for state operations and terminal commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Brew POS                               │
//! │                                                                         │
//! │  Operator types: discount doesnotexist                                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command handler → PosState method                               │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Storage error? ── StoreError::QueryFailed("...") ──┐           │  │
//! │  │         │             (logged in full)               │           │  │
//! │  │         ▼                                            ▼           │  │
//! │  │  Business error? ── CoreError::InvalidDiscountCode ─ ApiError ──►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ✗ Invalid or inactive discount code: DOESNOTEXIST                     │
//! │    (state unchanged, prompt returns)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No error is fatal: the command is abandoned and the prompt comes back.

use serde::Serialize;

use brew_core::CoreError;
use brew_store::StoreError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Error returned from state operations and commands.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable message for the operator
    pub message: String,
}

/// Error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product or discount code does not exist
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Discount code unknown, inactive or malformed
    InvalidDiscount,

    /// Storage read or write failed
    StorageError,

    /// Insufficient stock at checkout
    InsufficientStock,

    /// Cart operation failed
    CartError,

    /// Payment step misuse
    PaymentError,

    /// Command line could not be parsed
    Usage,

    /// Internal error
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn usage(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Usage, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Storage failures are logged with detail and shown as a generic notice.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match &err {
            StoreError::Serialization { key, .. } => {
                tracing::error!(error = %err, key = %key, "Stored collection is malformed");
                ApiError::new(
                    ErrorCode::StorageError,
                    format!("Stored data under '{}' is unreadable", key),
                )
            }
            _ => {
                tracing::error!(error = %err, "Storage operation failed");
                ApiError::new(ErrorCode::StorageError, "Storage operation failed")
            }
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::DiscountNotFound(code) => ApiError::not_found("Discount code", &code),
            CoreError::InvalidDiscountCode(_) => {
                ApiError::new(ErrorCode::InvalidDiscount, err.to_string())
            }
            CoreError::InsufficientStock {
                product,
                available,
                requested,
            } => ApiError::new(
                ErrorCode::InsufficientStock,
                format!(
                    "Insufficient stock for {}: {} available, {} requested",
                    product, available, requested
                ),
            ),
            CoreError::EmptyCart | CoreError::NotInCart(_) => {
                ApiError::new(ErrorCode::CartError, err.to_string())
            }
            CoreError::PaymentInProgress | CoreError::NoPaymentPending => {
                ApiError::new(ErrorCode::PaymentError, err.to_string())
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use brew_core::ValidationError;

    #[test]
    fn test_core_error_codes() {
        let err: ApiError = CoreError::InvalidDiscountCode("NOPE".into()).into();
        assert_eq!(err.code, ErrorCode::InvalidDiscount);
        assert_eq!(err.message, "Invalid or inactive discount code: NOPE");

        let err: ApiError = CoreError::EmptyCart.into();
        assert_eq!(err.code, ErrorCode::CartError);

        let err: ApiError = CoreError::from(ValidationError::Required {
            field: "name".into(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.to_string(), "name is required");
    }

    #[test]
    fn test_storage_error_is_generic() {
        let err: ApiError = StoreError::QueryFailed("disk I/O error".into()).into();
        assert_eq!(err.code, ErrorCode::StorageError);
        assert_eq!(err.message, "Storage operation failed");
    }
}
