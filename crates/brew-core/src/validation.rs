//! # Validation Module
//!
//! Input validation for operator-entered drafts and patches.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Terminal command parser                                      │
//! │  ├── Argument count, quoting                                           │
//! │  └── Immediate usage hints                                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required fields, lengths, character sets                          │
//! │  ├── Numbers parse, are finite, are non-negative                       │
//! │  └── Discount codes normalized (trim + uppercase)                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Catalog / DiscountBook                                       │
//! │  └── Uniqueness of ids and codes                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every check runs before any mutation, so a rejected draft never causes a
//! partial write.
//!
//! ## Usage
//! ```rust
//! use brew_core::validation::{normalize_code, validate_discount_code};
//!
//! assert_eq!(normalize_code("  save5 "), "SAVE5");
//! assert_eq!(validate_discount_code("welcome10").unwrap(), "WELCOME10");
//! assert!(validate_discount_code("NO SPACES").is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{DiscountCode, DiscountDraft, DiscountKind, Product, ProductDraft};
use crate::DEFAULT_PRODUCT_IMAGE;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted product name or category.
pub const MAX_NAME_LEN: usize = 100;

/// Longest accepted discount code.
pub const MAX_CODE_LEN: usize = 32;

/// Highest unit price, in dollars.
pub const MAX_PRICE: f64 = 10_000.0;

/// Highest stock count the operator can enter.
pub const MAX_STOCK: i64 = 1_000_000;

/// Most units of one product a single cart line can hold.
pub const MAX_LINE_QUANTITY: i64 = 9_999;

// =============================================================================
// String Validators
// =============================================================================

fn required_text(field: &str, value: &str, max: usize) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(value.to_string())
}

/// Validates a product name and returns it trimmed.
///
/// ## Example
/// ```rust
/// use brew_core::validation::validate_product_name;
///
/// assert_eq!(validate_product_name("  Chai Latte ").unwrap(), "Chai Latte");
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<String> {
    required_text("name", name, MAX_NAME_LEN)
}

/// Validates a category name and returns it trimmed.
pub fn validate_category(category: &str) -> ValidationResult<String> {
    required_text("category", category, MAX_NAME_LEN)
}

/// Normalizes a discount code: trimmed and uppercase.
///
/// Every entry point that accepts a code runs it through here, so
/// `"save5"`, `" SAVE5 "` and `"Save5"` all name the same rule.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Normalizes and validates a discount code.
///
/// ## Rules
/// - Must not be empty
/// - At most 32 characters
/// - Letters, digits, hyphens and underscores only
pub fn validate_discount_code(code: &str) -> ValidationResult<String> {
    let code = required_text("code", &normalize_code(code), MAX_CODE_LEN)?;

    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "only letters, digits, '-' and '_' are allowed".to_string(),
        });
    }

    Ok(code)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Parses a finite, non-negative decimal typed by the operator.
pub fn parse_decimal(field: &str, text: &str) -> ValidationResult<f64> {
    let text = text.trim();

    if text.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    let value: f64 = text
        .trim_start_matches('$')
        .parse()
        .map_err(|_| ValidationError::InvalidNumber {
            field: field.to_string(),
            value: text.to_string(),
        })?;

    if !value.is_finite() {
        return Err(ValidationError::InvalidNumber {
            field: field.to_string(),
            value: text.to_string(),
        });
    }

    if value < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(value)
}

/// Parses an operator-typed price ("3.50", "$4", "0").
///
/// ## Example
/// ```rust
/// use brew_core::validation::parse_price;
///
/// assert_eq!(parse_price("4.75").unwrap().cents(), 475);
/// assert!(parse_price("-1").is_err());
/// assert!(parse_price("abc").is_err());
/// ```
pub fn parse_price(text: &str) -> ValidationResult<Money> {
    let price = parse_decimal("price", text)?;
    if price > MAX_PRICE {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0.0,
            max: MAX_PRICE,
        });
    }
    Ok(Money::from_decimal(price))
}

/// Parses an operator-typed stock count. Must be a whole number ≥ 0.
pub fn parse_stock(text: &str) -> ValidationResult<i64> {
    let text = text.trim();

    if text.is_empty() {
        return Err(ValidationError::Required {
            field: "stock".to_string(),
        });
    }

    let stock: i64 = text.parse().map_err(|_| ValidationError::InvalidNumber {
        field: "stock".to_string(),
        value: text.to_string(),
    })?;

    validate_stock(stock)?;
    Ok(stock)
}

/// Validates a stock count entered by the operator.
///
/// Stored stock may sit below zero after backordered sales; only new values
/// typed in go through here.
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "stock".to_string(),
        });
    }
    if stock > MAX_STOCK {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0.0,
            max: MAX_STOCK as f64,
        });
    }
    Ok(())
}

/// Validates a cart line quantity.
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if !(1..=MAX_LINE_QUANTITY).contains(&quantity) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1.0,
            max: MAX_LINE_QUANTITY as f64,
        });
    }
    Ok(())
}

/// Validates a unit price.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }
    Ok(())
}

/// Validates a discount value against its kind.
///
/// ## Rules
/// - Finite and ≥ 0
/// - Percentage values at most 100
pub fn validate_discount_value(kind: DiscountKind, value: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::InvalidNumber {
            field: "value".to_string(),
            value: value.to_string(),
        });
    }

    if value < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "value".to_string(),
        });
    }

    if kind == DiscountKind::Percentage && value > 100.0 {
        return Err(ValidationError::OutOfRange {
            field: "value".to_string(),
            min: 0.0,
            max: 100.0,
        });
    }

    Ok(())
}

// =============================================================================
// Draft Validators
// =============================================================================

/// Validates a product draft and builds the product it describes.
///
/// `id` is supplied by the caller; uniqueness is the catalog's concern.
pub fn validate_product_draft(draft: &ProductDraft, id: String) -> ValidationResult<Product> {
    let name = validate_product_name(&draft.name)?;
    let category = validate_category(&draft.category)?;
    let price = parse_price(&draft.price)?;
    let stock = parse_stock(&draft.stock)?;

    let image = draft
        .image
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_PRODUCT_IMAGE)
        .to_string();

    Ok(Product {
        id,
        name,
        category,
        price,
        stock,
        image,
    })
}

/// Validates an edited product, returning it with trimmed text fields.
///
/// Stock is left to the caller: it is only checked when the edit changes it.
pub fn validate_product(product: &Product) -> ValidationResult<Product> {
    validate_price(product.price)?;

    Ok(Product {
        name: validate_product_name(&product.name)?,
        category: validate_category(&product.category)?,
        ..product.clone()
    })
}

/// Parses an on/off flag ("true", "yes", "on", "1" and their opposites).
pub fn parse_flag(field: &str, text: &str) -> ValidationResult<bool> {
    match text.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" | "active" => Ok(true),
        "false" | "no" | "off" | "0" | "inactive" => Ok(false),
        _ => Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: format!("expected yes or no, got '{}'", text.trim()),
        }),
    }
}

/// Validates a discount draft and builds the rule it describes.
pub fn validate_discount_draft(draft: &DiscountDraft) -> ValidationResult<DiscountCode> {
    let code = validate_discount_code(&draft.code)?;
    let value = parse_decimal("value", &draft.value)?;
    validate_discount_value(draft.kind, value)?;

    Ok(DiscountCode {
        code,
        kind: draft.kind,
        value,
        description: draft.description.trim().to_string(),
        active: draft.active,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
