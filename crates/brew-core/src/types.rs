//! # Domain Types
//!
//! Core domain types used throughout Brew POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  DiscountCode   │   │      Sale       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  code (UPPER)   │   │  id (UUID v7)   │       │
//! │  │  name/category  │   │  type/value     │   │  items          │       │
//! │  │  price (Money)  │   │  description    │   │  subtotal/total │       │
//! │  │  stock/image    │   │  active         │   │  discount?      │       │
//! │  └────────┬────────┘   └────────┬────────┘   └────────▲────────┘       │
//! │           │ snapshot            │ resolve             │ checkout        │
//! │           ▼                     ▼                     │                 │
//! │  ┌─────────────────┐   ┌─────────────────┐            │                 │
//! │  │    CartLine     │   │ AppliedDiscount │────────────┘                 │
//! │  │  product + qty  │   │  amount ≤ sub   │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persisted Shape
//! All types serialize camelCase with money as two-decimal numbers, so the
//! stored collections read like:
//! `{"id":"1","name":"Espresso","category":"Coffee","price":3.5,"stock":100,"image":"☕"}`

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;
use crate::DEFAULT_PRODUCT_IMAGE;

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier ("1".."16" for seeded items, UUID v4 afterwards).
    pub id: String,

    /// Display name shown in the grid and on sale lines.
    pub name: String,

    /// Category used for grid filtering.
    pub category: String,

    /// Unit price.
    #[serde(with = "crate::money::decimal")]
    pub price: Money,

    /// Sellable units remaining. Can only go negative under the
    /// `allow_negative` stock policy.
    pub stock: i64,

    /// Glyph shown next to the name.
    #[serde(default = "default_image")]
    pub image: String,
}

fn default_image() -> String {
    DEFAULT_PRODUCT_IMAGE.to_string()
}

impl Product {
    /// Checks whether `quantity` units can be taken from stock.
    pub fn can_sell(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }

    /// Checks whether the grid should flag this product as nearly sold out.
    pub fn stock_warning(&self, level: i64) -> bool {
        self.stock < level
    }
}

/// Operator input for a new product, exactly as typed.
///
/// Numbers stay as text until [`crate::validation::validate_product_draft`]
/// parses them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    pub price: String,
    pub stock: String,
    pub image: Option<String>,
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    Card,
    Mobile,
}

impl PaymentMethod {
    /// All methods, in the order the payment step offers them.
    pub const ALL: [PaymentMethod; 3] = [PaymentMethod::Cash, PaymentMethod::Card, PaymentMethod::Mobile];
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "Cash"),
            PaymentMethod::Card => write!(f, "Card"),
            PaymentMethod::Mobile => write!(f, "Mobile"),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "card" | "credit" | "debit" => Ok(PaymentMethod::Card),
            "mobile" | "phone" => Ok(PaymentMethod::Mobile),
            other => Err(ValidationError::InvalidFormat {
                field: "payment method".to_string(),
                reason: format!("'{}' is not one of cash, card, mobile", other),
            }),
        }
    }
}

// =============================================================================
// Discount Codes
// =============================================================================

/// How a discount value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    /// `value` is a 0-100 percentage of the subtotal.
    Percentage,
    /// `value` is an absolute currency amount.
    Fixed,
}

impl fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscountKind::Percentage => write!(f, "percentage"),
            DiscountKind::Fixed => write!(f, "fixed"),
        }
    }
}

impl FromStr for DiscountKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "percentage" | "percent" | "pct" | "%" => Ok(DiscountKind::Percentage),
            "fixed" | "amount" => Ok(DiscountKind::Fixed),
            other => Err(ValidationError::InvalidFormat {
                field: "discount type".to_string(),
                reason: format!("'{}' is not one of percentage, fixed", other),
            }),
        }
    }
}

/// Computes the currency deduction of a discount rule against a subtotal.
///
/// ## Clamp
/// ```text
/// percentage:  amount = subtotal × value / 100   (rounded to the cent)
/// fixed:       amount = value
///              amount = min(amount, subtotal)     ← total never negative
/// ```
pub fn discount_amount(kind: DiscountKind, value: f64, subtotal: Money) -> Money {
    let raw = match kind {
        DiscountKind::Percentage => subtotal.percentage(value),
        DiscountKind::Fixed => Money::from_decimal(value),
    };
    raw.min(subtotal).max(Money::zero())
}

/// A named discount rule in the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountCode {
    /// Natural key, always trimmed and uppercase.
    pub code: String,

    #[serde(rename = "type")]
    pub kind: DiscountKind,

    /// Percentage (0-100) or currency amount, depending on `kind`.
    pub value: f64,

    #[serde(default)]
    pub description: String,

    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl DiscountCode {
    /// Currency deduction this code grants on `subtotal`.
    pub fn amount_for(&self, subtotal: Money) -> Money {
        discount_amount(self.kind, self.value, subtotal)
    }
}

/// Operator input for a new discount code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountDraft {
    pub code: String,
    pub kind: DiscountKind,
    /// Value as typed; parsed during validation.
    pub value: String,
    pub description: String,
    pub active: bool,
}

/// Partial update of an existing discount code. `None` leaves a field alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountPatch {
    pub kind: Option<DiscountKind>,
    pub value: Option<f64>,
    pub description: Option<String>,
    pub active: Option<bool>,
}

/// A discount resolved against a cart.
///
/// Keeps the rule alongside the amount so the amount can be re-resolved when
/// the cart changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedDiscount {
    pub code: String,

    #[serde(rename = "type")]
    pub kind: DiscountKind,

    pub value: f64,

    /// Resolved deduction; never exceeds the subtotal it was resolved on.
    #[serde(with = "crate::money::decimal")]
    pub amount: Money,
}

impl AppliedDiscount {
    /// Resolves `discount` against `subtotal`.
    pub fn resolve(discount: &DiscountCode, subtotal: Money) -> Self {
        AppliedDiscount {
            code: discount.code.clone(),
            kind: discount.kind,
            value: discount.value,
            amount: discount.amount_for(subtotal),
        }
    }

    /// Recomputes the amount for a changed subtotal.
    pub fn reprice(&mut self, subtotal: Money) {
        self.amount = discount_amount(self.kind, self.value, subtotal);
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One product in the cart (or in a sale), with its quantity.
///
/// The product is a snapshot taken when the line was created: later catalog
/// edits do not change the price of a line already in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,

    /// Always ≥ 1 while the line exists.
    pub quantity: i64,
}

impl CartLine {
    /// Creates a line holding one unit of `product`.
    pub fn from_product(product: &Product) -> Self {
        CartLine {
            product: product.clone(),
            quantity: 1,
        }
    }

    /// Id of the product this line sells.
    pub fn product_id(&self) -> &str {
        &self.product.id
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Sale
// =============================================================================

/// An immutable record of one finalized transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    /// Time-ordered unique id (UUID v7).
    pub id: String,

    /// Cart lines at checkout, in cart order.
    pub items: Vec<CartLine>,

    #[serde(with = "crate::money::decimal")]
    pub subtotal: Money,

    pub discount: Option<AppliedDiscount>,

    /// `subtotal - discount.amount`, or `subtotal` without a discount.
    #[serde(with = "crate::money::decimal")]
    pub total: Money,

    pub payment_method: PaymentMethod,

    /// Instant of checkout.
    pub timestamp: DateTime<Utc>,

    /// Local calendar date of checkout; what "today" reports compare.
    pub date: NaiveDate,

    /// Local wall-clock time of checkout, whole seconds.
    pub time: NaiveTime,
}

impl Sale {
    /// Amount deducted by the applied discount (zero without one).
    pub fn discount_amount(&self) -> Money {
        self.discount
            .as_ref()
            .map(|d| d.amount)
            .unwrap_or_default()
    }

    /// Total units sold across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
