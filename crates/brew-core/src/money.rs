//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    3.50 × 3 × 10% = 1.0500000000000003  ❌ WRONG!                       │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    1050 cents × 10% = 105 cents                                        │
//! │    Sums and differences are exact; rounding happens once, visibly      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Storage Shape
//! The persisted collections carry prices as two-decimal numbers (`3.5`,
//! `4.75`). The [`decimal`] serde adapter converts at that boundary so the
//! rest of the code never touches floats.
//!
//! ## Usage
//! ```rust
//! use brew_core::money::Money;
//!
//! let price = Money::from_cents(350); // $3.50
//! let line = price.multiply_quantity(3);
//! assert_eq!(line.cents(), 1050);
//! assert_eq!(line.percentage(10.0).cents(), 105);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Differences (e.g. negative stock value) stay representable
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serde**: Serializes as raw cents; use [`decimal`] for store blobs
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use brew_core::money::Money;
    ///
    /// let price = Money::from_cents(475); // Represents $4.75
    /// assert_eq!(price.cents(), 475);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// ## Example
    /// ```rust
    /// use brew_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(3, 50).cents(), 350);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Converts a decimal currency amount to the nearest cent.
    ///
    /// Only for input and storage boundaries (operator-typed prices, stored
    /// blobs, fixed discount values). Arithmetic never goes back to floats.
    ///
    /// ## Example
    /// ```rust
    /// use brew_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(3.5).cents(), 350);
    /// assert_eq!(Money::from_decimal(4.75).cents(), 475);
    /// ```
    pub fn from_decimal(amount: f64) -> Self {
        Money((amount * 100.0).round() as i64)
    }

    /// Returns the amount in major units (for serialization only).
    pub fn as_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## User Workflow
    /// ```text
    /// Product: Espresso $3.50
    /// Quantity: 2
    ///      │
    ///      ▼
    /// multiply_quantity(2) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Line Total: $7.00
    /// ```
    ///
    /// Saturates instead of wrapping; the cart caps quantities well below
    /// that point.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Returns `pct` percent of this amount, rounded half away from zero to
    /// the cent.
    ///
    /// ## Example
    /// ```rust
    /// use brew_core::money::Money;
    ///
    /// let subtotal = Money::from_cents(1050);
    /// assert_eq!(subtotal.percentage(10.0).cents(), 105);
    /// assert_eq!(subtotal.percentage(15.0).cents(), 158); // 157.5 → 158
    /// ```
    pub fn percentage(&self, pct: f64) -> Money {
        Money((self.0 as f64 * pct / 100.0).round() as i64)
    }

    /// Returns the smaller of two amounts.
    #[inline]
    pub fn min(self, other: Money) -> Money {
        if other.0 < self.0 {
            other
        } else {
            self
        }
    }

    /// Divides evenly into `parts`, rounding to the nearest cent.
    ///
    /// Returns zero when `parts` is zero.
    pub fn average_over(&self, parts: usize) -> Money {
        if parts == 0 {
            return Money::zero();
        }
        Money((self.0 as f64 / parts as f64).round() as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money with a dollar sign and two decimals.
///
/// ## Note
/// The terminal formats with the configured currency symbol instead.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Decimal Serde Adapter
// =============================================================================

/// Serializes `Money` as a decimal number of major units (`3.5`).
///
/// ## Usage
/// ```rust
/// use brew_core::money::Money;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Line {
///     #[serde(with = "brew_core::money::decimal")]
///     price: Money,
/// }
///
/// let json = serde_json::to_string(&Line { price: Money::from_cents(350) }).unwrap();
/// assert_eq!(json, r#"{"price":3.5}"#);
/// ```
pub mod decimal {
    use super::Money;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(money: &Money, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(money.as_decimal())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Money, D::Error>
    where
        D: Deserializer<'de>,
    {
        let amount = f64::deserialize(deserializer)?;
        Ok(Money::from_decimal(amount))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
