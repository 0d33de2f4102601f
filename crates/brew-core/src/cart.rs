//! # Cart Module
//!
//! The in-progress order: lines, the applied discount and the payment phase.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Cart Lifecycle                                 │
//! │                                                                         │
//! │   ┌───────┐  add_item   ┌──────────┐  begin_payment  ┌────────────────┐ │
//! │   │ Empty │ ──────────► │ Building │ ──────────────► │ PaymentPending │ │
//! │   └───────┘ ◄────────── └──────────┘ ◄────────────── └───────┬────────┘ │
//! │       ▲    last line        │   ▲      cancel_payment        │          │
//! │       │    removed          │   └── edits, discount          │          │
//! │       │                     │                                │          │
//! │       └──── finalize ◄──────┴──── checkout (sale built) ◄────┘          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! While payment is pending the order is frozen: edits and discount changes
//! fail with [`CoreError::PaymentInProgress`].
//!
//! ## Discount Clamp
//! The applied discount keeps its rule, and its amount is re-resolved after
//! every line change, so `discount.amount ≤ subtotal` holds at all times.

use chrono::{DateTime, TimeZone, Timelike, Utc};

use crate::discount::DiscountBook;
use crate::error::{CoreError, CoreResult};
use crate::ledger::new_sale_id;
use crate::money::Money;
use crate::types::{AppliedDiscount, CartLine, PaymentMethod, Product, Sale};
use crate::validation::validate_quantity;

/// Phase of the active order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderPhase {
    /// No lines.
    Empty,
    /// At least one line, open for edits.
    Building,
    /// Payment method being chosen; order frozen.
    PaymentPending,
}

/// The active order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
    discount: Option<AppliedDiscount>,
    payment_pending: bool,
}

impl Cart {
    pub fn new() -> Self {
        Cart::default()
    }

    pub fn phase(&self) -> OrderPhase {
        if self.payment_pending {
            OrderPhase::PaymentPending
        } else if self.lines.is_empty() {
            OrderPhase::Empty
        } else {
            OrderPhase::Building
        }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn discount(&self) -> Option<&AppliedDiscount> {
        self.discount.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    /// Units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn quantity_of(&self, product_id: &str) -> i64 {
        self.lines
            .iter()
            .find(|l| l.product_id() == product_id)
            .map(|l| l.quantity)
            .unwrap_or(0)
    }

    // =========================================================================
    // Totals
    // =========================================================================

    /// Sum of price × quantity over all lines.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn discount_amount(&self) -> Money {
        self.discount.as_ref().map(|d| d.amount).unwrap_or_default()
    }

    /// Subtotal minus the applied discount. Never negative.
    pub fn total(&self) -> Money {
        self.subtotal() - self.discount_amount()
    }

    // =========================================================================
    // Edits
    // =========================================================================

    fn ensure_editable(&self) -> CoreResult<()> {
        if self.payment_pending {
            return Err(CoreError::PaymentInProgress);
        }
        Ok(())
    }

    fn reprice(&mut self) {
        let subtotal = self.subtotal();
        if let Some(discount) = self.discount.as_mut() {
            discount.reprice(subtotal);
        }
    }

    /// Adds one unit of `product`: bumps an existing line or appends a new
    /// one holding a snapshot of the product.
    pub fn add_item(&mut self, product: &Product) -> CoreResult<()> {
        self.ensure_editable()?;

        match self.lines.iter_mut().find(|l| l.product_id() == product.id) {
            Some(line) => {
                let quantity = line.quantity.saturating_add(1);
                validate_quantity(quantity)?;
                line.quantity = quantity;
            }
            None => self.lines.push(CartLine::from_product(product)),
        }

        self.reprice();
        Ok(())
    }

    /// Adjusts a line by `delta`. A line reaching zero or below is removed;
    /// one pushed past [`MAX_LINE_QUANTITY`](crate::validation::MAX_LINE_QUANTITY)
    /// is rejected and left as it was.
    ///
    /// ## Example
    /// ```rust
    /// use brew_core::{Cart, OrderPhase};
    /// use brew_core::catalog::default_products;
    ///
    /// let products = default_products();
    /// let mut cart = Cart::new();
    /// cart.add_item(&products[0]).unwrap();
    /// cart.change_quantity("1", 2).unwrap();
    /// assert_eq!(cart.quantity_of("1"), 3);
    ///
    /// cart.change_quantity("1", -3).unwrap();
    /// assert_eq!(cart.phase(), OrderPhase::Empty);
    /// ```
    pub fn change_quantity(&mut self, product_id: &str, delta: i64) -> CoreResult<()> {
        self.ensure_editable()?;

        let index = self
            .lines
            .iter()
            .position(|l| l.product_id() == product_id)
            .ok_or_else(|| CoreError::NotInCart(product_id.to_string()))?;

        let quantity = self.lines[index].quantity.saturating_add(delta);
        if quantity <= 0 {
            self.lines.remove(index);
        } else {
            validate_quantity(quantity)?;
            self.lines[index].quantity = quantity;
        }

        self.reprice();
        Ok(())
    }

    /// Removes a line. Removing a product that is not in the cart is a no-op.
    pub fn remove_item(&mut self, product_id: &str) -> CoreResult<()> {
        self.ensure_editable()?;
        self.lines.retain(|l| l.product_id() != product_id);
        self.reprice();
        Ok(())
    }

    /// Drops every line and the applied discount.
    pub fn clear(&mut self) -> CoreResult<()> {
        self.ensure_editable()?;
        self.lines.clear();
        self.discount = None;
        Ok(())
    }

    // =========================================================================
    // Discount
    // =========================================================================

    /// Resolves `code` against the current subtotal and makes it the single
    /// applied discount, replacing any previous one.
    ///
    /// On failure the cart is unchanged.
    pub fn apply_discount(&mut self, book: &DiscountBook, code: &str) -> CoreResult<&AppliedDiscount> {
        self.ensure_editable()?;
        let applied = book.resolve(code, self.subtotal())?;
        Ok(&*self.discount.insert(applied))
    }

    /// Clears the applied discount, returning it.
    pub fn remove_discount(&mut self) -> CoreResult<Option<AppliedDiscount>> {
        self.ensure_editable()?;
        Ok(self.discount.take())
    }

    // =========================================================================
    // Payment
    // =========================================================================

    /// Opens the payment step. Requires at least one line.
    pub fn begin_payment(&mut self) -> CoreResult<()> {
        if self.lines.is_empty() {
            return Err(CoreError::EmptyCart);
        }
        self.payment_pending = true;
        Ok(())
    }

    /// Backs out of the payment step, returning to `Building`.
    pub fn cancel_payment(&mut self) -> CoreResult<()> {
        if !self.payment_pending {
            return Err(CoreError::NoPaymentPending);
        }
        self.payment_pending = false;
        Ok(())
    }

    /// Builds the sale record for this order without changing the cart.
    ///
    /// `now` supplies the instant plus the local calendar date and wall-clock
    /// time stored on the sale.
    pub fn build_sale<Tz: TimeZone>(
        &self,
        payment_method: PaymentMethod,
        now: &DateTime<Tz>,
    ) -> CoreResult<Sale> {
        if self.lines.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let time = now.time();
        let time = time.with_nanosecond(0).unwrap_or(time);

        Ok(Sale {
            id: new_sale_id(),
            items: self.lines.clone(),
            subtotal: self.subtotal(),
            discount: self.discount.clone(),
            total: self.total(),
            payment_method,
            timestamp: now.with_timezone(&Utc),
            date: now.date_naive(),
            time,
        })
    }

    /// Resets to `Empty` after a committed checkout.
    pub fn finalize(&mut self) {
        *self = Cart::new();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_products;
    use crate::validation::MAX_LINE_QUANTITY;
    use chrono::{FixedOffset, NaiveDate};

    fn espresso_croissant_cart() -> Cart {
        let products = default_products();
        let mut cart = Cart::new();
        cart.add_item(&products[0]).unwrap();
        cart.add_item(&products[0]).unwrap();
        cart.add_item(&products[6]).unwrap();
        cart
    }

    #[test]
    fn test_add_item_merges_lines() {
        let cart = espresso_croissant_cart();
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(cart.quantity_of("1"), 2);
        assert_eq!(cart.subtotal().cents(), 1050);
        assert_eq!(cart.phase(), OrderPhase::Building);
    }

    #[test]
    fn test_change_quantity_removes_at_zero() {
        let mut cart = espresso_croissant_cart();
        cart.change_quantity("1", -2).unwrap();
        assert_eq!(cart.item_count(), 1);
        assert!(cart.lines().iter().all(|l| l.quantity > 0));

        assert!(matches!(
            cart.change_quantity("1", 1),
            Err(CoreError::NotInCart(_))
        ));
    }

    #[test]
    fn test_line_quantity_is_capped() {
        let mut cart = espresso_croissant_cart();

        assert!(matches!(
            cart.change_quantity("1", i64::MAX),
            Err(CoreError::Validation(_))
        ));
        assert!(cart.change_quantity("1", i64::MAX / 100).is_err());
        assert_eq!(cart.quantity_of("1"), 2);
        assert_eq!(cart.subtotal().cents(), 1050);

        cart.change_quantity("1", MAX_LINE_QUANTITY - 2).unwrap();
        assert_eq!(cart.quantity_of("1"), MAX_LINE_QUANTITY);
        assert!(cart.add_item(&default_products()[0]).is_err());
        assert_eq!(cart.subtotal().cents(), 350 * MAX_LINE_QUANTITY + 350);

        cart.change_quantity("1", i64::MIN).unwrap();
        assert_eq!(cart.quantity_of("1"), 0);
    }

    #[test]
    fn test_fixed_discount_example() {
        let mut cart = espresso_croissant_cart();
        let book = DiscountBook::with_defaults();

        cart.apply_discount(&book, "SAVE5").unwrap();
        assert_eq!(cart.discount_amount().cents(), 500);
        assert_eq!(cart.total().cents(), 550);
    }

    #[test]
    fn test_percentage_discount_example() {
        let mut cart = espresso_croissant_cart();
        let book = DiscountBook::with_defaults();

        cart.apply_discount(&book, "WELCOME10").unwrap();
        assert_eq!(cart.discount_amount().cents(), 105);
        assert_eq!(cart.total().cents(), 945);
    }

    #[test]
    fn test_invalid_code_leaves_cart_unchanged() {
        let mut cart = espresso_croissant_cart();
        let book = DiscountBook::with_defaults();
        cart.apply_discount(&book, "SAVE5").unwrap();
        let before = cart.clone();

        assert!(matches!(
            cart.apply_discount(&book, "doesnotexist"),
            Err(CoreError::InvalidDiscountCode(_))
        ));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_new_discount_replaces_old() {
        let mut cart = espresso_croissant_cart();
        let book = DiscountBook::with_defaults();

        cart.apply_discount(&book, "SAVE5").unwrap();
        cart.apply_discount(&book, "WELCOME10").unwrap();
        assert_eq!(cart.discount().unwrap().code, "WELCOME10");
        assert_eq!(cart.total().cents(), 945);
    }

    #[test]
    fn test_clamp_holds_after_removing_lines() {
        let mut cart = espresso_croissant_cart();
        let book = DiscountBook::with_defaults();
        cart.apply_discount(&book, "SAVE5").unwrap();

        cart.remove_item("1").unwrap();
        assert_eq!(cart.subtotal().cents(), 350);
        assert_eq!(cart.discount_amount().cents(), 350);
        assert_eq!(cart.total(), Money::zero());

        cart.add_item(&default_products()[4]).unwrap();
        assert_eq!(cart.discount_amount().cents(), 500);
        assert_eq!(cart.total().cents(), 375);
    }

    #[test]
    fn test_payment_phase_freezes_cart() {
        let mut cart = espresso_croissant_cart();
        let book = DiscountBook::with_defaults();

        cart.begin_payment().unwrap();
        assert_eq!(cart.phase(), OrderPhase::PaymentPending);
        assert!(matches!(
            cart.add_item(&default_products()[1]),
            Err(CoreError::PaymentInProgress)
        ));
        assert!(matches!(
            cart.apply_discount(&book, "SAVE5"),
            Err(CoreError::PaymentInProgress)
        ));

        cart.cancel_payment().unwrap();
        assert_eq!(cart.phase(), OrderPhase::Building);
        assert!(matches!(
            cart.cancel_payment(),
            Err(CoreError::NoPaymentPending)
        ));
    }

    #[test]
    fn test_empty_cart_cannot_pay() {
        let mut cart = Cart::new();
        assert!(matches!(cart.begin_payment(), Err(CoreError::EmptyCart)));
        assert!(matches!(
            cart.build_sale(PaymentMethod::Cash, &Utc::now()),
            Err(CoreError::EmptyCart)
        ));
    }

    #[test]
    fn test_build_sale_snapshot() {
        let mut cart = espresso_croissant_cart();
        cart.apply_discount(&DiscountBook::with_defaults(), "SAVE5")
            .unwrap();

        let offset = FixedOffset::west_opt(5 * 3600).unwrap();
        let now = offset.with_ymd_and_hms(2024, 3, 1, 21, 30, 15).unwrap();
        let sale = cart.build_sale(PaymentMethod::Cash, &now).unwrap();

        assert_eq!(sale.items.len(), 2);
        assert_eq!(sale.subtotal.cents(), 1050);
        assert_eq!(sale.total.cents(), 550);
        assert_eq!(sale.discount_amount().cents(), 500);
        assert_eq!(sale.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(sale.time.to_string(), "21:30:15");
        assert_eq!(
            sale.timestamp.date_naive(),
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()
        );

        // Building a sale does not consume the cart.
        assert_eq!(cart.item_count(), 2);
        cart.finalize();
        assert_eq!(cart.phase(), OrderPhase::Empty);
        assert!(cart.discount().is_none());
    }
}
