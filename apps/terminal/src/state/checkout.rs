//! # Cart & Checkout
//!
//! Cart edits, the payment step and the checkout commit on [`PosState`].
//!
//! ## Checkout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  checkout(Card)                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  cart empty? ─────────────────────────────► EmptyCart                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  policy = enforce && qty > stock? ────────► InsufficientStock          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Sale snapshot (v7 id, lines, totals, method, timestamp/date/time)     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  catalog' = catalog − quantities      ledger' = [sale] + ledger        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  storage.commit_sale(catalog', ledger')  ── Err ──► nothing changes    │
//! │       │                                              (cart kept too)   │
//! │       ▼                                                                 │
//! │  swap catalog/ledger, cart → Empty                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart edits are memory-only and need no write.

use chrono::{DateTime, Local, TimeZone};
use tracing::{debug, info};

use brew_core::{AppliedDiscount, CoreError, PaymentMethod, Sale};

use super::{PosState, StockPolicy};
use crate::error::{ApiError, ApiResult};

impl PosState {
    // =========================================================================
    // Cart Edits
    // =========================================================================

    /// Adds one unit of a catalog product to the cart.
    pub fn add_to_cart(&mut self, product_id: &str) -> ApiResult<()> {
        let product = self.catalog.require(product_id)?;
        self.cart.add_item(product)?;

        debug!(product_id, quantity = self.cart.quantity_of(product_id), "Added to cart");
        Ok(())
    }

    /// Adjusts a cart line by `delta`; at zero or below the line is removed.
    pub fn change_quantity(&mut self, product_id: &str, delta: i64) -> ApiResult<()> {
        self.cart.change_quantity(product_id, delta)?;
        debug!(product_id, delta, "Cart quantity changed");
        Ok(())
    }

    pub fn remove_from_cart(&mut self, product_id: &str) -> ApiResult<()> {
        self.cart.remove_item(product_id)?;
        Ok(())
    }

    pub fn clear_cart(&mut self) -> ApiResult<()> {
        self.cart.clear()?;
        debug!("Cart cleared");
        Ok(())
    }

    /// Applies an active discount code, replacing any previous one.
    pub fn apply_discount(&mut self, code: &str) -> ApiResult<AppliedDiscount> {
        let applied = self.cart.apply_discount(&self.discounts, code)?.clone();
        info!(code = %applied.code, amount = %applied.amount, "Discount applied");
        Ok(applied)
    }

    pub fn remove_discount(&mut self) -> ApiResult<Option<AppliedDiscount>> {
        Ok(self.cart.remove_discount()?)
    }

    // =========================================================================
    // Payment
    // =========================================================================

    pub fn begin_payment(&mut self) -> ApiResult<()> {
        self.cart.begin_payment()?;
        debug!(total = %self.cart.total(), "Payment started");
        Ok(())
    }

    pub fn cancel_payment(&mut self) -> ApiResult<()> {
        self.cart.cancel_payment()?;
        debug!("Payment cancelled");
        Ok(())
    }

    /// Completes the order at the current local time.
    pub async fn checkout(&mut self, payment_method: PaymentMethod) -> ApiResult<Sale> {
        self.checkout_at(payment_method, Local::now()).await
    }

    /// Completes the order at `now`.
    ///
    /// Stock decrement and ledger append are written in one atomic commit.
    /// On any failure the catalog, ledger and cart are left as they were.
    pub async fn checkout_at<Tz: TimeZone>(
        &mut self,
        payment_method: PaymentMethod,
        now: DateTime<Tz>,
    ) -> ApiResult<Sale> {
        if self.cart.is_empty() {
            return Err(CoreError::EmptyCart.into());
        }

        if self.config.stock_policy == StockPolicy::Enforce {
            self.catalog.check_stock(self.cart.lines())?;
        }

        let sale = self.cart.build_sale(payment_method, &now)?;

        let mut catalog = self.catalog.clone();
        catalog.apply_stock_delta(&sale.items);
        let mut ledger = self.ledger.clone();
        ledger.append(sale.clone());

        self.storage
            .commit_sale(catalog.products(), ledger.all())
            .await?;

        self.catalog = catalog;
        self.ledger = ledger;
        self.cart.finalize();

        info!(
            sale_id = %sale.id,
            total = %sale.total,
            method = %sale.payment_method,
            items = sale.total_quantity(),
            "Checkout complete"
        );
        Ok(sale)
    }

    // =========================================================================
    // Sales History
    // =========================================================================

    /// The `n` most recent sales, newest first.
    pub fn recent_sales(&self, n: usize) -> &[Sale] {
        self.ledger.recent(n)
    }

    pub fn sale(&self, id: &str) -> Option<&Sale> {
        self.ledger.get(id)
    }

    /// Looks a sale up by full id or by the tail of its id, as shown in
    /// the sales listing. The tail must match exactly one sale.
    pub fn find_sale(&self, reference: &str) -> ApiResult<&Sale> {
        let reference = reference.trim().to_lowercase();
        if reference.is_empty() {
            return Err(ApiError::validation("Sale id is required"));
        }
        if let Some(sale) = self.ledger.get(&reference) {
            return Ok(sale);
        }

        let mut matches = self
            .ledger
            .all()
            .iter()
            .filter(|s| s.id.to_lowercase().ends_with(&reference));

        match (matches.next(), matches.next()) {
            (Some(sale), None) => Ok(sale),
            (None, _) => Err(ApiError::not_found("Sale", &reference)),
            (Some(_), Some(_)) => Err(ApiError::validation(format!(
                "Sale id '{}' matches more than one sale; type more of it",
                reference
            ))),
        }
    }
}
