//! # State Module
//!
//! One controller, [`PosState`], owns everything the terminal works with.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                         PosState                                │   │
//! │  │                                                                 │   │
//! │  │  storage   ── Storage (Arc<dyn KeyValueStore>)                  │   │
//! │  │  catalog   ── Catalog          (coffee_products)                │   │
//! │  │  discounts ── DiscountBook     (coffee_discounts)               │   │
//! │  │  ledger    ── SalesLedger      (coffee_sales)                   │   │
//! │  │  cart      ── Cart             (memory only)                    │   │
//! │  │  config    ── ConfigState      (read-only)                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  EVERY MUTATION OF A PERSISTED COLLECTION:                             │
//! │    clone ──► mutate copy ──► write ──► swap (only if write succeeded)  │
//! │                                                                         │
//! │  A failed write leaves memory exactly as it was, so what is shown      │
//! │  and what is stored never diverge.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The operations are split by concern:
//! - `catalog.rs`   - product list and product edits
//! - `discounts.rs` - discount code administration
//! - `checkout.rs`  - cart edits, payment step, checkout, sales history
//! - `reports.rs`   - dashboard figures

mod catalog;
mod checkout;
mod config;
mod discounts;
mod reports;

pub use config::{ConfigError, ConfigState, StockPolicy, DEFAULT_LOG_FILTER};

use tracing::{info, warn};

use brew_core::{Cart, Catalog, DiscountBook, SalesLedger};
use brew_store::Storage;

use crate::error::ApiResult;

/// The application state controller.
pub struct PosState {
    storage: Storage,
    config: ConfigState,
    catalog: Catalog,
    discounts: DiscountBook,
    ledger: SalesLedger,
    cart: Cart,
}

impl PosState {
    /// Loads (or seeds) every collection from `storage`.
    ///
    /// ## Startup
    /// - `coffee_products` absent: the default menu is written
    /// - `coffee_discounts` absent: the default codes are written
    /// - `coffee_sales` absent: empty history, written on first checkout
    ///
    /// A malformed collection fails startup rather than being overwritten.
    pub async fn initialize(storage: Storage, config: ConfigState) -> ApiResult<Self> {
        let products = storage.products().initialize().await?;
        let codes = storage.discounts().initialize().await?;
        let sales = storage.sales().load().await?;

        let (discounts, shadowed) = DiscountBook::from_codes(codes);
        for code in &shadowed {
            warn!(code = %code.code, "Duplicate discount code ignored; dropped on next write");
        }

        info!(
            products = products.len(),
            codes = discounts.len(),
            sales = sales.len(),
            "State initialized"
        );

        Ok(PosState {
            storage,
            config,
            catalog: Catalog::from_products(products),
            discounts,
            ledger: SalesLedger::from_sales(sales),
            cart: Cart::new(),
        })
    }

    pub fn config(&self) -> &ConfigState {
        &self.config
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn discounts(&self) -> &DiscountBook {
        &self.discounts
    }

    pub fn ledger(&self) -> &SalesLedger {
        &self.ledger
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }
}
