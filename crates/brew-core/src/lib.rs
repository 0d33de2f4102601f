//! # brew-core: Pure Business Logic for Brew POS
//!
//! This crate is the **heart** of Brew POS. It contains all business logic
//! as pure functions and plain data with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Brew POS Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Terminal (apps/terminal)                       │   │
//! │  │    products ──► add ──► discount ──► checkout ──► report        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ PosState controller                    │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ brew-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │  ┌─────────┐ ┌──────────┐ ┌────────┐ ┌────────┐ ┌──────────┐  │   │
//! │  │  │ catalog │ │ discount │ │  cart  │ │ ledger │ │  report  │  │   │
//! │  │  │ Product │ │ Discount │ │  Cart  │ │  Sale  │ │ Summary  │  │   │
//! │  │  │ stock   │ │  Book    │ │ phases │ │ newest │ │ top/low  │  │   │
//! │  │  └─────────┘ └──────────┘ └────────┘ └────────┘ └──────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO CLOCK READS IN REPORTS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 brew-store (Persistence Layer)                  │   │
//! │  │      coffee_products • coffee_sales • coffee_discounts          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, DiscountCode, Sale, ...)
//! - [`money`] - Money type with integer cent arithmetic
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation for drafts and patches
//! - [`catalog`] - Product list, stock deltas, category views
//! - [`discount`] - Discount registry and code resolution
//! - [`cart`] - In-progress order and its state machine
//! - [`ledger`] - Append-only sales history
//! - [`report`] - Read-side aggregation over sales and products
//!
//! ## Example Usage
//!
//! ```rust
//! use brew_core::{Cart, DiscountBook, Money};
//! use brew_core::catalog::default_products;
//!
//! let products = default_products();
//! let mut cart = Cart::new();
//! cart.add_item(&products[0]).unwrap(); // Espresso $3.50
//! cart.add_item(&products[0]).unwrap();
//! cart.add_item(&products[6]).unwrap(); // Croissant $3.50
//!
//! let book = DiscountBook::with_defaults();
//! cart.apply_discount(&book, "save5").unwrap();
//!
//! assert_eq!(cart.subtotal(), Money::from_cents(1050));
//! assert_eq!(cart.total(), Money::from_cents(550));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod discount;
pub mod error;
pub mod ledger;
pub mod money;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, OrderPhase};
pub use catalog::Catalog;
pub use discount::DiscountBook;
pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::SalesLedger;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Products whose stock falls below this count are reported as low stock.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 20;

/// Number of best sellers shown on the reports dashboard.
pub const DEFAULT_TOP_PRODUCTS: usize = 5;

/// Stock level under which the product grid flags an item in red.
pub const DEFAULT_STOCK_WARNING_LEVEL: i64 = 10;

/// Glyph used when a new product is added without one.
pub const DEFAULT_PRODUCT_IMAGE: &str = "☕";

/// Pseudo-category that selects the whole catalog.
pub const ALL_CATEGORIES: &str = "All";
