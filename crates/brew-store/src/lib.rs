//! # brew-store: Persistent Store Adapter for Brew POS
//!
//! Key-value persistence for the catalog, the sales history and the
//! discount codes. Each collection is one JSON blob under one key.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Brew POS Data Flow                               │
//! │                                                                         │
//! │  PosState (checkout, add_product, add_code, ...)                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   brew-store (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Storage     │    │  Repositories │    │  Backends    │  │   │
//! │  │   │ (storage.rs)  │    │ product.rs    │    │ sqlite.rs    │  │   │
//! │  │   │               │───►│ sale.rs       │───►│ kv.rs        │  │   │
//! │  │   │ commit_sale   │    │ discount.rs   │    │ (memory)     │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  SQLite: kv_store(key, value, updated_at)                       │   │
//! │  │  ~/.local/share/brewpos/brew.db (platform data dir)             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use brew_store::{Storage, StoreConfig};
//!
//! # async fn demo() -> brew_store::StoreResult<()> {
//! let storage = Storage::open_sqlite(StoreConfig::new("./brew.db")).await?;
//! let products = storage.products().initialize().await?;
//! assert_eq!(products.len(), 16);
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod kv;
pub mod migrations;
pub mod repository;
pub mod sqlite;
pub mod storage;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use kv::{KeyValueStore, MemoryStore};
pub use sqlite::{SqliteStore, StoreConfig};
pub use storage::Storage;

pub use repository::discount::DiscountRepository;
pub use repository::product::ProductRepository;
pub use repository::sale::SaleRepository;
pub use repository::{DISCOUNTS_KEY, PRODUCTS_KEY, SALES_KEY};
