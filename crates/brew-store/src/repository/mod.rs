//! # Repository Module
//!
//! Typed access to the three persisted collections.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PosState                                                               │
//! │       │                                                                 │
//! │       │  storage.products().save(&products)                            │
//! │       ▼                                                                 │
//! │  ProductRepository / SaleRepository / DiscountRepository               │
//! │  ├── load()        JSON array → Vec<T>                                 │
//! │  ├── initialize()  load, or write the defaults on first run            │
//! │  └── save(&[T])    Vec<T> → JSON array, full overwrite                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  dyn KeyValueStore  ("coffee_products" → "[…]")                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every save rewrites the whole collection under its key; there are no
//! partial updates.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::kv::KeyValueStore;

pub mod discount;
pub mod product;
pub mod sale;

/// Key holding the product list.
pub const PRODUCTS_KEY: &str = "coffee_products";

/// Key holding the sales history, newest first.
pub const SALES_KEY: &str = "coffee_sales";

/// Key holding the discount codes.
pub const DISCOUNTS_KEY: &str = "coffee_discounts";

/// Reads and decodes the collection under `key`; `None` when absent.
pub(crate) async fn load_collection<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> StoreResult<Option<Vec<T>>> {
    let Some(raw) = store.get(key).await? else {
        debug!(key, "Collection absent");
        return Ok(None);
    };

    let items: Vec<T> =
        serde_json::from_str(&raw).map_err(|e| StoreError::serialization(key, e))?;
    debug!(key, count = items.len(), "Collection loaded");
    Ok(Some(items))
}

/// Encodes a collection as the JSON array stored under `key`.
pub(crate) fn encode_collection<T: Serialize>(key: &str, items: &[T]) -> StoreResult<String> {
    serde_json::to_string(items).map_err(|e| StoreError::serialization(key, e))
}
