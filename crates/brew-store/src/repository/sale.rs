//! # Sale Repository
//!
//! The sales history under `coffee_sales`, stored newest first. Nothing is
//! seeded; the key is first written by a checkout.

use std::sync::Arc;

use brew_core::Sale;

use super::{encode_collection, load_collection, SALES_KEY};
use crate::error::StoreResult;
use crate::kv::KeyValueStore;

/// Repository for the sales history.
#[derive(Clone)]
pub struct SaleRepository {
    store: Arc<dyn KeyValueStore>,
}

impl SaleRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        SaleRepository { store }
    }

    /// Loads the history; empty when nothing was ever written.
    pub async fn load(&self) -> StoreResult<Vec<Sale>> {
        Ok(load_collection(self.store.as_ref(), SALES_KEY)
            .await?
            .unwrap_or_default())
    }

    /// Overwrites the stored history.
    pub async fn save(&self, sales: &[Sale]) -> StoreResult<()> {
        let value = encode_collection(SALES_KEY, sales)?;
        self.store.set(SALES_KEY, &value).await
    }

    /// Encodes a history for a batched write.
    pub fn entry(sales: &[Sale]) -> StoreResult<(String, String)> {
        Ok((SALES_KEY.to_string(), encode_collection(SALES_KEY, sales)?))
    }
}
