//! # Storage Handle
//!
//! One shared [`KeyValueStore`] plus the repositories over it, and the
//! atomic commit used by checkout.
//!
//! ## Checkout Commit
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  commit_sale(products, sales)                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  encode both collections   ── fails? nothing written                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  set_many([coffee_products, coffee_sales])                             │
//! │       │                                                                 │
//! │       ├── Ok  ──► stock decrement AND ledger append are durable        │
//! │       └── Err ──► neither is                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;
use tracing::info;

use brew_core::{Product, Sale};

use crate::error::StoreResult;
use crate::kv::{KeyValueStore, MemoryStore};
use crate::repository::discount::DiscountRepository;
use crate::repository::product::ProductRepository;
use crate::repository::sale::SaleRepository;
use crate::sqlite::{SqliteStore, StoreConfig};

/// Cloneable handle over a shared store.
#[derive(Clone)]
pub struct Storage {
    store: Arc<dyn KeyValueStore>,
}

impl Storage {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Storage { store }
    }

    /// Opens an SQLite-backed storage.
    pub async fn open_sqlite(config: StoreConfig) -> StoreResult<Self> {
        let store = SqliteStore::open(config).await?;
        Ok(Storage::new(Arc::new(store)))
    }

    /// Volatile storage; everything is lost on exit.
    pub fn memory() -> Self {
        Storage::new(Arc::new(MemoryStore::new()))
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.store.clone())
    }

    pub fn sales(&self) -> SaleRepository {
        SaleRepository::new(self.store.clone())
    }

    pub fn discounts(&self) -> DiscountRepository {
        DiscountRepository::new(self.store.clone())
    }

    /// Writes the updated catalog and ledger together, all or nothing.
    pub async fn commit_sale(&self, products: &[Product], sales: &[Sale]) -> StoreResult<()> {
        let entries = vec![
            ProductRepository::entry(products)?,
            SaleRepository::entry(sales)?,
        ];
        self.store.set_many(&entries).await?;

        info!(sales = sales.len(), "Sale committed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{PRODUCTS_KEY, SALES_KEY};
    use brew_core::catalog::default_products;
    use brew_core::{Cart, PaymentMethod};
    use chrono::Local;

    fn checkout_copies() -> (Vec<Product>, Vec<Sale>) {
        let mut products = default_products();
        let mut cart = Cart::new();
        cart.add_item(&products[0]).unwrap();
        let sale = cart.build_sale(PaymentMethod::Card, &Local::now()).unwrap();
        products[0].stock -= 1;
        (products, vec![sale])
    }

    #[tokio::test]
    async fn test_commit_sale_writes_both_keys() {
        let storage = Storage::memory();
        let (products, sales) = checkout_copies();

        storage.commit_sale(&products, &sales).await.unwrap();

        assert_eq!(storage.products().load().await.unwrap(), Some(products));
        assert_eq!(storage.sales().load().await.unwrap(), sales);
    }

    #[tokio::test]
    async fn test_failed_commit_writes_neither() {
        let memory = MemoryStore::new();
        let storage = Storage::new(Arc::new(memory.clone()));
        storage.products().initialize().await.unwrap();

        memory.fail_writes(true);
        let (products, sales) = checkout_copies();
        assert!(storage.commit_sale(&products, &sales).await.is_err());

        let stored = storage.products().load().await.unwrap().unwrap();
        assert_eq!(stored[0].stock, 100);
        assert!(memory.get(SALES_KEY).await.unwrap().is_none());
        assert!(memory.get(PRODUCTS_KEY).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_commit_sale_on_sqlite() {
        let storage = Storage::new(Arc::new(SqliteStore::in_memory().await.unwrap()));
        let (products, sales) = checkout_copies();

        storage.commit_sale(&products, &sales).await.unwrap();
        assert_eq!(storage.sales().load().await.unwrap().len(), 1);
        assert_eq!(
            storage.products().load().await.unwrap().unwrap()[0].stock,
            99
        );
    }
}
