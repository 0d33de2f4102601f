//! # Product Repository
//!
//! The product list under `coffee_products`.
//!
//! ## First Run
//! ```text
//! initialize()
//!     │
//!     ├── key present ──► decode and return it (even if empty)
//!     │
//!     └── key absent ───► write default_products() ──► return them
//! ```

use std::sync::Arc;
use tracing::info;

use brew_core::catalog::default_products;
use brew_core::Product;

use super::{encode_collection, load_collection, PRODUCTS_KEY};
use crate::error::StoreResult;
use crate::kv::KeyValueStore;

/// Repository for the product collection.
#[derive(Clone)]
pub struct ProductRepository {
    store: Arc<dyn KeyValueStore>,
}

impl ProductRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        ProductRepository { store }
    }

    /// Loads the stored products, `None` if nothing was ever written.
    pub async fn load(&self) -> StoreResult<Option<Vec<Product>>> {
        load_collection(self.store.as_ref(), PRODUCTS_KEY).await
    }

    /// Loads the products, seeding the 16 defaults on first run.
    pub async fn initialize(&self) -> StoreResult<Vec<Product>> {
        if let Some(products) = self.load().await? {
            return Ok(products);
        }

        let products = default_products();
        self.save(&products).await?;
        info!(count = products.len(), "Seeded default catalog");
        Ok(products)
    }

    /// Overwrites the stored list.
    pub async fn save(&self, products: &[Product]) -> StoreResult<()> {
        let value = encode_collection(PRODUCTS_KEY, products)?;
        self.store.set(PRODUCTS_KEY, &value).await
    }

    /// Encodes a list for a batched write.
    pub fn entry(products: &[Product]) -> StoreResult<(String, String)> {
        Ok((
            PRODUCTS_KEY.to_string(),
            encode_collection(PRODUCTS_KEY, products)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::kv::MemoryStore;
    use brew_core::Money;

    #[tokio::test]
    async fn test_initialize_seeds_once() {
        let store = MemoryStore::new();
        let repo = ProductRepository::new(Arc::new(store.clone()));

        let products = repo.initialize().await.unwrap();
        assert_eq!(products.len(), 16);
        assert_eq!(store.write_count(), 1);

        let again = repo.initialize().await.unwrap();
        assert_eq!(again, products);
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_list_is_not_reseeded() {
        let store = MemoryStore::new();
        store.set(PRODUCTS_KEY, "[]").await.unwrap();
        let repo = ProductRepository::new(Arc::new(store));

        assert!(repo.initialize().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_round_trip_keeps_order() {
        let repo = ProductRepository::new(Arc::new(MemoryStore::new()));
        let mut products = default_products();
        products.reverse();
        products[0].price = Money::from_cents(999);

        repo.save(&products).await.unwrap();
        assert_eq!(repo.load().await.unwrap(), Some(products));
    }

    #[tokio::test]
    async fn test_reads_decimal_json() {
        let store = MemoryStore::new();
        store
            .set(
                PRODUCTS_KEY,
                r#"[{"id":"1","name":"Espresso","category":"Coffee","price":3.5,"stock":100,"image":"☕"}]"#,
            )
            .await
            .unwrap();
        let repo = ProductRepository::new(Arc::new(store));

        let products = repo.load().await.unwrap().unwrap();
        assert_eq!(products[0].price.cents(), 350);
    }

    #[tokio::test]
    async fn test_malformed_value() {
        let store = MemoryStore::new();
        store.set(PRODUCTS_KEY, "{not json").await.unwrap();
        let repo = ProductRepository::new(Arc::new(store));

        assert!(matches!(
            repo.load().await,
            Err(StoreError::Serialization { .. })
        ));
    }
}
