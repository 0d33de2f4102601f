//! # Catalog Operations
//!
//! Product listing and product administration on [`PosState`].
//!
//! Product edits never touch lines already in the cart: a line keeps the
//! snapshot taken when it was added.

use tracing::{debug, info};

use brew_core::{Product, ProductDraft};

use super::PosState;
use crate::error::ApiResult;

impl PosState {
    /// Products in `category`; "All" or empty lists the whole catalog.
    pub fn products_in(&self, category: &str) -> Vec<&Product> {
        self.catalog.in_category(category)
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        self.catalog.categories()
    }

    /// Validates and appends a new product, then persists the catalog.
    pub async fn add_product(&mut self, draft: &ProductDraft) -> ApiResult<Product> {
        let mut next = self.catalog.clone();
        let product = next.add(draft)?;

        self.storage.products().save(next.products()).await?;
        self.catalog = next;

        info!(id = %product.id, name = %product.name, "Product added");
        Ok(product)
    }

    /// Replaces the product with the same id.
    ///
    /// Returns `false` (and writes nothing) when no product has that id.
    pub async fn update_product(&mut self, product: &Product) -> ApiResult<bool> {
        let mut next = self.catalog.clone();
        if !next.update(product)? {
            debug!(id = %product.id, "Update for unknown product ignored");
            return Ok(false);
        }

        self.storage.products().save(next.products()).await?;
        self.catalog = next;

        info!(id = %product.id, "Product updated");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::{ConfigState, StockPolicy};
    use brew_core::{Money, PaymentMethod};
    use brew_store::{MemoryStore, Storage};
    use std::sync::Arc;

    async fn state_with(memory: &MemoryStore) -> PosState {
        let storage = Storage::new(Arc::new(memory.clone()));
        PosState::initialize(storage, ConfigState::default())
            .await
            .unwrap()
    }

    fn draft(name: &str, price: &str, stock: &str) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            category: "Coffee".to_string(),
            price: price.to_string(),
            stock: stock.to_string(),
            image: None,
        }
    }

    #[tokio::test]
    async fn test_add_product_persists() {
        let memory = MemoryStore::new();
        let mut state = state_with(&memory).await;

        let product = state.add_product(&draft("Flat White", "4.25", "30")).await.unwrap();
        assert_eq!(product.price, Money::from_cents(425));
        assert_eq!(product.image, "☕");
        assert_eq!(state.catalog().len(), 17);

        let stored = state.storage().products().load().await.unwrap().unwrap();
        assert_eq!(stored.len(), 17);
        assert_eq!(stored[16].name, "Flat White");
    }

    #[tokio::test]
    async fn test_add_product_validation() {
        let memory = MemoryStore::new();
        let mut state = state_with(&memory).await;
        let writes = memory.write_count();

        let err = state.add_product(&draft("", "4.25", "30")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = state.add_product(&draft("Mocha", "-1", "30")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = state.add_product(&draft("Mocha", "4", "many")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        assert_eq!(state.catalog().len(), 16);
        assert_eq!(memory.write_count(), writes);
    }

    #[tokio::test]
    async fn test_add_product_storage_failure_keeps_catalog() {
        let memory = MemoryStore::new();
        let mut state = state_with(&memory).await;

        memory.fail_writes(true);
        let err = state.add_product(&draft("Cortado", "3.75", "10")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::StorageError);
        assert_eq!(state.catalog().len(), 16);
    }

    #[tokio::test]
    async fn test_update_product() {
        let memory = MemoryStore::new();
        let mut state = state_with(&memory).await;

        let mut espresso = state.catalog().get("1").unwrap().clone();
        espresso.price = Money::from_cents(375);
        assert!(state.update_product(&espresso).await.unwrap());
        assert_eq!(state.catalog().get("1").unwrap().price, Money::from_cents(375));

        let mut ghost = espresso.clone();
        ghost.id = "nope".to_string();
        let writes = memory.write_count();
        assert!(!state.update_product(&ghost).await.unwrap());
        assert_eq!(memory.write_count(), writes);

        espresso.stock = -3;
        assert!(state.update_product(&espresso).await.is_err());
        assert_eq!(state.catalog().get("1").unwrap().stock, 100);
    }

    #[tokio::test]
    async fn test_backordered_product_stays_editable() {
        let memory = MemoryStore::new();
        let config = ConfigState {
            stock_policy: StockPolicy::AllowNegative,
            ..ConfigState::default()
        };
        let storage = Storage::new(Arc::new(memory.clone()));
        let mut state = PosState::initialize(storage, config).await.unwrap();

        state.add_to_cart("14").unwrap();
        state.change_quantity("14", 40).unwrap();
        state.checkout(PaymentMethod::Card).await.unwrap();
        assert_eq!(state.catalog().get("14").unwrap().stock, -1);

        let mut smoothie = state.catalog().get("14").unwrap().clone();
        smoothie.name = "Mango Smoothie".to_string();
        smoothie.price = Money::from_cents(575);
        assert!(state.update_product(&smoothie).await.unwrap());

        let stored = state.storage().products().load().await.unwrap().unwrap();
        let saved = stored.iter().find(|p| p.id == "14").unwrap();
        assert_eq!(saved.name, "Mango Smoothie");
        assert_eq!(saved.stock, -1);

        smoothie.stock = 25;
        assert!(state.update_product(&smoothie).await.unwrap());
        assert_eq!(state.catalog().get("14").unwrap().stock, 25);
    }

    #[tokio::test]
    async fn test_category_views() {
        let memory = MemoryStore::new();
        let state = state_with(&memory).await;

        assert_eq!(
            state.categories(),
            vec!["Coffee", "Pastry", "Cold Drinks", "Tea"]
        );
        assert_eq!(state.products_in("tea").len(), 2);
        assert_eq!(state.products_in("All").len(), 16);
    }
}
