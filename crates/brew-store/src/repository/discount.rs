//! # Discount Repository
//!
//! The discount codes under `coffee_discounts`. Seeds the four default codes
//! on first run.

use std::sync::Arc;
use tracing::info;

use brew_core::discount::default_discounts;
use brew_core::DiscountCode;

use super::{encode_collection, load_collection, DISCOUNTS_KEY};
use crate::error::StoreResult;
use crate::kv::KeyValueStore;

/// Repository for the discount codes.
#[derive(Clone)]
pub struct DiscountRepository {
    store: Arc<dyn KeyValueStore>,
}

impl DiscountRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        DiscountRepository { store }
    }

    pub async fn load(&self) -> StoreResult<Option<Vec<DiscountCode>>> {
        load_collection(self.store.as_ref(), DISCOUNTS_KEY).await
    }

    /// Loads the codes, seeding the defaults on first run.
    pub async fn initialize(&self) -> StoreResult<Vec<DiscountCode>> {
        if let Some(codes) = self.load().await? {
            return Ok(codes);
        }

        let codes = default_discounts();
        self.save(&codes).await?;
        info!(count = codes.len(), "Seeded default discount codes");
        Ok(codes)
    }

    pub async fn save(&self, codes: &[DiscountCode]) -> StoreResult<()> {
        let value = encode_collection(DISCOUNTS_KEY, codes)?;
        self.store.set(DISCOUNTS_KEY, &value).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;
    use brew_core::DiscountKind;

    #[tokio::test]
    async fn test_initialize_seeds_defaults() {
        let store = MemoryStore::new();
        let repo = DiscountRepository::new(Arc::new(store.clone()));

        let codes = repo.initialize().await.unwrap();
        let names: Vec<&str> = codes.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(names, vec!["WELCOME10", "COFFEE20", "SAVE5", "FREEPASTRY"]);
        assert!(codes.iter().all(|c| c.active));
        assert_eq!(codes[3].kind, DiscountKind::Fixed);
        assert_eq!(codes[3].value, 3.5);

        repo.initialize().await.unwrap();
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn test_round_trip() {
        let repo = DiscountRepository::new(Arc::new(MemoryStore::new()));
        let mut codes = default_discounts();
        codes[1].active = false;
        codes.remove(0);

        repo.save(&codes).await.unwrap();
        assert_eq!(repo.load().await.unwrap(), Some(codes));
    }
}
