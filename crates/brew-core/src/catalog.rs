//! # Catalog
//!
//! The product list: seeding, add/edit, category views and stock deltas.
//!
//! ## Stock Flow
//! ```text
//! ┌──────────────┐   add_item    ┌──────────┐  checkout   ┌──────────────────┐
//! │   Catalog    │ ────────────► │   Cart   │ ──────────► │ check_stock      │
//! │ (stock: 100) │   snapshot    │ qty: 2   │             │ apply_stock_delta│
//! └──────────────┘               └──────────┘             └────────┬─────────┘
//!        ▲                                                         │
//!        └───────────────────── stock: 98 ─────────────────────────┘
//! ```
//!
//! Stock only changes through [`Catalog::apply_stock_delta`] (checkout) or an
//! explicit [`Catalog::update`].

use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{CartLine, Product, ProductDraft};
use crate::validation::{validate_product, validate_product_draft, validate_stock};
use crate::ALL_CATEGORIES;

// =============================================================================
// Default Catalog
// =============================================================================

/// The catalog written on first run: 16 items across Coffee, Pastry,
/// Cold Drinks and Tea, with ids "1" to "16".
pub fn default_products() -> Vec<Product> {
    const SEED: [(&str, &str, i64, i64, &str); 16] = [
        ("Espresso", "Coffee", 350, 100, "☕"),
        ("Americano", "Coffee", 400, 100, "☕"),
        ("Cappuccino", "Coffee", 450, 100, "☕"),
        ("Latte", "Coffee", 475, 100, "☕"),
        ("Mocha", "Coffee", 525, 100, "☕"),
        ("Flat White", "Coffee", 450, 100, "☕"),
        ("Croissant", "Pastry", 350, 50, "🥐"),
        ("Muffin", "Pastry", 300, 50, "🧁"),
        ("Bagel", "Pastry", 325, 50, "🥯"),
        ("Cookie", "Pastry", 250, 60, "🍪"),
        ("Iced Coffee", "Cold Drinks", 425, 100, "🧊"),
        ("Iced Latte", "Cold Drinks", 500, 100, "🧊"),
        ("Cold Brew", "Cold Drinks", 475, 80, "🧊"),
        ("Smoothie", "Cold Drinks", 600, 40, "🥤"),
        ("Green Tea", "Tea", 350, 80, "🍵"),
        ("Black Tea", "Tea", 350, 80, "🍵"),
    ];

    SEED.iter()
        .enumerate()
        .map(|(i, (name, category, cents, stock, image))| Product {
            id: (i + 1).to_string(),
            name: name.to_string(),
            category: category.to_string(),
            price: Money::from_cents(*cents),
            stock: *stock,
            image: image.to_string(),
        })
        .collect()
}

/// Generates an id for an operator-added product.
pub fn new_product_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Catalog
// =============================================================================

/// Ordered product list with unique ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Wraps a loaded product list, keeping its order.
    pub fn from_products(products: Vec<Product>) -> Self {
        Catalog { products }
    }

    /// Catalog holding [`default_products`].
    pub fn with_defaults() -> Self {
        Catalog::from_products(default_products())
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn into_products(self) -> Vec<Product> {
        self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Looks up a product, failing with `ProductNotFound`.
    pub fn require(&self, id: &str) -> CoreResult<&Product> {
        self.get(id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }

    /// Validates a draft and appends the new product under a fresh id.
    ///
    /// ## Example
    /// ```rust
    /// use brew_core::{Catalog, ProductDraft};
    ///
    /// let mut catalog = Catalog::with_defaults();
    /// let chai = catalog
    ///     .add(&ProductDraft {
    ///         name: "Chai".into(),
    ///         category: "Tea".into(),
    ///         price: "4.25".into(),
    ///         stock: "30".into(),
    ///         image: None,
    ///     })
    ///     .unwrap();
    /// assert_eq!(catalog.len(), 17);
    /// assert_eq!(catalog.get(&chai.id).unwrap().name, "Chai");
    /// ```
    pub fn add(&mut self, draft: &ProductDraft) -> CoreResult<Product> {
        let product = validate_product_draft(draft, new_product_id())?;

        if self.get(&product.id).is_some() {
            return Err(ValidationError::Duplicate {
                field: "product id".to_string(),
                value: product.id,
            }
            .into());
        }

        self.products.push(product.clone());
        Ok(product)
    }

    /// Replaces the product with the same id.
    ///
    /// Returns `false` (and changes nothing) when no product has that id.
    /// A backordered product keeps its negative stock through edits that
    /// leave stock alone.
    pub fn update(&mut self, product: &Product) -> CoreResult<bool> {
        let product = validate_product(product)?;

        let Some(slot) = self.products.iter_mut().find(|p| p.id == product.id) else {
            return Ok(false);
        };

        if product.stock != slot.stock {
            validate_stock(product.stock)?;
        }

        *slot = product;
        Ok(true)
    }

    /// Checks that every line can be served from current stock.
    pub fn check_stock(&self, lines: &[CartLine]) -> CoreResult<()> {
        for line in lines {
            let product = self.require(line.product_id())?;
            if !product.can_sell(line.quantity) {
                return Err(CoreError::InsufficientStock {
                    product: product.name.clone(),
                    available: product.stock,
                    requested: line.quantity,
                });
            }
        }
        Ok(())
    }

    /// Decrements stock by each line's quantity.
    ///
    /// Does not check sufficiency; lines whose product is gone are skipped.
    pub fn apply_stock_delta(&mut self, lines: &[CartLine]) {
        for line in lines {
            if let Some(product) = self.products.iter_mut().find(|p| p.id == line.product_id()) {
                product.stock -= line.quantity;
            }
        }
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for product in &self.products {
            if !seen.contains(&product.category.as_str()) {
                seen.push(&product.category);
            }
        }
        seen
    }

    /// Products in `category`. `"All"` or an empty name selects everything.
    pub fn in_category(&self, category: &str) -> Vec<&Product> {
        let category = category.trim();
        if category.is_empty() || category.eq_ignore_ascii_case(ALL_CATEGORIES) {
            return self.products.iter().collect();
        }
        self.products
            .iter()
            .filter(|p| p.category.eq_ignore_ascii_case(category))
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(catalog: &Catalog, id: &str, quantity: i64) -> CartLine {
        CartLine {
            product: catalog.get(id).unwrap().clone(),
            quantity,
        }
    }

    #[test]
    fn test_default_catalog() {
        let catalog = Catalog::with_defaults();
        assert_eq!(catalog.len(), 16);
        assert_eq!(
            catalog.categories(),
            vec!["Coffee", "Pastry", "Cold Drinks", "Tea"]
        );

        let espresso = catalog.get("1").unwrap();
        assert_eq!(espresso.name, "Espresso");
        assert_eq!(espresso.price.cents(), 350);

        let smoothie = catalog.get("14").unwrap();
        assert_eq!(smoothie.stock, 40);
        assert_eq!(catalog.get("16").unwrap().name, "Black Tea");
    }

    #[test]
    fn test_in_category() {
        let catalog = Catalog::with_defaults();
        assert_eq!(catalog.in_category("All").len(), 16);
        assert_eq!(catalog.in_category("").len(), 16);
        assert_eq!(catalog.in_category("pastry").len(), 4);
        assert_eq!(catalog.in_category("Tea").len(), 2);
        assert!(catalog.in_category("Sandwiches").is_empty());
    }

    #[test]
    fn test_add_rejects_invalid_draft() {
        let mut catalog = Catalog::with_defaults();
        let result = catalog.add(&ProductDraft {
            name: "Chai".into(),
            category: String::new(),
            price: "4".into(),
            stock: "1".into(),
            image: None,
        });
        assert!(matches!(result, Err(CoreError::Validation(_))));
        assert_eq!(catalog.len(), 16);
    }

    #[test]
    fn test_update_known_and_unknown() {
        let mut catalog = Catalog::with_defaults();

        let mut latte = catalog.get("4").unwrap().clone();
        latte.price = Money::from_cents(495);
        assert!(catalog.update(&latte).unwrap());
        assert_eq!(catalog.get("4").unwrap().price.cents(), 495);

        let mut ghost = latte.clone();
        ghost.id = "999".to_string();
        assert!(!catalog.update(&ghost).unwrap());
        assert_eq!(catalog.len(), 16);

        latte.stock = -1;
        assert!(catalog.update(&latte).is_err());
    }

    #[test]
    fn test_update_backordered_product() {
        let mut catalog = Catalog::with_defaults();
        let lines = vec![line(&catalog, "14", 41)];
        catalog.apply_stock_delta(&lines);
        assert_eq!(catalog.get("14").unwrap().stock, -1);

        let mut smoothie = catalog.get("14").unwrap().clone();
        smoothie.name = "Berry Smoothie".to_string();
        assert!(catalog.update(&smoothie).unwrap());
        assert_eq!(catalog.get("14").unwrap().name, "Berry Smoothie");
        assert_eq!(catalog.get("14").unwrap().stock, -1);

        smoothie.stock = -5;
        assert!(catalog.update(&smoothie).is_err());

        smoothie.stock = 30;
        assert!(catalog.update(&smoothie).unwrap());
        assert_eq!(catalog.get("14").unwrap().stock, 30);
    }

    #[test]
    fn test_stock_delta() {
        let mut catalog = Catalog::with_defaults();
        let lines = vec![line(&catalog, "1", 2), line(&catalog, "7", 1)];

        catalog.check_stock(&lines).unwrap();
        catalog.apply_stock_delta(&lines);

        assert_eq!(catalog.get("1").unwrap().stock, 98);
        assert_eq!(catalog.get("7").unwrap().stock, 49);
    }

    #[test]
    fn test_check_stock_insufficient() {
        let catalog = Catalog::with_defaults();
        let lines = vec![line(&catalog, "14", 45)];

        match catalog.check_stock(&lines) {
            Err(CoreError::InsufficientStock {
                product,
                available,
                requested,
            }) => {
                assert_eq!(product, "Smoothie");
                assert_eq!(available, 40);
                assert_eq!(requested, 45);
            }
            other => panic!("expected InsufficientStock, got {:?}", other),
        }
    }
}
