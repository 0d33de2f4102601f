//! # Product Commands
//!
//! Catalog listing and product administration.
//!
//! ```text
//! brew> products pastry
//! 7      🥐 Croissant          Pastry          $3.50  stock   50
//! 8      🧁 Muffin             Pastry          $3.00  stock   50
//! ...
//! brew> edit-product 7 stock 4
//! 7      🥐 Croissant          Pastry          $3.50  stock    4  ⚠ low
//! ```

use clap::ValueEnum;
use tracing::debug;

use brew_core::validation::{parse_price, parse_stock};
use brew_core::{Product, ProductDraft, ALL_CATEGORIES, DEFAULT_PRODUCT_IMAGE};

use super::invalid;
use crate::error::ApiResult;
use crate::state::{ConfigState, PosState};

/// Editable product fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProductField {
    Name,
    Category,
    Price,
    Stock,
    Image,
}

/// One product as a table row; low stock is flagged.
pub fn product_row(config: &ConfigState, product: &Product) -> String {
    let flag = if product.stock_warning(config.stock_warning_level) {
        "  ⚠ low"
    } else {
        ""
    };
    format!(
        "{:<6} {} {:<18} {:<12} {:>8}  stock {:>4}{}",
        product.id,
        product.image,
        product.name,
        product.category,
        config.format_money(product.price),
        product.stock,
        flag
    )
}

pub fn list(state: &PosState, category: Option<&str>) -> String {
    let category = category.unwrap_or(ALL_CATEGORIES);
    let products = state.products_in(category);
    debug!(category, count = products.len(), "products command");

    if products.is_empty() {
        return format!("No products in '{}'", category);
    }

    products
        .iter()
        .map(|p| product_row(state.config(), p))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn categories(state: &PosState) -> String {
    let mut names = vec![ALL_CATEGORIES];
    names.extend(state.categories());
    names.join(" | ")
}

pub async fn add(
    state: &mut PosState,
    name: String,
    category: String,
    price: String,
    stock: String,
    image: Option<String>,
) -> ApiResult<String> {
    let draft = ProductDraft {
        name,
        category,
        price,
        stock,
        image,
    };

    let product = state.add_product(&draft).await?;
    Ok(format!("✓ Added {}", product_row(state.config(), &product)))
}

pub async fn edit(
    state: &mut PosState,
    id: &str,
    field: ProductField,
    value: &str,
) -> ApiResult<String> {
    let mut product = state.catalog().require(id)?.clone();

    match field {
        ProductField::Name => product.name = value.to_string(),
        ProductField::Category => product.category = value.to_string(),
        ProductField::Price => product.price = parse_price(value).map_err(invalid)?,
        ProductField::Stock => product.stock = parse_stock(value).map_err(invalid)?,
        ProductField::Image => {
            let image = value.trim();
            product.image = if image.is_empty() {
                DEFAULT_PRODUCT_IMAGE.to_string()
            } else {
                image.to_string()
            };
        }
    }

    state.update_product(&product).await?;

    let updated = state.catalog().get(id).unwrap_or(&product);
    Ok(format!("✓ Updated {}", product_row(state.config(), updated)))
}
