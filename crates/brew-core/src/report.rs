//! # Reporting
//!
//! Read-side aggregation over the sales history and the catalog. Nothing
//! here stores state or reads the clock: callers pass `today`.
//!
//! ## Dashboard
//! ```text
//! ┌──────────────┬───────────────┬──────────────┬───────────────┐
//! │ Today        │ Total revenue │ Orders       │ Average order │
//! │ today_revenue│ total_revenue │ order_count  │ average_order │
//! ├──────────────┴───────────────┼──────────────┴───────────────┤
//! │ Top products (by revenue)    │ Low stock (< threshold)      │
//! └──────────────────────────────┴──────────────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::Serialize;

use crate::money::Money;
use crate::types::{PaymentMethod, Product, Sale};

/// Units and revenue for one product name across all sales.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSales {
    pub name: String,
    pub quantity: i64,
    pub revenue: Money,
}

/// Orders and revenue for one payment method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentTotals {
    pub method: PaymentMethod,
    pub orders: usize,
    pub revenue: Money,
}

/// Sum of sale totals dated `today`.
pub fn today_revenue(sales: &[Sale], today: NaiveDate) -> Money {
    sales
        .iter()
        .filter(|s| s.date == today)
        .map(|s| s.total)
        .sum()
}

pub fn total_revenue(sales: &[Sale]) -> Money {
    sales.iter().map(|s| s.total).sum()
}

pub fn order_count(sales: &[Sale]) -> usize {
    sales.len()
}

/// Total revenue over order count, rounded to the cent. Zero without orders.
pub fn average_order(sales: &[Sale]) -> Money {
    total_revenue(sales).average_over(order_count(sales))
}

/// Best sellers by line revenue (price × quantity, before discounts),
/// grouped by product name.
///
/// Ties keep first-seen order, since the sort is stable.
pub fn top_products(sales: &[Sale], n: usize) -> Vec<ProductSales> {
    let mut totals: Vec<ProductSales> = Vec::new();

    for item in sales.iter().flat_map(|s| s.items.iter()) {
        match totals.iter_mut().find(|t| t.name == item.product.name) {
            Some(entry) => {
                entry.quantity += item.quantity;
                entry.revenue += item.line_total();
            }
            None => totals.push(ProductSales {
                name: item.product.name.clone(),
                quantity: item.quantity,
                revenue: item.line_total(),
            }),
        }
    }

    totals.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    totals.truncate(n);
    totals
}

/// Products with stock below `threshold`, in catalog order.
pub fn low_stock(products: &[Product], threshold: i64) -> Vec<&Product> {
    products.iter().filter(|p| p.stock < threshold).collect()
}

/// Orders and revenue per payment method, in [`PaymentMethod::ALL`] order.
/// Methods with no orders are included with zeros.
pub fn payment_breakdown(sales: &[Sale]) -> Vec<PaymentTotals> {
    PaymentMethod::ALL
        .iter()
        .map(|&method| {
            let matching = sales.iter().filter(|s| s.payment_method == method);
            PaymentTotals {
                method,
                orders: matching.clone().count(),
                revenue: matching.map(|s| s.total).sum(),
            }
        })
        .collect()
}

/// Sum of discount amounts granted across all sales.
pub fn discount_total(sales: &[Sale]) -> Money {
    sales.iter().map(Sale::discount_amount).sum()
}

// =============================================================================
// Summary
// =============================================================================

/// Everything the reports screen shows, computed in one pass of calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub today: NaiveDate,
    pub today_revenue: Money,
    pub total_revenue: Money,
    pub order_count: usize,
    pub average_order: Money,
    pub discount_total: Money,
    pub top_products: Vec<ProductSales>,
    pub payments: Vec<PaymentTotals>,
    pub low_stock: Vec<Product>,
}

impl SalesSummary {
    pub fn build(
        sales: &[Sale],
        products: &[Product],
        today: NaiveDate,
        top_n: usize,
        low_stock_threshold: i64,
    ) -> Self {
        SalesSummary {
            today,
            today_revenue: today_revenue(sales, today),
            total_revenue: total_revenue(sales),
            order_count: order_count(sales),
            average_order: average_order(sales),
            discount_total: discount_total(sales),
            top_products: top_products(sales, top_n),
            payments: payment_breakdown(sales),
            low_stock: low_stock(products, low_stock_threshold)
                .into_iter()
                .cloned()
                .collect(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
