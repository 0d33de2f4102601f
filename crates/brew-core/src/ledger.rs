//! # Sales Ledger
//!
//! Append-only history of finalized sales, newest first. There is no update
//! or delete: a completed transaction is never edited.

use uuid::Uuid;

use crate::types::Sale;

/// Generates a sale id: a UUID v7, ordered by creation time and unique even
/// for two checkouts within the same millisecond.
pub fn new_sale_id() -> String {
    Uuid::now_v7().to_string()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesLedger {
    sales: Vec<Sale>,
}

impl SalesLedger {
    /// Wraps a loaded history. Expected newest first, as stored.
    pub fn from_sales(sales: Vec<Sale>) -> Self {
        SalesLedger { sales }
    }

    /// Wraps sales recorded out of order (backfilled or imported history),
    /// putting the most recent timestamp first.
    pub fn from_unordered(mut sales: Vec<Sale>) -> Self {
        sales.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        SalesLedger { sales }
    }

    /// Records a sale at the front of the history.
    pub fn append(&mut self, sale: Sale) {
        self.sales.insert(0, sale);
    }

    /// All sales, newest first.
    pub fn all(&self) -> &[Sale] {
        &self.sales
    }

    pub fn into_sales(self) -> Vec<Sale> {
        self.sales
    }

    pub fn get(&self, id: &str) -> Option<&Sale> {
        self.sales.iter().find(|s| s.id == id)
    }

    /// The `n` most recent sales.
    pub fn recent(&self, n: usize) -> &[Sale] {
        &self.sales[..n.min(self.sales.len())]
    }

    pub fn len(&self) -> usize {
        self.sales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }
}
