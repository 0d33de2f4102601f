//! Dashboard figures over the current ledger and catalog.

use chrono::{Local, NaiveDate};

use brew_core::report::SalesSummary;

use super::PosState;

impl PosState {
    /// Builds the summary for `today`, using the configured top-products
    /// limit and low-stock threshold.
    pub fn summary(&self, today: NaiveDate) -> SalesSummary {
        SalesSummary::build(
            self.ledger.all(),
            self.catalog.products(),
            today,
            self.config.top_products_limit,
            self.config.low_stock_threshold,
        )
    }

    /// Summary for the local calendar date.
    pub fn summary_today(&self) -> SalesSummary {
        self.summary(Local::now().date_naive())
    }
}
