//! # Sales Commands
//!
//! Sales history, single-sale receipts and the reports dashboard.

use brew_core::report::SalesSummary;
use brew_core::Sale;

use super::cart::discount_label;
use crate::error::ApiResult;
use crate::state::{ConfigState, PosState};

/// Characters of the id shown in listings and accepted by `sale`.
const SHORT_ID_LEN: usize = 8;

/// Trailing characters of a sale id. The head of a time-ordered id is
/// shared by sales rung up close together; the tail is random.
pub fn short_id(id: &str) -> String {
    let skip = id.chars().count().saturating_sub(SHORT_ID_LEN);
    id.chars().skip(skip).collect()
}

pub fn sale_row(config: &ConfigState, sale: &Sale) -> String {
    let short_id = short_id(&sale.id);
    let discount = sale
        .discount
        .as_ref()
        .map(|d| format!("  ({})", d.code))
        .unwrap_or_default();

    format!(
        "{} {}  {}  {:<6} {:>3} items {:>10}{}",
        sale.date.format("%Y-%m-%d"),
        sale.time.format("%H:%M:%S"),
        short_id,
        sale.payment_method.to_string(),
        sale.total_quantity(),
        config.format_money(sale.total),
        discount
    )
}

pub fn recent(state: &PosState, count: usize) -> String {
    let sales = state.recent_sales(count);
    if sales.is_empty() {
        return "No sales yet".to_string();
    }

    sales
        .iter()
        .map(|s| sale_row(state.config(), s))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn detail(state: &PosState, reference: &str) -> ApiResult<String> {
    let sale = state.find_sale(reference)?;
    Ok(render_sale(state.config(), sale))
}

/// Renders one sale as an itemized receipt.
///
/// ```text
/// Sale 0190a4c2-…-5f3e91d2
/// 2024-06-15 09:30:05 · Mobile
///   2 × Espresso       @ $3.50      $7.00
///   1 × Croissant      @ $3.50      $3.50
/// ─────────────────────────────────────────
/// Subtotal                         $10.50
/// Discount SAVE5 ($5.00)           -$5.00
/// TOTAL                             $5.50
/// ```
pub fn render_sale(config: &ConfigState, sale: &Sale) -> String {
    let mut out = vec![
        format!("Sale {}", sale.id),
        format!(
            "{} {} · {}",
            sale.date.format("%Y-%m-%d"),
            sale.time.format("%H:%M:%S"),
            sale.payment_method
        ),
    ];

    for line in &sale.items {
        out.push(format!(
            "{:>3} × {:<18} @ {:>8} {:>10}",
            line.quantity,
            line.product.name,
            config.format_money(line.product.price),
            config.format_money(line.line_total())
        ));
    }

    out.push("─".repeat(45));
    out.push(format!("{:<34} {:>10}", "Subtotal", config.format_money(sale.subtotal)));
    if let Some(discount) = &sale.discount {
        out.push(format!(
            "{:<34} {:>10}",
            format!("Discount {}", discount_label(config, discount)),
            config.format_currency(-discount.amount.cents())
        ));
    }
    out.push(format!("{:<34} {:>10}", "TOTAL", config.format_money(sale.total)));

    out.join("\n")
}

pub fn report(state: &PosState) -> String {
    render_summary(state.config(), &state.summary_today())
}

/// Renders the dashboard.
///
/// ```text
/// ═══ Brew POS Coffee Bar · 2024-06-15 ═══
/// Today's revenue      $42.75
/// Total revenue       $318.20
/// Orders                   57
/// Average order         $5.58
/// Discounts given      $21.40
///
/// Top products
///   1. Latte            28 sold    $133.00
/// ...
/// ```
pub fn render_summary(config: &ConfigState, summary: &SalesSummary) -> String {
    let mut out = vec![
        format!("═══ {} · {} ═══", config.store_name, summary.today.format("%Y-%m-%d")),
        format!("{:<18} {:>10}", "Today's revenue", config.format_money(summary.today_revenue)),
        format!("{:<18} {:>10}", "Total revenue", config.format_money(summary.total_revenue)),
        format!("{:<18} {:>10}", "Orders", summary.order_count),
        format!("{:<18} {:>10}", "Average order", config.format_money(summary.average_order)),
        format!("{:<18} {:>10}", "Discounts given", config.format_money(summary.discount_total)),
        String::new(),
        "Top products".to_string(),
    ];

    if summary.top_products.is_empty() {
        out.push("  (no sales yet)".to_string());
    }
    for (rank, product) in summary.top_products.iter().enumerate() {
        out.push(format!(
            "  {}. {:<18} {:>4} sold {:>10}",
            rank + 1,
            product.name,
            product.quantity,
            config.format_money(product.revenue)
        ));
    }

    out.push(String::new());
    out.push("Payments".to_string());
    for payment in &summary.payments {
        out.push(format!(
            "  {:<8} {:>4} orders {:>10}",
            payment.method.to_string(),
            payment.orders,
            config.format_money(payment.revenue)
        ));
    }

    out.push(String::new());
    out.push(format!("Low stock (below {})", config.low_stock_threshold));
    if summary.low_stock.is_empty() {
        out.push("  All products well stocked".to_string());
    }
    for product in &summary.low_stock {
        out.push(format!("  {} {:<18} {:>4} left", product.image, product.name, product.stock));
    }

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{execute, Outcome};
    use crate::error::ErrorCode;
    use brew_core::PaymentMethod;
    use brew_store::Storage;
    use chrono::{NaiveDate, TimeZone, Utc};

    async fn state() -> PosState {
        PosState::initialize(Storage::memory(), ConfigState::default())
            .await
            .unwrap()
    }

    async fn output(state: &mut PosState, line: &str) -> String {
        match execute(state, line).await.unwrap() {
            Outcome::Continue(text) => text,
            Outcome::Quit => panic!("unexpected quit"),
        }
    }

    #[tokio::test]
    async fn test_sales_listing() {
        let mut state = state().await;
        assert_eq!(output(&mut state, "sales").await, "No sales yet");

        state.add_to_cart("1").unwrap();
        state.apply_discount("WELCOME10").unwrap();
        let at = Utc.with_ymd_and_hms(2024, 6, 15, 9, 30, 5).unwrap();
        state.checkout_at(PaymentMethod::Mobile, at).await.unwrap();

        state.add_to_cart("2").unwrap();
        state.checkout(PaymentMethod::Cash).await.unwrap();

        let text = output(&mut state, "sales 5").await;
        assert_eq!(text.lines().count(), 2);
        let oldest = text.lines().nth(1).unwrap();
        assert!(oldest.starts_with("2024-06-15 09:30:05"));
        assert!(oldest.contains("Mobile"));
        assert!(oldest.contains("$3.15"));
        assert!(oldest.contains("(WELCOME10)"));

        assert_eq!(output(&mut state, "sales 1").await.lines().count(), 1);
    }

    #[tokio::test]
    async fn test_sale_receipt() {
        let mut state = state().await;

        state.add_to_cart("1").unwrap();
        state.change_quantity("1", 1).unwrap();
        state.add_to_cart("7").unwrap();
        state.apply_discount("save5").unwrap();
        let at = Utc.with_ymd_and_hms(2024, 6, 15, 9, 30, 5).unwrap();
        let sale = state.checkout_at(PaymentMethod::Mobile, at).await.unwrap();

        let listing = output(&mut state, "sales").await;
        let tail = short_id(&sale.id);
        assert_eq!(tail.len(), 8);
        assert!(listing.contains(&tail));

        let text = output(&mut state, &format!("sale {}", tail)).await;
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], format!("Sale {}", sale.id));
        assert!(lines[1].contains("09:30:05"));
        assert!(lines[1].contains("Mobile"));
        assert!(lines[2].contains("2 × Espresso"));
        assert!(lines[2].contains("@    $3.50"));
        assert!(lines[2].ends_with("$7.00"));
        assert!(lines[3].contains("1 × Croissant"));
        assert!(text.contains("Subtotal"));
        assert!(text.contains("$10.50"));
        assert!(text.contains("Discount SAVE5 ($5.00)"));
        assert!(text.contains("-$5.00"));
        assert!(lines.last().unwrap().starts_with("TOTAL"));
        assert!(lines.last().unwrap().ends_with("$5.50"));

        assert_eq!(output(&mut state, &format!("sale {}", sale.id)).await, text);

        let err = execute(&mut state, "sale zzzzzzzz").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_short_id_is_tail() {
        assert_eq!(short_id("0190a4c2-7b1d-7c3e-9a55-3c2d5f3e91d2"), "5f3e91d2");
        assert_eq!(short_id("42"), "42");
    }

    #[tokio::test]
    async fn test_report_rendering() {
        let mut state = state().await;
        let at = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();

        state.add_to_cart("12").unwrap();
        state.change_quantity("12", 1).unwrap();
        state.checkout_at(PaymentMethod::Card, at).await.unwrap();

        let summary = state.summary(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        let text = render_summary(state.config(), &summary);

        assert!(text.starts_with("═══ Brew POS Coffee Bar · 2024-06-15 ═══"));
        assert!(text.contains("1. Iced Latte"));
        assert!(text.contains("$10.00"));
        assert!(text.contains("Card"));
        assert!(text.contains("All products well stocked") || text.contains("left"));

        assert!(output(&mut state, "report").await.contains("Top products"));
    }
}
