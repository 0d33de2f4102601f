//! # Cart Commands
//!
//! Cart manipulation, the payment step and checkout.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ Building │────►│ Payment  │────►│  Sale    │       │
//! │  │          │     │          │◄────│ Pending  │     │ recorded │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │   cancel        │               │              │
//! │                   add / qty / remove     checkout        │              │
//! │                   discount / undiscount                  │              │
//! │                        │                                 ▼              │
//! │                   clear ─────────────────────────►  back to Empty      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use brew_core::validation::validate_quantity;
use brew_core::{AppliedDiscount, DiscountKind, Money, OrderPhase, PaymentMethod};

use super::invalid;
use crate::error::{ApiError, ApiResult};
use crate::state::{ConfigState, PosState};

/// "COFFEE20 (20%)" or "SAVE5 ($5.00)".
pub fn discount_label(config: &ConfigState, discount: &AppliedDiscount) -> String {
    let rule = match discount.kind {
        DiscountKind::Percentage => format!("{}%", discount.value),
        DiscountKind::Fixed => config.format_money(Money::from_decimal(discount.value)),
    };
    format!("{} ({})", discount.code, rule)
}

/// Renders the cart with its totals.
///
/// ```text
/// 2 × Espresso                $7.00
/// 1 × Croissant               $3.50
/// ─────────────────────────────────
/// Subtotal                   $10.50
/// Discount SAVE5 ($5.00)     -$5.00
/// TOTAL                       $5.50
/// ```
pub fn show(state: &PosState) -> String {
    let cart = state.cart();
    let config = state.config();

    if cart.is_empty() {
        return "Cart is empty".to_string();
    }

    let mut out: Vec<String> = cart
        .lines()
        .iter()
        .map(|line| {
            format!(
                "{:>3} × {:<20} {:>10}",
                line.quantity,
                line.product.name,
                config.format_money(line.line_total())
            )
        })
        .collect();

    out.push("─".repeat(37));
    out.push(format!("{:<26} {:>10}", "Subtotal", config.format_money(cart.subtotal())));
    if let Some(discount) = cart.discount() {
        out.push(format!(
            "{:<26} {:>10}",
            format!("Discount {}", discount_label(config, discount)),
            config.format_currency(-discount.amount.cents())
        ));
    }
    out.push(format!("{:<26} {:>10}", "TOTAL", config.format_money(cart.total())));

    if cart.phase() == OrderPhase::PaymentPending {
        out.push("Awaiting payment: checkout <cash|card|mobile> or cancel".to_string());
    }

    out.join("\n")
}

/// Adds `quantity` units. A product already in the cart has its line raised
/// in one step, so a rejected amount leaves the cart untouched.
pub fn add(state: &mut PosState, product_id: &str, quantity: i64) -> ApiResult<String> {
    if quantity < 1 {
        return Err(ApiError::usage("Quantity must be at least 1"));
    }
    validate_quantity(quantity).map_err(invalid)?;

    if state.cart().quantity_of(product_id) > 0 {
        state.change_quantity(product_id, quantity)?;
    } else {
        state.add_to_cart(product_id)?;
        if quantity > 1 {
            state.change_quantity(product_id, quantity - 1)?;
        }
    }

    Ok(show(state))
}

pub fn change_quantity(state: &mut PosState, product_id: &str, delta: i64) -> ApiResult<String> {
    state.change_quantity(product_id, delta)?;
    Ok(show(state))
}

pub fn remove(state: &mut PosState, product_id: &str) -> ApiResult<String> {
    state.remove_from_cart(product_id)?;
    Ok(show(state))
}

pub fn clear(state: &mut PosState) -> ApiResult<String> {
    state.clear_cart()?;
    Ok("✓ Cart cleared".to_string())
}

pub fn apply_discount(state: &mut PosState, code: &str) -> ApiResult<String> {
    let applied = state.apply_discount(code)?;
    Ok(format!(
        "✓ Applied {}: -{}\n{}",
        discount_label(state.config(), &applied),
        state.config().format_money(applied.amount),
        show(state)
    ))
}

pub fn remove_discount(state: &mut PosState) -> ApiResult<String> {
    match state.remove_discount()? {
        Some(removed) => Ok(format!("✓ Removed discount {}", removed.code)),
        None => Ok("No discount applied".to_string()),
    }
}

pub fn pay(state: &mut PosState) -> ApiResult<String> {
    state.begin_payment()?;
    Ok(format!(
        "Amount due: {}\nPay with: cash | card | mobile",
        state.config().format_money(state.cart().total())
    ))
}

pub fn cancel(state: &mut PosState) -> ApiResult<String> {
    state.cancel_payment()?;
    Ok("Payment cancelled; cart kept".to_string())
}

pub async fn checkout(state: &mut PosState, method: &str) -> ApiResult<String> {
    let method: PaymentMethod = method.parse().map_err(invalid)?;
    debug!(%method, "checkout command");

    let sale = state.checkout(method).await?;
    let config = state.config();

    let mut out = vec![format!("✓ Sale {} recorded ({})", sale.id, sale.payment_method)];
    for item in &sale.items {
        out.push(format!(
            "{:>3} × {:<20} {:>10}",
            item.quantity,
            item.product.name,
            config.format_money(item.line_total())
        ));
    }
    if let Some(discount) = &sale.discount {
        out.push(format!(
            "{:<26} {:>10}",
            format!("Discount {}", discount.code),
            config.format_currency(-discount.amount.cents())
        ));
    }
    out.push(format!("{:<26} {:>10}", "TOTAL", config.format_money(sale.total)));

    Ok(out.join("\n"))
}
