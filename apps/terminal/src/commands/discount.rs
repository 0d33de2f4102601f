//! # Discount Code Commands
//!
//! ```text
//! brew> codes
//! WELCOME10    percentage  10%       active    10% off for new customers
//! SAVE5        fixed       $5.00     active    $5 off your order
//! ...
//! brew> add-code HAPPY-HOUR percentage 15 "Weekdays 3-5pm"
//! brew> set-code happy-hour value 20
//! brew> toggle-code HAPPY-HOUR
//! ```

use clap::ValueEnum;

use brew_core::validation::{normalize_code, parse_decimal, parse_flag};
use brew_core::{DiscountCode, DiscountDraft, DiscountKind, DiscountPatch, Money};

use super::invalid;
use crate::error::ApiResult;
use crate::state::{ConfigState, PosState};

/// Editable discount code fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CodeField {
    #[value(alias = "kind")]
    Type,
    Value,
    Description,
    Active,
}

fn rule(config: &ConfigState, code: &DiscountCode) -> String {
    match code.kind {
        DiscountKind::Percentage => format!("{}%", code.value),
        DiscountKind::Fixed => config.format_money(Money::from_decimal(code.value)),
    }
}

pub fn code_row(config: &ConfigState, code: &DiscountCode) -> String {
    format!(
        "{:<12} {:<11} {:<9} {:<9} {}",
        code.code,
        code.kind.to_string(),
        rule(config, code),
        if code.active { "active" } else { "inactive" },
        code.description
    )
}

pub fn list(state: &PosState) -> String {
    let codes = state.discounts().codes();
    if codes.is_empty() {
        return "No discount codes".to_string();
    }

    codes
        .iter()
        .map(|c| code_row(state.config(), c))
        .collect::<Vec<_>>()
        .join("\n")
}

pub async fn add(
    state: &mut PosState,
    code: String,
    kind: &str,
    value: String,
    description: Option<String>,
) -> ApiResult<String> {
    let draft = DiscountDraft {
        code,
        kind: kind.parse().map_err(invalid)?,
        value,
        description: description.unwrap_or_default(),
        active: true,
    };

    let added = state.add_code(&draft).await?;
    Ok(format!("✓ Added {}", code_row(state.config(), &added)))
}

pub async fn set(
    state: &mut PosState,
    code: &str,
    field: CodeField,
    value: &str,
) -> ApiResult<String> {
    let mut patch = DiscountPatch::default();
    match field {
        CodeField::Type => patch.kind = Some(value.parse().map_err(invalid)?),
        CodeField::Value => patch.value = Some(parse_decimal("value", value).map_err(invalid)?),
        CodeField::Description => patch.description = Some(value.to_string()),
        CodeField::Active => patch.active = Some(parse_flag("active", value).map_err(invalid)?),
    }

    let updated = state.update_code(code, &patch).await?;
    Ok(format!("✓ Updated {}", code_row(state.config(), &updated)))
}

pub async fn toggle(state: &mut PosState, code: &str) -> ApiResult<String> {
    let active = state.toggle_code(code).await?;
    let code = normalize_code(code);
    Ok(if active {
        format!("✓ {} is now active", code)
    } else {
        format!("✓ {} is now inactive", code)
    })
}

pub async fn delete(state: &mut PosState, code: &str) -> ApiResult<String> {
    let removed = state.delete_code(code).await?;
    Ok(format!("✓ Deleted {}", removed.code))
}
