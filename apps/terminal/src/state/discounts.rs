//! # Discount Code Administration
//!
//! Add, edit, toggle and delete discount codes on [`PosState`].
//!
//! Changing or deleting a code does not touch a discount already applied
//! to the cart; the cart keeps the rule it resolved.

use tracing::info;

use brew_core::validation::normalize_code;
use brew_core::{CoreError, DiscountCode, DiscountDraft, DiscountPatch};

use super::PosState;
use crate::error::ApiResult;

impl PosState {
    /// Validates and registers a new code. Codes are stored uppercase.
    pub async fn add_code(&mut self, draft: &DiscountDraft) -> ApiResult<DiscountCode> {
        let mut next = self.discounts.clone();
        let code = next.add(draft)?;

        self.storage.discounts().save(next.codes()).await?;
        self.discounts = next;

        info!(code = %code.code, kind = %code.kind, value = code.value, "Discount code added");
        Ok(code)
    }

    /// Applies a partial edit to an existing code.
    pub async fn update_code(&mut self, code: &str, patch: &DiscountPatch) -> ApiResult<DiscountCode> {
        let mut next = self.discounts.clone();
        let updated = next.update(code, patch)?;

        self.storage.discounts().save(next.codes()).await?;
        self.discounts = next;

        info!(code = %updated.code, "Discount code updated");
        Ok(updated)
    }

    /// Enables or disables a code. Inactive codes cannot be applied.
    pub async fn set_code_active(&mut self, code: &str, active: bool) -> ApiResult<()> {
        let mut next = self.discounts.clone();
        next.set_active(code, active)?;

        self.storage.discounts().save(next.codes()).await?;
        self.discounts = next;

        info!(code = %code, active, "Discount code toggled");
        Ok(())
    }

    /// Flips a code's active flag and returns the new value.
    pub async fn toggle_code(&mut self, code: &str) -> ApiResult<bool> {
        let active = self
            .discounts
            .get(code)
            .map(|c| !c.active)
            .ok_or_else(|| CoreError::DiscountNotFound(normalize_code(code)))?;

        self.set_code_active(code, active).await?;
        Ok(active)
    }

    pub async fn delete_code(&mut self, code: &str) -> ApiResult<DiscountCode> {
        let mut next = self.discounts.clone();
        let removed = next.remove(code)?;

        self.storage.discounts().save(next.codes()).await?;
        self.discounts = next;

        info!(code = %removed.code, "Discount code deleted");
        Ok(removed)
    }
}
