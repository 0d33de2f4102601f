//! # Discount Registry
//!
//! Named discount rules keyed by their normalized code.
//!
//! ## Resolution
//! ```text
//! " welcome10 " ──normalize──► "WELCOME10" ──lookup (active only)──► DiscountCode
//!                                                                        │
//!                                   subtotal $10.50 ─────────────────────┤
//!                                                                        ▼
//!                             AppliedDiscount { amount: min(10% × $10.50, $10.50) = $1.05 }
//! ```
//!
//! Codes are unique. [`DiscountBook::add`] rejects a duplicate instead of
//! appending a second rule that a lookup would never reach.

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{AppliedDiscount, DiscountCode, DiscountDraft, DiscountKind, DiscountPatch};
use crate::validation::{normalize_code, validate_discount_draft, validate_discount_value};

/// The four codes written on first run.
pub fn default_discounts() -> Vec<DiscountCode> {
    let rule = |code: &str, kind, value, description: &str| DiscountCode {
        code: code.to_string(),
        kind,
        value,
        description: description.to_string(),
        active: true,
    };

    vec![
        rule("WELCOME10", DiscountKind::Percentage, 10.0, "10% off for new customers"),
        rule("COFFEE20", DiscountKind::Percentage, 20.0, "20% off coffee drinks"),
        rule("SAVE5", DiscountKind::Fixed, 5.0, "$5 off your order"),
        rule("FREEPASTRY", DiscountKind::Fixed, 3.5, "Free pastry (valued at $3.50)"),
    ]
}

/// Ordered registry of discount codes, unique by normalized code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiscountBook {
    codes: Vec<DiscountCode>,
}

impl DiscountBook {
    pub fn with_defaults() -> Self {
        DiscountBook {
            codes: default_discounts(),
        }
    }

    /// Builds a registry from loaded codes.
    ///
    /// Codes are normalized; when two entries share a code the first one
    /// wins and the later ones are returned so the caller can report them.
    pub fn from_codes(codes: Vec<DiscountCode>) -> (Self, Vec<DiscountCode>) {
        let mut book = DiscountBook::default();
        let mut shadowed = Vec::new();

        for mut code in codes {
            code.code = normalize_code(&code.code);
            if book.get(&code.code).is_some() {
                shadowed.push(code);
            } else {
                book.codes.push(code);
            }
        }

        (book, shadowed)
    }

    pub fn codes(&self) -> &[DiscountCode] {
        &self.codes
    }

    pub fn into_codes(self) -> Vec<DiscountCode> {
        self.codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Finds a code regardless of its active flag. Input is normalized.
    pub fn get(&self, code: &str) -> Option<&DiscountCode> {
        let code = normalize_code(code);
        self.codes.iter().find(|d| d.code == code)
    }

    fn get_mut(&mut self, code: &str) -> CoreResult<&mut DiscountCode> {
        let normalized = normalize_code(code);
        self.codes
            .iter_mut()
            .find(|d| d.code == normalized)
            .ok_or(CoreError::DiscountNotFound(normalized))
    }

    /// Resolves an active code against `subtotal`.
    ///
    /// Unknown, inactive and blank codes all fail with `InvalidDiscountCode`.
    ///
    /// ## Example
    /// ```rust
    /// use brew_core::{DiscountBook, Money};
    ///
    /// let book = DiscountBook::with_defaults();
    /// let applied = book.resolve("welcome10", Money::from_cents(1050)).unwrap();
    /// assert_eq!(applied.amount.cents(), 105);
    ///
    /// assert!(book.resolve("doesnotexist", Money::from_cents(1050)).is_err());
    /// ```
    pub fn resolve(&self, code: &str, subtotal: Money) -> CoreResult<AppliedDiscount> {
        let normalized = normalize_code(code);

        self.codes
            .iter()
            .find(|d| d.active && d.code == normalized)
            .map(|d| AppliedDiscount::resolve(d, subtotal))
            .ok_or(CoreError::InvalidDiscountCode(normalized))
    }

    /// Validates a draft and appends it. Duplicate codes are rejected.
    pub fn add(&mut self, draft: &DiscountDraft) -> CoreResult<DiscountCode> {
        let code = validate_discount_draft(draft)?;

        if self.get(&code.code).is_some() {
            return Err(ValidationError::Duplicate {
                field: "code".to_string(),
                value: code.code,
            }
            .into());
        }

        self.codes.push(code.clone());
        Ok(code)
    }

    /// Applies a partial update. The merged rule is re-validated before
    /// anything is written back.
    pub fn update(&mut self, code: &str, patch: &DiscountPatch) -> CoreResult<DiscountCode> {
        let slot = self.get_mut(code)?;

        let mut updated = slot.clone();
        if let Some(kind) = patch.kind {
            updated.kind = kind;
        }
        if let Some(value) = patch.value {
            updated.value = value;
        }
        if let Some(description) = &patch.description {
            updated.description = description.trim().to_string();
        }
        if let Some(active) = patch.active {
            updated.active = active;
        }
        validate_discount_value(updated.kind, updated.value)?;

        *slot = updated.clone();
        Ok(updated)
    }

    pub fn set_active(&mut self, code: &str, active: bool) -> CoreResult<()> {
        self.get_mut(code)?.active = active;
        Ok(())
    }

    /// Removes a code and returns it.
    pub fn remove(&mut self, code: &str) -> CoreResult<DiscountCode> {
        let normalized = normalize_code(code);
        let index = self
            .codes
            .iter()
            .position(|d| d.code == normalized)
            .ok_or_else(|| CoreError::DiscountNotFound(normalized))?;
        Ok(self.codes.remove(index))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(code: &str, kind: DiscountKind, value: &str) -> DiscountDraft {
        DiscountDraft {
            code: code.to_string(),
            kind,
            value: value.to_string(),
            description: String::new(),
            active: true,
        }
    }

    #[test]
    fn test_resolve_percentage_and_fixed() {
        let book = DiscountBook::with_defaults();
        let subtotal = Money::from_cents(1050);

        let welcome = book.resolve("WELCOME10", subtotal).unwrap();
        assert_eq!(welcome.amount.cents(), 105);
        assert_eq!(welcome.kind, DiscountKind::Percentage);

        let save5 = book.resolve(" save5 ", subtotal).unwrap();
        assert_eq!(save5.amount.cents(), 500);
        assert_eq!(save5.code, "SAVE5");
    }

    #[test]
    fn test_resolve_clamps_fixed_to_subtotal() {
        let book = DiscountBook::with_defaults();
        let applied = book.resolve("SAVE5", Money::from_cents(300)).unwrap();
        assert_eq!(applied.amount.cents(), 300);
    }

    #[test]
    fn test_resolve_rejects_unknown_and_inactive() {
        let mut book = DiscountBook::with_defaults();
        assert!(matches!(
            book.resolve("doesnotexist", Money::from_cents(1050)),
            Err(CoreError::InvalidDiscountCode(code)) if code == "DOESNOTEXIST"
        ));

        book.set_active("coffee20", false).unwrap();
        assert!(matches!(
            book.resolve("COFFEE20", Money::from_cents(1050)),
            Err(CoreError::InvalidDiscountCode(_))
        ));
        assert!(book.get("COFFEE20").is_some());
    }

    #[test]
    fn test_add_rejects_duplicate() {
        let mut book = DiscountBook::with_defaults();

        let added = book.add(&draft("summer15", DiscountKind::Percentage, "15")).unwrap();
        assert_eq!(added.code, "SUMMER15");
        assert_eq!(book.len(), 5);

        let err = book.add(&draft("Save5", DiscountKind::Fixed, "2")).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Duplicate { .. })
        ));
        assert_eq!(book.len(), 5);
    }

    #[test]
    fn test_update_revalidates() {
        let mut book = DiscountBook::with_defaults();

        let patch = DiscountPatch {
            value: Some(12.5),
            ..Default::default()
        };
        let updated = book.update("welcome10", &patch).unwrap();
        assert_eq!(updated.value, 12.5);

        let bad = DiscountPatch {
            kind: Some(DiscountKind::Percentage),
            value: Some(150.0),
            ..Default::default()
        };
        assert!(book.update("SAVE5", &bad).is_err());
        assert_eq!(book.get("SAVE5").unwrap().kind, DiscountKind::Fixed);

        assert!(matches!(
            book.update("NOPE", &patch),
            Err(CoreError::DiscountNotFound(_))
        ));
    }

    #[test]
    fn test_remove() {
        let mut book = DiscountBook::with_defaults();
        let removed = book.remove("freepastry").unwrap();
        assert_eq!(removed.code, "FREEPASTRY");
        assert_eq!(book.len(), 3);
        assert!(matches!(
            book.remove("FREEPASTRY"),
            Err(CoreError::DiscountNotFound(_))
        ));
    }

    #[test]
    fn test_from_codes_first_wins() {
        let mut codes = default_discounts();
        let mut shadow = codes[2].clone();
        shadow.code = "save5".to_string();
        shadow.value = 50.0;
        codes.push(shadow);

        let (book, shadowed) = DiscountBook::from_codes(codes);
        assert_eq!(book.len(), 4);
        assert_eq!(shadowed.len(), 1);
        assert_eq!(book.get("SAVE5").unwrap().value, 5.0);
    }
}
