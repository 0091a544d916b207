//! Business rule validation for entry writes.

use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::{Entry, EntryDraft, EntryPatch};

/// Maximum length of an entry description.
pub const MAX_DESCRIPTION_LEN: usize = 255;

/// Maximum length of category and account keys.
pub const MAX_KEY_LEN: usize = 100;

/// Largest storable amount (NUMERIC(15,2)).
fn max_amount() -> Decimal {
    Decimal::new(999_999_999_999_999, 2)
}

/// Validates an amount: strictly positive, at most two decimal places,
/// within storage range.
pub fn validate_amount(amount: Decimal) -> Result<(), LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::NonPositiveAmount { amount });
    }
    if amount.normalize().scale() > 2 {
        return Err(LedgerError::AmountScaleTooFine { amount });
    }
    if amount > max_amount() {
        return Err(LedgerError::AmountOutOfRange { amount });
    }
    Ok(())
}

/// Normalizes and validates a draft, returning the cleaned draft.
///
/// Text fields are trimmed; an empty extra map becomes `None`.
///
/// # Errors
///
/// Returns the first violated rule.
pub fn validate_draft(mut draft: EntryDraft) -> Result<EntryDraft, LedgerError> {
    draft.description = draft.description.trim().to_string();
    draft.category = draft.category.trim().to_string();
    draft.account = draft.account.trim().to_string();

    if draft.description.is_empty() {
        return Err(LedgerError::EmptyDescription);
    }
    if draft.description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(LedgerError::FieldTooLong {
            field: "description",
            max: MAX_DESCRIPTION_LEN,
        });
    }
    if draft.category.is_empty() {
        return Err(LedgerError::EmptyCategory);
    }
    if draft.category.chars().count() > MAX_KEY_LEN {
        return Err(LedgerError::FieldTooLong {
            field: "category",
            max: MAX_KEY_LEN,
        });
    }
    if draft.account.is_empty() {
        return Err(LedgerError::EmptyAccount);
    }
    if draft.account.chars().count() > MAX_KEY_LEN {
        return Err(LedgerError::FieldTooLong {
            field: "account",
            max: MAX_KEY_LEN,
        });
    }

    validate_amount(draft.amount)?;

    if let Some(extra) = &draft.extra {
        extra.validate()?;
        if extra.is_empty() {
            draft.extra = None;
        }
    }

    Ok(draft)
}

/// Merges a patch onto an existing entry and validates the result.
///
/// # Errors
///
/// Returns the first rule the patched state violates.
pub fn apply_patch(entry: &Entry, patch: EntryPatch) -> Result<EntryDraft, LedgerError> {
    let draft = EntryDraft {
        description: patch
            .description
            .unwrap_or_else(|| entry.description.clone()),
        amount: patch.amount.unwrap_or(entry.amount),
        occurred_on: patch.occurred_on.unwrap_or(entry.occurred_on),
        kind: patch.kind.unwrap_or(entry.kind),
        category: patch.category.unwrap_or_else(|| entry.category.clone()),
        account: patch.account.unwrap_or_else(|| entry.account.clone()),
        extra: match patch.extra {
            Some(extra) => Some(extra),
            None => entry.extra.clone(),
        },
    };
    validate_draft(draft)
}
