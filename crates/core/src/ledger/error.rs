//! Ledger error types for write-side validation.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur when validating entry drafts and patches.
///
/// All variants are rejected input, mapped to HTTP 400 at the API boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    // ========== Field Validation ==========
    /// Description is empty after trimming.
    #[error("Description must not be empty")]
    EmptyDescription,

    /// Category key is empty after trimming.
    #[error("Category must not be empty")]
    EmptyCategory,

    /// Account key is empty after trimming.
    #[error("Account must not be empty")]
    EmptyAccount,

    /// A text field exceeds its maximum length.
    #[error("Field '{field}' exceeds maximum length of {max}")]
    FieldTooLong {
        /// Field name.
        field: &'static str,
        /// Maximum allowed length.
        max: usize,
    },

    // ========== Amount Validation ==========
    /// Amount must be strictly positive.
    #[error("Amount must be positive, got {amount}")]
    NonPositiveAmount {
        /// The rejected amount.
        amount: Decimal,
    },

    /// Amount has more than two decimal places.
    #[error("Amount {amount} has more than two decimal places")]
    AmountScaleTooFine {
        /// The rejected amount.
        amount: Decimal,
    },

    /// Amount exceeds what the ledger stores.
    #[error("Amount {amount} is out of range")]
    AmountOutOfRange {
        /// The rejected amount.
        amount: Decimal,
    },

    // ========== Extra Fields ==========
    /// Extra map contains a key outside the whitelist.
    #[error("Unknown extra field key: {0}")]
    UnknownExtraKey(String),

    /// Extra map value is not a JSON scalar.
    #[error("Extra field '{0}' must be a string, number, or boolean")]
    ExtraValueNotScalar(String),
}

impl LedgerError {
    /// The input field the error refers to, for API error payloads.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyDescription => "description",
            Self::EmptyCategory => "category",
            Self::EmptyAccount => "account",
            Self::FieldTooLong { field, .. } => field,
            Self::NonPositiveAmount { .. }
            | Self::AmountScaleTooFine { .. }
            | Self::AmountOutOfRange { .. } => "amount",
            Self::UnknownExtraKey(_) | Self::ExtraValueNotScalar(_) => "extra",
        }
    }
}
