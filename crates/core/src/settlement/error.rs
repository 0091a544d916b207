//! Error types for shared-expense operations.

use centavo_shared::types::ParticipantId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur when validating shared expenses.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettlementError {
    /// Description is empty after trimming.
    #[error("Description must not be empty")]
    EmptyDescription,

    /// Total must be strictly positive.
    #[error("Total amount must be positive, got {total_amount}")]
    NonPositiveTotal {
        /// The rejected total.
        total_amount: Decimal,
    },

    /// Total has more than two decimal places.
    #[error("Total amount {total_amount} has more than two decimal places")]
    TotalScaleTooFine {
        /// The rejected total.
        total_amount: Decimal,
    },

    /// A share is negative.
    #[error("Share for participant {participant} must not be negative")]
    NegativeShare {
        /// The participant with the bad share.
        participant: ParticipantId,
    },

    /// A share has more than two decimal places.
    #[error("Share for participant {participant} has more than two decimal places")]
    ShareScaleTooFine {
        /// The participant with the bad share.
        participant: ParticipantId,
    },

    /// The same participant is listed twice.
    #[error("Participant {0} is listed more than once")]
    DuplicateParticipant(ParticipantId),

    /// Shares add up to more than the total.
    #[error("Shares sum to {shares_total}, more than the total {total_amount}")]
    SharesExceedTotal {
        /// Sum of every share.
        shares_total: Decimal,
        /// The expense total.
        total_amount: Decimal,
    },
}
