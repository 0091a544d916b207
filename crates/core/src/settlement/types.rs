//! Domain types for shared expenses.

use centavo_shared::types::{ParticipantId, SharedExpenseId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One participant's share of a shared expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Share {
    /// Who owes this share.
    pub participant: ParticipantId,
    /// The amount owed, non-negative.
    pub amount: Decimal,
}

/// A bill paid by one person on behalf of several.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedExpense {
    /// Unique identifier.
    pub id: SharedExpenseId,
    /// What the bill was for.
    pub description: String,
    /// The full amount the payer fronted.
    pub total_amount: Decimal,
    /// Who paid. The payer may also appear in the participant list with
    /// their own share.
    pub payer: ParticipantId,
    /// Who owes what. Shares sum to at most the total.
    pub participants: Vec<Share>,
    /// When the expense was recorded.
    pub created_at: DateTime<Utc>,
    /// When the expense was last changed.
    pub updated_at: DateTime<Utc>,
}

/// Input for recording a shared expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedExpenseDraft {
    /// What the bill is for.
    pub description: String,
    /// The full amount fronted, positive with at most two decimal places.
    pub total_amount: Decimal,
    /// Who paid.
    pub payer: ParticipantId,
    /// Who owes what.
    pub participants: Vec<Share>,
}

/// A participant's net position across all shared expenses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantBalance {
    /// The participant.
    pub participant: ParticipantId,
    /// Net balance: positive means the group owes them.
    pub balance: Decimal,
}
