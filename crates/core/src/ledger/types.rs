//! Domain types for ledger entries.

use centavo_shared::types::EntryId;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::extra::ExtraFields;

/// The kind of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Money coming in.
    Income,
    /// Money going out.
    Expense,
    /// Movement between own accounts; excluded from totals.
    Transfer,
}

impl EntryKind {
    /// Stable string form used in storage and query parameters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Transfer => "transfer",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recorded ledger entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique identifier.
    pub id: EntryId,
    /// What the entry was for.
    pub description: String,
    /// Amount, always positive; the kind carries the direction.
    pub amount: Decimal,
    /// The day the income/expense occurred (not when it was recorded).
    pub occurred_on: NaiveDate,
    /// Entry kind.
    pub kind: EntryKind,
    /// Category key (weak reference, lookup only).
    pub category: String,
    /// Account key (weak reference, lookup only).
    pub account: String,
    /// Optional whitelisted metadata.
    pub extra: Option<ExtraFields>,
    /// When the entry was recorded.
    pub created_at: DateTime<Utc>,
    /// When the entry was last changed.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryDraft {
    /// What the entry is for.
    pub description: String,
    /// Amount, must be positive with at most two decimal places.
    pub amount: Decimal,
    /// The day the income/expense occurred.
    pub occurred_on: NaiveDate,
    /// Entry kind.
    pub kind: EntryKind,
    /// Category key.
    pub category: String,
    /// Account key.
    pub account: String,
    /// Optional whitelisted metadata.
    #[serde(default)]
    pub extra: Option<ExtraFields>,
}

/// Partial update for an entry. Absent fields are left unchanged; to clear
/// the extra metadata, send an empty map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryPatch {
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
    /// New amount.
    #[serde(default)]
    pub amount: Option<Decimal>,
    /// New occurrence date.
    #[serde(default)]
    pub occurred_on: Option<NaiveDate>,
    /// New kind.
    #[serde(default)]
    pub kind: Option<EntryKind>,
    /// New category key.
    #[serde(default)]
    pub category: Option<String>,
    /// New account key.
    #[serde(default)]
    pub account: Option<String>,
    /// Replacement extra metadata.
    #[serde(default)]
    pub extra: Option<ExtraFields>,
}

impl EntryPatch {
    /// Returns true if the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.amount.is_none()
            && self.occurred_on.is_none()
            && self.kind.is_none()
            && self.category.is_none()
            && self.account.is_none()
            && self.extra.is_none()
    }
}

/// Filter vocabulary shared by list, sum, and dashboard queries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryFilter {
    /// Substring match on the description.
    pub search: Option<String>,
    /// Exact category key.
    pub category: Option<String>,
    /// Exact account key.
    pub account: Option<String>,
    /// Entry kind.
    pub kind: Option<EntryKind>,
    /// Inclusive lower bound on the occurrence date.
    pub occurred_from: Option<NaiveDate>,
    /// Inclusive upper bound on the occurrence date.
    pub occurred_to: Option<NaiveDate>,
    /// Inclusive lower bound on the amount.
    pub min_amount: Option<Decimal>,
    /// Inclusive upper bound on the amount.
    pub max_amount: Option<Decimal>,
}

/// Ordering for entry lists. Both orders are newest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryOrder {
    /// By occurrence date, most recent day first.
    #[default]
    OccurredOn,
    /// By creation time, most recently recorded first.
    CreatedAt,
}
