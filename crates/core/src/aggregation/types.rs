//! Aggregation result types.

use centavo_shared::types::Period;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::EntryKind;

/// The slice of an entry the aggregation functions need.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryStat {
    /// Entry kind.
    pub kind: EntryKind,
    /// Entry amount (positive).
    pub amount: Decimal,
    /// Occurrence date.
    pub occurred_on: NaiveDate,
    /// Category key.
    pub category: String,
}

/// All-time (or filtered) totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Sum of income entries.
    pub income_total: Decimal,
    /// Sum of expense entries.
    pub expense_total: Decimal,
    /// Income minus expense.
    pub balance: Decimal,
}

/// One month of the trend window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// The calendar month.
    pub period: Period,
    /// Income recorded in the month.
    pub income: Decimal,
    /// Expense recorded in the month.
    pub expense: Decimal,
    /// Income minus expense for the month.
    pub balance: Decimal,
}

/// One category's share of expense spending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySlice {
    /// Category key.
    pub category: String,
    /// Total expense amount in the category.
    pub amount: Decimal,
    /// Number of expense entries in the category.
    pub entry_count: u64,
    /// Share of the expense total, rounded half-up to whole percent.
    /// Slices round independently, so the column can sum to slightly more
    /// or less than 100.
    pub percent_of_total: u32,
}
