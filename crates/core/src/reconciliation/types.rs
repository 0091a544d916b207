//! Types for statement reconciliation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::Entry;

/// One line of a bank statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementLine {
    /// The day the line was booked.
    pub occurred_on: NaiveDate,
    /// The line amount.
    pub amount: Decimal,
    /// Free-text description from the bank; never used for matching.
    #[serde(default)]
    pub description: Option<String>,
}

/// All ledger entries matching one statement line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSuggestion {
    /// The statement line.
    pub line: StatementLine,
    /// Every entry with exactly the line's amount and date. More than one
    /// means the line is ambiguous and needs a human decision.
    pub matches: Vec<Entry>,
}

impl MatchSuggestion {
    /// The single matching entry, if the match is unambiguous.
    #[must_use]
    pub fn unique_match(&self) -> Option<&Entry> {
        match self.matches.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}
