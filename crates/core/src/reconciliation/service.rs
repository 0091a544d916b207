//! Exact-match reconciliation.

use super::types::{MatchSuggestion, StatementLine};
use crate::ledger::Entry;

/// Suggests ledger entries for bank statement lines.
pub struct ReconciliationService;

impl ReconciliationService {
    /// Pairs each statement line with the ledger entries whose amount and
    /// occurrence date are exactly equal. Descriptions are ignored.
    ///
    /// The output has one suggestion per input line, in input order. An
    /// entry may appear in more than one suggestion; nothing is consumed.
    #[must_use]
    pub fn suggest(lines: &[StatementLine], ledger: &[Entry]) -> Vec<MatchSuggestion> {
        lines
            .iter()
            .map(|line| MatchSuggestion {
                line: line.clone(),
                matches: ledger
                    .iter()
                    .filter(|entry| {
                        entry.amount == line.amount && entry.occurred_on == line.occurred_on
                    })
                    .cloned()
                    .collect(),
            })
            .collect()
    }
}
