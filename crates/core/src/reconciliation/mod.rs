//! Bank statement match suggestions.
//!
//! Read-only: suggestions pair statement lines with ledger entries but
//! never mutate the ledger.

pub mod service;
pub mod types;

pub use service::ReconciliationService;
pub use types::{MatchSuggestion, StatementLine};
