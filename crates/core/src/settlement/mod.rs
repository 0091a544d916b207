//! Shared-expense balances between participants.
//!
//! One person pays a bill; everyone named on it owes their share. Balances
//! are net per participant: positive means the group owes them money.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod props;

pub use error::SettlementError;
pub use service::SettlementService;
pub use types::{ParticipantBalance, Share, SharedExpense, SharedExpenseDraft};
