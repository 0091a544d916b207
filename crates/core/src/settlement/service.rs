//! Net balance computation for shared expenses.
//!
//! Pure logic over in-memory expense lists. The payer of each bill is
//! credited what the others owe; everyone else is debited their share.

use std::collections::HashMap;

use centavo_shared::types::ParticipantId;
use rust_decimal::Decimal;

use super::error::SettlementError;
use super::types::{ParticipantBalance, SharedExpense, SharedExpenseDraft};

/// Shared-expense validation and settlement.
pub struct SettlementService;

impl SettlementService {
    /// Normalizes and validates a shared-expense draft, returning the
    /// cleaned draft.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn validate_draft(
        mut draft: SharedExpenseDraft,
    ) -> Result<SharedExpenseDraft, SettlementError> {
        draft.description = draft.description.trim().to_string();
        if draft.description.is_empty() {
            return Err(SettlementError::EmptyDescription);
        }
        if draft.total_amount <= Decimal::ZERO {
            return Err(SettlementError::NonPositiveTotal {
                total_amount: draft.total_amount,
            });
        }
        if draft.total_amount.normalize().scale() > 2 {
            return Err(SettlementError::TotalScaleTooFine {
                total_amount: draft.total_amount,
            });
        }

        let mut seen: Vec<ParticipantId> = Vec::with_capacity(draft.participants.len());
        let mut shares_total = Decimal::ZERO;
        for share in &draft.participants {
            if share.amount < Decimal::ZERO {
                return Err(SettlementError::NegativeShare {
                    participant: share.participant,
                });
            }
            if share.amount.normalize().scale() > 2 {
                return Err(SettlementError::ShareScaleTooFine {
                    participant: share.participant,
                });
            }
            if seen.contains(&share.participant) {
                return Err(SettlementError::DuplicateParticipant(share.participant));
            }
            seen.push(share.participant);
            shares_total += share.amount;
        }
        if shares_total > draft.total_amount {
            return Err(SettlementError::SharesExceedTotal {
                shares_total,
                total_amount: draft.total_amount,
            });
        }
        Ok(draft)
    }

    /// Net balance for one participant across every expense.
    ///
    /// Per expense, the payer is credited the total minus their own share
    /// (zero when they are not listed); every other listed participant is
    /// debited their share. A participant absent from an expense sees no
    /// change from it. Positive means the group owes them money.
    #[must_use]
    pub fn balance_for(participant: ParticipantId, expenses: &[SharedExpense]) -> Decimal {
        let mut balance = Decimal::ZERO;
        for expense in expenses {
            if expense.payer == participant {
                balance += expense.total_amount;
            }
            for share in &expense.participants {
                if share.participant == participant {
                    balance -= share.amount;
                }
            }
        }
        balance
    }

    /// Net balances for everyone appearing in the input, either as a payer
    /// or in a participant list. Ordered by participant ID.
    #[must_use]
    pub fn balances(expenses: &[SharedExpense]) -> Vec<ParticipantBalance> {
        let mut totals: HashMap<ParticipantId, Decimal> = HashMap::new();
        for expense in expenses {
            *totals.entry(expense.payer).or_default() += expense.total_amount;
            for share in &expense.participants {
                *totals.entry(share.participant).or_default() -= share.amount;
            }
        }
        let mut balances: Vec<ParticipantBalance> = totals
            .into_iter()
            .map(|(participant, balance)| ParticipantBalance {
                participant,
                balance,
            })
            .collect();
        balances.sort_by_key(|b| b.participant.into_inner());
        balances
    }
}
