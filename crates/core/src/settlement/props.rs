//! Property-based tests for shared-expense settlement.

use centavo_shared::types::{ParticipantId, SharedExpenseId};
use chrono::Utc;
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::service::SettlementService;
use super::types::{Share, SharedExpense};

fn participant(index: u8) -> ParticipantId {
    ParticipantId::from_uuid(Uuid::from_bytes([index; 16]))
}

/// Strategy for an expense fully split among 1 to 5 participants, so that
/// the shares always sum exactly to the total.
fn fully_split_expense() -> impl Strategy<Value = SharedExpense> {
    (
        prop::collection::vec(1i64..100_000i64, 1..=5),
        1u8..=8,
    )
        .prop_map(|(cent_shares, payer_index)| {
            let total_cents: i64 = cent_shares.iter().sum();
            let participants = cent_shares
                .into_iter()
                .enumerate()
                .map(|(index, cents)| Share {
                    participant: participant(u8::try_from(index).unwrap() + 1),
                    amount: Decimal::new(cents, 2),
                })
                .collect();
            SharedExpense {
                id: SharedExpenseId::new(),
                description: "Split bill".into(),
                total_amount: Decimal::new(total_cents, 2),
                payer: participant(payer_index),
                participants,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            }
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// When every expense is fully split, credits and debits cancel out
    /// across the whole group.
    #[test]
    fn test_fully_split_balances_sum_to_zero(
        expenses in prop::collection::vec(fully_split_expense(), 0..10)
    ) {
        let sum: Decimal = SettlementService::balances(&expenses)
            .iter()
            .map(|entry| entry.balance)
            .sum();
        prop_assert_eq!(sum, Decimal::ZERO);
    }

    /// A participant who appears nowhere always balances at zero.
    #[test]
    fn test_unknown_participant_balances_at_zero(
        expenses in prop::collection::vec(fully_split_expense(), 0..10)
    ) {
        let stranger = participant(200);
        prop_assert_eq!(
            SettlementService::balance_for(stranger, &expenses),
            Decimal::ZERO
        );
    }

    /// `balance_for` agrees with the grouped `balances` view.
    #[test]
    fn test_balance_for_agrees_with_balances(
        expenses in prop::collection::vec(fully_split_expense(), 1..10)
    ) {
        for entry in SettlementService::balances(&expenses) {
            prop_assert_eq!(
                SettlementService::balance_for(entry.participant, &expenses),
                entry.balance
            );
        }
    }
}
