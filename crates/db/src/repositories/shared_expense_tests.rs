//! Tests for the shared-expense repository row mapping.

use centavo_core::settlement::Share;
use centavo_shared::types::ParticipantId;
use chrono::{TimeZone, Utc};
use rust_decimal_macros::dec;
use serde_json::json;
use uuid::Uuid;

use super::{SharedExpenseError, to_expense};
use crate::entities::shared_expenses;

fn model(participants: serde_json::Value) -> shared_expenses::Model {
    let stored_at = Utc.with_ymd_and_hms(2026, 8, 15, 18, 0, 0).unwrap();
    shared_expenses::Model {
        id: Uuid::now_v7(),
        description: "Groceries".into(),
        total_amount: dec!(120.00),
        payer: Uuid::now_v7(),
        participants,
        created_at: stored_at.into(),
        updated_at: stored_at.into(),
    }
}

#[test]
fn test_decodes_stored_share_list() {
    let participant = ParticipantId::new();
    let shares = serde_json::to_value(vec![Share {
        participant,
        amount: dec!(40.00),
    }])
    .unwrap();
    let row = model(shares);
    let payer = row.payer;

    let expense = to_expense(row).unwrap();
    assert_eq!(expense.total_amount, dec!(120.00));
    assert_eq!(expense.payer.into_inner(), payer);
    assert_eq!(expense.participants.len(), 1);
    assert_eq!(expense.participants[0].participant, participant);
    assert_eq!(expense.participants[0].amount, dec!(40.00));
}

#[test]
fn test_empty_share_list_decodes_to_no_participants() {
    let expense = to_expense(model(json!([]))).unwrap();
    assert!(expense.participants.is_empty());
}

#[test]
fn test_rejects_malformed_share_list() {
    let row = model(json!({"participant": "missing array"}));
    assert!(matches!(
        to_expense(row),
        Err(SharedExpenseError::Malformed(_))
    ));
}
