//! Property-based tests for entry draft validation.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::extra::{ALLOWED_EXTRA_KEYS, ExtraFields};
use super::types::{EntryDraft, EntryKind};
use super::validation::validate_draft;

/// Strategy for positive amounts with cent precision (0.01 to 10,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn kind_strategy() -> impl Strategy<Value = EntryKind> {
    prop_oneof![
        Just(EntryKind::Income),
        Just(EntryKind::Expense),
        Just(EntryKind::Transfer),
    ]
}

fn make_draft(amount: Decimal, kind: EntryKind) -> EntryDraft {
    EntryDraft {
        description: "Property draft".into(),
        amount,
        occurred_on: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
        kind,
        category: "Food".into(),
        account: "checking".into(),
        extra: None,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any positive cent-precision amount passes validation unchanged.
    #[test]
    fn test_positive_cent_amounts_always_pass(
        amount in positive_amount(),
        kind in kind_strategy(),
    ) {
        let cleaned = validate_draft(make_draft(amount, kind)).unwrap();
        prop_assert_eq!(cleaned.amount, amount);
    }

    /// Amounts with sub-cent precision are always rejected.
    #[test]
    fn test_sub_cent_amounts_always_fail(mills in 1i64..1_000_000i64) {
        // Scale 3 with a non-zero final digit.
        prop_assume!(mills % 10 != 0);
        let amount = Decimal::new(mills, 3);
        prop_assert!(validate_draft(make_draft(amount, EntryKind::Expense)).is_err());
    }

    /// Zero or negative amounts are always rejected.
    #[test]
    fn test_non_positive_amounts_always_fail(cents in 0i64..1_000_000i64) {
        let amount = Decimal::new(-cents, 2);
        prop_assert!(validate_draft(make_draft(amount, EntryKind::Income)).is_err());
    }

    /// Whitelisted keys with scalar values always pass.
    #[test]
    fn test_whitelisted_extra_always_passes(
        key_index in 0usize..ALLOWED_EXTRA_KEYS.len(),
        value in "[a-z]{1,16}",
    ) {
        let mut extra = ExtraFields::new();
        extra.insert(ALLOWED_EXTRA_KEYS[key_index], serde_json::Value::String(value));
        let mut draft = make_draft(Decimal::ONE, EntryKind::Expense);
        draft.extra = Some(extra);
        prop_assert!(validate_draft(draft).is_ok());
    }

    /// Keys outside the whitelist always fail.
    #[test]
    fn test_unknown_extra_key_always_fails(key in "[A-Z]{4,12}") {
        prop_assume!(!ALLOWED_EXTRA_KEYS.contains(&key.as_str()));
        let mut extra = ExtraFields::new();
        extra.insert(key, serde_json::Value::Bool(true));
        let mut draft = make_draft(Decimal::ONE, EntryKind::Expense);
        draft.extra = Some(extra);
        prop_assert!(validate_draft(draft).is_err());
    }
}
