//! Property-based tests for dashboard aggregation.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::AggregationService;
use super::types::EntryStat;
use crate::ledger::EntryKind;

/// Strategy for positive cent amounts (0.01 to 10,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for expense rows spread over a handful of categories.
fn expense_rows() -> impl Strategy<Value = Vec<EntryStat>> {
    prop::collection::vec((positive_amount(), 0usize..6), 1..40).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(amount, category_index)| EntryStat {
                kind: EntryKind::Expense,
                amount,
                occurred_on: NaiveDate::from_ymd_opt(2026, 8, 15).unwrap(),
                category: format!("cat-{category_index}"),
            })
            .collect()
    })
}

/// Strategy for arbitrary rows of any kind.
fn mixed_rows() -> impl Strategy<Value = Vec<EntryStat>> {
    prop::collection::vec(
        (
            positive_amount(),
            prop_oneof![
                Just(EntryKind::Income),
                Just(EntryKind::Expense),
                Just(EntryKind::Transfer),
            ],
        ),
        0..40,
    )
    .prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(amount, kind)| EntryStat {
                kind,
                amount,
                occurred_on: NaiveDate::from_ymd_opt(2026, 8, 15).unwrap(),
                category: "cat".into(),
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The balance always equals income minus expense.
    #[test]
    fn test_summary_balance_identity(rows in mixed_rows()) {
        let summary = AggregationService::summarize(&rows);
        prop_assert_eq!(summary.balance, summary.income_total - summary.expense_total);
    }

    /// The trend always has exactly the requested number of months, in
    /// strictly ascending order, ending at the reference month.
    #[test]
    fn test_trend_window_shape(
        rows in mixed_rows(),
        months in 1u32..=24,
        day in 1u32..=28,
        month in 1u32..=12,
        year in 2020i32..=2030,
    ) {
        let reference = NaiveDate::from_ymd_opt(year, month, day).unwrap();
        let trend = AggregationService::monthly_trend(&rows, reference, months);

        prop_assert_eq!(trend.len(), months as usize);
        for pair in trend.windows(2) {
            prop_assert!(pair[0].period < pair[1].period);
        }
        let last = &trend[trend.len() - 1];
        prop_assert!(last.period.contains(reference));
    }

    /// Independently rounded percentages stay within half a point per slice
    /// of an exact 100.
    #[test]
    fn test_breakdown_percent_sum_is_bounded(rows in expense_rows()) {
        let slices = AggregationService::category_breakdown(&rows);
        prop_assert!(!slices.is_empty());

        let sum: i64 = slices.iter().map(|s| i64::from(s.percent_of_total)).sum();
        let bound = (i64::try_from(slices.len()).unwrap() + 1) / 2;
        prop_assert!(
            (sum - 100).abs() <= bound,
            "percent sum {} outside 100 +/- {}",
            sum,
            bound
        );
    }

    /// The breakdown's amounts add up to the expense total and the slices
    /// are ordered largest first.
    #[test]
    fn test_breakdown_conserves_amounts_and_order(rows in expense_rows()) {
        let slices = AggregationService::category_breakdown(&rows);
        let slice_total: Decimal = slices.iter().map(|s| s.amount).sum();
        let row_total: Decimal = rows.iter().map(|r| r.amount).sum();
        prop_assert_eq!(slice_total, row_total);

        for pair in slices.windows(2) {
            prop_assert!(pair[0].amount >= pair[1].amount);
        }
    }
}
