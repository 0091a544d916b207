//! Pure aggregation over prepared entry rows.

use std::collections::HashMap;

use centavo_shared::types::Period;
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::types::{CategorySlice, EntryStat, Summary, TrendPoint};
use crate::ledger::EntryKind;

/// Dashboard aggregation functions.
pub struct AggregationService;

impl AggregationService {
    /// Income and expense totals plus the running balance.
    ///
    /// Transfers move money between own accounts and count toward neither
    /// total.
    #[must_use]
    pub fn summarize(rows: &[EntryStat]) -> Summary {
        let mut summary = Summary::default();
        for row in rows {
            match row.kind {
                EntryKind::Income => summary.income_total += row.amount,
                EntryKind::Expense => summary.expense_total += row.amount,
                EntryKind::Transfer => {}
            }
        }
        summary.balance = summary.income_total - summary.expense_total;
        summary
    }

    /// Per-month totals for the `months` calendar months ending at the
    /// reference date's month.
    ///
    /// Always returns exactly `months` points in chronological order, with
    /// zero-filled points for months that have no entries. Rows outside the
    /// window are ignored.
    #[must_use]
    pub fn monthly_trend(rows: &[EntryStat], reference: NaiveDate, months: u32) -> Vec<TrendPoint> {
        let window = Period::window_ending_at(Period::of(reference), months);

        let mut buckets: HashMap<Period, (Decimal, Decimal)> = HashMap::new();
        for row in rows {
            let bucket = buckets.entry(Period::of(row.occurred_on)).or_default();
            match row.kind {
                EntryKind::Income => bucket.0 += row.amount,
                EntryKind::Expense => bucket.1 += row.amount,
                EntryKind::Transfer => {}
            }
        }

        window
            .into_iter()
            .map(|period| {
                let (income, expense) = buckets.get(&period).copied().unwrap_or_default();
                TrendPoint {
                    period,
                    income,
                    expense,
                    balance: income - expense,
                }
            })
            .collect()
    }

    /// Expense spending grouped by category, largest first.
    ///
    /// Percentages are rounded half-up to whole percent, each slice
    /// independently. A zero expense total yields zero percentages.
    #[must_use]
    pub fn category_breakdown(rows: &[EntryStat]) -> Vec<CategorySlice> {
        let mut groups: HashMap<&str, (Decimal, u64)> = HashMap::new();
        for row in rows {
            if row.kind == EntryKind::Expense {
                let group = groups.entry(row.category.as_str()).or_default();
                group.0 += row.amount;
                group.1 += 1;
            }
        }

        let total: Decimal = groups.values().map(|(amount, _)| *amount).sum();

        let mut slices: Vec<CategorySlice> = groups
            .into_iter()
            .map(|(category, (amount, entry_count))| CategorySlice {
                category: category.to_string(),
                amount,
                entry_count,
                percent_of_total: percent_of(amount, total),
            })
            .collect();

        slices.sort_by(|a, b| {
            b.amount
                .cmp(&a.amount)
                .then_with(|| a.category.cmp(&b.category))
        });
        slices
    }
}

/// Whole-percent share, rounded half-up. Zero totals yield zero.
fn percent_of(amount: Decimal, total: Decimal) -> u32 {
    if total.is_zero() {
        return 0;
    }
    (amount / total * Decimal::from(100))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn stat(kind: EntryKind, amount: Decimal, date: NaiveDate, category: &str) -> EntryStat {
        EntryStat {
            kind,
            amount,
            occurred_on: date,
            category: category.into(),
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_summary_totals_and_balance() {
        let rows = vec![
            stat(EntryKind::Income, dec!(3000.00), day(2026, 8, 1), "Salary"),
            stat(EntryKind::Expense, dec!(450.00), day(2026, 8, 5), "Food"),
            stat(EntryKind::Expense, dec!(120.50), day(2026, 8, 9), "Transport"),
            stat(EntryKind::Transfer, dec!(999.99), day(2026, 8, 10), "Moves"),
        ];
        let summary = AggregationService::summarize(&rows);
        assert_eq!(summary.income_total, dec!(3000.00));
        assert_eq!(summary.expense_total, dec!(570.50));
        assert_eq!(summary.balance, dec!(2429.50));
    }

    #[test]
    fn test_summary_of_nothing_is_zero() {
        let summary = AggregationService::summarize(&[]);
        assert_eq!(summary, Summary::default());
    }

    #[test]
    fn test_trend_shape_and_zero_fill() {
        // Entries in June and August; July stays empty.
        let rows = vec![
            stat(EntryKind::Income, dec!(100.00), day(2026, 6, 10), "Salary"),
            stat(EntryKind::Expense, dec!(40.00), day(2026, 6, 20), "Food"),
            stat(EntryKind::Expense, dec!(25.00), day(2026, 8, 3), "Food"),
            // Outside the 4-month window, must be ignored.
            stat(EntryKind::Income, dec!(9999.00), day(2026, 1, 1), "Salary"),
        ];
        let trend = AggregationService::monthly_trend(&rows, day(2026, 8, 26), 4);

        assert_eq!(trend.len(), 4);
        let labels: Vec<String> = trend.iter().map(|p| p.period.to_string()).collect();
        assert_eq!(labels, vec!["2026-05", "2026-06", "2026-07", "2026-08"]);

        assert_eq!(trend[0].income, Decimal::ZERO);
        assert_eq!(trend[1].income, dec!(100.00));
        assert_eq!(trend[1].expense, dec!(40.00));
        assert_eq!(trend[1].balance, dec!(60.00));
        assert_eq!(trend[2].income, Decimal::ZERO);
        assert_eq!(trend[2].expense, Decimal::ZERO);
        assert_eq!(trend[3].expense, dec!(25.00));
        assert_eq!(trend[3].balance, dec!(-25.00));
    }

    #[test]
    fn test_trend_crosses_year_boundary() {
        let trend = AggregationService::monthly_trend(&[], day(2026, 2, 1), 4);
        let labels: Vec<String> = trend.iter().map(|p| p.period.to_string()).collect();
        assert_eq!(labels, vec!["2025-11", "2025-12", "2026-01", "2026-02"]);
    }

    #[test]
    fn test_breakdown_groups_and_orders_by_amount() {
        let rows = vec![
            stat(EntryKind::Expense, dec!(200.00), day(2026, 8, 1), "Food"),
            stat(EntryKind::Expense, dec!(100.00), day(2026, 8, 2), "Food"),
            stat(EntryKind::Expense, dec!(100.00), day(2026, 8, 3), "Transport"),
            stat(EntryKind::Expense, dec!(50.00), day(2026, 8, 4), "Fun"),
            // Income and transfers never show up in the breakdown.
            stat(EntryKind::Income, dec!(5000.00), day(2026, 8, 5), "Salary"),
            stat(EntryKind::Transfer, dec!(300.00), day(2026, 8, 6), "Moves"),
        ];
        let slices = AggregationService::category_breakdown(&rows);

        assert_eq!(slices.len(), 3);
        assert_eq!(slices[0].category, "Food");
        assert_eq!(slices[0].amount, dec!(300.00));
        assert_eq!(slices[0].entry_count, 2);
        assert_eq!(slices[0].percent_of_total, 67); // 300/450 = 66.67

        assert_eq!(slices[1].category, "Transport");
        assert_eq!(slices[1].percent_of_total, 22); // 100/450 = 22.22

        assert_eq!(slices[2].category, "Fun");
        assert_eq!(slices[2].percent_of_total, 11); // 50/450 = 11.11
    }

    #[test]
    fn test_breakdown_percent_rounds_half_up() {
        let rows = vec![
            stat(EntryKind::Expense, dec!(199.00), day(2026, 8, 1), "Big"),
            stat(EntryKind::Expense, dec!(1.00), day(2026, 8, 2), "Tiny"),
        ];
        let slices = AggregationService::category_breakdown(&rows);
        // 99.5 and 0.5 both round up; the column sums to 101.
        assert_eq!(slices[0].percent_of_total, 100);
        assert_eq!(slices[1].percent_of_total, 1);
    }

    #[test]
    fn test_breakdown_thirds_sum_below_hundred() {
        let rows = vec![
            stat(EntryKind::Expense, dec!(100.00), day(2026, 8, 1), "A"),
            stat(EntryKind::Expense, dec!(100.00), day(2026, 8, 2), "B"),
            stat(EntryKind::Expense, dec!(100.00), day(2026, 8, 3), "C"),
        ];
        let slices = AggregationService::category_breakdown(&rows);
        let sum: u32 = slices.iter().map(|s| s.percent_of_total).sum();
        assert_eq!(sum, 99); // 33 + 33 + 33
    }

    #[test]
    fn test_breakdown_without_expenses_is_empty() {
        let rows = vec![stat(EntryKind::Income, dec!(100.00), day(2026, 8, 1), "Salary")];
        assert!(AggregationService::category_breakdown(&rows).is_empty());
    }

    #[test]
    fn test_equal_amounts_tie_break_on_category() {
        let rows = vec![
            stat(EntryKind::Expense, dec!(50.00), day(2026, 8, 1), "Zoo"),
            stat(EntryKind::Expense, dec!(50.00), day(2026, 8, 2), "Aquarium"),
        ];
        let slices = AggregationService::category_breakdown(&rows);
        assert_eq!(slices[0].category, "Aquarium");
        assert_eq!(slices[1].category, "Zoo");
    }
}
