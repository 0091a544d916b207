//! Property-based tests for block-rule enforcement.

use centavo_shared::types::BlockRuleId;
use chrono::{NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::error::SpendLimitError;
use super::service::SpendLimitService;
use super::types::{BlockRule, RuleScope};

/// Strategy for non-negative cent amounts (0.00 to 10,000.00).
fn cent_amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn rule_with_limit(limit: Decimal, active: bool) -> BlockRule {
    BlockRule {
        id: BlockRuleId::new(),
        scope: RuleScope::Category,
        target: "Food".into(),
        limit_amount: limit,
        period: "2026-08".parse().unwrap(),
        active,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn in_period() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 15).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Totals at or under the cap always pass, totals over it always fail,
    /// and the reported attempted total is exact.
    #[test]
    fn test_check_matches_arithmetic(
        limit in cent_amount(),
        prior in cent_amount(),
        amount in cent_amount(),
    ) {
        let rule = rule_with_limit(limit, true);
        let result = SpendLimitService::check_rule(&rule, prior, amount);
        if prior + amount > limit {
            match result.unwrap_err() {
                SpendLimitError::LimitExceeded { attempted, .. } => {
                    prop_assert_eq!(attempted, prior + amount);
                }
                other => prop_assert!(false, "unexpected error {:?}", other),
            }
        } else {
            prop_assert!(result.is_ok());
        }
    }

    /// An inactive rule never fires, whatever the amounts.
    #[test]
    fn test_inactive_rules_never_fire(
        limit in cent_amount(),
        amount in cent_amount(),
    ) {
        let rule = rule_with_limit(limit, false);
        let result = SpendLimitService::evaluate(
            std::slice::from_ref(&rule),
            "Food",
            "checking",
            in_period(),
            amount,
            |_| Ok(Decimal::ZERO),
        );
        prop_assert!(result.is_ok());
    }

    /// Evaluation never reports a rule whose scope key does not match.
    #[test]
    fn test_only_matching_targets_fire(amount in cent_amount()) {
        let rule = rule_with_limit(Decimal::ZERO, true);
        let result = SpendLimitService::evaluate(
            std::slice::from_ref(&rule),
            "Transport",
            "checking",
            in_period(),
            amount,
            |_| Ok(Decimal::ZERO),
        );
        prop_assert!(result.is_ok());
    }
}
