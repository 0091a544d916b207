//! Block-rule evaluation.
//!
//! This service contains pure logic with no database dependencies. Prior
//! spending is injected by the caller, which lets the write path fetch sums
//! lazily and stop at the first violation.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::SpendLimitError;
use super::types::{BlockRule, BlockRuleDraft, BlockRulePatch, RuleScope};
use crate::ledger::EntryFilter;

/// Block-rule validation and enforcement.
pub struct SpendLimitService;

impl SpendLimitService {
    /// Normalizes and validates a rule draft, returning the cleaned draft.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn validate_draft(mut draft: BlockRuleDraft) -> Result<BlockRuleDraft, SpendLimitError> {
        draft.target = draft.target.trim().to_string();
        if draft.target.is_empty() {
            return Err(SpendLimitError::EmptyTarget);
        }
        if draft.limit_amount < Decimal::ZERO {
            return Err(SpendLimitError::NegativeLimit {
                limit_amount: draft.limit_amount,
            });
        }
        if draft.limit_amount.normalize().scale() > 2 {
            return Err(SpendLimitError::LimitScaleTooFine {
                limit_amount: draft.limit_amount,
            });
        }
        Ok(draft)
    }

    /// Merges a patch onto an existing rule and validates the result.
    ///
    /// # Errors
    ///
    /// Returns the first rule the patched state violates.
    pub fn apply_patch(
        rule: &BlockRule,
        patch: BlockRulePatch,
    ) -> Result<BlockRuleDraft, SpendLimitError> {
        let draft = BlockRuleDraft {
            scope: patch.scope.unwrap_or(rule.scope),
            target: patch.target.unwrap_or_else(|| rule.target.clone()),
            limit_amount: patch.limit_amount.unwrap_or(rule.limit_amount),
            period: patch.period.unwrap_or(rule.period),
            active: patch.active.unwrap_or(rule.active),
        };
        Self::validate_draft(draft)
    }

    /// Rules that guard the candidate entry: active, period covers the
    /// occurrence date, and the scope key matches. Category rules come
    /// before account rules; relative order is otherwise preserved.
    #[must_use]
    pub fn applicable_rules<'a>(
        rules: &'a [BlockRule],
        category: &str,
        account: &str,
        occurred_on: NaiveDate,
    ) -> Vec<&'a BlockRule> {
        let matches = |rule: &BlockRule| {
            rule.active
                && rule.period.contains(occurred_on)
                && match rule.scope {
                    RuleScope::Category => rule.target == category,
                    RuleScope::Account => rule.target == account,
                }
        };

        let mut applicable: Vec<&BlockRule> = Vec::new();
        applicable.extend(
            rules
                .iter()
                .filter(|r| r.scope == RuleScope::Category && matches(r)),
        );
        applicable.extend(
            rules
                .iter()
                .filter(|r| r.scope == RuleScope::Account && matches(r)),
        );
        applicable
    }

    /// The filter describing prior spending for a rule: every entry with the
    /// rule's scope key whose occurrence date falls inside the rule's month.
    /// All kinds count.
    #[must_use]
    pub fn prior_sum_filter(rule: &BlockRule) -> EntryFilter {
        let mut filter = EntryFilter {
            occurred_from: Some(rule.period.first_day()),
            occurred_to: Some(rule.period.last_day()),
            ..EntryFilter::default()
        };
        match rule.scope {
            RuleScope::Category => filter.category = Some(rule.target.clone()),
            RuleScope::Account => filter.account = Some(rule.target.clone()),
        }
        filter
    }

    /// Checks one rule against prior spending plus the candidate amount.
    ///
    /// # Errors
    ///
    /// Returns `LimitExceeded` when the total would pass the cap. Landing
    /// exactly on the cap is allowed.
    pub fn check_rule(
        rule: &BlockRule,
        prior_sum: Decimal,
        amount: Decimal,
    ) -> Result<(), SpendLimitError> {
        let attempted = prior_sum + amount;
        if attempted > rule.limit_amount {
            return Err(SpendLimitError::LimitExceeded {
                rule_id: rule.id,
                scope: rule.scope,
                target: rule.target.clone(),
                period: rule.period,
                limit_amount: rule.limit_amount,
                attempted,
            });
        }
        Ok(())
    }

    /// Evaluates every applicable rule with an injected prior-sum lookup.
    ///
    /// The first violation wins; no further lookups are issued after it.
    ///
    /// # Errors
    ///
    /// Returns `LimitExceeded` for the first violated rule, or the lookup's
    /// error.
    pub fn evaluate<F>(
        rules: &[BlockRule],
        category: &str,
        account: &str,
        occurred_on: NaiveDate,
        amount: Decimal,
        mut prior_sum: F,
    ) -> Result<(), SpendLimitError>
    where
        F: FnMut(&BlockRule) -> Result<Decimal, SpendLimitError>,
    {
        for rule in Self::applicable_rules(rules, category, account, occurred_on) {
            let prior = prior_sum(rule)?;
            Self::check_rule(rule, prior, amount)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use centavo_shared::types::BlockRuleId;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
    }

    fn rule(scope: RuleScope, target: &str, limit: Decimal) -> BlockRule {
        BlockRule {
            id: BlockRuleId::new(),
            scope,
            target: target.into(),
            limit_amount: limit,
            period: "2026-08".parse().unwrap(),
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_under_limit_passes_then_over_limit_fails() {
        let food = rule(RuleScope::Category, "Food", dec!(150.00));
        let rules = vec![food.clone()];

        // First 100 against an empty month.
        let first = SpendLimitService::evaluate(
            &rules,
            "Food",
            "checking",
            day(10),
            dec!(100.00),
            |_| Ok(Decimal::ZERO),
        );
        assert!(first.is_ok());

        // Second 100 with the first already recorded.
        let second = SpendLimitService::evaluate(
            &rules,
            "Food",
            "checking",
            day(20),
            dec!(100.00),
            |_| Ok(dec!(100.00)),
        );
        match second.unwrap_err() {
            SpendLimitError::LimitExceeded {
                rule_id,
                period,
                attempted,
                limit_amount,
                ..
            } => {
                assert_eq!(rule_id, food.id);
                assert_eq!(period.to_string(), "2026-08");
                assert_eq!(attempted, dec!(200.00));
                assert_eq!(limit_amount, dec!(150.00));
            }
            other => panic!("expected LimitExceeded, got {other:?}"),
        }
    }

    #[test]
    fn test_landing_exactly_on_the_cap_is_allowed() {
        let r = rule(RuleScope::Category, "Food", dec!(150.00));
        assert!(SpendLimitService::check_rule(&r, dec!(50.00), dec!(100.00)).is_ok());
    }

    #[test]
    fn test_inactive_rule_blocks_nothing() {
        let mut r = rule(RuleScope::Category, "Food", dec!(0.00));
        r.active = false;
        let rules = [r];
        let applicable =
            SpendLimitService::applicable_rules(&rules, "Food", "checking", day(1));
        assert!(applicable.is_empty());
    }

    #[test]
    fn test_other_period_rule_is_ignored() {
        let mut r = rule(RuleScope::Category, "Food", dec!(10.00));
        r.period = "2026-07".parse().unwrap();
        let result = SpendLimitService::evaluate(
            &[r],
            "Food",
            "checking",
            day(15),
            dec!(500.00),
            |_| Ok(Decimal::ZERO),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_zero_limit_blocks_every_entry_in_scope() {
        let r = rule(RuleScope::Account, "checking", dec!(0.00));
        let result = SpendLimitService::evaluate(
            &[r],
            "Food",
            "checking",
            day(1),
            dec!(0.01),
            |_| Ok(Decimal::ZERO),
        );
        assert!(matches!(
            result,
            Err(SpendLimitError::LimitExceeded { .. })
        ));
    }

    #[test]
    fn test_category_rules_are_checked_before_account_rules() {
        let account_rule = rule(RuleScope::Account, "checking", dec!(10.00));
        let category_rule = rule(RuleScope::Category, "Food", dec!(10.00));
        // Account rule listed first; category must still be evaluated first.
        let rules = vec![account_rule, category_rule.clone()];

        let result = SpendLimitService::evaluate(
            &rules,
            "Food",
            "checking",
            day(5),
            dec!(50.00),
            |_| Ok(Decimal::ZERO),
        );
        match result.unwrap_err() {
            SpendLimitError::LimitExceeded { rule_id, scope, .. } => {
                assert_eq!(rule_id, category_rule.id);
                assert_eq!(scope, RuleScope::Category);
            }
            other => panic!("expected LimitExceeded, got {other:?}"),
        }
    }

    #[test]
    fn test_first_violation_stops_further_lookups() {
        let first = rule(RuleScope::Category, "Food", dec!(10.00));
        let second = rule(RuleScope::Account, "checking", dec!(10.00));
        let rules = vec![first, second];

        let mut lookups = 0;
        let result = SpendLimitService::evaluate(
            &rules,
            "Food",
            "checking",
            day(5),
            dec!(50.00),
            |_| {
                lookups += 1;
                Ok(Decimal::ZERO)
            },
        );
        assert!(result.is_err());
        assert_eq!(lookups, 1);
    }

    #[test]
    fn test_unrelated_target_is_not_guarded() {
        let r = rule(RuleScope::Category, "Food", dec!(1.00));
        let result = SpendLimitService::evaluate(
            &[r],
            "Transport",
            "checking",
            day(5),
            dec!(100.00),
            |_| Ok(Decimal::ZERO),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_prior_sum_filter_covers_the_whole_month() {
        let r = rule(RuleScope::Category, "Food", dec!(100.00));
        let filter = SpendLimitService::prior_sum_filter(&r);
        assert_eq!(filter.category.as_deref(), Some("Food"));
        assert_eq!(filter.account, None);
        assert_eq!(filter.kind, None);
        assert_eq!(filter.occurred_from, Some(day(1)));
        assert_eq!(filter.occurred_to, Some(day(31)));
    }

    #[test]
    fn test_draft_validation() {
        let draft = BlockRuleDraft {
            scope: RuleScope::Category,
            target: "  Food  ".into(),
            limit_amount: dec!(100.00),
            period: "2026-08".parse().unwrap(),
            active: true,
        };
        let cleaned = SpendLimitService::validate_draft(draft).unwrap();
        assert_eq!(cleaned.target, "Food");

        let negative = BlockRuleDraft {
            scope: RuleScope::Category,
            target: "Food".into(),
            limit_amount: dec!(-1.00),
            period: "2026-08".parse().unwrap(),
            active: true,
        };
        assert!(matches!(
            SpendLimitService::validate_draft(negative),
            Err(SpendLimitError::NegativeLimit { .. })
        ));

        let too_fine = BlockRuleDraft {
            scope: RuleScope::Category,
            target: "Food".into(),
            limit_amount: dec!(1.999),
            period: "2026-08".parse().unwrap(),
            active: true,
        };
        assert!(matches!(
            SpendLimitService::validate_draft(too_fine),
            Err(SpendLimitError::LimitScaleTooFine { .. })
        ));
    }

    #[test]
    fn test_patch_deactivates_rule() {
        let r = rule(RuleScope::Category, "Food", dec!(100.00));
        let patch = BlockRulePatch {
            active: Some(false),
            ..BlockRulePatch::default()
        };
        let draft = SpendLimitService::apply_patch(&r, patch).unwrap();
        assert!(!draft.active);
        assert_eq!(draft.target, "Food");
        assert_eq!(draft.limit_amount, dec!(100.00));
    }
}
