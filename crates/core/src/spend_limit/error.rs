//! Error types for block-rule operations.

use centavo_shared::types::{BlockRuleId, Period};
use rust_decimal::Decimal;
use thiserror::Error;

use super::types::RuleScope;

/// Errors that can occur when validating or enforcing block rules.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpendLimitError {
    // ========== Rule Validation ==========
    /// Target key is empty after trimming.
    #[error("Rule target must not be empty")]
    EmptyTarget,

    /// Limit must be zero or positive.
    #[error("Rule limit must not be negative, got {limit_amount}")]
    NegativeLimit {
        /// The rejected limit.
        limit_amount: Decimal,
    },

    /// Limit has more than two decimal places.
    #[error("Rule limit {limit_amount} has more than two decimal places")]
    LimitScaleTooFine {
        /// The rejected limit.
        limit_amount: Decimal,
    },

    // ========== Enforcement ==========
    /// The candidate entry would push spending over a rule's cap.
    #[error(
        "Spending limit exceeded for {scope} '{target}' in {period}: \
         {attempted} over limit {limit_amount}"
    )]
    LimitExceeded {
        /// The rule that fired.
        rule_id: BlockRuleId,
        /// Rule scope.
        scope: RuleScope,
        /// The guarded category or account key.
        target: String,
        /// The month the rule applies to.
        period: Period,
        /// The configured cap.
        limit_amount: Decimal,
        /// Prior spending plus the candidate amount.
        attempted: Decimal,
    },

    // ========== Lookups ==========
    /// The prior-sum lookup failed.
    #[error("Prior spending lookup failed: {0}")]
    Lookup(String),
}
