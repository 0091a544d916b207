//! Domain types for spending block rules.

use centavo_shared::types::{BlockRuleId, Period};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// What a block rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleScope {
    /// Cap spending in a category.
    Category,
    /// Cap spending from an account.
    Account,
}

impl RuleScope {
    /// Stable string form used in storage and error payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Account => "account",
        }
    }
}

impl std::fmt::Display for RuleScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A spending limit for one scope key in one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockRule {
    /// Unique identifier.
    pub id: BlockRuleId,
    /// Whether the rule guards a category or an account.
    pub scope: RuleScope,
    /// The category or account key.
    pub target: String,
    /// The cap. Zero blocks every entry in scope.
    pub limit_amount: Decimal,
    /// The calendar month the rule applies to.
    pub period: Period,
    /// Inactive rules are never evaluated.
    pub active: bool,
    /// When the rule was created.
    pub created_at: DateTime<Utc>,
    /// When the rule was last changed.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a block rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockRuleDraft {
    /// Whether the rule guards a category or an account.
    pub scope: RuleScope,
    /// The category or account key.
    pub target: String,
    /// The cap, non-negative with at most two decimal places.
    pub limit_amount: Decimal,
    /// The calendar month the rule applies to.
    pub period: Period,
    /// Whether the rule starts active. Defaults to true.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Partial update for a block rule. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockRulePatch {
    /// New scope.
    #[serde(default)]
    pub scope: Option<RuleScope>,
    /// New target key.
    #[serde(default)]
    pub target: Option<String>,
    /// New cap.
    #[serde(default)]
    pub limit_amount: Option<Decimal>,
    /// New period.
    #[serde(default)]
    pub period: Option<Period>,
    /// New active flag.
    #[serde(default)]
    pub active: Option<bool>,
}
