//! `SeaORM` active enums mapped to Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Postgres `entry_kind` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "entry_kind")]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    #[sea_orm(string_value = "income")]
    Income,
    #[sea_orm(string_value = "expense")]
    Expense,
    #[sea_orm(string_value = "transfer")]
    Transfer,
}

/// Postgres `rule_scope` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "rule_scope")]
#[serde(rename_all = "lowercase")]
pub enum RuleScope {
    #[sea_orm(string_value = "category")]
    Category,
    #[sea_orm(string_value = "account")]
    Account,
}

/// Postgres `audit_action` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "audit_action")]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    #[sea_orm(string_value = "create")]
    Create,
    #[sea_orm(string_value = "update")]
    Update,
    #[sea_orm(string_value = "delete")]
    Delete,
}

impl From<centavo_core::ledger::EntryKind> for EntryKind {
    fn from(kind: centavo_core::ledger::EntryKind) -> Self {
        match kind {
            centavo_core::ledger::EntryKind::Income => Self::Income,
            centavo_core::ledger::EntryKind::Expense => Self::Expense,
            centavo_core::ledger::EntryKind::Transfer => Self::Transfer,
        }
    }
}

impl From<EntryKind> for centavo_core::ledger::EntryKind {
    fn from(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Income => Self::Income,
            EntryKind::Expense => Self::Expense,
            EntryKind::Transfer => Self::Transfer,
        }
    }
}

impl From<centavo_core::spend_limit::RuleScope> for RuleScope {
    fn from(scope: centavo_core::spend_limit::RuleScope) -> Self {
        match scope {
            centavo_core::spend_limit::RuleScope::Category => Self::Category,
            centavo_core::spend_limit::RuleScope::Account => Self::Account,
        }
    }
}

impl From<RuleScope> for centavo_core::spend_limit::RuleScope {
    fn from(scope: RuleScope) -> Self {
        match scope {
            RuleScope::Category => Self::Category,
            RuleScope::Account => Self::Account,
        }
    }
}

impl From<centavo_core::audit::AuditAction> for AuditAction {
    fn from(action: centavo_core::audit::AuditAction) -> Self {
        match action {
            centavo_core::audit::AuditAction::Create => Self::Create,
            centavo_core::audit::AuditAction::Update => Self::Update,
            centavo_core::audit::AuditAction::Delete => Self::Delete,
        }
    }
}

impl From<AuditAction> for centavo_core::audit::AuditAction {
    fn from(action: AuditAction) -> Self {
        match action {
            AuditAction::Create => Self::Create,
            AuditAction::Update => Self::Update,
            AuditAction::Delete => Self::Delete,
        }
    }
}
