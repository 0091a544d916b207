//! `SeaORM` entity definitions.

pub mod audit_logs;
pub mod block_rules;
pub mod entries;
pub mod sea_orm_active_enums;
pub mod shared_expenses;
