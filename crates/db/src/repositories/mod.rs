//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod audit_log;
pub mod block_rule;
pub mod dashboard;
pub mod entry;
pub mod shared_expense;

pub use audit_log::{AuditLogError, AuditLogFilter, AuditLogRepository};
pub use block_rule::{BlockRuleError, BlockRuleRepository};
pub use dashboard::{DashboardError, DashboardRepository};
pub use entry::{EntryError, EntryRepository};
pub use shared_expense::{SharedExpenseError, SharedExpenseRepository};
