//! Block-rule enforcement for spending limits.
//!
//! Rules cap how much may be recorded against a category or account within
//! a calendar month. The check runs before an entry is committed and is the
//! only write-time control in the system.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::SpendLimitError;
pub use service::SpendLimitService;
pub use types::{BlockRule, BlockRuleDraft, BlockRulePatch, RuleScope};
