//! Entry types and write-side validation for the ledger.
//!
//! This module implements the heart of the tracker:
//! - Entry domain types and drafts for create/update
//! - Query filters and ordering for list/sum operations
//! - Whitelisted extra-field metadata
//! - Business rule validation for drafts and patches
//! - Error types for ledger operations

pub mod error;
pub mod extra;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use error::LedgerError;
pub use extra::{ALLOWED_EXTRA_KEYS, ExtraFields};
pub use types::{Entry, EntryDraft, EntryFilter, EntryKind, EntryOrder, EntryPatch};
pub use validation::{MAX_DESCRIPTION_LEN, MAX_KEY_LEN, apply_patch, validate_amount, validate_draft};
