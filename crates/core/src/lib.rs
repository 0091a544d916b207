//! Core business logic for Centavo.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `ledger` - Entry types, filters, and write-side validation
//! - `spend_limit` - Block-rule enforcement for spending limits
//! - `aggregation` - Dashboard totals, monthly trend, category breakdown
//! - `reconciliation` - Bank statement match suggestions
//! - `settlement` - Shared-expense balances between participants
//! - `audit` - Audit trail event types
//! - `events` - Ledger event publishing seam

pub mod aggregation;
pub mod audit;
pub mod events;
pub mod ledger;
pub mod reconciliation;
pub mod settlement;
pub mod spend_limit;
