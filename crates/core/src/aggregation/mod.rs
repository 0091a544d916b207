//! Dashboard aggregation: totals, monthly trend, category breakdown.
//!
//! All computation here is pure; the database layer fetches rows and
//! delegates. A storage failure on the dashboard read path degrades to an
//! all-zero payload at the API boundary instead of propagating.

pub mod service;
pub mod types;

#[cfg(test)]
mod props;

pub use service::AggregationService;
pub use types::{CategorySlice, EntryStat, Summary, TrendPoint};
