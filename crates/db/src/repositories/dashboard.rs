//! Dashboard repository for aggregate row fetching.
//!
//! Queries pull the minimal columns needed and hand them to
//! `centavo_core::aggregation` for computation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, QueryOrder, QuerySelect};

use centavo_core::aggregation::EntryStat;
use centavo_core::ledger::Entry;

use crate::entities::{entries, sea_orm_active_enums::EntryKind as DbEntryKind};
use crate::repositories::entry::to_entry;

/// Error types for dashboard operations.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Stored JSON could not be decoded into domain types.
    #[error("Stored entry data is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Dashboard repository for aggregate queries.
#[derive(Debug, Clone)]
pub struct DashboardRepository {
    db: DatabaseConnection,
}

impl DashboardRepository {
    /// Creates a new dashboard repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Fetches the kind, amount, date, and category of every entry.
    ///
    /// One pass feeds the summary, the trend, and the breakdown.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn fetch_stats(&self) -> Result<Vec<EntryStat>, DashboardError> {
        let rows: Vec<(DbEntryKind, Decimal, NaiveDate, String)> = entries::Entity::find()
            .select_only()
            .column(entries::Column::Kind)
            .column(entries::Column::Amount)
            .column(entries::Column::OccurredOn)
            .column(entries::Column::Category)
            .into_tuple()
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(kind, amount, occurred_on, category)| EntryStat {
                kind: kind.into(),
                amount,
                occurred_on,
                category,
            })
            .collect())
    }

    /// The newest entries for the dashboard feed.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn recent_entries(&self, limit: u64) -> Result<Vec<Entry>, DashboardError> {
        let models = entries::Entity::find()
            .order_by_desc(entries::Column::OccurredOn)
            .order_by_desc(entries::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await?;

        models
            .into_iter()
            .map(|model| Ok(to_entry(model)?))
            .collect()
    }
}
