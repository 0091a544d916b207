//! Entry repository for ledger database operations.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set,
};

use centavo_core::ledger::{Entry, EntryDraft, EntryFilter, EntryOrder};
use centavo_shared::types::{EntryId, PageRequest};

use crate::entities::{entries, sea_orm_active_enums::EntryKind as DbEntryKind};

/// Error types for entry operations.
#[derive(Debug, thiserror::Error)]
pub enum EntryError {
    /// Entry not found.
    #[error("Entry not found: {0}")]
    NotFound(EntryId),

    /// Stored JSON could not be decoded into domain types.
    #[error("Stored entry data is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Entry repository for CRUD and aggregation queries.
#[derive(Debug, Clone)]
pub struct EntryRepository {
    db: DatabaseConnection,
}

impl EntryRepository {
    /// Creates a new entry repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a validated draft as a new entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create(&self, draft: EntryDraft) -> Result<Entry, EntryError> {
        let now = Utc::now().into();
        let extra = match &draft.extra {
            Some(extra) => Some(serde_json::to_value(extra)?),
            None => None,
        };

        let model = entries::ActiveModel {
            id: Set(EntryId::new().into_inner()),
            description: Set(draft.description),
            amount: Set(draft.amount),
            occurred_on: Set(draft.occurred_on),
            kind: Set(draft.kind.into()),
            category: Set(draft.category),
            account: Set(draft.account),
            extra: Set(extra),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        Ok(to_entry(model)?)
    }

    /// Fetches one entry by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no entry has the given ID.
    pub async fn find(&self, id: EntryId) -> Result<Entry, EntryError> {
        let model = entries::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(EntryError::NotFound(id))?;

        Ok(to_entry(model)?)
    }

    /// Replaces an entry's fields with a validated draft.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no entry has the given ID.
    pub async fn update(&self, id: EntryId, draft: EntryDraft) -> Result<Entry, EntryError> {
        let existing = entries::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(EntryError::NotFound(id))?;

        let extra = match &draft.extra {
            Some(extra) => Some(serde_json::to_value(extra)?),
            None => None,
        };

        let mut active: entries::ActiveModel = existing.into();
        active.description = Set(draft.description);
        active.amount = Set(draft.amount);
        active.occurred_on = Set(draft.occurred_on);
        active.kind = Set(draft.kind.into());
        active.category = Set(draft.category);
        active.account = Set(draft.account);
        active.extra = Set(extra);
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;
        Ok(to_entry(updated)?)
    }

    /// Deletes an entry, returning it as it was stored.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no entry has the given ID.
    pub async fn remove(&self, id: EntryId) -> Result<Entry, EntryError> {
        let existing = entries::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(EntryError::NotFound(id))?;

        entries::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await?;

        Ok(to_entry(existing)?)
    }

    /// Lists entries matching the filter, with pagination.
    ///
    /// Returns the page of entries and the total match count.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(
        &self,
        filter: &EntryFilter,
        order: EntryOrder,
        page: &PageRequest,
    ) -> Result<(Vec<Entry>, u64), EntryError> {
        let total = apply_filter(entries::Entity::find(), filter)
            .count(&self.db)
            .await?;

        let mut query = apply_filter(entries::Entity::find(), filter);
        query = match order {
            EntryOrder::OccurredOn => query
                .order_by_desc(entries::Column::OccurredOn)
                .order_by_desc(entries::Column::CreatedAt),
            EntryOrder::CreatedAt => query.order_by_desc(entries::Column::CreatedAt),
        };

        let models = query
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        let entries = models
            .into_iter()
            .map(to_entry)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((entries, total))
    }

    /// Every entry occurring inside the inclusive date range, oldest first.
    ///
    /// Reconciliation matches statement lines against this window, so it is
    /// deliberately unpaginated.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn fetch_range(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Entry>, EntryError> {
        let models = entries::Entity::find()
            .filter(entries::Column::OccurredOn.gte(from))
            .filter(entries::Column::OccurredOn.lte(to))
            .order_by_asc(entries::Column::OccurredOn)
            .all(&self.db)
            .await?;

        let entries = models
            .into_iter()
            .map(to_entry)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// Sums the amounts of every entry matching the filter.
    ///
    /// Returns zero when nothing matches.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn sum(&self, filter: &EntryFilter) -> Result<Decimal, EntryError> {
        let amounts: Vec<Decimal> = apply_filter(entries::Entity::find(), filter)
            .select_only()
            .column(entries::Column::Amount)
            .into_tuple()
            .all(&self.db)
            .await?;

        Ok(amounts.iter().sum())
    }
}

/// Applies every set field of the filter to the query.
fn apply_filter(
    mut query: Select<entries::Entity>,
    filter: &EntryFilter,
) -> Select<entries::Entity> {
    if let Some(search) = &filter.search {
        query = query.filter(entries::Column::Description.contains(search));
    }
    if let Some(category) = &filter.category {
        query = query.filter(entries::Column::Category.eq(category));
    }
    if let Some(account) = &filter.account {
        query = query.filter(entries::Column::Account.eq(account));
    }
    if let Some(kind) = filter.kind {
        query = query.filter(entries::Column::Kind.eq(DbEntryKind::from(kind)));
    }
    if let Some(from) = filter.occurred_from {
        query = query.filter(entries::Column::OccurredOn.gte(from));
    }
    if let Some(to) = filter.occurred_to {
        query = query.filter(entries::Column::OccurredOn.lte(to));
    }
    if let Some(min) = filter.min_amount {
        query = query.filter(entries::Column::Amount.gte(min));
    }
    if let Some(max) = filter.max_amount {
        query = query.filter(entries::Column::Amount.lte(max));
    }
    query
}

/// Maps a stored row to the domain entry.
pub(crate) fn to_entry(model: entries::Model) -> Result<Entry, serde_json::Error> {
    let extra = match model.extra {
        Some(value) => Some(serde_json::from_value(value)?),
        None => None,
    };

    Ok(Entry {
        id: EntryId::from_uuid(model.id),
        description: model.description,
        amount: model.amount,
        occurred_on: model.occurred_on,
        kind: model.kind.into(),
        category: model.category,
        account: model.account,
        extra,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}

#[cfg(test)]
#[path = "entry_tests.rs"]
mod entry_tests;
