//! Audit-log repository for the append-only mutation trail.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use centavo_core::audit::{AuditEvent, AuditRecord};
use centavo_shared::types::{ActorId, AuditLogId, PageRequest};

use crate::entities::audit_logs;

/// Error types for audit-log operations.
#[derive(Debug, thiserror::Error)]
pub enum AuditLogError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Filter options for reading the audit log.
#[derive(Debug, Clone, Default)]
pub struct AuditLogFilter {
    /// Restrict to one actor.
    pub actor: Option<ActorId>,
    /// Restrict to one entity type, e.g. `"entry"`.
    pub entity: Option<String>,
}

/// Audit-log repository. Rows are written once and never changed.
#[derive(Debug, Clone)]
pub struct AuditLogRepository {
    db: DatabaseConnection,
}

impl AuditLogRepository {
    /// Creates a new audit-log repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Appends one audit row.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn record(&self, event: AuditEvent) -> Result<AuditRecord, AuditLogError> {
        let model = audit_logs::ActiveModel {
            id: Set(AuditLogId::new().into_inner()),
            actor: Set(event.actor.into_inner()),
            action: Set(event.action.into()),
            entity: Set(event.entity),
            entity_id: Set(event.entity_id),
            before: Set(event.before),
            after: Set(event.after),
            recorded_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await?;

        Ok(to_record(model))
    }

    /// Lists audit rows newest first, with pagination and optional filters.
    ///
    /// Returns the page of records and the total match count.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(
        &self,
        filter: &AuditLogFilter,
        page: &PageRequest,
    ) -> Result<(Vec<AuditRecord>, u64), AuditLogError> {
        let mut query = audit_logs::Entity::find();
        if let Some(actor) = filter.actor {
            query = query.filter(audit_logs::Column::Actor.eq(actor.into_inner()));
        }
        if let Some(entity) = &filter.entity {
            query = query.filter(audit_logs::Column::Entity.eq(entity));
        }

        let total = query.clone().count(&self.db).await?;

        let models = query
            .order_by_desc(audit_logs::Column::RecordedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok((models.into_iter().map(to_record).collect(), total))
    }
}

/// Maps a stored row to the read model.
fn to_record(model: audit_logs::Model) -> AuditRecord {
    AuditRecord {
        id: AuditLogId::from_uuid(model.id),
        actor: ActorId::from_uuid(model.actor),
        action: model.action.into(),
        entity: model.entity,
        entity_id: model.entity_id,
        before: model.before,
        after: model.after,
        recorded_at: model.recorded_at.with_timezone(&Utc),
    }
}

#[cfg(test)]
#[path = "audit_log_tests.rs"]
mod audit_log_tests;
