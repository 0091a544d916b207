//! Audit trail types.
//!
//! Every write carried out by a known actor produces an [`AuditEvent`] with
//! full before and after snapshots. Recording is the caller's concern; these
//! types only describe what happened.

use centavo_shared::types::{ActorId, AuditLogId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// What kind of write an audit event describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
}

impl AuditAction {
    /// Returns the lowercase string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single auditable write, ready to be recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Who performed the write.
    pub actor: ActorId,
    /// What kind of write it was.
    pub action: AuditAction,
    /// The entity type, e.g. `"entry"` or `"block_rule"`.
    pub entity: String,
    /// The entity's ID.
    pub entity_id: Uuid,
    /// Snapshot before the write. `None` for creates.
    pub before: Option<Value>,
    /// Snapshot after the write. `None` for deletes.
    pub after: Option<Value>,
}

impl AuditEvent {
    /// Event for a freshly created entity.
    #[must_use]
    pub fn created(actor: ActorId, entity: &str, entity_id: Uuid, after: Value) -> Self {
        Self {
            actor,
            action: AuditAction::Create,
            entity: entity.to_string(),
            entity_id,
            before: None,
            after: Some(after),
        }
    }

    /// Event for an updated entity, with both snapshots.
    #[must_use]
    pub fn updated(
        actor: ActorId,
        entity: &str,
        entity_id: Uuid,
        before: Value,
        after: Value,
    ) -> Self {
        Self {
            actor,
            action: AuditAction::Update,
            entity: entity.to_string(),
            entity_id,
            before: Some(before),
            after: Some(after),
        }
    }

    /// Event for a deleted entity.
    #[must_use]
    pub fn deleted(actor: ActorId, entity: &str, entity_id: Uuid, before: Value) -> Self {
        Self {
            actor,
            action: AuditAction::Delete,
            entity: entity.to_string(),
            entity_id,
            before: Some(before),
            after: None,
        }
    }
}

/// A stored audit row, as read back from the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Unique identifier.
    pub id: AuditLogId,
    /// Who performed the write.
    pub actor: ActorId,
    /// What kind of write it was.
    pub action: AuditAction,
    /// The entity type.
    pub entity: String,
    /// The entity's ID.
    pub entity_id: Uuid,
    /// Snapshot before the write.
    pub before: Option<Value>,
    /// Snapshot after the write.
    pub after: Option<Value>,
    /// When the row was recorded.
    pub recorded_at: DateTime<Utc>,
}
