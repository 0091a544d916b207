//! Audit trail routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;
use uuid::Uuid;

use crate::AppState;
use centavo_core::audit::AuditRecord;
use centavo_db::repositories::audit_log::{AuditLogFilter, AuditLogRepository};
use centavo_shared::types::{ActorId, PageRequest, PageResponse};

use super::internal_error;

/// Creates the audit-log routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/audit-logs", get(list_audit_logs))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for reading the audit log.
#[derive(Debug, Deserialize)]
pub struct ListAuditLogsQuery {
    /// Restrict to one actor.
    pub actor: Option<Uuid>,
    /// Restrict to one entity type, e.g. `entry` or `block_rule`.
    pub entity: Option<String>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Page size (default 20, max 100).
    pub page_size: Option<u32>,
}

/// Response for one audit row.
#[derive(Debug, Serialize)]
pub struct AuditRecordResponse {
    /// Row ID.
    pub id: Uuid,
    /// Who performed the write.
    pub actor: Uuid,
    /// `create`, `update` or `delete`.
    pub action: String,
    /// The entity type.
    pub entity: String,
    /// The entity's ID.
    pub entity_id: Uuid,
    /// Snapshot before the write. Absent for creates.
    pub before: Option<Value>,
    /// Snapshot after the write. Absent for deletes.
    pub after: Option<Value>,
    /// When the row was recorded.
    pub recorded_at: String,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/audit-logs` - Read the mutation trail, newest first.
async fn list_audit_logs(
    State(state): State<AppState>,
    Query(query): Query<ListAuditLogsQuery>,
) -> impl IntoResponse {
    let repo = AuditLogRepository::new((*state.db).clone());
    let filter = AuditLogFilter {
        actor: query.actor.map(ActorId::from_uuid),
        entity: query.entity,
    };
    let page = PageRequest {
        page: query.page.unwrap_or(1),
        page_size: query.page_size.unwrap_or(20),
    };

    match repo.list(&filter, &page).await {
        Ok((records, total)) => {
            let data: Vec<AuditRecordResponse> =
                records.into_iter().map(record_response).collect();
            (StatusCode::OK, Json(PageResponse::new(data, &page, total))).into_response()
        }
        Err(error) => {
            error!(error = %error, "Failed to list audit logs");
            internal_error()
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn record_response(record: AuditRecord) -> AuditRecordResponse {
    AuditRecordResponse {
        id: record.id.into_inner(),
        actor: record.actor.into_inner(),
        action: record.action.to_string(),
        entity: record.entity,
        entity_id: record.entity_id,
        before: record.before,
        after: record.after,
        recorded_at: record.recorded_at.to_rfc3339(),
    }
}
