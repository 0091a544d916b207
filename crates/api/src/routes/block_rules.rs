//! Spending block-rule routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{AppState, extractors::ActorContext};
use centavo_core::audit::AuditEvent;
use centavo_core::spend_limit::{BlockRule, BlockRuleDraft, BlockRulePatch, SpendLimitService};
use centavo_db::repositories::audit_log::AuditLogRepository;
use centavo_db::repositories::block_rule::{BlockRuleError, BlockRuleRepository};
use centavo_shared::AppError;
use centavo_shared::types::{BlockRuleId, PageRequest, PageResponse};

use super::{error_response, internal_error};

/// Creates the block-rule routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/block-rules", post(create_rule))
        .route("/block-rules", get(list_rules))
        .route("/block-rules/{id}", patch(update_rule))
        .route("/block-rules/{id}", delete(deactivate_rule))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing block rules.
#[derive(Debug, Deserialize)]
pub struct ListRulesQuery {
    /// Restrict to active or inactive rules.
    pub active: Option<bool>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Page size (default 20, max 100).
    pub page_size: Option<u32>,
}

/// Response for a block rule.
#[derive(Debug, Serialize)]
pub struct BlockRuleResponse {
    /// Rule ID.
    pub id: Uuid,
    /// Rule scope (`category` or `account`).
    pub scope: String,
    /// The guarded category or account key.
    pub target: String,
    /// The cap.
    pub limit_amount: String,
    /// The month the rule applies to (YYYY-MM).
    pub period: String,
    /// Whether the rule is evaluated.
    pub active: bool,
    /// Created at timestamp.
    pub created_at: String,
    /// Updated at timestamp.
    pub updated_at: String,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/block-rules` - Create a spending limit for one month.
async fn create_rule(
    State(state): State<AppState>,
    actor: ActorContext,
    Json(payload): Json<BlockRuleDraft>,
) -> impl IntoResponse {
    let draft = match SpendLimitService::validate_draft(payload) {
        Ok(draft) => draft,
        Err(error) => return error_response(&AppError::Validation(error.to_string())),
    };

    let repo = BlockRuleRepository::new((*state.db).clone());
    match repo.create(draft).await {
        Ok(rule) => {
            info!(rule_id = %rule.id, target = %rule.target, "Block rule created");

            if let Some(actor) = actor.actor() {
                record_audit(
                    &state,
                    AuditEvent::created(actor, "block_rule", rule.id.into_inner(), snapshot(&rule)),
                );
            }

            (StatusCode::CREATED, Json(rule_response(rule))).into_response()
        }
        Err(error) => {
            error!(error = %error, "Failed to create block rule");
            internal_error()
        }
    }
}

/// GET `/block-rules` - List block rules, newest period first.
async fn list_rules(
    State(state): State<AppState>,
    Query(query): Query<ListRulesQuery>,
) -> impl IntoResponse {
    let repo = BlockRuleRepository::new((*state.db).clone());
    let page = PageRequest {
        page: query.page.unwrap_or(1),
        page_size: query.page_size.unwrap_or(20),
    };

    match repo.list(query.active, &page).await {
        Ok((rules, total)) => {
            let data: Vec<BlockRuleResponse> = rules.into_iter().map(rule_response).collect();
            (StatusCode::OK, Json(PageResponse::new(data, &page, total))).into_response()
        }
        Err(error) => {
            error!(error = %error, "Failed to list block rules");
            internal_error()
        }
    }
}

/// PATCH `/block-rules/{id}` - Partially update a block rule.
async fn update_rule(
    State(state): State<AppState>,
    actor: ActorContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<BlockRulePatch>,
) -> impl IntoResponse {
    let repo = BlockRuleRepository::new((*state.db).clone());
    let id = BlockRuleId::from_uuid(id);

    let before = match repo.find(id).await {
        Ok(rule) => rule,
        Err(BlockRuleError::NotFound(_)) => {
            return error_response(&AppError::NotFound(format!("block rule {id}")));
        }
        Err(error) => {
            error!(error = %error, "Failed to load block rule");
            return internal_error();
        }
    };

    let draft = match SpendLimitService::apply_patch(&before, payload) {
        Ok(draft) => draft,
        Err(error) => return error_response(&AppError::Validation(error.to_string())),
    };

    match repo.update(id, draft).await {
        Ok(after) => {
            info!(rule_id = %id, "Block rule updated");

            if let Some(actor) = actor.actor() {
                record_audit(
                    &state,
                    AuditEvent::updated(
                        actor,
                        "block_rule",
                        id.into_inner(),
                        snapshot(&before),
                        snapshot(&after),
                    ),
                );
            }

            (StatusCode::OK, Json(rule_response(after))).into_response()
        }
        Err(BlockRuleError::NotFound(_)) => {
            error_response(&AppError::NotFound(format!("block rule {id}")))
        }
        Err(error) => {
            error!(error = %error, "Failed to update block rule");
            internal_error()
        }
    }
}

/// DELETE `/block-rules/{id}` - Deactivate a block rule.
///
/// The row is kept so the audit trail and history stay intact; the rule
/// simply stops being evaluated.
async fn deactivate_rule(
    State(state): State<AppState>,
    actor: ActorContext,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = BlockRuleRepository::new((*state.db).clone());
    let id = BlockRuleId::from_uuid(id);

    let before = match repo.find(id).await {
        Ok(rule) => rule,
        Err(BlockRuleError::NotFound(_)) => {
            return error_response(&AppError::NotFound(format!("block rule {id}")));
        }
        Err(error) => {
            error!(error = %error, "Failed to load block rule");
            return internal_error();
        }
    };

    match repo.deactivate(id).await {
        Ok(after) => {
            info!(rule_id = %id, "Block rule deactivated");

            if let Some(actor) = actor.actor() {
                record_audit(
                    &state,
                    AuditEvent::updated(
                        actor,
                        "block_rule",
                        id.into_inner(),
                        snapshot(&before),
                        snapshot(&after),
                    ),
                );
            }

            (StatusCode::NO_CONTENT, ()).into_response()
        }
        Err(BlockRuleError::NotFound(_)) => {
            error_response(&AppError::NotFound(format!("block rule {id}")))
        }
        Err(error) => {
            error!(error = %error, "Failed to deactivate block rule");
            internal_error()
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn rule_response(rule: BlockRule) -> BlockRuleResponse {
    BlockRuleResponse {
        id: rule.id.into_inner(),
        scope: rule.scope.to_string(),
        target: rule.target,
        limit_amount: rule.limit_amount.to_string(),
        period: rule.period.to_string(),
        active: rule.active,
        created_at: rule.created_at.to_rfc3339(),
        updated_at: rule.updated_at.to_rfc3339(),
    }
}

/// Records the mutation in the audit trail without blocking the response.
/// Failures are logged and never surfaced to the caller.
fn record_audit(state: &AppState, event: AuditEvent) {
    let repo = AuditLogRepository::new((*state.db).clone());
    tokio::spawn(async move {
        if let Err(error) = repo.record(event).await {
            warn!(error = %error, "Failed to record audit event");
        }
    });
}

/// JSON snapshot of a rule for the audit trail.
fn snapshot(rule: &BlockRule) -> Value {
    serde_json::to_value(rule).unwrap_or(Value::Null)
}
