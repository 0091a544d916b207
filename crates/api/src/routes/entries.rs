//! Ledger entry routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{AppState, extractors::ActorContext};
use centavo_core::audit::AuditEvent;
use centavo_core::events::LedgerEvent;
use centavo_core::ledger::{
    Entry, EntryDraft, EntryFilter, EntryKind, EntryOrder, EntryPatch, ExtraFields, LedgerError,
    apply_patch, validate_draft,
};
use centavo_core::spend_limit::{SpendLimitError, SpendLimitService};
use centavo_db::repositories::audit_log::AuditLogRepository;
use centavo_db::repositories::block_rule::BlockRuleRepository;
use centavo_db::repositories::entry::{EntryError, EntryRepository};
use centavo_shared::AppError;
use centavo_shared::types::{EntryId, PageRequest, PageResponse, Period};

use super::{error_response, internal_error};

/// Creates the entry routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/entries", post(create_entry))
        .route("/entries", get(list_entries))
        .route("/entries/sum", get(sum_entries))
        .route("/entries/{id}", get(get_entry))
        .route("/entries/{id}", patch(update_entry))
        .route("/entries/{id}", delete(delete_entry))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing and summing entries.
#[derive(Debug, Deserialize)]
pub struct ListEntriesQuery {
    /// Substring filter on the description.
    pub q: Option<String>,
    /// Filter by category key.
    pub category: Option<String>,
    /// Filter by account key.
    pub account: Option<String>,
    /// Filter by entry kind.
    pub kind: Option<String>,
    /// Inclusive start of the occurrence-date range (YYYY-MM-DD).
    pub from: Option<NaiveDate>,
    /// Inclusive end of the occurrence-date range (YYYY-MM-DD).
    pub to: Option<NaiveDate>,
    /// Inclusive lower bound on the amount.
    pub min_amount: Option<Decimal>,
    /// Inclusive upper bound on the amount.
    pub max_amount: Option<Decimal>,
    /// Ordering: `occurred_on` (default) or `created_at`.
    pub order: Option<String>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Page size (default 20, max 100).
    pub page_size: Option<u32>,
}

/// Response for a ledger entry.
#[derive(Debug, Serialize)]
pub struct EntryResponse {
    /// Entry ID.
    pub id: Uuid,
    /// Description.
    pub description: String,
    /// Amount, two decimal places.
    pub amount: String,
    /// Occurrence date (YYYY-MM-DD).
    pub occurred_on: String,
    /// Entry kind.
    pub kind: String,
    /// Category key.
    pub category: String,
    /// Account key.
    pub account: String,
    /// Whitelisted extra metadata.
    pub extra: Option<ExtraFields>,
    /// Created at timestamp.
    pub created_at: String,
    /// Updated at timestamp.
    pub updated_at: String,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/entries` - Record a new entry.
///
/// Validation first, then spending-limit checks against prior spending in
/// the entry's month, then the insert. The check-then-insert window is
/// serialized per scope key.
async fn create_entry(
    State(state): State<AppState>,
    actor: ActorContext,
    Json(payload): Json<EntryDraft>,
) -> impl IntoResponse {
    let draft = match validate_draft(payload) {
        Ok(draft) => draft,
        Err(error) => return validation_error(&error),
    };

    let period = Period::of(draft.occurred_on);
    let _guards = state
        .locks
        .acquire(&draft.category, &draft.account, period)
        .await;

    let rule_repo = BlockRuleRepository::new((*state.db).clone());
    let rules = match rule_repo.find_active_for(period).await {
        Ok(rules) => rules,
        Err(error) => {
            error!(error = %error, "Failed to load block rules");
            return internal_error();
        }
    };

    let entry_repo = EntryRepository::new((*state.db).clone());
    let applicable = SpendLimitService::applicable_rules(
        &rules,
        &draft.category,
        &draft.account,
        draft.occurred_on,
    );
    for rule in applicable {
        let prior = match entry_repo
            .sum(&SpendLimitService::prior_sum_filter(rule))
            .await
        {
            Ok(sum) => sum,
            Err(error) => {
                error!(error = %error, "Failed to sum prior spending");
                return internal_error();
            }
        };

        if let Err(violation) = SpendLimitService::check_rule(rule, prior, draft.amount) {
            info!(rule_id = %rule.id, target = %rule.target, "Entry blocked by spending limit");
            return error_response(&limit_error(violation));
        }
    }

    match entry_repo.create(draft).await {
        Ok(entry) => {
            info!(entry_id = %entry.id, "Entry created");

            if let Some(actor) = actor.actor() {
                record_audit(
                    &state,
                    AuditEvent::created(actor, "entry", entry.id.into_inner(), snapshot(&entry)),
                );
            }
            state.publisher.publish(LedgerEvent::EntryCreated {
                entry: entry.clone(),
            });

            (StatusCode::CREATED, Json(entry_response(entry))).into_response()
        }
        Err(error) => {
            error!(error = %error, "Failed to create entry");
            internal_error()
        }
    }
}

/// GET `/entries` - List entries with filters and pagination.
async fn list_entries(
    State(state): State<AppState>,
    Query(query): Query<ListEntriesQuery>,
) -> impl IntoResponse {
    let repo = EntryRepository::new((*state.db).clone());
    let page = page_request(&query);
    let order = parse_order(query.order.as_deref());

    match repo.list(&build_filter(&query), order, &page).await {
        Ok((entries, total)) => {
            let data: Vec<EntryResponse> = entries.into_iter().map(entry_response).collect();
            (StatusCode::OK, Json(PageResponse::new(data, &page, total))).into_response()
        }
        Err(error) => {
            error!(error = %error, "Failed to list entries");
            internal_error()
        }
    }
}

/// GET `/entries/sum` - Sum amounts over the same filters as the list.
async fn sum_entries(
    State(state): State<AppState>,
    Query(query): Query<ListEntriesQuery>,
) -> impl IntoResponse {
    let repo = EntryRepository::new((*state.db).clone());

    match repo.sum(&build_filter(&query)).await {
        Ok(total) => (
            StatusCode::OK,
            Json(json!({ "total": total.to_string() })),
        )
            .into_response(),
        Err(error) => {
            error!(error = %error, "Failed to sum entries");
            internal_error()
        }
    }
}

/// GET `/entries/{id}` - Fetch one entry.
async fn get_entry(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    let repo = EntryRepository::new((*state.db).clone());

    match repo.find(EntryId::from_uuid(id)).await {
        Ok(entry) => (StatusCode::OK, Json(entry_response(entry))).into_response(),
        Err(EntryError::NotFound(_)) => error_response(&AppError::NotFound(format!("entry {id}"))),
        Err(error) => {
            error!(error = %error, "Failed to load entry");
            internal_error()
        }
    }
}

/// PATCH `/entries/{id}` - Partially update an entry.
///
/// The patched state is re-validated as a whole; absent fields are left
/// unchanged.
async fn update_entry(
    State(state): State<AppState>,
    actor: ActorContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<EntryPatch>,
) -> impl IntoResponse {
    let repo = EntryRepository::new((*state.db).clone());
    let id = EntryId::from_uuid(id);

    let before = match repo.find(id).await {
        Ok(entry) => entry,
        Err(EntryError::NotFound(_)) => {
            return error_response(&AppError::NotFound(format!("entry {id}")));
        }
        Err(error) => {
            error!(error = %error, "Failed to load entry");
            return internal_error();
        }
    };

    let draft = match apply_patch(&before, payload) {
        Ok(draft) => draft,
        Err(error) => return validation_error(&error),
    };

    match repo.update(id, draft).await {
        Ok(after) => {
            info!(entry_id = %id, "Entry updated");

            if let Some(actor) = actor.actor() {
                record_audit(
                    &state,
                    AuditEvent::updated(
                        actor,
                        "entry",
                        id.into_inner(),
                        snapshot(&before),
                        snapshot(&after),
                    ),
                );
            }
            state.publisher.publish(LedgerEvent::EntryUpdated {
                before,
                after: after.clone(),
            });

            (StatusCode::OK, Json(entry_response(after))).into_response()
        }
        Err(EntryError::NotFound(_)) => error_response(&AppError::NotFound(format!("entry {id}"))),
        Err(error) => {
            error!(error = %error, "Failed to update entry");
            internal_error()
        }
    }
}

/// DELETE `/entries/{id}` - Remove an entry.
///
/// The audit trail keeps the before-image of the removed entry.
async fn delete_entry(
    State(state): State<AppState>,
    actor: ActorContext,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = EntryRepository::new((*state.db).clone());
    let id = EntryId::from_uuid(id);

    match repo.remove(id).await {
        Ok(entry) => {
            info!(entry_id = %id, "Entry deleted");

            if let Some(actor) = actor.actor() {
                record_audit(
                    &state,
                    AuditEvent::deleted(actor, "entry", id.into_inner(), snapshot(&entry)),
                );
            }
            state.publisher.publish(LedgerEvent::EntryDeleted { entry });

            (StatusCode::NO_CONTENT, ()).into_response()
        }
        Err(EntryError::NotFound(_)) => error_response(&AppError::NotFound(format!("entry {id}"))),
        Err(error) => {
            error!(error = %error, "Failed to delete entry");
            internal_error()
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Builds the repository filter from the query parameters. Unknown kind
/// strings are ignored rather than rejected.
fn build_filter(query: &ListEntriesQuery) -> EntryFilter {
    EntryFilter {
        search: query.q.clone(),
        category: query.category.clone(),
        account: query.account.clone(),
        kind: query.kind.as_deref().and_then(string_to_kind),
        occurred_from: query.from,
        occurred_to: query.to,
        min_amount: query.min_amount,
        max_amount: query.max_amount,
    }
}

fn page_request(query: &ListEntriesQuery) -> PageRequest {
    PageRequest {
        page: query.page.unwrap_or(1),
        page_size: query.page_size.unwrap_or(20),
    }
}

fn parse_order(order: Option<&str>) -> EntryOrder {
    match order {
        Some("created_at") => EntryOrder::CreatedAt,
        _ => EntryOrder::OccurredOn,
    }
}

fn string_to_kind(s: &str) -> Option<EntryKind> {
    match s.to_lowercase().as_str() {
        "income" => Some(EntryKind::Income),
        "expense" => Some(EntryKind::Expense),
        "transfer" => Some(EntryKind::Transfer),
        _ => None,
    }
}

fn entry_response(entry: Entry) -> EntryResponse {
    EntryResponse {
        id: entry.id.into_inner(),
        description: entry.description,
        amount: entry.amount.to_string(),
        occurred_on: entry.occurred_on.to_string(),
        kind: entry.kind.as_str().to_string(),
        category: entry.category,
        account: entry.account,
        extra: entry.extra,
        created_at: entry.created_at.to_rfc3339(),
        updated_at: entry.updated_at.to_rfc3339(),
    }
}

/// Response for rejected input, naming the offending field.
fn validation_error(error: &LedgerError) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "VALIDATION_ERROR",
            "message": error.to_string(),
            "field": error.field(),
        })),
    )
        .into_response()
}

fn limit_error(error: SpendLimitError) -> AppError {
    match error {
        SpendLimitError::LimitExceeded {
            rule_id,
            scope,
            target,
            period,
            limit_amount,
            attempted,
        } => AppError::LimitExceeded {
            rule_id: rule_id.into_inner(),
            scope: scope.to_string(),
            target,
            period: period.to_string(),
            limit_amount,
            attempted,
        },
        other => AppError::Validation(other.to_string()),
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

/// JSON snapshot of an entry for the audit trail.
fn snapshot(entry: &Entry) -> Value {
    serde_json::to_value(entry).unwrap_or(Value::Null)
}
