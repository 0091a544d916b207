//! API route definitions.

use axum::{Json, Router, http::StatusCode, response::IntoResponse, response::Response};
use serde_json::json;

use crate::AppState;
use centavo_shared::AppError;

pub mod audit_logs;
pub mod block_rules;
pub mod dashboard;
pub mod entries;
pub mod health;
pub mod reconciliation;
pub mod shared_expenses;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(entries::routes())
        .merge(block_rules::routes())
        .merge(dashboard::routes())
        .merge(reconciliation::routes())
        .merge(shared_expenses::routes())
        .merge(audit_logs::routes())
}

/// Builds the JSON error response for an application error.
///
/// `LimitExceeded` additionally carries the rule details so clients can
/// show which cap was hit without parsing the message.
pub(crate) fn error_response(error: &AppError) -> Response {
    let status =
        StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let mut body = json!({
        "error": error.error_code(),
        "message": error.to_string(),
    });
    if let AppError::LimitExceeded {
        rule_id,
        scope,
        target,
        period,
        limit_amount,
        attempted,
    } = error
    {
        body["details"] = json!({
            "rule_id": rule_id,
            "scope": scope,
            "target": target,
            "period": period,
            "limit_amount": limit_amount.to_string(),
            "attempted": attempted.to_string(),
        });
    }

    (status, Json(body)).into_response()
}

/// Standard response for unexpected storage failures. The caller logs the
/// detail; clients only see a generic message.
pub(crate) fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "PERSISTENCE_ERROR",
            "message": "An internal error occurred"
        })),
    )
        .into_response()
}
