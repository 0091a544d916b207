//! Statement reconciliation routes.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::AppState;
use centavo_core::ledger::Entry;
use centavo_core::reconciliation::{ReconciliationService, StatementLine};
use centavo_db::repositories::entry::EntryRepository;

/// Creates the reconciliation routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/reconciliation/suggest", post(suggest_matches))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for match suggestions.
#[derive(Debug, Deserialize)]
pub struct SuggestRequest {
    /// Statement lines in bank order.
    pub lines: Vec<StatementLine>,
}

/// Response for match suggestions.
#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    /// One suggestion per input line, in input order.
    pub suggestions: Vec<SuggestionResponse>,
}

/// Match candidates for one statement line.
#[derive(Debug, Serialize)]
pub struct SuggestionResponse {
    /// The statement line.
    pub line: StatementLine,
    /// The matching entry when exactly one matches.
    pub matched: Option<Entry>,
    /// Every entry with the line's exact amount and date. More than one
    /// means the line needs a human decision.
    pub matches: Vec<Entry>,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/reconciliation/suggest` - Pair statement lines with entries.
///
/// Matching is exact on amount and occurrence date; descriptions are
/// ignored. The ledger is never mutated.
async fn suggest_matches(
    State(state): State<AppState>,
    Json(payload): Json<SuggestRequest>,
) -> impl IntoResponse {
    let window = payload
        .lines
        .iter()
        .map(|line| line.occurred_on)
        .fold(
            None,
            |window: Option<(NaiveDate, NaiveDate)>, date| match window {
                Some((from, to)) => Some((from.min(date), to.max(date))),
                None => Some((date, date)),
            },
        );

    let Some((from, to)) = window else {
        return (
            StatusCode::OK,
            Json(SuggestResponse {
                suggestions: Vec::new(),
            }),
        )
            .into_response();
    };

    let repo = EntryRepository::new((*state.db).clone());
    let entries = match repo.fetch_range(from, to).await {
        Ok(entries) => entries,
        Err(err) => {
            error!(error = %err, "Failed to load entries for reconciliation");
            return super::internal_error();
        }
    };

    let suggestions: Vec<SuggestionResponse> =
        ReconciliationService::suggest(&payload.lines, &entries)
            .into_iter()
            .map(|suggestion| {
                let matched = suggestion.unique_match().cloned();
                SuggestionResponse {
                    line: suggestion.line,
                    matched,
                    matches: suggestion.matches,
                }
            })
            .collect();

    (StatusCode::OK, Json(SuggestResponse { suggestions })).into_response()
}
