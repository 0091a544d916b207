//! Shared-expense routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::AppState;
use centavo_core::settlement::{SettlementService, SharedExpense, SharedExpenseDraft};
use centavo_db::repositories::shared_expense::SharedExpenseRepository;
use centavo_shared::AppError;
use centavo_shared::types::{PageRequest, PageResponse, ParticipantId};

use super::{error_response, internal_error};

/// Creates the shared-expense routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/shared-expenses", post(create_shared_expense))
        .route("/shared-expenses", get(list_shared_expenses))
        .route("/shared-expenses/balances", get(get_balances))
        .route(
            "/shared-expenses/balances/{participant}",
            get(get_balance_for),
        )
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing shared expenses.
#[derive(Debug, Deserialize)]
pub struct ListExpensesQuery {
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Page size (default 20, max 100).
    pub page_size: Option<u32>,
}

/// Response for a shared expense.
#[derive(Debug, Serialize)]
pub struct SharedExpenseResponse {
    /// Expense ID.
    pub id: Uuid,
    /// What the bill was for.
    pub description: String,
    /// The full amount the payer fronted.
    pub total_amount: String,
    /// Who paid.
    pub payer: Uuid,
    /// Who owes what.
    pub participants: Vec<ShareResponse>,
    /// Created at timestamp.
    pub created_at: String,
    /// Updated at timestamp.
    pub updated_at: String,
}

/// One participant's share in a response.
#[derive(Debug, Serialize)]
pub struct ShareResponse {
    /// Who owes this share.
    pub participant: Uuid,
    /// The amount owed.
    pub amount: String,
}

/// Response for the full balance sheet.
#[derive(Debug, Serialize)]
pub struct BalancesResponse {
    /// Net balance per participant, ordered by participant ID.
    pub balances: Vec<BalanceResponse>,
}

/// A participant's net position.
#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    /// The participant.
    pub participant: Uuid,
    /// Net balance: positive means the group owes them.
    pub balance: String,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/shared-expenses` - Record a shared expense.
async fn create_shared_expense(
    State(state): State<AppState>,
    Json(payload): Json<SharedExpenseDraft>,
) -> impl IntoResponse {
    let draft = match SettlementService::validate_draft(payload) {
        Ok(draft) => draft,
        Err(error) => return error_response(&AppError::Validation(error.to_string())),
    };

    let repo = SharedExpenseRepository::new((*state.db).clone());
    match repo.create(draft).await {
        Ok(expense) => {
            info!(expense_id = %expense.id, "Shared expense created");
            (StatusCode::CREATED, Json(expense_response(expense))).into_response()
        }
        Err(error) => {
            error!(error = %error, "Failed to create shared expense");
            internal_error()
        }
    }
}

/// GET `/shared-expenses` - List shared expenses newest first.
async fn list_shared_expenses(
    State(state): State<AppState>,
    Query(query): Query<ListExpensesQuery>,
) -> impl IntoResponse {
    let repo = SharedExpenseRepository::new((*state.db).clone());
    let page = PageRequest {
        page: query.page.unwrap_or(1),
        page_size: query.page_size.unwrap_or(20),
    };

    match repo.list(&page).await {
        Ok((expenses, total)) => {
            let data: Vec<SharedExpenseResponse> =
                expenses.into_iter().map(expense_response).collect();
            (StatusCode::OK, Json(PageResponse::new(data, &page, total))).into_response()
        }
        Err(error) => {
            error!(error = %error, "Failed to list shared expenses");
            internal_error()
        }
    }
}

/// GET `/shared-expenses/balances` - Net balances for every participant.
///
/// Settlement works over the full expense history, not a page of it.
async fn get_balances(State(state): State<AppState>) -> impl IntoResponse {
    let repo = SharedExpenseRepository::new((*state.db).clone());

    match repo.fetch_all().await {
        Ok(expenses) => {
            let balances: Vec<BalanceResponse> = SettlementService::balances(&expenses)
                .into_iter()
                .map(|balance| BalanceResponse {
                    participant: balance.participant.into_inner(),
                    balance: balance.balance.to_string(),
                })
                .collect();
            (StatusCode::OK, Json(BalancesResponse { balances })).into_response()
        }
        Err(error) => {
            error!(error = %error, "Failed to load shared expenses");
            internal_error()
        }
    }
}

/// GET `/shared-expenses/balances/{participant}` - One participant's net
/// balance. A participant on no expense balances at zero.
async fn get_balance_for(
    State(state): State<AppState>,
    Path(participant): Path<Uuid>,
) -> impl IntoResponse {
    let repo = SharedExpenseRepository::new((*state.db).clone());
    let participant = ParticipantId::from_uuid(participant);

    match repo.fetch_all().await {
        Ok(expenses) => {
            let balance = SettlementService::balance_for(participant, &expenses);
            (
                StatusCode::OK,
                Json(BalanceResponse {
                    participant: participant.into_inner(),
                    balance: balance.to_string(),
                }),
            )
                .into_response()
        }
        Err(error) => {
            error!(error = %error, "Failed to load shared expenses");
            internal_error()
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn expense_response(expense: SharedExpense) -> SharedExpenseResponse {
    SharedExpenseResponse {
        id: expense.id.into_inner(),
        description: expense.description,
        total_amount: expense.total_amount.to_string(),
        payer: expense.payer.into_inner(),
        participants: expense
            .participants
            .into_iter()
            .map(|share| ShareResponse {
                participant: share.participant.into_inner(),
                amount: share.amount.to_string(),
            })
            .collect(),
        created_at: expense.created_at.to_rfc3339(),
        updated_at: expense.updated_at.to_rfc3339(),
    }
}
