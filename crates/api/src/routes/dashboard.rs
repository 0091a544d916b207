//! Dashboard routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use crate::AppState;
use centavo_core::aggregation::{AggregationService, CategorySlice, EntryStat, Summary, TrendPoint};
use centavo_core::ledger::Entry;
use centavo_db::repositories::dashboard::DashboardRepository;
use centavo_shared::types::Period;

/// Upper bound on the trend window length.
const MAX_TREND_MONTHS: u32 = 36;

/// Creates the dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(get_dashboard))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for the dashboard.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Number of months in the trend window (default from config, 1..=36).
    pub months: Option<u32>,
    /// Reference date for the trend and month block. Defaults to today.
    pub reference: Option<NaiveDate>,
}

/// Full dashboard payload.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    /// All-time totals.
    pub summary: SummaryResponse,
    /// Totals for the reference month.
    pub month: MonthResponse,
    /// Monthly trend, chronologically ascending.
    pub trend: Vec<TrendPointResponse>,
    /// Expense breakdown by category, largest first.
    pub breakdown: Vec<BreakdownSliceResponse>,
    /// Most recently occurring entries.
    pub recent: Vec<RecentEntryResponse>,
}

/// Income/expense totals.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    /// Sum of income entries.
    pub income_total: String,
    /// Sum of expense entries.
    pub expense_total: String,
    /// Income minus expense.
    pub balance: String,
}

/// Totals for one named month.
#[derive(Debug, Serialize)]
pub struct MonthResponse {
    /// The month (YYYY-MM).
    pub period: String,
    /// Income recorded in the month.
    pub income: String,
    /// Expense recorded in the month.
    pub expense: String,
    /// Income minus expense.
    pub balance: String,
}

/// One month of the trend window.
#[derive(Debug, Serialize)]
pub struct TrendPointResponse {
    /// The month (YYYY-MM).
    pub period: String,
    /// Income recorded in the month.
    pub income: String,
    /// Expense recorded in the month.
    pub expense: String,
    /// Income minus expense.
    pub balance: String,
}

/// One category's share of expense spending.
#[derive(Debug, Serialize)]
pub struct BreakdownSliceResponse {
    /// Category key.
    pub category: String,
    /// Total expense amount in the category.
    pub amount: String,
    /// Number of expense entries in the category.
    pub entry_count: u64,
    /// Share of the expense total, rounded to whole percent.
    pub percent_of_total: u32,
    /// Display color from the configured palette.
    pub color: String,
}

/// A recent entry, slimmed down for the dashboard.
#[derive(Debug, Serialize)]
pub struct RecentEntryResponse {
    /// Entry ID.
    pub id: Uuid,
    /// Description.
    pub description: String,
    /// Amount.
    pub amount: String,
    /// Occurrence date (YYYY-MM-DD).
    pub occurred_on: String,
    /// Entry kind.
    pub kind: String,
    /// Category key.
    pub category: String,
    /// Account key.
    pub account: String,
    /// Created at timestamp.
    pub created_at: String,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/dashboard` - Summary, month block, trend, breakdown, and recents.
///
/// On a storage failure this degrades to an all-zero payload with HTTP 200
/// instead of erroring, so the dashboard always renders.
async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> impl IntoResponse {
    let months = query
        .months
        .unwrap_or(state.dashboard.trend_months)
        .clamp(1, MAX_TREND_MONTHS);
    let reference = query.reference.unwrap_or_else(|| Utc::now().date_naive());
    let period = Period::of(reference);

    let repo = DashboardRepository::new((*state.db).clone());

    let rows = match repo.fetch_stats().await {
        Ok(rows) => rows,
        Err(err) => {
            error!(error = %err, "Failed to load dashboard stats");
            return (StatusCode::OK, Json(empty_dashboard(period))).into_response();
        }
    };
    let recent = match repo.recent_entries(state.dashboard.recent_limit).await {
        Ok(recent) => recent,
        Err(err) => {
            error!(error = %err, "Failed to load recent entries");
            return (StatusCode::OK, Json(empty_dashboard(period))).into_response();
        }
    };

    let summary = AggregationService::summarize(&rows);
    let month_rows: Vec<EntryStat> = rows
        .iter()
        .filter(|row| period.contains(row.occurred_on))
        .cloned()
        .collect();
    let month = AggregationService::summarize(&month_rows);
    let trend = AggregationService::monthly_trend(&rows, reference, months);
    let breakdown = AggregationService::category_breakdown(&rows);

    let response = DashboardResponse {
        summary: summary_response(&summary),
        month: month_response(period, &month),
        trend: trend.iter().map(trend_response).collect(),
        breakdown: breakdown
            .into_iter()
            .map(|slice| breakdown_response(slice, &state))
            .collect(),
        recent: recent.into_iter().map(recent_response).collect(),
    };

    (StatusCode::OK, Json(response)).into_response()
}

// ============================================================================
// Helper Functions
// ============================================================================

/// The all-zero payload served when storage is unavailable.
fn empty_dashboard(period: Period) -> DashboardResponse {
    DashboardResponse {
        summary: summary_response(&Summary::default()),
        month: month_response(period, &Summary::default()),
        trend: Vec::new(),
        breakdown: Vec::new(),
        recent: Vec::new(),
    }
}

fn summary_response(summary: &Summary) -> SummaryResponse {
    SummaryResponse {
        income_total: summary.income_total.to_string(),
        expense_total: summary.expense_total.to_string(),
        balance: summary.balance.to_string(),
    }
}

fn month_response(period: Period, summary: &Summary) -> MonthResponse {
    MonthResponse {
        period: period.to_string(),
        income: summary.income_total.to_string(),
        expense: summary.expense_total.to_string(),
        balance: summary.balance.to_string(),
    }
}

fn trend_response(point: &TrendPoint) -> TrendPointResponse {
    TrendPointResponse {
        period: point.period.to_string(),
        income: point.income.to_string(),
        expense: point.expense.to_string(),
        balance: point.balance.to_string(),
    }
}

fn breakdown_response(slice: CategorySlice, state: &AppState) -> BreakdownSliceResponse {
    let color = state.categories.color_for(&slice.category).to_string();
    BreakdownSliceResponse {
        category: slice.category,
        amount: slice.amount.to_string(),
        entry_count: slice.entry_count,
        percent_of_total: slice.percent_of_total,
        color,
    }
}

fn recent_response(entry: Entry) -> RecentEntryResponse {
    RecentEntryResponse {
        id: entry.id.into_inner(),
        description: entry.description,
        amount: entry.amount.to_string(),
        occurred_on: entry.occurred_on.to_string(),
        kind: entry.kind.as_str().to_string(),
        category: entry.category,
        account: entry.account,
        created_at: entry.created_at.to_rfc3339(),
    }
}
