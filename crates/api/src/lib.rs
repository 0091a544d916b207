//! HTTP API layer with Axum routes and handlers.
//!
//! This crate provides:
//! - REST API routes for entries, rules, dashboard, and settlement
//! - Actor extraction from the gateway-forwarded header
//! - Per-scope write serialization for limit enforcement
//! - The default event publisher

pub mod events;
pub mod extractors;
pub mod locks;
pub mod routes;

use axum::Router;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use centavo_core::events::EventPublisher;
use centavo_shared::config::{CategoriesConfig, DashboardConfig};
use locks::ScopeLocks;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Event publisher notified after every successful entry mutation.
    pub publisher: Arc<dyn EventPublisher>,
    /// Keyed locks serializing the limit check-then-insert window.
    pub locks: ScopeLocks,
    /// Dashboard limits from configuration.
    pub dashboard: DashboardConfig,
    /// Category color palette from configuration.
    pub categories: Arc<CategoriesConfig>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::routes())
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
