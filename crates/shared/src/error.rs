//! Application-wide error types.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// `Validation` and `LimitExceeded` are expected outcomes of normal use and
/// are reported to the caller without being logged as system errors.
#[derive(Debug, Error)]
pub enum AppError {
    /// Input failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A spending limit blocked the write.
    #[error(
        "Spending limit exceeded for {scope} '{target}' in {period}: \
         {attempted} over limit {limit_amount}"
    )]
    LimitExceeded {
        /// The rule that blocked the write.
        rule_id: Uuid,
        /// Rule scope (`category` or `account`).
        scope: String,
        /// The category or account key the rule guards.
        target: String,
        /// The calendar month the rule applies to.
        period: String,
        /// The configured limit.
        limit_amount: Decimal,
        /// Prior spending plus the attempted amount.
        attempted: Decimal,
    },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Conflict (e.g., duplicate entry).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Storage layer failure.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::LimitExceeded { .. } => 403,
            Self::NotFound(_) => 404,
            Self::Conflict(_) => 409,
            Self::Persistence(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::LimitExceeded { .. } => "LIMIT_EXCEEDED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Persistence(_) => "PERSISTENCE_ERROR",
        }
    }

    /// Returns true for outcomes that are part of normal operation and
    /// should not be logged as system errors.
    #[must_use]
    pub const fn is_expected(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::LimitExceeded { .. })
    }
}
