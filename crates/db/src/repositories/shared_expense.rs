//! Shared-expense repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryOrder,
    QuerySelect, Set,
};

use centavo_core::settlement::{SharedExpense, SharedExpenseDraft};
use centavo_shared::types::{PageRequest, ParticipantId, SharedExpenseId};

use crate::entities::shared_expenses;

/// Error types for shared-expense operations.
#[derive(Debug, thiserror::Error)]
pub enum SharedExpenseError {
    /// Expense not found.
    #[error("Shared expense not found: {0}")]
    NotFound(SharedExpenseId),

    /// Stored share list could not be decoded.
    #[error("Stored share list is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Shared-expense repository.
#[derive(Debug, Clone)]
pub struct SharedExpenseRepository {
    db: DatabaseConnection,
}

impl SharedExpenseRepository {
    /// Creates a new shared-expense repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a validated draft as a new shared expense.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create(
        &self,
        draft: SharedExpenseDraft,
    ) -> Result<SharedExpense, SharedExpenseError> {
        let now = Utc::now().into();

        let model = shared_expenses::ActiveModel {
            id: Set(SharedExpenseId::new().into_inner()),
            description: Set(draft.description),
            total_amount: Set(draft.total_amount),
            payer: Set(draft.payer.into_inner()),
            participants: Set(serde_json::to_value(&draft.participants)?),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        to_expense(model)
    }

    /// Fetches one shared expense by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no expense has the given ID.
    pub async fn find(&self, id: SharedExpenseId) -> Result<SharedExpense, SharedExpenseError> {
        let model = shared_expenses::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(SharedExpenseError::NotFound(id))?;

        to_expense(model)
    }

    /// Lists shared expenses newest first, with pagination.
    ///
    /// Returns the page of expenses and the total count.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(
        &self,
        page: &PageRequest,
    ) -> Result<(Vec<SharedExpense>, u64), SharedExpenseError> {
        let total = shared_expenses::Entity::find().count(&self.db).await?;

        let models = shared_expenses::Entity::find()
            .order_by_desc(shared_expenses::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        let expenses = models
            .into_iter()
            .map(to_expense)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((expenses, total))
    }

    /// Every shared expense, oldest first. Settlement works over the full
    /// history.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn fetch_all(&self) -> Result<Vec<SharedExpense>, SharedExpenseError> {
        let models = shared_expenses::Entity::find()
            .order_by_asc(shared_expenses::Column::CreatedAt)
            .all(&self.db)
            .await?;

        models.into_iter().map(to_expense).collect()
    }
}

/// Maps a stored row to the domain expense.
fn to_expense(model: shared_expenses::Model) -> Result<SharedExpense, SharedExpenseError> {
    let participants = serde_json::from_value(model.participants)?;

    Ok(SharedExpense {
        id: SharedExpenseId::from_uuid(model.id),
        description: model.description,
        total_amount: model.total_amount,
        payer: ParticipantId::from_uuid(model.payer),
        participants,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}

#[cfg(test)]
#[path = "shared_expense_tests.rs"]
mod shared_expense_tests;
