//! Block-rule repository for spending-limit database operations.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use centavo_core::spend_limit::{BlockRule, BlockRuleDraft};
use centavo_shared::types::{BlockRuleId, PageRequest, Period};

use crate::entities::block_rules;

/// Error types for block-rule operations.
#[derive(Debug, thiserror::Error)]
pub enum BlockRuleError {
    /// Rule not found.
    #[error("Block rule not found: {0}")]
    NotFound(BlockRuleId),

    /// Stored period token could not be parsed.
    #[error("Stored rule period is malformed: {0}")]
    MalformedPeriod(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Block-rule repository for CRUD and enforcement lookups.
#[derive(Debug, Clone)]
pub struct BlockRuleRepository {
    db: DatabaseConnection,
}

impl BlockRuleRepository {
    /// Creates a new block-rule repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a validated draft as a new rule.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create(&self, draft: BlockRuleDraft) -> Result<BlockRule, BlockRuleError> {
        let now = Utc::now().into();

        let model = block_rules::ActiveModel {
            id: Set(BlockRuleId::new().into_inner()),
            scope: Set(draft.scope.into()),
            target: Set(draft.target),
            limit_amount: Set(draft.limit_amount),
            period: Set(draft.period.to_string()),
            active: Set(draft.active),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        to_rule(model)
    }

    /// Fetches one rule by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no rule has the given ID.
    pub async fn find(&self, id: BlockRuleId) -> Result<BlockRule, BlockRuleError> {
        let model = block_rules::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(BlockRuleError::NotFound(id))?;

        to_rule(model)
    }

    /// Replaces a rule's fields with a validated draft.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no rule has the given ID.
    pub async fn update(
        &self,
        id: BlockRuleId,
        draft: BlockRuleDraft,
    ) -> Result<BlockRule, BlockRuleError> {
        let existing = block_rules::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(BlockRuleError::NotFound(id))?;

        let mut active: block_rules::ActiveModel = existing.into();
        active.scope = Set(draft.scope.into());
        active.target = Set(draft.target);
        active.limit_amount = Set(draft.limit_amount);
        active.period = Set(draft.period.to_string());
        active.active = Set(draft.active);
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;
        to_rule(updated)
    }

    /// Deactivates a rule, keeping the row for history.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no rule has the given ID.
    pub async fn deactivate(&self, id: BlockRuleId) -> Result<BlockRule, BlockRuleError> {
        let existing = block_rules::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(BlockRuleError::NotFound(id))?;

        let mut active: block_rules::ActiveModel = existing.into();
        active.active = Set(false);
        active.updated_at = Set(Utc::now().into());

        let updated = active.update(&self.db).await?;
        to_rule(updated)
    }

    /// Lists rules with pagination, optionally restricted to one active state.
    ///
    /// Returns the page of rules and the total match count.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(
        &self,
        active: Option<bool>,
        page: &PageRequest,
    ) -> Result<(Vec<BlockRule>, u64), BlockRuleError> {
        let mut query = block_rules::Entity::find();
        if let Some(active) = active {
            query = query.filter(block_rules::Column::Active.eq(active));
        }

        let total = query.clone().count(&self.db).await?;

        let models = query
            .order_by_desc(block_rules::Column::Period)
            .order_by_desc(block_rules::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        let rules = models
            .into_iter()
            .map(to_rule)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((rules, total))
    }

    /// Active rules whose period is the given month, in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find_active_for(&self, period: Period) -> Result<Vec<BlockRule>, BlockRuleError> {
        let models = block_rules::Entity::find()
            .filter(block_rules::Column::Period.eq(period.to_string()))
            .filter(block_rules::Column::Active.eq(true))
            .order_by_asc(block_rules::Column::CreatedAt)
            .all(&self.db)
            .await?;

        models.into_iter().map(to_rule).collect()
    }
}

/// Maps a stored row to the domain rule.
fn to_rule(model: block_rules::Model) -> Result<BlockRule, BlockRuleError> {
    let period = model
        .period
        .trim()
        .parse::<Period>()
        .map_err(|_| BlockRuleError::MalformedPeriod(model.period.clone()))?;

    Ok(BlockRule {
        id: BlockRuleId::from_uuid(model.id),
        scope: model.scope.into(),
        target: model.target,
        limit_amount: model.limit_amount,
        period,
        active: model.active,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}

#[cfg(test)]
#[path = "block_rule_tests.rs"]
mod block_rule_tests;
