//! Initial database migration.
//!
//! Creates the enums, tables, and indexes for the ledger, block rules,
//! audit log, and shared expenses.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: LEDGER
        // ============================================================
        db.execute_unprepared(ENTRIES_SQL).await?;

        // ============================================================
        // PART 3: SPENDING LIMITS
        // ============================================================
        db.execute_unprepared(BLOCK_RULES_SQL).await?;

        // ============================================================
        // PART 4: AUDIT TRAIL
        // ============================================================
        db.execute_unprepared(AUDIT_LOGS_SQL).await?;

        // ============================================================
        // PART 5: SHARED EXPENSES
        // ============================================================
        db.execute_unprepared(SHARED_EXPENSES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Entry kinds
CREATE TYPE entry_kind AS ENUM ('income', 'expense', 'transfer');

-- Block rule scope
CREATE TYPE rule_scope AS ENUM ('category', 'account');

-- Audit actions
CREATE TYPE audit_action AS ENUM ('create', 'update', 'delete');
";

const ENTRIES_SQL: &str = r"
CREATE TABLE entries (
    id UUID PRIMARY KEY,
    description VARCHAR(255) NOT NULL,
    amount NUMERIC(15, 2) NOT NULL CHECK (amount > 0),
    occurred_on DATE NOT NULL,
    kind entry_kind NOT NULL,
    category VARCHAR(100) NOT NULL,
    account VARCHAR(100) NOT NULL,
    extra JSONB,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_entries_occurred_on ON entries(occurred_on);
CREATE INDEX idx_entries_category_occurred ON entries(category, occurred_on);
CREATE INDEX idx_entries_account_occurred ON entries(account, occurred_on);
CREATE INDEX idx_entries_kind ON entries(kind);
";

const BLOCK_RULES_SQL: &str = r"
CREATE TABLE block_rules (
    id UUID PRIMARY KEY,
    scope rule_scope NOT NULL,
    target VARCHAR(100) NOT NULL,
    limit_amount NUMERIC(15, 2) NOT NULL CHECK (limit_amount >= 0),
    period CHAR(7) NOT NULL CHECK (period ~ '^[0-9]{4}-[0-9]{2}$'),
    active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_block_rules_period_active ON block_rules(period, active);
CREATE INDEX idx_block_rules_target ON block_rules(scope, target);
";

const AUDIT_LOGS_SQL: &str = r"
CREATE TABLE audit_logs (
    id UUID PRIMARY KEY,
    actor UUID NOT NULL,
    action audit_action NOT NULL,
    entity VARCHAR(50) NOT NULL,
    entity_id UUID NOT NULL,
    before JSONB,
    after JSONB,
    recorded_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_audit_logs_recorded_at ON audit_logs(recorded_at DESC);
CREATE INDEX idx_audit_logs_actor ON audit_logs(actor);
CREATE INDEX idx_audit_logs_entity ON audit_logs(entity, entity_id);
";

const SHARED_EXPENSES_SQL: &str = r"
CREATE TABLE shared_expenses (
    id UUID PRIMARY KEY,
    description VARCHAR(255) NOT NULL,
    total_amount NUMERIC(15, 2) NOT NULL CHECK (total_amount > 0),
    payer UUID NOT NULL,
    participants JSONB NOT NULL DEFAULT '[]',
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_shared_expenses_payer ON shared_expenses(payer);
";

const DROP_ALL_SQL: &str = r"
-- Drop tables
DROP TABLE IF EXISTS shared_expenses CASCADE;
DROP TABLE IF EXISTS audit_logs CASCADE;
DROP TABLE IF EXISTS block_rules CASCADE;
DROP TABLE IF EXISTS entries CASCADE;

-- Drop enums
DROP TYPE IF EXISTS audit_action;
DROP TYPE IF EXISTS rule_scope;
DROP TYPE IF EXISTS entry_kind;
";
