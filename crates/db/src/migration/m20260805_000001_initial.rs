//! Initial database migration.
//!
//! Creates the ledger enums, tables, indexes, and the updated_at trigger.

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
        // PART 2: TABLES
        // ============================================================
        db.execute_unprepared(CATEGORIES_SQL).await?;
        db.execute_unprepared(TRANSACTIONS_SQL).await?;
        db.execute_unprepared(BANK_STATEMENT_ITEMS_SQL).await?;

        // ============================================================
        // PART 3: TRIGGERS & FUNCTIONS
        // ============================================================
        db.execute_unprepared(TRIGGERS_SQL).await?;

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
-- Transaction kinds
CREATE TYPE transaction_kind AS ENUM (
    'sale',
    'purchase',
    'refund',
    'adjustment',
    'payment'
);

-- Payment status
CREATE TYPE payment_status AS ENUM (
    'pending',
    'partial',
    'paid',
    'cancelled'
);

-- Bank statement item status
CREATE TYPE bank_item_status AS ENUM ('pending', 'reconciled');

-- Category kinds
CREATE TYPE category_kind AS ENUM ('income', 'expense');
";

const CATEGORIES_SQL: &str = r"
CREATE TABLE categories (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL,
    name VARCHAR(255) NOT NULL,
    kind category_kind NOT NULL,
    UNIQUE (tenant_id, name)
);

CREATE INDEX idx_categories_tenant ON categories(tenant_id);
";

const TRANSACTIONS_SQL: &str = r"
CREATE TABLE transactions (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL,
    customer_id UUID,
    supplier_id UUID,
    kind transaction_kind NOT NULL,
    amount DECIMAL(14, 2) NOT NULL,
    interest DECIMAL(14, 2) NOT NULL DEFAULT 0,
    paid_amount DECIMAL(14, 2),
    description TEXT NOT NULL,
    category VARCHAR(255),
    category_id UUID REFERENCES categories(id),
    due_date DATE,
    payment_date DATE,
    payment_method VARCHAR(64),
    status payment_status NOT NULL DEFAULT 'pending',
    installment_group VARCHAR(255),
    installment_index INTEGER,
    installment_count INTEGER,
    reconciled BOOLEAN NOT NULL DEFAULT FALSE,
    card_fee DECIMAL(14, 2),
    original_amount DECIMAL(14, 2),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT chk_positive_amount CHECK (amount >= 0),
    CONSTRAINT chk_installment_index CHECK (
        installment_index IS NULL OR installment_index >= 1
    )
);

CREATE INDEX idx_transactions_tenant ON transactions(tenant_id);
CREATE INDEX idx_transactions_tenant_kind ON transactions(tenant_id, kind);
CREATE INDEX idx_transactions_tenant_group
    ON transactions(tenant_id, installment_group)
    WHERE installment_group IS NOT NULL;
CREATE INDEX idx_transactions_tenant_due ON transactions(tenant_id, due_date);
";

const BANK_STATEMENT_ITEMS_SQL: &str = r"
CREATE TABLE bank_statement_items (
    id UUID PRIMARY KEY,
    tenant_id UUID NOT NULL,
    date DATE NOT NULL,
    amount DECIMAL(14, 2) NOT NULL,
    description TEXT NOT NULL,
    status bank_item_status NOT NULL DEFAULT 'pending',
    transaction_id UUID REFERENCES transactions(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_bank_items_tenant ON bank_statement_items(tenant_id);
CREATE INDEX idx_bank_items_tenant_status
    ON bank_statement_items(tenant_id, status);
";

const TRIGGERS_SQL: &str = r"
CREATE OR REPLACE FUNCTION set_updated_at()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = NOW();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_transactions_updated_at
    BEFORE UPDATE ON transactions
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER trg_bank_items_updated_at
    BEFORE UPDATE ON bank_statement_items
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS bank_statement_items;
DROP TABLE IF EXISTS transactions;
DROP TABLE IF EXISTS categories;
DROP FUNCTION IF EXISTS set_updated_at;
DROP TYPE IF EXISTS category_kind;
DROP TYPE IF EXISTS bank_item_status;
DROP TYPE IF EXISTS payment_status;
DROP TYPE IF EXISTS transaction_kind;
";
