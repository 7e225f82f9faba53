//! PostgreSQL implementation of the core store capability.
//!
//! Atomic operations (batched inserts, batched due-date updates, the
//! reconciliation match) run inside a database transaction; a mid-way
//! failure rolls everything back.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    DbErr, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, TransactionTrait,
};

use fluxo_core::ledger::types::{
    BankItemStatus, BankStatementItem, Category, CategoryKind, PaymentStatus, TransactionKind,
    TransactionRecord,
};
use fluxo_core::store::{
    LedgerStore, NewTransaction, StoreError, TransactionFilter, TransactionPatch,
};
use fluxo_shared::types::{
    BankItemId, CategoryId, CustomerId, SupplierId, TenantId, TransactionId,
};

use crate::entities::{bank_statement_items, categories, sea_orm_active_enums, transactions};

/// `SeaORM`-backed [`LedgerStore`].
#[derive(Debug, Clone)]
pub struct SeaOrmLedgerStore {
    db: DatabaseConnection,
}

impl SeaOrmLedgerStore {
    /// Creates a new store over an established connection.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_transaction_model(
        &self,
        tenant_id: TenantId,
        id: TransactionId,
    ) -> Result<Option<transactions::Model>, StoreError> {
        transactions::Entity::find_by_id(id.into_inner())
            .filter(transactions::Column::TenantId.eq(tenant_id.into_inner()))
            .one(&self.db)
            .await
            .map_err(map_db_err)
    }
}

fn map_db_err(err: DbErr) -> StoreError {
    StoreError::Backend(err.to_string())
}

// ============================================================
// Enum and model mapping
// ============================================================

fn kind_to_db(kind: TransactionKind) -> sea_orm_active_enums::TransactionKind {
    match kind {
        TransactionKind::Sale => sea_orm_active_enums::TransactionKind::Sale,
        TransactionKind::Purchase => sea_orm_active_enums::TransactionKind::Purchase,
        TransactionKind::Refund => sea_orm_active_enums::TransactionKind::Refund,
        TransactionKind::Adjustment => sea_orm_active_enums::TransactionKind::Adjustment,
        TransactionKind::Payment => sea_orm_active_enums::TransactionKind::Payment,
    }
}

fn kind_from_db(kind: sea_orm_active_enums::TransactionKind) -> TransactionKind {
    match kind {
        sea_orm_active_enums::TransactionKind::Sale => TransactionKind::Sale,
        sea_orm_active_enums::TransactionKind::Purchase => TransactionKind::Purchase,
        sea_orm_active_enums::TransactionKind::Refund => TransactionKind::Refund,
        sea_orm_active_enums::TransactionKind::Adjustment => TransactionKind::Adjustment,
        sea_orm_active_enums::TransactionKind::Payment => TransactionKind::Payment,
    }
}

fn status_to_db(status: PaymentStatus) -> sea_orm_active_enums::PaymentStatus {
    match status {
        PaymentStatus::Pending => sea_orm_active_enums::PaymentStatus::Pending,
        PaymentStatus::Partial => sea_orm_active_enums::PaymentStatus::Partial,
        PaymentStatus::Paid => sea_orm_active_enums::PaymentStatus::Paid,
        PaymentStatus::Cancelled => sea_orm_active_enums::PaymentStatus::Cancelled,
    }
}

fn status_from_db(status: sea_orm_active_enums::PaymentStatus) -> PaymentStatus {
    match status {
        sea_orm_active_enums::PaymentStatus::Pending => PaymentStatus::Pending,
        sea_orm_active_enums::PaymentStatus::Partial => PaymentStatus::Partial,
        sea_orm_active_enums::PaymentStatus::Paid => PaymentStatus::Paid,
        sea_orm_active_enums::PaymentStatus::Cancelled => PaymentStatus::Cancelled,
    }
}

fn bank_status_from_db(status: sea_orm_active_enums::BankItemStatus) -> BankItemStatus {
    match status {
        sea_orm_active_enums::BankItemStatus::Pending => BankItemStatus::Pending,
        sea_orm_active_enums::BankItemStatus::Reconciled => BankItemStatus::Reconciled,
    }
}

fn category_kind_from_db(kind: sea_orm_active_enums::CategoryKind) -> CategoryKind {
    match kind {
        sea_orm_active_enums::CategoryKind::Income => CategoryKind::Income,
        sea_orm_active_enums::CategoryKind::Expense => CategoryKind::Expense,
    }
}

fn record_from_model(model: transactions::Model) -> TransactionRecord {
    TransactionRecord {
        id: TransactionId::from_uuid(model.id),
        tenant_id: TenantId::from_uuid(model.tenant_id),
        customer_id: model.customer_id.map(CustomerId::from_uuid),
        supplier_id: model.supplier_id.map(SupplierId::from_uuid),
        kind: kind_from_db(model.kind),
        amount: model.amount,
        interest: model.interest,
        paid_amount: model.paid_amount,
        description: model.description,
        category: model.category,
        category_id: model.category_id.map(CategoryId::from_uuid),
        due_date: model.due_date,
        payment_date: model.payment_date,
        payment_method: model.payment_method,
        status: status_from_db(model.status),
        installment_group: model.installment_group,
        installment_index: model.installment_index.and_then(|v| u32::try_from(v).ok()),
        installment_count: model.installment_count.and_then(|v| u32::try_from(v).ok()),
        reconciled: model.reconciled,
        card_fee: model.card_fee,
        original_amount: model.original_amount,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

fn bank_item_from_model(model: bank_statement_items::Model) -> BankStatementItem {
    BankStatementItem {
        id: BankItemId::from_uuid(model.id),
        tenant_id: TenantId::from_uuid(model.tenant_id),
        date: model.date,
        amount: model.amount,
        description: model.description,
        status: bank_status_from_db(model.status),
        transaction_id: model.transaction_id.map(TransactionId::from_uuid),
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

fn category_from_model(model: categories::Model) -> Category {
    Category {
        id: CategoryId::from_uuid(model.id),
        tenant_id: TenantId::from_uuid(model.tenant_id),
        name: model.name,
        kind: category_kind_from_db(model.kind),
    }
}

fn active_from_new(tenant_id: TenantId, row: NewTransaction) -> transactions::ActiveModel {
    let now = Utc::now();
    transactions::ActiveModel {
        id: Set(row.id.into_inner()),
        tenant_id: Set(tenant_id.into_inner()),
        customer_id: Set(row.customer_id.map(CustomerId::into_inner)),
        supplier_id: Set(row.supplier_id.map(SupplierId::into_inner)),
        kind: Set(kind_to_db(row.kind)),
        amount: Set(row.amount),
        interest: Set(rust_decimal::Decimal::ZERO),
        paid_amount: Set(None),
        description: Set(row.description),
        category: Set(row.category),
        category_id: Set(row.category_id.map(CategoryId::into_inner)),
        due_date: Set(row.due_date),
        payment_date: Set(None),
        payment_method: Set(row.payment_method),
        status: Set(sea_orm_active_enums::PaymentStatus::Pending),
        installment_group: Set(row.installment_group),
        installment_index: Set(row.installment_index.and_then(|v| i32::try_from(v).ok())),
        installment_count: Set(row.installment_count.and_then(|v| i32::try_from(v).ok())),
        reconciled: Set(false),
        card_fee: Set(None),
        original_amount: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
}

fn apply_patch(active: &mut transactions::ActiveModel, patch: TransactionPatch) {
    if let Some(status) = patch.status {
        active.status = Set(status_to_db(status));
    }
    if let Some(amount) = patch.amount {
        active.amount = Set(amount);
    }
    if let Some(interest) = patch.interest {
        active.interest = Set(interest);
    }
    if let Some(paid_amount) = patch.paid_amount {
        active.paid_amount = Set(paid_amount);
    }
    if let Some(payment_date) = patch.payment_date {
        active.payment_date = Set(payment_date);
    }
    if let Some(payment_method) = patch.payment_method {
        active.payment_method = Set(payment_method);
    }
    if let Some(card_fee) = patch.card_fee {
        active.card_fee = Set(card_fee);
    }
    if let Some(due_date) = patch.due_date {
        active.due_date = Set(Some(due_date));
    }
    if let Some(original_amount) = patch.original_amount {
        active.original_amount = Set(Some(original_amount));
    }
    if let Some(reconciled) = patch.reconciled {
        active.reconciled = Set(reconciled);
    }
    active.updated_at = Set(Utc::now().into());
}

async fn find_in_txn(
    txn: &DatabaseTransaction,
    tenant_id: TenantId,
    id: TransactionId,
) -> Result<transactions::Model, StoreError> {
    transactions::Entity::find_by_id(id.into_inner())
        .filter(transactions::Column::TenantId.eq(tenant_id.into_inner()))
        .one(txn)
        .await
        .map_err(map_db_err)?
        .ok_or(StoreError::RowNotFound)
}

#[async_trait]
impl LedgerStore for SeaOrmLedgerStore {
    async fn list_transactions(
        &self,
        tenant_id: TenantId,
        filter: &TransactionFilter,
    ) -> Result<Vec<TransactionRecord>, StoreError> {
        let mut query = transactions::Entity::find()
            .filter(transactions::Column::TenantId.eq(tenant_id.into_inner()));

        if let Some(kind) = filter.kind {
            query = query.filter(transactions::Column::Kind.eq(kind_to_db(kind)));
        }
        if let Some(status) = filter.status {
            query = query.filter(transactions::Column::Status.eq(status_to_db(status)));
        }
        if let Some(customer_id) = filter.customer_id {
            query =
                query.filter(transactions::Column::CustomerId.eq(customer_id.into_inner()));
        }
        if let Some(supplier_id) = filter.supplier_id {
            query =
                query.filter(transactions::Column::SupplierId.eq(supplier_id.into_inner()));
        }
        if let Some(group) = &filter.installment_group {
            query = query.filter(transactions::Column::InstallmentGroup.eq(group.as_str()));
        }
        if let Some(from) = filter.due_from {
            query = query.filter(transactions::Column::DueDate.gte(from));
        }
        if let Some(to) = filter.due_to {
            query = query.filter(transactions::Column::DueDate.lte(to));
        }

        let models = query
            .order_by_asc(transactions::Column::CreatedAt)
            .order_by_asc(transactions::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(models.into_iter().map(record_from_model).collect())
    }

    async fn find_transaction(
        &self,
        tenant_id: TenantId,
        id: TransactionId,
    ) -> Result<Option<TransactionRecord>, StoreError> {
        Ok(self
            .find_transaction_model(tenant_id, id)
            .await?
            .map(record_from_model))
    }

    async fn insert_transactions(
        &self,
        tenant_id: TenantId,
        rows: Vec<NewTransaction>,
    ) -> Result<Vec<TransactionRecord>, StoreError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let mut inserted = Vec::with_capacity(rows.len());
        for row in rows {
            let model = active_from_new(tenant_id, row)
                .insert(&txn)
                .await
                .map_err(map_db_err)?;
            inserted.push(record_from_model(model));
        }

        txn.commit().await.map_err(map_db_err)?;
        tracing::debug!(tenant = %tenant_id, rows = inserted.len(), "inserted ledger rows");
        Ok(inserted)
    }

    async fn update_transaction(
        &self,
        tenant_id: TenantId,
        id: TransactionId,
        patch: TransactionPatch,
    ) -> Result<TransactionRecord, StoreError> {
        let model = self
            .find_transaction_model(tenant_id, id)
            .await?
            .ok_or(StoreError::RowNotFound)?;

        let mut active = model.into_active_model();
        apply_patch(&mut active, patch);

        let updated = active.update(&self.db).await.map_err(map_db_err)?;
        Ok(record_from_model(updated))
    }

    async fn delete_transaction(
        &self,
        tenant_id: TenantId,
        id: TransactionId,
    ) -> Result<(), StoreError> {
        let result = transactions::Entity::delete_many()
            .filter(transactions::Column::Id.eq(id.into_inner()))
            .filter(transactions::Column::TenantId.eq(tenant_id.into_inner()))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(StoreError::RowNotFound);
        }
        Ok(())
    }

    async fn update_due_dates(
        &self,
        tenant_id: TenantId,
        changes: Vec<(TransactionId, NaiveDate)>,
    ) -> Result<(), StoreError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        for (id, due_date) in changes {
            // A missing row aborts the transaction; nothing is kept.
            let model = find_in_txn(&txn, tenant_id, id).await?;
            let mut active = model.into_active_model();
            active.due_date = Set(Some(due_date));
            active.updated_at = Set(Utc::now().into());
            active.update(&txn).await.map_err(map_db_err)?;
        }

        txn.commit().await.map_err(map_db_err)?;
        Ok(())
    }

    async fn list_categories(&self, tenant_id: TenantId) -> Result<Vec<Category>, StoreError> {
        let models = categories::Entity::find()
            .filter(categories::Column::TenantId.eq(tenant_id.into_inner()))
            .order_by_asc(categories::Column::Name)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(models.into_iter().map(category_from_model).collect())
    }

    async fn list_bank_items(
        &self,
        tenant_id: TenantId,
    ) -> Result<Vec<BankStatementItem>, StoreError> {
        let models = bank_statement_items::Entity::find()
            .filter(bank_statement_items::Column::TenantId.eq(tenant_id.into_inner()))
            .order_by_asc(bank_statement_items::Column::Date)
            .order_by_asc(bank_statement_items::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(models.into_iter().map(bank_item_from_model).collect())
    }

    async fn find_bank_item(
        &self,
        tenant_id: TenantId,
        id: BankItemId,
    ) -> Result<Option<BankStatementItem>, StoreError> {
        let model = bank_statement_items::Entity::find_by_id(id.into_inner())
            .filter(bank_statement_items::Column::TenantId.eq(tenant_id.into_inner()))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(model.map(bank_item_from_model))
    }

    async fn apply_match(
        &self,
        tenant_id: TenantId,
        bank_item_id: BankItemId,
        transaction_id: TransactionId,
    ) -> Result<BankStatementItem, StoreError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;
        let now = Utc::now();

        let item = bank_statement_items::Entity::find_by_id(bank_item_id.into_inner())
            .filter(bank_statement_items::Column::TenantId.eq(tenant_id.into_inner()))
            .one(&txn)
            .await
            .map_err(map_db_err)?
            .ok_or(StoreError::RowNotFound)?;
        let record = find_in_txn(&txn, tenant_id, transaction_id).await?;

        let mut item_active = item.into_active_model();
        item_active.status = Set(sea_orm_active_enums::BankItemStatus::Reconciled);
        item_active.transaction_id = Set(Some(transaction_id.into_inner()));
        item_active.updated_at = Set(now.into());
        let updated_item = item_active.update(&txn).await.map_err(map_db_err)?;

        let mut record_active = record.into_active_model();
        record_active.reconciled = Set(true);
        record_active.updated_at = Set(now.into());
        record_active.update(&txn).await.map_err(map_db_err)?;

        txn.commit().await.map_err(map_db_err)?;
        tracing::debug!(
            tenant = %tenant_id,
            bank_item = %bank_item_id,
            transaction = %transaction_id,
            "reconciled bank item"
        );
        Ok(bank_item_from_model(updated_item))
    }

    async fn clear_bank_items(&self, tenant_id: TenantId) -> Result<u64, StoreError> {
        let result = bank_statement_items::Entity::delete_many()
            .filter(bank_statement_items::Column::TenantId.eq(tenant_id.into_inner()))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(tenant = %tenant_id, removed = result.rows_affected, "cleared bank items");
        Ok(result.rows_affected)
    }
}
