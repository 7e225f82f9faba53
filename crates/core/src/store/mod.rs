//! Store capability consumed by the core services.
//!
//! The relational store is injected into each service at construction; no
//! component reaches for an ambient database handle. `fluxo-db` provides the
//! PostgreSQL implementation; [`memory::InMemoryStore`] backs unit tests.

pub mod memory;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use fluxo_shared::types::{
    BankItemId, CategoryId, CustomerId, SupplierId, TenantId, TransactionId,
};

use crate::ledger::types::{
    BankStatementItem, Category, PaymentStatus, TransactionKind, TransactionRecord,
};

/// Errors surfaced by store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The referenced row does not exist under the given tenant.
    #[error("Row not found")]
    RowNotFound,

    /// The backing store failed. Never retried by the core.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Filter options for listing a tenant's transactions.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Filter by transaction kind.
    pub kind: Option<TransactionKind>,
    /// Filter by payment status.
    pub status: Option<PaymentStatus>,
    /// Filter by customer reference.
    pub customer_id: Option<CustomerId>,
    /// Filter by supplier reference.
    pub supplier_id: Option<SupplierId>,
    /// Filter by installment group key.
    pub installment_group: Option<String>,
    /// Filter by due date range start (inclusive).
    pub due_from: Option<NaiveDate>,
    /// Filter by due date range end (inclusive).
    pub due_to: Option<NaiveDate>,
}

/// A new ledger row to insert.
///
/// Status starts at `Pending` with no payment fields; timestamps are
/// assigned by the store.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    /// Pre-assigned row identifier.
    pub id: TransactionId,
    /// Transaction kind.
    pub kind: TransactionKind,
    /// Monetary amount, two fraction digits.
    pub amount: Decimal,
    /// Description, including any installment suffix.
    pub description: String,
    /// Raw category label.
    pub category: Option<String>,
    /// Resolved category reference.
    pub category_id: Option<CategoryId>,
    /// Optional customer reference.
    pub customer_id: Option<CustomerId>,
    /// Optional supplier reference.
    pub supplier_id: Option<SupplierId>,
    /// Due date.
    pub due_date: Option<NaiveDate>,
    /// Intended payment method label.
    pub payment_method: Option<String>,
    /// Installment group key.
    pub installment_group: Option<String>,
    /// 1-based installment position.
    pub installment_index: Option<u32>,
    /// Total installment count.
    pub installment_count: Option<u32>,
}

/// Field patch for updating a transaction.
///
/// Outer `None` leaves the column unchanged; for nullable columns the inner
/// `None` clears the value.
#[derive(Debug, Clone, Default)]
pub struct TransactionPatch {
    /// New payment status.
    pub status: Option<PaymentStatus>,
    /// New amount.
    pub amount: Option<Decimal>,
    /// New accrued interest.
    pub interest: Option<Decimal>,
    /// New paid amount; inner `None` clears it.
    pub paid_amount: Option<Option<Decimal>>,
    /// New payment date; inner `None` clears it.
    pub payment_date: Option<Option<NaiveDate>>,
    /// New payment method; inner `None` clears it.
    pub payment_method: Option<Option<String>>,
    /// New derived card fee; inner `None` clears it.
    pub card_fee: Option<Option<Decimal>>,
    /// New due date.
    pub due_date: Option<NaiveDate>,
    /// Records the pre-edit amount. Written at most once.
    pub original_amount: Option<Decimal>,
    /// New reconciled flag.
    pub reconciled: Option<bool>,
}

/// Async store capability over the tenant-scoped ledger tables.
///
/// Every operation filters by tenant; implementations must never let a row
/// from one tenant reach another. Operations documented as atomic must use
/// the store's transactional facility so a mid-way failure leaves all
/// affected rows unchanged.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Lists a tenant's transactions matching the filter, in insertion order.
    async fn list_transactions(
        &self,
        tenant_id: TenantId,
        filter: &TransactionFilter,
    ) -> Result<Vec<TransactionRecord>, StoreError>;

    /// Finds one transaction under the tenant.
    async fn find_transaction(
        &self,
        tenant_id: TenantId,
        id: TransactionId,
    ) -> Result<Option<TransactionRecord>, StoreError>;

    /// Inserts a batch of rows atomically (one entry's installments).
    async fn insert_transactions(
        &self,
        tenant_id: TenantId,
        rows: Vec<NewTransaction>,
    ) -> Result<Vec<TransactionRecord>, StoreError>;

    /// Applies a field patch to one transaction and returns the updated row.
    async fn update_transaction(
        &self,
        tenant_id: TenantId,
        id: TransactionId,
        patch: TransactionPatch,
    ) -> Result<TransactionRecord, StoreError>;

    /// Deletes one transaction.
    async fn delete_transaction(
        &self,
        tenant_id: TenantId,
        id: TransactionId,
    ) -> Result<(), StoreError>;

    /// Updates due dates for a batch of transactions atomically.
    ///
    /// A missing row fails the whole batch with `RowNotFound`.
    async fn update_due_dates(
        &self,
        tenant_id: TenantId,
        changes: Vec<(TransactionId, NaiveDate)>,
    ) -> Result<(), StoreError>;

    /// Lists a tenant's categories.
    async fn list_categories(&self, tenant_id: TenantId) -> Result<Vec<Category>, StoreError>;

    /// Lists a tenant's bank statement items.
    async fn list_bank_items(
        &self,
        tenant_id: TenantId,
    ) -> Result<Vec<BankStatementItem>, StoreError>;

    /// Finds one bank statement item under the tenant.
    async fn find_bank_item(
        &self,
        tenant_id: TenantId,
        id: BankItemId,
    ) -> Result<Option<BankStatementItem>, StoreError>;

    /// Atomically marks the bank item reconciled (with the transaction link)
    /// and sets the transaction's reconciled flag.
    ///
    /// Both writes succeed or neither does; partial application would corrupt
    /// financial state.
    async fn apply_match(
        &self,
        tenant_id: TenantId,
        bank_item_id: BankItemId,
        transaction_id: TransactionId,
    ) -> Result<BankStatementItem, StoreError>;

    /// Deletes all of a tenant's bank statement items, returning the count.
    ///
    /// Does not revert transaction reconciled flags.
    async fn clear_bank_items(&self, tenant_id: TenantId) -> Result<u64, StoreError>;
}
