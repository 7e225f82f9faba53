//! In-memory store for unit tests and examples.
//!
//! Mutex-guarded per-tenant maps with the same atomicity contract as the
//! PostgreSQL store: batched inserts, batched due-date updates, and the
//! reconciliation match are applied all-or-nothing. A failure can be
//! injected between the two match writes to exercise rollback behavior.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};

use fluxo_shared::types::{BankItemId, TenantId, TransactionId};

use crate::ledger::types::{
    BankItemStatus, BankStatementItem, Category, PaymentStatus, TransactionRecord,
};

use super::{LedgerStore, NewTransaction, StoreError, TransactionFilter, TransactionPatch};

#[derive(Default)]
struct TenantState {
    transactions: Vec<TransactionRecord>,
    bank_items: Vec<BankStatementItem>,
    categories: Vec<Category>,
}

/// In-memory [`LedgerStore`] implementation.
#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<HashMap<TenantId, TenantState>>,
    fail_next_match: AtomicBool,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a transaction row directly, bypassing entry creation.
    pub fn seed_transaction(&self, record: TransactionRecord) {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        inner
            .entry(record.tenant_id)
            .or_default()
            .transactions
            .push(record);
    }

    /// Seeds a bank statement item, standing in for the external import.
    pub fn seed_bank_item(&self, item: BankStatementItem) {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        inner
            .entry(item.tenant_id)
            .or_default()
            .bank_items
            .push(item);
    }

    /// Seeds a category.
    pub fn seed_category(&self, category: Category) {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        inner
            .entry(category.tenant_id)
            .or_default()
            .categories
            .push(category);
    }

    /// Makes the next `apply_match` fail after its first staged write.
    ///
    /// Neither row becomes visible, mirroring a rolled-back transaction.
    pub fn inject_match_failure(&self) {
        self.fail_next_match.store(true, Ordering::SeqCst);
    }
}

fn matches_filter(record: &TransactionRecord, filter: &TransactionFilter) -> bool {
    if let Some(kind) = filter.kind {
        if record.kind != kind {
            return false;
        }
    }
    if let Some(status) = filter.status {
        if record.status != status {
            return false;
        }
    }
    if let Some(customer_id) = filter.customer_id {
        if record.customer_id != Some(customer_id) {
            return false;
        }
    }
    if let Some(supplier_id) = filter.supplier_id {
        if record.supplier_id != Some(supplier_id) {
            return false;
        }
    }
    if let Some(group) = &filter.installment_group {
        if record.installment_group.as_deref() != Some(group.as_str()) {
            return false;
        }
    }
    // Due ranges filter on the stored due date; rows without one are
    // excluded, matching the SQL implementation.
    if let Some(from) = filter.due_from {
        if !record.due_date.is_some_and(|date| date >= from) {
            return false;
        }
    }
    if let Some(to) = filter.due_to {
        if !record.due_date.is_some_and(|date| date <= to) {
            return false;
        }
    }
    true
}

fn apply_patch(record: &mut TransactionRecord, patch: TransactionPatch) {
    if let Some(status) = patch.status {
        record.status = status;
    }
    if let Some(amount) = patch.amount {
        record.amount = amount;
    }
    if let Some(interest) = patch.interest {
        record.interest = interest;
    }
    if let Some(paid_amount) = patch.paid_amount {
        record.paid_amount = paid_amount;
    }
    if let Some(payment_date) = patch.payment_date {
        record.payment_date = payment_date;
    }
    if let Some(payment_method) = patch.payment_method {
        record.payment_method = payment_method;
    }
    if let Some(card_fee) = patch.card_fee {
        record.card_fee = card_fee;
    }
    if let Some(due_date) = patch.due_date {
        record.due_date = Some(due_date);
    }
    if let Some(original_amount) = patch.original_amount {
        record.original_amount = Some(original_amount);
    }
    if let Some(reconciled) = patch.reconciled {
        record.reconciled = reconciled;
    }
    record.updated_at = Utc::now();
}

#[async_trait]
impl LedgerStore for InMemoryStore {
    async fn list_transactions(
        &self,
        tenant_id: TenantId,
        filter: &TransactionFilter,
    ) -> Result<Vec<TransactionRecord>, StoreError> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        Ok(inner.get(&tenant_id).map_or_else(Vec::new, |state| {
            state
                .transactions
                .iter()
                .filter(|record| matches_filter(record, filter))
                .cloned()
                .collect()
        }))
    }

    async fn find_transaction(
        &self,
        tenant_id: TenantId,
        id: TransactionId,
    ) -> Result<Option<TransactionRecord>, StoreError> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        Ok(inner
            .get(&tenant_id)
            .and_then(|state| state.transactions.iter().find(|record| record.id == id))
            .cloned())
    }

    async fn insert_transactions(
        &self,
        tenant_id: TenantId,
        rows: Vec<NewTransaction>,
    ) -> Result<Vec<TransactionRecord>, StoreError> {
        let now = Utc::now();
        let records: Vec<TransactionRecord> = rows
            .into_iter()
            .map(|row| TransactionRecord {
                id: row.id,
                tenant_id,
                customer_id: row.customer_id,
                supplier_id: row.supplier_id,
                kind: row.kind,
                amount: row.amount,
                interest: rust_decimal::Decimal::ZERO,
                paid_amount: None,
                description: row.description,
                category: row.category,
                category_id: row.category_id,
                due_date: row.due_date,
                payment_date: None,
                payment_method: row.payment_method,
                status: PaymentStatus::Pending,
                installment_group: row.installment_group,
                installment_index: row.installment_index,
                installment_count: row.installment_count,
                reconciled: false,
                card_fee: None,
                original_amount: None,
                created_at: now,
                updated_at: now,
            })
            .collect();

        let mut inner = self.inner.lock().expect("store mutex poisoned");
        let state = inner.entry(tenant_id).or_default();
        state.transactions.extend(records.iter().cloned());
        Ok(records)
    }

    async fn update_transaction(
        &self,
        tenant_id: TenantId,
        id: TransactionId,
        patch: TransactionPatch,
    ) -> Result<TransactionRecord, StoreError> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        let record = inner
            .get_mut(&tenant_id)
            .and_then(|state| {
                state
                    .transactions
                    .iter_mut()
                    .find(|record| record.id == id)
            })
            .ok_or(StoreError::RowNotFound)?;
        apply_patch(record, patch);
        Ok(record.clone())
    }

    async fn delete_transaction(
        &self,
        tenant_id: TenantId,
        id: TransactionId,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        let state = inner.get_mut(&tenant_id).ok_or(StoreError::RowNotFound)?;
        let position = state
            .transactions
            .iter()
            .position(|record| record.id == id)
            .ok_or(StoreError::RowNotFound)?;
        state.transactions.remove(position);
        Ok(())
    }

    async fn update_due_dates(
        &self,
        tenant_id: TenantId,
        changes: Vec<(TransactionId, NaiveDate)>,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        let state = inner.get_mut(&tenant_id).ok_or(StoreError::RowNotFound)?;

        // Validate the whole batch before touching any row.
        for (id, _) in &changes {
            if !state.transactions.iter().any(|record| record.id == *id) {
                return Err(StoreError::RowNotFound);
            }
        }

        let now = Utc::now();
        for (id, due_date) in changes {
            if let Some(record) = state
                .transactions
                .iter_mut()
                .find(|record| record.id == id)
            {
                record.due_date = Some(due_date);
                record.updated_at = now;
            }
        }
        Ok(())
    }

    async fn list_categories(&self, tenant_id: TenantId) -> Result<Vec<Category>, StoreError> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        Ok(inner
            .get(&tenant_id)
            .map_or_else(Vec::new, |state| state.categories.clone()))
    }

    async fn list_bank_items(
        &self,
        tenant_id: TenantId,
    ) -> Result<Vec<BankStatementItem>, StoreError> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        Ok(inner
            .get(&tenant_id)
            .map_or_else(Vec::new, |state| state.bank_items.clone()))
    }

    async fn find_bank_item(
        &self,
        tenant_id: TenantId,
        id: BankItemId,
    ) -> Result<Option<BankStatementItem>, StoreError> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        Ok(inner
            .get(&tenant_id)
            .and_then(|state| state.bank_items.iter().find(|item| item.id == id))
            .cloned())
    }

    async fn apply_match(
        &self,
        tenant_id: TenantId,
        bank_item_id: BankItemId,
        transaction_id: TransactionId,
    ) -> Result<BankStatementItem, StoreError> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        let state = inner.get_mut(&tenant_id).ok_or(StoreError::RowNotFound)?;

        let item_index = state
            .bank_items
            .iter()
            .position(|item| item.id == bank_item_id)
            .ok_or(StoreError::RowNotFound)?;
        let tx_index = state
            .transactions
            .iter()
            .position(|record| record.id == transaction_id)
            .ok_or(StoreError::RowNotFound)?;

        // Stage the bank item write first; the injected failure aborts
        // before anything becomes visible, like a rolled-back transaction.
        let now = Utc::now();
        let mut staged_item = state.bank_items[item_index].clone();
        staged_item.status = BankItemStatus::Reconciled;
        staged_item.transaction_id = Some(transaction_id);
        staged_item.updated_at = now;

        if self.fail_next_match.swap(false, Ordering::SeqCst) {
            return Err(StoreError::Backend(
                "injected failure after first match write".to_string(),
            ));
        }

        state.bank_items[item_index] = staged_item.clone();
        let record = &mut state.transactions[tx_index];
        record.reconciled = true;
        record.updated_at = now;

        Ok(staged_item)
    }

    async fn clear_bank_items(&self, tenant_id: TenantId) -> Result<u64, StoreError> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        let Some(state) = inner.get_mut(&tenant_id) else {
            return Ok(0);
        };
        let removed = state.bank_items.len() as u64;
        state.bank_items.clear();
        Ok(removed)
    }
}
