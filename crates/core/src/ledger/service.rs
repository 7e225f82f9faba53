//! Ledger service for entry creation and administrative operations.
//!
//! Entry creation is the only producer of ledger rows: a single row, or N
//! rows sharing one installment group key when the entry is split. Payment
//! fields are never written here; that is the payment state machine's job.

use std::sync::Arc;

use chrono::Months;
use rust_decimal::Decimal;
use uuid::Uuid;

use fluxo_shared::types::money::round_cents;
use fluxo_shared::types::{TenantId, TransactionId};

use super::error::LedgerError;
use super::types::{EntryInput, TransactionRecord};
use crate::store::{LedgerStore, NewTransaction, TransactionFilter};

/// Splits a total into per-installment amounts that sum exactly to it.
///
/// Each installment is the cent-rounded even share; the final installment
/// absorbs the rounding remainder.
#[must_use]
pub fn split_into_installments(total: Decimal, count: u32) -> Vec<Decimal> {
    if count <= 1 {
        return vec![round_cents(total)];
    }

    let share = round_cents(total / Decimal::from(count));
    let mut amounts = vec![share; count as usize - 1];
    let allocated: Decimal = amounts.iter().copied().sum();
    amounts.push(round_cents(total - allocated));
    amounts
}

/// Ledger service over an injected store.
pub struct LedgerService<S> {
    store: Arc<S>,
}

impl<S: LedgerStore> LedgerService<S> {
    /// Creates a new ledger service.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Lists a tenant's transactions matching the filter.
    pub async fn list_transactions(
        &self,
        tenant_id: TenantId,
        filter: &TransactionFilter,
    ) -> Result<Vec<TransactionRecord>, LedgerError> {
        Ok(self.store.list_transactions(tenant_id, filter).await?)
    }

    /// Creates a sale/purchase entry, split into installments when requested.
    ///
    /// All rows of one entry are inserted atomically and share a single
    /// installment group key.
    ///
    /// # Errors
    ///
    /// Returns a validation error for non-positive amounts, blank
    /// descriptions, or a zero installment count.
    pub async fn create_entry(
        &self,
        tenant_id: TenantId,
        input: EntryInput,
    ) -> Result<Vec<TransactionRecord>, LedgerError> {
        let description = input.description.trim();
        if description.is_empty() {
            return Err(LedgerError::BlankDescription);
        }
        if input.amount == Decimal::ZERO {
            return Err(LedgerError::ZeroAmount);
        }
        if input.amount < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount);
        }
        if input.installments == 0 {
            return Err(LedgerError::ZeroInstallments);
        }

        let rows = Self::build_rows(description, &input);
        Ok(self.store.insert_transactions(tenant_id, rows).await?)
    }

    /// Administrative delete.
    ///
    /// # Errors
    ///
    /// Fails with `TransactionNotFound` for a missing row and
    /// `CannotDeleteReconciled` once a bank item has been matched.
    pub async fn delete_transaction(
        &self,
        tenant_id: TenantId,
        id: TransactionId,
    ) -> Result<(), LedgerError> {
        let record = self
            .store
            .find_transaction(tenant_id, id)
            .await?
            .ok_or(LedgerError::TransactionNotFound(id))?;

        if record.reconciled {
            return Err(LedgerError::CannotDeleteReconciled(id));
        }

        Ok(self.store.delete_transaction(tenant_id, id).await?)
    }

    /// Updates due dates for a batch of installments in one atomic unit.
    ///
    /// # Errors
    ///
    /// A missing row fails the whole batch; no row is changed.
    pub async fn reschedule_installments(
        &self,
        tenant_id: TenantId,
        changes: Vec<(TransactionId, chrono::NaiveDate)>,
    ) -> Result<(), LedgerError> {
        if changes.is_empty() {
            return Ok(());
        }
        Ok(self.store.update_due_dates(tenant_id, changes).await?)
    }

    fn build_rows(description: &str, input: &EntryInput) -> Vec<NewTransaction> {
        let count = input.installments;
        let amounts = split_into_installments(input.amount, count);

        let group_key = if count > 1 {
            Some(
                input
                    .group_key
                    .clone()
                    .unwrap_or_else(|| Uuid::new_v4().to_string()),
            )
        } else {
            input.group_key.clone()
        };

        amounts
            .into_iter()
            .enumerate()
            .map(|(offset, amount)| {
                let index = offset as u32 + 1;
                let row_description = if count > 1 {
                    format!("{description} ({index}/{count})")
                } else {
                    description.to_string()
                };
                let due_date = input
                    .due_date
                    .and_then(|date| date.checked_add_months(Months::new(offset as u32)));

                NewTransaction {
                    id: TransactionId::new(),
                    kind: input.kind,
                    amount,
                    description: row_description,
                    category: input.category.clone(),
                    category_id: input.category_id,
                    customer_id: input.customer_id,
                    supplier_id: input.supplier_id,
                    due_date,
                    payment_method: input.payment_method.clone(),
                    installment_group: group_key.clone(),
                    installment_index: (count > 1).then_some(index),
                    installment_count: (count > 1).then_some(count),
                }
            })
            .collect()
    }
}
