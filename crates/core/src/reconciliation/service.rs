//! Reconciliation matcher service.

use std::sync::Arc;

use fluxo_shared::types::{BankItemId, TenantId, TransactionId};

use super::error::ReconciliationError;
use crate::ledger::types::{BankItemStatus, BankStatementItem};
use crate::store::LedgerStore;

/// Matches bank statement items to ledger transactions.
pub struct ReconciliationService<S> {
    store: Arc<S>,
}

impl<S: LedgerStore> ReconciliationService<S> {
    /// Creates a new reconciliation service.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Matches a bank statement item to a ledger transaction.
    ///
    /// Both rows are updated atomically: the item becomes `reconciled` with
    /// the transaction link, and the transaction's reconciled flag is set.
    /// Re-matching the same pair is a no-op; re-matching an item already
    /// linked to a different transaction fails rather than silently
    /// overwriting.
    ///
    /// # Errors
    ///
    /// `BankItemNotFound`/`TransactionNotFound` when either row is absent
    /// under the tenant; `AlreadyMatched` on a conflicting re-match; store
    /// failures (in which case neither row changed).
    pub async fn match_bank_item(
        &self,
        tenant_id: TenantId,
        bank_item_id: BankItemId,
        transaction_id: TransactionId,
    ) -> Result<BankStatementItem, ReconciliationError> {
        let item = self
            .store
            .find_bank_item(tenant_id, bank_item_id)
            .await?
            .ok_or(ReconciliationError::BankItemNotFound(bank_item_id))?;

        self.store
            .find_transaction(tenant_id, transaction_id)
            .await?
            .ok_or(ReconciliationError::TransactionNotFound(transaction_id))?;

        if item.status == BankItemStatus::Reconciled {
            return match item.transaction_id {
                Some(linked_to) if linked_to == transaction_id => Ok(item),
                Some(linked_to) => Err(ReconciliationError::AlreadyMatched {
                    bank_item_id,
                    linked_to,
                }),
                // Reconciled with no link should not happen; re-apply the
                // match to repair the row.
                None => Ok(self
                    .store
                    .apply_match(tenant_id, bank_item_id, transaction_id)
                    .await?),
            };
        }

        Ok(self
            .store
            .apply_match(tenant_id, bank_item_id, transaction_id)
            .await?)
    }

    /// Deletes all of a tenant's bank statement items.
    ///
    /// Transaction reconciled flags are not reverted; callers own that
    /// follow-up if they need it.
    pub async fn clear(&self, tenant_id: TenantId) -> Result<u64, ReconciliationError> {
        Ok(self.store.clear_bank_items(tenant_id).await?)
    }
}
