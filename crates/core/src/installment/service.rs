//! Installment listing service.

use std::sync::Arc;

use fluxo_shared::types::TenantId;

use super::grouper::group_transactions;
use super::types::Grouping;
use crate::store::{LedgerStore, StoreError, TransactionFilter};

/// Lists a tenant's transactions and derives their installment groups.
///
/// The grouping itself is pure ([`group_transactions`]); this service only
/// adds the store round-trip. Every call re-reads from the store - ledger
/// state is never cached across requests.
pub struct InstallmentService<S> {
    store: Arc<S>,
}

impl<S: LedgerStore> InstallmentService<S> {
    /// Creates a new installment service.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Derives the installment groups for a tenant's filtered transactions.
    pub async fn list_groups(
        &self,
        tenant_id: TenantId,
        filter: &TransactionFilter,
    ) -> Result<Grouping, StoreError> {
        let transactions = self.store.list_transactions(tenant_id, filter).await?;
        Ok(group_transactions(transactions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    use crate::ledger::types::{EntryInput, TransactionKind};
    use crate::ledger::LedgerService;
    use crate::store::memory::InMemoryStore;

    #[tokio::test]
    async fn test_list_groups_reads_through_store() {
        let store = Arc::new(InMemoryStore::new());
        let ledger = LedgerService::new(store.clone());
        let service = InstallmentService::new(store);
        let tenant = TenantId::new();

        ledger
            .create_entry(
                tenant,
                EntryInput {
                    kind: TransactionKind::Sale,
                    amount: dec!(300.00),
                    description: "Venda parcelada".to_string(),
                    due_date: chrono::NaiveDate::from_ymd_opt(2026, 5, 10),
                    installments: 3,
                    group_key: None,
                    customer_id: None,
                    supplier_id: None,
                    category: None,
                    category_id: None,
                    payment_method: None,
                },
            )
            .await
            .unwrap();

        let grouping = service
            .list_groups(tenant, &TransactionFilter::default())
            .await
            .unwrap();

        assert_eq!(grouping.groups.len(), 1);
        assert_eq!(grouping.groups[0].members.len(), 3);
        assert_eq!(grouping.groups[0].total, dec!(300.00));
        assert_eq!(grouping.groups[0].description, "Venda parcelada");

        // Tenant isolation: another tenant sees nothing.
        let other = service
            .list_groups(TenantId::new(), &TransactionFilter::default())
            .await
            .unwrap();
        assert!(other.groups.is_empty());
    }
}
