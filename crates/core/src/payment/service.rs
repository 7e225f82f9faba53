//! Payment service applying state transitions through the store.

use std::sync::Arc;

use chrono::Utc;

use fluxo_shared::types::{TenantId, TransactionId};

use super::error::PaymentError;
use super::transition;
use super::types::{ConfirmPaymentInput, EditTermsInput};
use crate::ledger::types::TransactionRecord;
use crate::store::LedgerStore;

/// Payment state machine service.
///
/// Loads the tenant-scoped row, applies the pure transition, and persists
/// the resulting patch. Concurrent confirmations on the same row are
/// last-write-wins; no optimistic locking is imposed here.
pub struct PaymentService<S> {
    store: Arc<S>,
}

impl<S: LedgerStore> PaymentService<S> {
    /// Creates a new payment service.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Confirms a payment against a transaction.
    ///
    /// # Errors
    ///
    /// `TransactionNotFound` when the row is absent under the tenant;
    /// validation errors from the transition; store failures.
    pub async fn confirm_payment(
        &self,
        tenant_id: TenantId,
        id: TransactionId,
        input: ConfirmPaymentInput,
    ) -> Result<TransactionRecord, PaymentError> {
        let record = self.load(tenant_id, id).await?;
        let patch = transition::confirm(&record, &input, Utc::now().date_naive())?;
        Ok(self.store.update_transaction(tenant_id, id, patch).await?)
    }

    /// Cancels a recorded payment, reverting the row to `pending`.
    pub async fn cancel_payment(
        &self,
        tenant_id: TenantId,
        id: TransactionId,
    ) -> Result<TransactionRecord, PaymentError> {
        let record = self.load(tenant_id, id).await?;
        let patch = transition::cancel(&record)?;
        Ok(self.store.update_transaction(tenant_id, id, patch).await?)
    }

    /// Edits a transaction's amount and/or due date.
    pub async fn edit_terms(
        &self,
        tenant_id: TenantId,
        id: TransactionId,
        input: EditTermsInput,
    ) -> Result<TransactionRecord, PaymentError> {
        let record = self.load(tenant_id, id).await?;
        let patch = transition::edit_terms(&record, &input)?;
        Ok(self.store.update_transaction(tenant_id, id, patch).await?)
    }

    /// Administratively voids a transaction.
    pub async fn void_transaction(
        &self,
        tenant_id: TenantId,
        id: TransactionId,
    ) -> Result<TransactionRecord, PaymentError> {
        let record = self.load(tenant_id, id).await?;
        let patch = transition::void(&record)?;
        Ok(self.store.update_transaction(tenant_id, id, patch).await?)
    }

    async fn load(
        &self,
        tenant_id: TenantId,
        id: TransactionId,
    ) -> Result<TransactionRecord, PaymentError> {
        self.store
            .find_transaction(tenant_id, id)
            .await?
            .ok_or(PaymentError::TransactionNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::ledger::types::{EntryInput, PaymentStatus, TransactionKind};
    use crate::ledger::LedgerService;
    use crate::store::memory::InMemoryStore;
    use crate::store::TransactionPatch;

    struct Fixture {
        store: Arc<InMemoryStore>,
        service: PaymentService<InMemoryStore>,
        tenant: TenantId,
        id: TransactionId,
    }

    async fn fixture(amount: Decimal) -> Fixture {
        let store = Arc::new(InMemoryStore::new());
        let ledger = LedgerService::new(store.clone());
        let tenant = TenantId::new();
        let rows = ledger
            .create_entry(
                tenant,
                EntryInput {
                    kind: TransactionKind::Sale,
                    amount,
                    description: "Venda".to_string(),
                    due_date: chrono::NaiveDate::from_ymd_opt(2026, 2, 1),
                    installments: 1,
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
        Fixture {
            service: PaymentService::new(store.clone()),
            store,
            tenant,
            id: rows[0].id,
        }
    }

    fn confirm_input(paid: Decimal, interest: Decimal) -> ConfirmPaymentInput {
        ConfirmPaymentInput {
            paid_amount: paid,
            interest,
            payment_date: chrono::NaiveDate::from_ymd_opt(2026, 2, 3),
            payment_method: Some("boleto".to_string()),
            has_card_fee: false,
            card_fee_rate: None,
        }
    }

    #[tokio::test]
    async fn test_confirm_persists_payment_fields() {
        let fx = fixture(dec!(100.00)).await;
        let updated = fx
            .service
            .confirm_payment(fx.tenant, fx.id, confirm_input(dec!(90.00), dec!(10.00)))
            .await
            .unwrap();

        assert_eq!(updated.status, PaymentStatus::Paid);
        assert_eq!(updated.paid_amount, Some(dec!(90.00)));
        assert_eq!(updated.interest, dec!(10.00));
        assert_eq!(updated.payment_method.as_deref(), Some("boleto"));
        assert_eq!(
            updated.payment_date,
            chrono::NaiveDate::from_ymd_opt(2026, 2, 3)
        );
    }

    #[tokio::test]
    async fn test_confirm_unknown_transaction() {
        let fx = fixture(dec!(100.00)).await;
        assert!(matches!(
            fx.service
                .confirm_payment(
                    fx.tenant,
                    TransactionId::new(),
                    confirm_input(dec!(10.00), dec!(0)),
                )
                .await,
            Err(PaymentError::TransactionNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_confirm_is_tenant_scoped() {
        let fx = fixture(dec!(100.00)).await;
        assert!(matches!(
            fx.service
                .confirm_payment(
                    TenantId::new(),
                    fx.id,
                    confirm_input(dec!(10.00), dec!(0)),
                )
                .await,
            Err(PaymentError::TransactionNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_cancel_then_confirm_round_trips() {
        let fx = fixture(dec!(100.00)).await;
        let original = fx
            .service
            .confirm_payment(fx.tenant, fx.id, confirm_input(dec!(60.00), dec!(5.00)))
            .await
            .unwrap();
        assert_eq!(original.status, PaymentStatus::Partial);

        let cancelled = fx.service.cancel_payment(fx.tenant, fx.id).await.unwrap();
        assert_eq!(cancelled.status, PaymentStatus::Pending);
        assert_eq!(cancelled.paid_amount, None);
        assert_eq!(cancelled.payment_date, None);
        assert_eq!(cancelled.interest, Decimal::ZERO);

        // Re-confirming with the original values reproduces the state.
        let replayed = fx
            .service
            .confirm_payment(fx.tenant, fx.id, confirm_input(dec!(60.00), dec!(5.00)))
            .await
            .unwrap();
        assert_eq!(replayed.status, original.status);
        assert_eq!(replayed.paid_amount, original.paid_amount);
        assert_eq!(replayed.interest, original.interest);
        assert_eq!(replayed.payment_date, original.payment_date);
    }

    #[tokio::test]
    async fn test_cancel_reconciled_is_blocked() {
        let fx = fixture(dec!(100.00)).await;
        fx.service
            .confirm_payment(fx.tenant, fx.id, confirm_input(dec!(100.00), dec!(0)))
            .await
            .unwrap();
        fx.store
            .update_transaction(
                fx.tenant,
                fx.id,
                TransactionPatch {
                    reconciled: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(matches!(
            fx.service.cancel_payment(fx.tenant, fx.id).await,
            Err(PaymentError::CancelReconciled(_))
        ));

        // Payment fields untouched.
        let record = fx
            .store
            .find_transaction(fx.tenant, fx.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.status, PaymentStatus::Paid);
        assert_eq!(record.paid_amount, Some(dec!(100.00)));
    }

    #[tokio::test]
    async fn test_repeated_confirm_is_last_write_wins() {
        // Known race: concurrent confirmations are not serialized; the last
        // write wins. Exercised here sequentially.
        let fx = fixture(dec!(100.00)).await;
        fx.service
            .confirm_payment(fx.tenant, fx.id, confirm_input(dec!(30.00), dec!(0)))
            .await
            .unwrap();
        let second = fx
            .service
            .confirm_payment(fx.tenant, fx.id, confirm_input(dec!(100.00), dec!(0)))
            .await
            .unwrap();
        assert_eq!(second.status, PaymentStatus::Paid);
        assert_eq!(second.paid_amount, Some(dec!(100.00)));
    }

    #[tokio::test]
    async fn test_edit_terms_keeps_status_and_records_original() {
        let fx = fixture(dec!(100.00)).await;
        let updated = fx
            .service
            .edit_terms(
                fx.tenant,
                fx.id,
                EditTermsInput {
                    new_amount: Some(dec!(130.00)),
                    new_due_date: chrono::NaiveDate::from_ymd_opt(2026, 3, 15),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.amount, dec!(130.00));
        assert_eq!(updated.original_amount, Some(dec!(100.00)));
        assert_eq!(updated.status, PaymentStatus::Pending);
        assert_eq!(
            updated.due_date,
            chrono::NaiveDate::from_ymd_opt(2026, 3, 15)
        );
    }

    #[tokio::test]
    async fn test_void_then_confirm_refused() {
        let fx = fixture(dec!(100.00)).await;
        let voided = fx
            .service
            .void_transaction(fx.tenant, fx.id)
            .await
            .unwrap();
        assert_eq!(voided.status, PaymentStatus::Cancelled);

        assert!(matches!(
            fx.service
                .confirm_payment(fx.tenant, fx.id, confirm_input(dec!(100.00), dec!(0)))
                .await,
            Err(PaymentError::TransactionCancelled(_))
        ));

        // The backward transition: cancel reverts the void to pending.
        let reverted = fx.service.cancel_payment(fx.tenant, fx.id).await.unwrap();
        assert_eq!(reverted.status, PaymentStatus::Pending);
    }
}
