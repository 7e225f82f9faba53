//! Reconciliation error types.

use thiserror::Error;

use fluxo_shared::error::AppError;
use fluxo_shared::types::{BankItemId, TransactionId};

use crate::store::StoreError;

/// Errors that can occur during reconciliation operations.
#[derive(Debug, Error)]
pub enum ReconciliationError {
    /// Bank statement item not found under the tenant.
    #[error("Bank statement item not found: {0}")]
    BankItemNotFound(BankItemId),

    /// Transaction not found under the tenant.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(TransactionId),

    /// The bank item is already reconciled to a different transaction.
    #[error("Bank item {bank_item_id} is already matched to transaction {linked_to}")]
    AlreadyMatched {
        /// The bank item being re-matched.
        bank_item_id: BankItemId,
        /// The transaction it is currently linked to.
        linked_to: TransactionId,
    },

    /// Store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ReconciliationError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::BankItemNotFound(_) => "BANK_ITEM_NOT_FOUND",
            Self::TransactionNotFound(_) => "TRANSACTION_NOT_FOUND",
            Self::AlreadyMatched { .. } => "ALREADY_MATCHED",
            Self::Store(_) => "PERSISTENCE_FAILURE",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::BankItemNotFound(_) | Self::TransactionNotFound(_) => 404,
            Self::AlreadyMatched { .. } => 409,
            Self::Store(StoreError::RowNotFound) => 404,
            Self::Store(StoreError::Backend(_)) => 500,
        }
    }
}

impl From<ReconciliationError> for AppError {
    fn from(err: ReconciliationError) -> Self {
        let message = err.to_string();
        match err {
            ReconciliationError::BankItemNotFound(_)
            | ReconciliationError::TransactionNotFound(_)
            | ReconciliationError::Store(StoreError::RowNotFound) => Self::NotFound(message),
            ReconciliationError::AlreadyMatched { .. } => Self::Conflict(message),
            ReconciliationError::Store(StoreError::Backend(_)) => Self::Persistence(message),
        }
    }
}
