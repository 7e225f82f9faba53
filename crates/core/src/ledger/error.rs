//! Ledger error types for entry creation and administrative operations.

use thiserror::Error;

use fluxo_shared::error::AppError;
use fluxo_shared::types::TransactionId;

use crate::store::StoreError;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Entry amount cannot be zero.
    #[error("Entry amount cannot be zero")]
    ZeroAmount,

    /// Entry amount cannot be negative.
    #[error("Entry amount cannot be negative")]
    NegativeAmount,

    /// Entry description cannot be blank.
    #[error("Entry description cannot be blank")]
    BlankDescription,

    /// An entry must have at least one installment.
    #[error("Entry must have at least one installment")]
    ZeroInstallments,

    /// Transaction not found under the tenant.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(TransactionId),

    /// Reconciled transactions cannot be deleted.
    #[error("Cannot delete reconciled transaction {0}")]
    CannotDeleteReconciled(TransactionId),

    /// Store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ZeroAmount => "ZERO_AMOUNT",
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::BlankDescription => "BLANK_DESCRIPTION",
            Self::ZeroInstallments => "ZERO_INSTALLMENTS",
            Self::TransactionNotFound(_) => "TRANSACTION_NOT_FOUND",
            Self::CannotDeleteReconciled(_) => "CANNOT_DELETE_RECONCILED",
            Self::Store(_) => "PERSISTENCE_FAILURE",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::ZeroAmount
            | Self::NegativeAmount
            | Self::BlankDescription
            | Self::ZeroInstallments => 400,
            Self::TransactionNotFound(_) => 404,
            Self::CannotDeleteReconciled(_) => 409,
            Self::Store(StoreError::RowNotFound) => 404,
            Self::Store(StoreError::Backend(_)) => 500,
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        let message = err.to_string();
        match err {
            LedgerError::ZeroAmount
            | LedgerError::NegativeAmount
            | LedgerError::BlankDescription
            | LedgerError::ZeroInstallments => Self::InvalidInput(message),
            LedgerError::TransactionNotFound(_)
            | LedgerError::Store(StoreError::RowNotFound) => Self::NotFound(message),
            LedgerError::CannotDeleteReconciled(_) => Self::Conflict(message),
            LedgerError::Store(StoreError::Backend(_)) => Self::Persistence(message),
        }
    }
}
