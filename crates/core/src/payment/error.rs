//! Payment state machine error types.

use thiserror::Error;

use fluxo_shared::error::AppError;
use fluxo_shared::types::TransactionId;

use crate::store::StoreError;

/// Errors that can occur during payment operations.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Transaction not found under the tenant.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(TransactionId),

    /// The transaction has been voided; payments and edits are refused.
    #[error("Transaction {0} is cancelled")]
    TransactionCancelled(TransactionId),

    /// Paid amount cannot be zero.
    #[error("Paid amount cannot be zero")]
    ZeroPaidAmount,

    /// Paid amount cannot be negative.
    #[error("Paid amount cannot be negative")]
    NegativePaidAmount,

    /// Interest cannot be negative.
    #[error("Interest cannot be negative")]
    NegativeInterest,

    /// Card fee rate cannot be negative.
    #[error("Card fee rate cannot be negative")]
    NegativeCardFeeRate,

    /// New amount must be positive.
    #[error("New amount must be positive")]
    NonPositiveAmount,

    /// A term edit must change the amount or the due date.
    #[error("Term edit changes nothing")]
    NothingToEdit,

    /// The payment of a reconciled transaction cannot be cancelled.
    #[error("Cannot cancel payment of reconciled transaction {0}")]
    CancelReconciled(TransactionId),

    /// A paid transaction cannot be voided.
    #[error("Cannot void paid transaction {0}")]
    VoidPaid(TransactionId),

    /// A reconciled transaction cannot be voided.
    #[error("Cannot void reconciled transaction {0}")]
    VoidReconciled(TransactionId),

    /// Store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PaymentError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::TransactionNotFound(_) => "TRANSACTION_NOT_FOUND",
            Self::TransactionCancelled(_) => "TRANSACTION_CANCELLED",
            Self::ZeroPaidAmount => "ZERO_PAID_AMOUNT",
            Self::NegativePaidAmount => "NEGATIVE_PAID_AMOUNT",
            Self::NegativeInterest => "NEGATIVE_INTEREST",
            Self::NegativeCardFeeRate => "NEGATIVE_CARD_FEE_RATE",
            Self::NonPositiveAmount => "NON_POSITIVE_AMOUNT",
            Self::NothingToEdit => "NOTHING_TO_EDIT",
            Self::CancelReconciled(_) => "CANCEL_RECONCILED",
            Self::VoidPaid(_) => "VOID_PAID",
            Self::VoidReconciled(_) => "VOID_RECONCILED",
            Self::Store(_) => "PERSISTENCE_FAILURE",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::ZeroPaidAmount
            | Self::NegativePaidAmount
            | Self::NegativeInterest
            | Self::NegativeCardFeeRate
            | Self::NonPositiveAmount
            | Self::NothingToEdit => 400,
            Self::TransactionNotFound(_) => 404,
            Self::TransactionCancelled(_)
            | Self::CancelReconciled(_)
            | Self::VoidPaid(_)
            | Self::VoidReconciled(_) => 409,
            Self::Store(StoreError::RowNotFound) => 404,
            Self::Store(StoreError::Backend(_)) => 500,
        }
    }
}

impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        let message = err.to_string();
        match err {
            PaymentError::ZeroPaidAmount
            | PaymentError::NegativePaidAmount
            | PaymentError::NegativeInterest
            | PaymentError::NegativeCardFeeRate
            | PaymentError::NonPositiveAmount
            | PaymentError::NothingToEdit => Self::InvalidInput(message),
            PaymentError::TransactionNotFound(_)
            | PaymentError::Store(StoreError::RowNotFound) => Self::NotFound(message),
            PaymentError::TransactionCancelled(_)
            | PaymentError::CancelReconciled(_)
            | PaymentError::VoidPaid(_)
            | PaymentError::VoidReconciled(_) => Self::Conflict(message),
            PaymentError::Store(StoreError::Backend(_)) => Self::Persistence(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(PaymentError::ZeroPaidAmount.error_code(), "ZERO_PAID_AMOUNT");
        assert_eq!(
            PaymentError::CancelReconciled(TransactionId::new()).error_code(),
            "CANCEL_RECONCILED"
        );
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(PaymentError::ZeroPaidAmount.http_status_code(), 400);
        assert_eq!(
            PaymentError::TransactionNotFound(TransactionId::new()).http_status_code(),
            404
        );
        assert_eq!(
            PaymentError::VoidPaid(TransactionId::new()).http_status_code(),
            409
        );
    }

    #[test]
    fn test_maps_into_app_error() {
        assert!(matches!(
            AppError::from(PaymentError::NothingToEdit),
            AppError::InvalidInput(_)
        ));
        assert!(matches!(
            AppError::from(PaymentError::CancelReconciled(TransactionId::new())),
            AppError::Conflict(_)
        ));
    }
}
