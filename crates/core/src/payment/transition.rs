//! Pure payment state transitions.
//!
//! Each transition validates a transaction snapshot and produces the field
//! patch to persist. No store access happens here.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use fluxo_shared::types::money::round_cents;

use super::error::PaymentError;
use super::types::{ConfirmPaymentInput, EditTermsInput};
use crate::ledger::types::{PaymentStatus, TransactionRecord};
use crate::store::TransactionPatch;

/// Confirms a payment: `paid` when `paid_amount + interest` covers the
/// amount (cent-rounded), `partial` otherwise.
///
/// The derived card fee is `paid_amount x rate / 100`, informational only.
///
/// # Errors
///
/// Fails on a cancelled transaction and on non-positive paid amounts,
/// negative interest, or a negative fee rate.
pub fn confirm(
    record: &TransactionRecord,
    input: &ConfirmPaymentInput,
    today: NaiveDate,
) -> Result<TransactionPatch, PaymentError> {
    if record.status.is_cancelled() {
        return Err(PaymentError::TransactionCancelled(record.id));
    }
    if input.paid_amount < Decimal::ZERO {
        return Err(PaymentError::NegativePaidAmount);
    }
    if input.paid_amount == Decimal::ZERO {
        return Err(PaymentError::ZeroPaidAmount);
    }
    if input.interest < Decimal::ZERO {
        return Err(PaymentError::NegativeInterest);
    }
    if input.card_fee_rate.is_some_and(|rate| rate < Decimal::ZERO) {
        return Err(PaymentError::NegativeCardFeeRate);
    }

    let paid_amount = round_cents(input.paid_amount);
    let interest = round_cents(input.interest);
    let total_paid = round_cents(paid_amount + interest);

    let status = if total_paid >= round_cents(record.amount) {
        PaymentStatus::Paid
    } else {
        PaymentStatus::Partial
    };

    let card_fee = if input.has_card_fee {
        input
            .card_fee_rate
            .map(|rate| round_cents(paid_amount * rate / Decimal::ONE_HUNDRED))
    } else {
        None
    };

    Ok(TransactionPatch {
        status: Some(status),
        interest: Some(interest),
        paid_amount: Some(Some(paid_amount)),
        payment_date: Some(Some(input.payment_date.unwrap_or(today))),
        payment_method: Some(input.payment_method.clone()),
        card_fee: Some(card_fee),
        ..Default::default()
    })
}

/// Cancels a recorded payment, reverting to `pending`.
///
/// This is the only backward transition: paid fields are cleared and
/// interest resets to zero.
///
/// # Errors
///
/// Refused with `CancelReconciled` once a bank item references the row.
pub fn cancel(record: &TransactionRecord) -> Result<TransactionPatch, PaymentError> {
    if record.reconciled {
        return Err(PaymentError::CancelReconciled(record.id));
    }

    Ok(TransactionPatch {
        status: Some(PaymentStatus::Pending),
        interest: Some(Decimal::ZERO),
        paid_amount: Some(None),
        payment_date: Some(None),
        card_fee: Some(None),
        ..Default::default()
    })
}

/// Edits a transaction's terms without changing its status.
///
/// The pre-edit amount is recorded as `original_amount` the first time an
/// amount edit occurs; later edits never overwrite it.
///
/// # Errors
///
/// Refused on cancelled rows; the new amount must be positive; an edit must
/// name at least one field.
pub fn edit_terms(
    record: &TransactionRecord,
    input: &EditTermsInput,
) -> Result<TransactionPatch, PaymentError> {
    if !record.status.allows_term_edit() {
        return Err(PaymentError::TransactionCancelled(record.id));
    }
    if input.new_amount.is_none() && input.new_due_date.is_none() {
        return Err(PaymentError::NothingToEdit);
    }

    let mut patch = TransactionPatch::default();

    if let Some(new_amount) = input.new_amount {
        if new_amount <= Decimal::ZERO {
            return Err(PaymentError::NonPositiveAmount);
        }
        let rounded = round_cents(new_amount);
        if rounded != record.amount {
            patch.amount = Some(rounded);
            if record.original_amount.is_none() {
                patch.original_amount = Some(record.amount);
            }
        }
    }

    if let Some(due_date) = input.new_due_date {
        patch.due_date = Some(due_date);
    }

    Ok(patch)
}

/// Administratively voids a transaction (`pending`/`partial` -> `cancelled`).
///
/// # Errors
///
/// Paid and reconciled rows cannot be voided.
pub fn void(record: &TransactionRecord) -> Result<TransactionPatch, PaymentError> {
    if record.status.is_paid() {
        return Err(PaymentError::VoidPaid(record.id));
    }
    if record.reconciled {
        return Err(PaymentError::VoidReconciled(record.id));
    }

    Ok(TransactionPatch {
        status: Some(PaymentStatus::Cancelled),
        ..Default::default()
    })
}
