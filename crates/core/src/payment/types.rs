//! Payment operation inputs.
//!
//! Explicit per-operation request types; only the fields listed here are
//! mutable through the state machine.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Input for confirming a payment against a transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfirmPaymentInput {
    /// Amount paid, two fraction digits. Must be positive.
    pub paid_amount: Decimal,
    /// Accrued interest paid on top of the amount. Must not be negative.
    #[serde(default)]
    pub interest: Decimal,
    /// Payment date; defaults to today when absent.
    pub payment_date: Option<NaiveDate>,
    /// Payment method label.
    pub payment_method: Option<String>,
    /// Whether a card fee applies to this payment.
    #[serde(default)]
    pub has_card_fee: bool,
    /// Card fee percentage (e.g. `3.5` for 3.5%). The derived fee is
    /// informational and never subtracted from the recorded proceeds.
    pub card_fee_rate: Option<Decimal>,
}

/// Input for editing a transaction's terms (amount and/or due date).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditTermsInput {
    /// New amount, two fraction digits. Must be positive when present.
    pub new_amount: Option<Decimal>,
    /// New due date.
    pub new_due_date: Option<NaiveDate>,
}
