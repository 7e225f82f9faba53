//! Derived installment-group types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use fluxo_shared::types::TransactionId;

use crate::ledger::types::TransactionRecord;

/// One transaction inside a derived group, with its presentation due date.
///
/// `display_due_date` is a display concern; the stored date is never
/// mutated.
#[derive(Debug, Clone, Serialize)]
pub struct GroupMember {
    /// The underlying ledger row.
    pub transaction: TransactionRecord,
    /// Presentation due date after same-month normalization.
    pub display_due_date: NaiveDate,
}

/// A derived installment group.
#[derive(Debug, Clone, Serialize)]
pub struct InstallmentGroup {
    /// Resolved group key.
    pub key: String,
    /// Representative description: the stripped member description, falling
    /// back to the group key.
    pub description: String,
    /// Members sorted by installment index, effective date, identifier.
    pub members: Vec<GroupMember>,
    /// Sum of member amounts, cent-rounded after each addition. Interest is
    /// excluded here and reported separately.
    pub total: Decimal,
    /// Sum of member interest.
    pub interest: Decimal,
    /// True iff every member is fully paid.
    pub is_paid: bool,
}

/// Which fallback produced an effective date for a row missing its due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFallback {
    /// The payment date stood in for the due date.
    PaymentDate,
    /// The creation timestamp stood in for the due date.
    CreatedAt,
}

/// Diagnostic metadata surfaced by grouping instead of errors.
///
/// Reports must render even with partial data; anomalies are log-worthy,
/// not fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum GroupingAnomaly {
    /// The row had no group key and its description stripped to nothing, so
    /// it was grouped under a synthetic per-row key.
    SyntheticKey {
        /// The affected row.
        transaction_id: TransactionId,
    },
    /// The row had no due date; a fallback date was used for ordering.
    MissingDueDate {
        /// The affected row.
        transaction_id: TransactionId,
        /// Which fallback was applied.
        fallback: DateFallback,
    },
}

/// Result of grouping: the groups plus diagnostic metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Grouping {
    /// Derived groups in first-appearance order of their keys.
    pub groups: Vec<InstallmentGroup>,
    /// Log-worthy anomalies encountered while grouping.
    pub anomalies: Vec<GroupingAnomaly>,
}
