//! Ledger domain types.
//!
//! These are the in-memory shapes of the tenant-scoped ledger rows. They are
//! produced and consumed by the store capability; the database layer maps
//! them to its own entity models.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fluxo_shared::types::{BankItemId, CategoryId, CustomerId, SupplierId, TenantId, TransactionId};

/// Transaction kind classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Revenue-side entry (a sale to a customer).
    Sale,
    /// Expense-side entry (a purchase from a supplier).
    Purchase,
    /// Reversal of a previous sale.
    Refund,
    /// Manual correction entry.
    Adjustment,
    /// Standalone payment record.
    Payment,
}

impl TransactionKind {
    /// Returns true for revenue-side kinds.
    #[must_use]
    pub fn is_income(self) -> bool {
        matches!(self, Self::Sale)
    }

    /// Returns true for expense-side kinds.
    #[must_use]
    pub fn is_expense(self) -> bool {
        matches!(self, Self::Purchase)
    }
}

/// Payment status of a transaction.
///
/// `Pending` is the initial state. Recorded payments move a transaction to
/// `Partial` or `Paid`; `Cancelled` is an administrative void. Cancelling a
/// recorded payment reverts to `Pending` and is the only backward transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// No payment recorded yet.
    Pending,
    /// Some, but not full, payment recorded.
    Partial,
    /// Fully paid.
    Paid,
    /// Administratively voided.
    Cancelled,
}

impl PaymentStatus {
    /// Returns true if the transaction is fully paid.
    #[must_use]
    pub fn is_paid(self) -> bool {
        matches!(self, Self::Paid)
    }

    /// Returns true if the transaction has been voided.
    #[must_use]
    pub fn is_cancelled(self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Returns true if amount/due-date edits are allowed in this state.
    #[must_use]
    pub fn allows_term_edit(self) -> bool {
        !self.is_cancelled()
    }
}

/// A tenant-scoped ledger transaction row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Row identifier.
    pub id: TransactionId,
    /// Owning tenant. Every operation filters by this.
    pub tenant_id: TenantId,
    /// Optional customer reference (sales).
    pub customer_id: Option<CustomerId>,
    /// Optional supplier reference (purchases).
    pub supplier_id: Option<SupplierId>,
    /// Transaction kind.
    pub kind: TransactionKind,
    /// Monetary amount, two fraction digits.
    pub amount: Decimal,
    /// Accrued interest, two fraction digits. Zero until a payment records it.
    pub interest: Decimal,
    /// Amount paid so far. Unset while `Pending`.
    pub paid_amount: Option<Decimal>,
    /// Free-form description. May carry a trailing `(n/total)` marker.
    pub description: String,
    /// Raw category label, used as a reporting fallback.
    pub category: Option<String>,
    /// Resolved category reference.
    pub category_id: Option<CategoryId>,
    /// Due date, when known.
    pub due_date: Option<NaiveDate>,
    /// Date the payment was recorded.
    pub payment_date: Option<NaiveDate>,
    /// Payment method label (e.g. "pix", "boleto", "credit_card").
    pub payment_method: Option<String>,
    /// Payment status.
    pub status: PaymentStatus,
    /// Installment group key shared by sibling installments.
    pub installment_group: Option<String>,
    /// 1-based position within the installment group.
    pub installment_index: Option<u32>,
    /// Total number of installments in the group.
    pub installment_count: Option<u32>,
    /// Whether a bank statement item has been matched to this row.
    pub reconciled: bool,
    /// Informational card fee derived at payment time. Never subtracted from
    /// the recorded proceeds.
    pub card_fee: Option<Decimal>,
    /// Amount before the first term edit, recorded once.
    pub original_amount: Option<Decimal>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TransactionRecord {
    /// Total charged: amount plus accrued interest.
    #[must_use]
    pub fn total_charged(&self) -> Decimal {
        self.amount + self.interest
    }

    /// Effective date used for ordering and display.
    ///
    /// Falls back through `due_date`, `payment_date`, and the creation
    /// timestamp, in that priority.
    #[must_use]
    pub fn effective_date(&self) -> NaiveDate {
        self.due_date
            .or(self.payment_date)
            .unwrap_or_else(|| self.created_at.date_naive())
    }
}

/// Status of a bank statement item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BankItemStatus {
    /// Imported, not yet linked to a transaction.
    Pending,
    /// Linked to a ledger transaction.
    Reconciled,
}

/// An externally imported bank statement line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankStatementItem {
    /// Row identifier.
    pub id: BankItemId,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Statement date.
    pub date: NaiveDate,
    /// Statement amount, two fraction digits.
    pub amount: Decimal,
    /// Statement description.
    pub description: String,
    /// Reconciliation status.
    pub status: BankItemStatus,
    /// Linked ledger transaction, once reconciled.
    pub transaction_id: Option<TransactionId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Category kind: income or expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    /// Revenue category.
    Income,
    /// Expense category.
    Expense,
}

/// A tenant-scoped transaction category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Row identifier.
    pub id: CategoryId,
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Display name, used by the keyword classifier.
    pub name: String,
    /// Income or expense.
    pub kind: CategoryKind,
}

/// Input for creating a sale/purchase entry, optionally split into
/// installments.
#[derive(Debug, Clone)]
pub struct EntryInput {
    /// Transaction kind.
    pub kind: TransactionKind,
    /// Total amount of the entry, split across installments.
    pub amount: Decimal,
    /// Description. Installment rows get an ` (i/N)` suffix appended.
    pub description: String,
    /// Due date of the first installment; subsequent installments step by
    /// one calendar month.
    pub due_date: Option<NaiveDate>,
    /// Number of installments (1 = single row).
    pub installments: u32,
    /// Explicit group key; generated when absent and `installments > 1`.
    pub group_key: Option<String>,
    /// Optional customer reference.
    pub customer_id: Option<CustomerId>,
    /// Optional supplier reference.
    pub supplier_id: Option<SupplierId>,
    /// Raw category label.
    pub category: Option<String>,
    /// Resolved category reference.
    pub category_id: Option<CategoryId>,
    /// Intended payment method label.
    pub payment_method: Option<String>,
}
