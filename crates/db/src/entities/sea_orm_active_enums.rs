//! Database enum mappings.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Transaction kind enum (`transaction_kind`).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "transaction_kind")]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Revenue-side entry.
    #[sea_orm(string_value = "sale")]
    Sale,
    /// Expense-side entry.
    #[sea_orm(string_value = "purchase")]
    Purchase,
    /// Reversal of a previous sale.
    #[sea_orm(string_value = "refund")]
    Refund,
    /// Manual correction entry.
    #[sea_orm(string_value = "adjustment")]
    Adjustment,
    /// Standalone payment record.
    #[sea_orm(string_value = "payment")]
    Payment,
}

/// Payment status enum (`payment_status`).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_status")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// No payment recorded yet.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Some, but not full, payment recorded.
    #[sea_orm(string_value = "partial")]
    Partial,
    /// Fully paid.
    #[sea_orm(string_value = "paid")]
    Paid,
    /// Administratively voided.
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// Bank statement item status enum (`bank_item_status`).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "bank_item_status")]
#[serde(rename_all = "lowercase")]
pub enum BankItemStatus {
    /// Imported, not yet linked.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Linked to a ledger transaction.
    #[sea_orm(string_value = "reconciled")]
    Reconciled,
}

/// Category kind enum (`category_kind`).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "category_kind")]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    /// Revenue category.
    #[sea_orm(string_value = "income")]
    Income,
    /// Expense category.
    #[sea_orm(string_value = "expense")]
    Expense,
}
