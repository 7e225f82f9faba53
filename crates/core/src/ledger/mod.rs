//! Transaction ledger domain model and entry creation.
//!
//! This module implements the ledger core:
//! - Domain types for transactions, bank statement items, and categories
//! - Entry creation, including installment splitting
//! - Administrative delete with the reconciliation guard
//! - Batched installment rescheduling
//! - Error types for ledger operations

pub mod error;
pub mod service;
pub mod types;

pub use error::LedgerError;
pub use service::{split_into_installments, LedgerService};
pub use types::{
    BankItemStatus, BankStatementItem, Category, CategoryKind, EntryInput, PaymentStatus,
    TransactionKind, TransactionRecord,
};
