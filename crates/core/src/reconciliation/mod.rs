//! Bank-statement reconciliation.
//!
//! Links externally imported bank statement items to ledger transactions.
//! The match updates both rows atomically through the store's transactional
//! facility; partial application would corrupt financial state.

pub mod error;
pub mod service;

pub use error::ReconciliationError;
pub use service::ReconciliationService;
