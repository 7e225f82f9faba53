//! Installment-group derivation.
//!
//! Installment groups are not stored; they are derived at read time from
//! flat transaction rows sharing a group key, or a key inferred from the
//! description's trailing `(n/total)` marker.

pub mod grouper;
pub mod service;
pub mod types;

#[cfg(test)]
mod props;

pub use grouper::{group_transactions, strip_installment_marker};
pub use service::InstallmentService;
pub use types::{DateFallback, GroupMember, Grouping, GroupingAnomaly, InstallmentGroup};
