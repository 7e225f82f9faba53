//! Payment status state machine.
//!
//! The only writer of payment fields. Transitions are pure functions from a
//! transaction snapshot to a field patch; [`PaymentService`] loads the row,
//! applies the transition, and persists the patch through the store.

pub mod error;
pub mod service;
pub mod transition;
pub mod types;

pub use error::PaymentError;
pub use service::PaymentService;
pub use types::{ConfirmPaymentInput, EditTermsInput};
