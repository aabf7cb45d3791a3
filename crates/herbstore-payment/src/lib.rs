//! Timed simulation of card payment processing.
//!
//! [`PaymentSimulator::submit`] validates a [`herbstore_core::CardForm`] and
//! starts a [`PaymentTask`]: a tokio task that holds the `Processing` phase for
//! a fixed delay, flips to `Success`, holds that for a second delay and then
//! resolves to [`PaymentOutcome::Completed`]. Nothing is ever charged.
//!
//! Tasks are cancellable. A cancelled or dropped task never completes, so a
//! shopper who navigates away mid-payment cannot have their cart cleared
//! behind their back.

pub mod error;
pub mod simulator;

pub use error::PaymentError;
pub use simulator::{PaymentOutcome, PaymentSimulator, PaymentTask};
