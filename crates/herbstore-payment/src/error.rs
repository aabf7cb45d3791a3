use herbstore_core::FormError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("card details rejected: {0}")]
    InvalidCard(#[from] FormError),

    #[error("payment simulation requires a running tokio runtime")]
    NoRuntime,
}
