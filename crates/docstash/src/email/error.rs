//! Email delivery error types.

use thiserror::Error;

/// Errors returned by a [`Mailer`](super::Mailer).
#[derive(Debug, Error)]
pub enum EmailError {
    /// No transport credentials are configured.
    #[error("email delivery is not configured")]
    Unavailable,

    /// The message could not be built or the transport rejected it.
    #[error("email delivery failed: {0}")]
    DeliveryFailed(String),
}

impl EmailError {
    pub fn delivery_failed(message: impl Into<String>) -> Self {
        Self::DeliveryFailed(message.into())
    }
}
