//! Outbound transactional email.

mod error;
mod smtp;

use async_trait::async_trait;

pub use error::EmailError;
pub use smtp::SmtpMailer;

/// Capability to deliver verification codes by email.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send `code` to `to`.
    ///
    /// Returns `EmailError::Unavailable` when the transport is not configured.
    async fn send_verification_code(&self, to: &str, code: &str) -> Result<(), EmailError>;
}

/// Mailer that is never configured. Every send returns `Unavailable`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledMailer;

#[async_trait]
impl Mailer for DisabledMailer {
    async fn send_verification_code(&self, to: &str, _code: &str) -> Result<(), EmailError> {
        tracing::warn!(to = %to, "email requested but delivery is disabled");
        Err(EmailError::Unavailable)
    }
}
