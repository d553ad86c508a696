//! SMTP delivery through `lettre`.

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::{EmailConfig, SmtpTls};

use super::{EmailError, Mailer};

const SUBJECT: &str = "Your verification code";

/// Mailer backed by an authenticated SMTP relay.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: Option<String>,
    tls: SmtpTls,
}

impl SmtpMailer {
    /// Build a mailer from config.
    ///
    /// Missing or empty credentials yield a mailer that reports
    /// `EmailError::Unavailable` instead of failing at startup.
    pub fn from_config(config: &EmailConfig) -> Self {
        let (Some(username), Some(password)) = (
            non_empty(config.username.as_deref()),
            non_empty(config.password.as_deref()),
        ) else {
            tracing::info!("SMTP credentials not set, email delivery unavailable");
            return Self {
                transport: None,
                from: None,
                tls: config.tls_mode(),
            };
        };

        let tls = config.tls_mode();
        let builder = match tls {
            SmtpTls::Implicit => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host),
            SmtpTls::Starttls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            }
        };
        let transport = match builder {
            Ok(builder) => Some(
                builder
                    .port(config.smtp_port)
                    .credentials(Credentials::new(username.to_string(), password.to_string()))
                    .build(),
            ),
            Err(e) => {
                tracing::warn!(host = %config.smtp_host, error = %e, "Failed to configure SMTP relay");
                None
            }
        };

        let from = non_empty(config.from.as_deref())
            .unwrap_or(username)
            .to_string();

        Self {
            transport,
            from: Some(from),
            tls,
        }
    }

    /// Whether a transport is configured.
    pub fn is_available(&self) -> bool {
        self.transport.is_some()
    }

    /// The TLS mode the transport connects with.
    pub fn tls(&self) -> SmtpTls {
        self.tls
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_mailbox(address: &str) -> Result<Mailbox, EmailError> {
    address
        .parse()
        .map_err(|e| EmailError::delivery_failed(format!("invalid address '{address}': {e}")))
}

fn render_body(code: &str) -> String {
    format!(
        "<p>Your verification code is:</p>\
         <h2 style=\"letter-spacing:4px\">{code}</h2>\
         <p>If you did not request this code, you can ignore this email.</p>"
    )
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_verification_code(&self, to: &str, code: &str) -> Result<(), EmailError> {
        let (Some(transport), Some(from)) = (&self.transport, &self.from) else {
            return Err(EmailError::Unavailable);
        };

        let message = Message::builder()
            .from(parse_mailbox(from)?)
            .to(parse_mailbox(to)?)
            .subject(SUBJECT)
            .header(ContentType::TEXT_HTML)
            .body(render_body(code))
            .map_err(|e| EmailError::delivery_failed(e.to_string()))?;

        transport
            .send(message)
            .await
            .map_err(|e| EmailError::delivery_failed(e.to_string()))?;

        tracing::info!(to = %to, "sent verification code");
        Ok(())
    }
}
