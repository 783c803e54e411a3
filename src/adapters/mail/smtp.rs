//! SMTP adapter. Implements MessageTransport with lettre's async tokio transport.

use crate::adapters::persistence::CommunicationLog;
use crate::domain::{DomainError, OutboundMessage};
use crate::ports::MessageTransport;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Connection settings for the SMTP relay.
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Upper bound for a single send.
    pub timeout: Duration,
}

/// Sends reminders through an SMTP relay (STARTTLS).
pub struct SmtpTransport {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    archive: Option<Arc<CommunicationLog>>,
}

impl SmtpTransport {
    pub fn new(
        settings: &SmtpSettings,
        archive: Option<Arc<CommunicationLog>>,
    ) -> Result<Self, DomainError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
            .map_err(|e| DomainError::Transport(format!("SMTP relay: {}", e)))?
            .port(settings.port)
            .timeout(Some(settings.timeout));
        if let (Some(user), Some(pass)) = (&settings.username, &settings.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }
        Ok(Self {
            mailer: builder.build(),
            archive,
        })
    }
}

/// Build the MIME message. The body is HTML, the sender shows `from_name` when present.
fn build_message(message: &OutboundMessage) -> Result<Message, DomainError> {
    let from_address: Address = message
        .from
        .trim()
        .parse()
        .map_err(|e| DomainError::Transport(format!("Invalid from '{}': {}", message.from, e)))?;
    let from_name = message.from_name.trim();
    let from = Mailbox::new(
        (!from_name.is_empty()).then(|| from_name.to_string()),
        from_address,
    );
    let to_address: Address = message
        .to
        .parse()
        .map_err(|e| DomainError::Transport(format!("Invalid to '{}': {}", message.to, e)))?;

    Message::builder()
        .from(from)
        .to(Mailbox::new(None, to_address))
        .subject(message.subject.clone())
        .header(ContentType::TEXT_HTML)
        .body(message.body.clone())
        .map_err(|e| DomainError::Transport(format!("Build message: {}", e)))
}

#[async_trait::async_trait]
impl MessageTransport for SmtpTransport {
    async fn send(&self, message: &OutboundMessage, archive: bool) -> Result<(), DomainError> {
        let email = build_message(message)?;
        self.mailer
            .send(email)
            .await
            .map_err(|e| DomainError::Transport(format!("SMTP send to {}: {}", message.to, e)))?;
        debug!(to = %message.to, "SMTP message accepted");

        if archive {
            if let Some(log) = &self.archive {
                log.record_delivered(message).await;
            }
        }
        Ok(())
    }
}
