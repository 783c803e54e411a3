//! Dry-run transport for running without an SMTP relay.
//!
//! Logs every message instead of delivering it and keeps an in-memory outbox.

use crate::adapters::persistence::CommunicationLog;
use crate::domain::{DomainError, OutboundMessage};
use crate::ports::MessageTransport;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

#[derive(Default)]
pub struct DryRunTransport {
    outbox: Mutex<Vec<OutboundMessage>>,
    archive: Option<Arc<CommunicationLog>>,
}

impl DryRunTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Archive sends flagged for it into `log`.
    pub fn with_archive(log: Arc<CommunicationLog>) -> Self {
        Self {
            outbox: Mutex::new(Vec::new()),
            archive: Some(log),
        }
    }

    /// Messages "sent" so far, in send order.
    pub async fn outbox(&self) -> Vec<OutboundMessage> {
        self.outbox.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl MessageTransport for DryRunTransport {
    async fn send(&self, message: &OutboundMessage, archive: bool) -> Result<(), DomainError> {
        info!(
            to = %message.to,
            from = %message.from,
            subject = %message.subject,
            "[DRY RUN] message not delivered"
        );
        self.outbox.lock().await.push(message.clone());
        if archive {
            if let Some(log) = &self.archive {
                log.record_delivered(message).await;
            }
        }
        Ok(())
    }
}
