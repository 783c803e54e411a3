//! Communication archive. One JSON object per line (JSONL), append-only.
//!
//! Transports append here when a send is flagged for archiving.

use crate::domain::{DomainError, OutboundMessage};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::warn;

/// A delivered message as stored in the archive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommunicationRecord {
    pub sent_at: DateTime<Utc>,
    #[serde(flatten)]
    pub message: OutboundMessage,
}

/// JSONL archive of sent messages.
pub struct CommunicationLog {
    path: PathBuf,
    /// Serializes appends so lines never interleave.
    write_lock: Mutex<()>,
}

impl CommunicationLog {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    /// Append one record for `message`, stamped with the current time.
    pub async fn append(&self, message: &OutboundMessage) -> Result<(), DomainError> {
        let record = CommunicationRecord {
            sent_at: Utc::now(),
            message: message.clone(),
        };
        let mut line =
            serde_json::to_string(&record).map_err(|e| DomainError::Store(e.to_string()))?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DomainError::Store(format!("create archive dir: {}", e)))?;
        }
        let mut f = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| DomainError::Store(format!("open archive: {}", e)))?;
        f.write_all(line.as_bytes())
            .await
            .map_err(|e| DomainError::Store(format!("write archive: {}", e)))?;
        f.flush()
            .await
            .map_err(|e| DomainError::Store(format!("flush archive: {}", e)))?;
        Ok(())
    }

    /// Archive a message that was already delivered. Failures are logged, never returned:
    /// the delivery itself stands.
    pub async fn record_delivered(&self, message: &OutboundMessage) {
        if let Err(e) = self.append(message).await {
            warn!(
                to = %message.to,
                path = %self.path.display(),
                error = %e,
                "archiving delivered message failed"
            );
        }
    }

    /// Read every record, oldest first. Malformed lines are skipped.
    pub async fn read_all(&self) -> Result<Vec<CommunicationRecord>, DomainError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => return Err(DomainError::Store(e.to_string())),
        };
        Ok(raw
            .lines()
            .filter(|l| !l.trim().is_empty())
            .filter_map(|l| serde_json::from_str(l).ok())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_append_then_read() {
        let dir = std::env::temp_dir().join(format!("comm-log-{}", std::process::id()));
        let log = CommunicationLog::new(dir.join("communications.jsonl"));
        let message = OutboundMessage {
            from: "office@x.com".to_string(),
            from_name: "Office".to_string(),
            to: "a@x.com".to_string(),
            subject: "Reminder".to_string(),
            body: "<p>See you</p>".to_string(),
        };

        log.append(&message).await.unwrap();
        log.append(&message).await.unwrap();
        let records = log.read_all().await.unwrap();
        let _ = tokio::fs::remove_dir_all(&dir).await;

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].message, message);
    }
}
