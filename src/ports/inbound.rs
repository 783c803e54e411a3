//! Inbound port. The hosting scheduler (or `main`) calls into the application.

use crate::domain::{DomainError, RunResult};
use crate::shared::config::JobConfig;

/// One invocation of the reminder job.
#[async_trait::async_trait]
pub trait ReminderJob: Send + Sync {
    /// Scan, filter and notify once. Store or renderer outages are returned as errors;
    /// per-group and per-recipient faults are reported inside the result.
    async fn run(&self, job: &JobConfig) -> Result<RunResult, DomainError>;
}
