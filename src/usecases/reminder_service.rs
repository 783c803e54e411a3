//! Reminder run: validate config -> compute cutoff -> load -> scan -> filter -> dispatch -> summarize.
//!
//! - One synchronous pass over the root's direct children; no state kept between runs
//! - Re-running inside the look-ahead window notifies the same members again
//! - Store, template and renderer outages fail the run; group/recipient faults do not

use crate::domain::occurrence::representative_schedule;
use crate::domain::recipients::eligible_members;
use crate::domain::scan::scan_due_groups;
use crate::domain::{DomainError, RunFault, RunResult};
use crate::ports::{GroupStore, ReminderJob, SettingsPort, TemplateStore};
use crate::shared::config::JobConfig;
use crate::usecases::dispatcher::{DispatchContext, NotificationDispatcher};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Reminder service. Ties scanner, recipient filter and dispatcher together for one run.
pub struct ReminderService {
    groups: Arc<dyn GroupStore>,
    templates: Arc<dyn TemplateStore>,
    settings: Arc<dyn SettingsPort>,
    dispatcher: NotificationDispatcher,
}

impl ReminderService {
    pub fn new(
        groups: Arc<dyn GroupStore>,
        templates: Arc<dyn TemplateStore>,
        settings: Arc<dyn SettingsPort>,
        dispatcher: NotificationDispatcher,
    ) -> Self {
        Self {
            groups,
            templates,
            settings,
            dispatcher,
        }
    }

    /// Run with an explicit "now". `run` uses the wall clock.
    pub async fn run_at(
        &self,
        job: &JobConfig,
        now: DateTime<Utc>,
    ) -> Result<RunResult, DomainError> {
        let (Some(root_id), Some(template_id)) = (job.root_group_id(), job.template_id()) else {
            info!("root group or email template not configured; nothing to do");
            return Ok(RunResult::nothing_done());
        };

        let cutoff = now
            .checked_add_signed(Duration::days(i64::from(job.look_ahead_days)))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        info!(
            root_group_id = root_id,
            template_id,
            %cutoff,
            include_location_schedules = job.include_location_schedules,
            "reminder run started"
        );

        let root = self.groups.load_group(root_id).await?;
        let template = self.templates.load_template(template_id).await?;
        let base_url = self.settings.base_url().await?;

        let due_groups = scan_due_groups(&root, cutoff, job.include_location_schedules);
        let mut result = RunResult {
            scanned: root.children.len(),
            due: due_groups.len(),
            ..Default::default()
        };

        let ctx = DispatchContext {
            template: &template,
            base_url: base_url.as_deref(),
            archive: job.archive_sends,
        };

        for group in due_groups {
            let members = eligible_members(group);
            if members.is_empty() {
                debug!(group_id = %group.id, "due group has no eligible members");
                continue;
            }

            let schedule = match representative_schedule(group, job.include_location_schedules) {
                Ok(s) => s,
                Err(DomainError::InvariantViolation { group_id }) => {
                    warn!(group_id = %group_id, "due group has no representative schedule; skipped");
                    result.faults.push(RunFault::InvariantViolation { group_id });
                    continue;
                }
                Err(e) => return Err(e),
            };

            let stats = self
                .dispatcher
                .notify(group, schedule, &members, &ctx)
                .await?;
            if stats.sent > 0 {
                result.triggering_groups.push(group.name.clone());
            }
            result.notified += stats.sent;
            result.faults.extend(stats.failures);
        }

        result.summarize();
        info!(
            notified = result.notified,
            scanned = result.scanned,
            due = result.due,
            faults = result.faults.len(),
            "reminder run complete"
        );
        Ok(result)
    }
}

#[async_trait::async_trait]
impl ReminderJob for ReminderService {
    async fn run(&self, job: &JobConfig) -> Result<RunResult, DomainError> {
        self.run_at(job, Utc::now()).await
    }
}
