//! Run result. Aggregate produced by one reminder run.

use serde::Serialize;

pub const NOTHING_EMAILED: &str = "No group members emailed.";

/// Something that went wrong for one group or one recipient without aborting the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RunFault {
    /// Due group skipped because no representative schedule could be resolved.
    InvariantViolation { group_id: String },
    /// Delivery to a single recipient failed.
    SendFailed {
        group_id: String,
        recipient: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunResult {
    /// Messages delivered.
    pub notified: usize,
    /// Direct children of the root that were examined.
    pub scanned: usize,
    /// Children judged due.
    pub due: usize,
    /// Names of due groups with at least one delivered message, in scan order.
    pub triggering_groups: Vec<String>,
    pub faults: Vec<RunFault>,
    pub summary: String,
}

impl RunResult {
    /// Result of a run that exited before touching any store.
    pub fn nothing_done() -> Self {
        Self {
            summary: NOTHING_EMAILED.to_string(),
            ..Default::default()
        }
    }

    /// Fill `summary` from the counters.
    pub fn summarize(&mut self) {
        self.summary = summary_text(self.notified, &self.triggering_groups);
    }
}

/// Human-readable outcome: count of members emailed and the groups that caused it.
pub fn summary_text(notified: usize, groups: &[String]) -> String {
    if notified == 0 {
        return NOTHING_EMAILED.to_string();
    }
    let members = if notified == 1 {
        "group member was"
    } else {
        "group members were"
    };
    let group_noun = if groups.len() > 1 { "groups" } else { "group" };
    format!(
        "{} {} emailed in the following {}: {}",
        notified,
        members,
        group_noun,
        groups.join(", ")
    )
}
