//! Domain entities. Pure data structures for the core business.
//!
//! No store/transport types here — these are mapped from adapters. Every entity is
//! loaded fresh at the start of a run and is read-only afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recurring-meeting group. Owns its children, so a tree cannot contain cycles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    /// Schedule attached directly to the group.
    #[serde(default)]
    pub schedule: Option<Schedule>,
    #[serde(default)]
    pub children: Vec<Group>,
    #[serde(default)]
    pub locations: Vec<GroupLocation>,
    #[serde(default)]
    pub members: Vec<GroupMember>,
}

/// A place a group meets at, with its own meeting schedules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupLocation {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub schedules: Vec<Schedule>,
}

/// A meeting schedule. `next_start` is precomputed by the store; `None` means no future occurrence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Human-readable recurrence, e.g. "Tuesdays at 7:00 PM".
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub next_start: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupMember {
    pub id: String,
    pub status: MemberStatus,
    pub person: Person,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Active,
    Inactive,
    Pending,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Email template. Every field may contain merge-field placeholders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageTemplate {
    pub id: String,
    pub from: String,
    #[serde(default)]
    pub from_name: String,
    pub subject: String,
    pub body: String,
}

/// A fully rendered message addressed to exactly one recipient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub from: String,
    pub from_name: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Substitution context handed to the template renderer, one per recipient.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MergeFields<'a> {
    pub group: &'a Group,
    pub group_member: &'a GroupMember,
    pub person: &'a Person,
    pub schedule: &'a Schedule,
    pub base_url: Option<&'a str>,
}
