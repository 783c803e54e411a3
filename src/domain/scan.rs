//! Group scanner. Finds the direct children of a root group that are due.

use crate::domain::Group;
use crate::domain::occurrence::is_group_due;
use chrono::{DateTime, Utc};

/// Due direct children of `root`, in input order.
///
/// Only one level is examined: the root is a container whose immediate children are the
/// meeting groups. Grandchildren are never reported, even when due.
pub fn scan_due_groups(
    root: &Group,
    cutoff: DateTime<Utc>,
    include_location_schedules: bool,
) -> Vec<&Group> {
    root.children
        .iter()
        .filter(|g| is_group_due(g, cutoff, include_location_schedules))
        .collect()
}
