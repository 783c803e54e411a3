//! Occurrence resolution: is a group due before a cutoff, and which schedule represents it.
//!
//! Occurrence math itself is done by the store; here we only compare the precomputed
//! `next_start` values. A schedule without a next occurrence is never due and always
//! sorts after every schedule that has one.

use crate::domain::{DomainError, Group, Schedule};
use chrono::{DateTime, Utc};

/// Schedules considered for a group: the direct schedule, then (unless disabled) every
/// schedule of every location, in location order.
pub fn candidate_schedules(
    group: &Group,
    include_location_schedules: bool,
) -> impl Iterator<Item = &Schedule> {
    let location_schedules = group
        .locations
        .iter()
        .filter(move |_| include_location_schedules)
        .flat_map(|location| location.schedules.iter());
    group.schedule.iter().chain(location_schedules)
}

/// True iff the schedule has a next occurrence strictly earlier than `cutoff`.
pub fn is_schedule_due(schedule: &Schedule, cutoff: DateTime<Utc>) -> bool {
    matches!(schedule.next_start, Some(next) if next < cutoff)
}

/// True iff at least one candidate schedule is due.
pub fn is_group_due(group: &Group, cutoff: DateTime<Utc>, include_location_schedules: bool) -> bool {
    candidate_schedules(group, include_location_schedules).any(|s| is_schedule_due(s, cutoff))
}

/// Pick the schedule presented to recipients of a due group.
///
/// The direct schedule always wins. Otherwise the location whose earliest schedule starts
/// soonest is chosen (first location wins a tie) and its earliest schedule is returned.
///
/// # Errors
/// `DomainError::InvariantViolation` when there is nothing to choose from. A due group always
/// has a candidate, so this means the due check and the selection disagree.
pub fn representative_schedule(
    group: &Group,
    include_location_schedules: bool,
) -> Result<&Schedule, DomainError> {
    if let Some(schedule) = &group.schedule {
        return Ok(schedule);
    }

    let mut chosen: Option<&Schedule> = None;
    if include_location_schedules {
        for location in &group.locations {
            let Some(earliest) = earliest_schedule(&location.schedules) else {
                continue;
            };
            if chosen.is_none_or(|c| starts_sooner(earliest, c)) {
                chosen = Some(earliest);
            }
        }
    }

    chosen.ok_or_else(|| DomainError::InvariantViolation {
        group_id: group.id.clone(),
    })
}

/// Earliest schedule of a slice, first one on ties. `None` only for an empty slice.
fn earliest_schedule(schedules: &[Schedule]) -> Option<&Schedule> {
    schedules.iter().fold(None, |best, s| match best {
        Some(b) if !starts_sooner(s, b) => Some(b),
        _ => Some(s),
    })
}

/// Strict ordering on `next_start` with missing occurrences last.
fn starts_sooner(a: &Schedule, b: &Schedule) -> bool {
    match (a.next_start, b.next_start) {
        (Some(a), Some(b)) => a < b,
        (Some(_), None) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GroupLocation;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-03-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn schedule(id: &str, in_days: Option<i64>) -> Schedule {
        Schedule {
            id: id.to_string(),
            next_start: in_days.map(|d| now() + Duration::days(d)),
            ..Default::default()
        }
    }

    fn location(id: &str, schedules: Vec<Schedule>) -> GroupLocation {
        GroupLocation {
            id: id.to_string(),
            schedules,
            ..Default::default()
        }
    }

    #[test]
    fn test_schedule_due_is_strictly_before_cutoff() {
        let cutoff = now() + Duration::days(5);
        assert!(is_schedule_due(&schedule("a", Some(4)), cutoff));
        assert!(!is_schedule_due(&schedule("b", Some(5)), cutoff));
        assert!(!is_schedule_due(&schedule("c", Some(6)), cutoff));
        assert!(!is_schedule_due(&schedule("d", None), cutoff));
    }

    #[test]
    fn test_group_due_via_location_only_when_enabled() {
        let group = Group {
            id: "g".to_string(),
            locations: vec![location("l1", vec![schedule("s", Some(1))])],
            ..Default::default()
        };
        let cutoff = now() + Duration::days(2);
        assert!(is_group_due(&group, cutoff, true));
        assert!(!is_group_due(&group, cutoff, false));
    }

    #[test]
    fn test_direct_schedule_preferred_over_sooner_location() {
        let group = Group {
            id: "g".to_string(),
            schedule: Some(schedule("direct", Some(6))),
            locations: vec![location("l1", vec![schedule("loc", Some(1))])],
            ..Default::default()
        };
        let chosen = representative_schedule(&group, true).unwrap();
        assert_eq!(chosen.id, "direct");
    }

    #[test]
    fn test_soonest_location_schedule_chosen() {
        let group = Group {
            id: "g3".to_string(),
            locations: vec![
                location("l1", vec![schedule("four", Some(4))]),
                location("l2", vec![schedule("three", Some(3))]),
            ],
            ..Default::default()
        };
        assert!(is_group_due(&group, now() + Duration::days(7), true));
        assert_eq!(representative_schedule(&group, true).unwrap().id, "three");
        // same input, same answer
        assert_eq!(representative_schedule(&group, true).unwrap().id, "three");
    }

    #[test]
    fn test_earliest_within_location_and_null_sorts_last() {
        let group = Group {
            id: "g".to_string(),
            locations: vec![
                location("empty", vec![]),
                location("nulls", vec![schedule("never", None)]),
                location(
                    "mixed",
                    vec![schedule("none", None), schedule("late", Some(9)), schedule("soon", Some(2))],
                ),
            ],
            ..Default::default()
        };
        assert_eq!(representative_schedule(&group, true).unwrap().id, "soon");
    }

    #[test]
    fn test_tie_goes_to_first_location() {
        let group = Group {
            id: "g".to_string(),
            locations: vec![
                location("l1", vec![schedule("first", Some(3))]),
                location("l2", vec![schedule("second", Some(3))]),
            ],
            ..Default::default()
        };
        assert_eq!(representative_schedule(&group, true).unwrap().id, "first");
    }

    #[test]
    fn test_no_schedule_is_invariant_violation() {
        let group = Group {
            id: "lonely".to_string(),
            locations: vec![location("l1", vec![])],
            ..Default::default()
        };
        match representative_schedule(&group, true) {
            Err(DomainError::InvariantViolation { group_id }) => assert_eq!(group_id, "lonely"),
            other => panic!("expected invariant violation, got {:?}", other),
        }
    }
}
