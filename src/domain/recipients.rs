//! Recipient filter. Active members with a usable email address.

use crate::domain::{Group, GroupMember, MemberStatus};

/// Members of `group` that should receive a reminder, in membership-list order.
pub fn eligible_members(group: &Group) -> Vec<&GroupMember> {
    group.members.iter().filter(|m| is_eligible(m)).collect()
}

fn is_eligible(member: &GroupMember) -> bool {
    member.status == MemberStatus::Active
        && member
            .person
            .email
            .as_deref()
            .is_some_and(|email| !email.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Person;

    fn member(id: &str, status: MemberStatus, email: Option<&str>) -> GroupMember {
        GroupMember {
            id: id.to_string(),
            status,
            person: Person {
                id: format!("p-{}", id),
                email: email.map(str::to_string),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_filters_status_and_blank_addresses() {
        let group = Group {
            id: "g".to_string(),
            members: vec![
                member("active", MemberStatus::Active, Some("a@x.com")),
                member("inactive", MemberStatus::Inactive, Some("b@x.com")),
                member("pending", MemberStatus::Pending, Some("c@x.com")),
                member("blank", MemberStatus::Active, Some("   ")),
                member("missing", MemberStatus::Active, None),
                member("second", MemberStatus::Active, Some("d@x.com")),
            ],
            ..Default::default()
        };

        let ids: Vec<&str> = eligible_members(&group)
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(ids, vec!["active", "second"]);
    }
}
