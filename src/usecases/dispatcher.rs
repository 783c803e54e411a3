//! Notification dispatch: render the template per recipient and send one message each.
//!
//! - One message per eligible member, in membership-list order
//! - A failed send is recorded and skipped; the rest of the group is still mailed
//! - Render failures abort (a broken template would break every message)

use crate::domain::{
    DomainError, Group, GroupMember, MergeFields, MessageTemplate, OutboundMessage, RunFault,
    Schedule,
};
use crate::ports::{MessageTransport, TemplateRenderer};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Renders and sends reminders for one due group at a time.
pub struct NotificationDispatcher {
    renderer: Arc<dyn TemplateRenderer>,
    transport: Arc<dyn MessageTransport>,
}

/// Outcome of dispatching to one group.
#[derive(Debug, Default)]
pub struct DispatchStats {
    pub sent: usize,
    pub failures: Vec<RunFault>,
}

/// Per-run values shared by every message.
pub struct DispatchContext<'a> {
    pub template: &'a MessageTemplate,
    pub base_url: Option<&'a str>,
    pub archive: bool,
}

impl NotificationDispatcher {
    pub fn new(renderer: Arc<dyn TemplateRenderer>, transport: Arc<dyn MessageTransport>) -> Self {
        Self {
            renderer,
            transport,
        }
    }

    /// Send one reminder to each of `members`.
    pub async fn notify(
        &self,
        group: &Group,
        schedule: &Schedule,
        members: &[&GroupMember],
        ctx: &DispatchContext<'_>,
    ) -> Result<DispatchStats, DomainError> {
        let mut stats = DispatchStats::default();

        for &member in members {
            let Some(to) = member.person.email.as_deref().map(str::trim) else {
                debug!(group_id = %group.id, member_id = %member.id, "member has no address; skipped");
                continue;
            };
            let fields = MergeFields {
                group,
                group_member: member,
                person: &member.person,
                schedule,
                base_url: ctx.base_url,
            };
            let message = self.render_message(ctx.template, &fields, to)?;

            match self.transport.send(&message, ctx.archive).await {
                Ok(()) => {
                    stats.sent += 1;
                    debug!(group_id = %group.id, recipient = to, "reminder sent");
                }
                Err(e) => {
                    warn!(group_id = %group.id, recipient = to, error = %e, "reminder send failed");
                    stats.failures.push(RunFault::SendFailed {
                        group_id: group.id.clone(),
                        recipient: to.to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            group_id = %group.id,
            sent = stats.sent,
            failed = stats.failures.len(),
            "group dispatched"
        );
        Ok(stats)
    }

    fn render_message(
        &self,
        template: &MessageTemplate,
        fields: &MergeFields<'_>,
        to: &str,
    ) -> Result<OutboundMessage, DomainError> {
        Ok(OutboundMessage {
            from: self.renderer.render(&template.from, fields)?,
            from_name: self.renderer.render(&template.from_name, fields)?,
            to: to.to_string(),
            subject: self.renderer.render(&template.subject, fields)?,
            body: self.renderer.render(&template.body, fields)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mail::DryRunTransport;
    use crate::adapters::render::HandlebarsRenderer;
    use crate::domain::{MemberStatus, Person};

    /// Fails for one address, delivers the rest.
    struct FlakyTransport {
        inner: DryRunTransport,
        bad: &'static str,
    }

    #[async_trait::async_trait]
    impl MessageTransport for FlakyTransport {
        async fn send(&self, message: &OutboundMessage, archive: bool) -> Result<(), DomainError> {
            if message.to == self.bad {
                return Err(DomainError::Transport("mailbox unavailable".to_string()));
            }
            self.inner.send(message, archive).await
        }
    }

    fn member(id: &str, email: &str) -> GroupMember {
        GroupMember {
            id: id.to_string(),
            status: MemberStatus::Active,
            person: Person {
                id: format!("p-{}", id),
                first_name: id.to_string(),
                email: Some(email.to_string()),
                ..Default::default()
            },
        }
    }

    fn template() -> MessageTemplate {
        MessageTemplate {
            id: "t".to_string(),
            from: "groups@church.org".to_string(),
            from_name: "{{Group.name}}".to_string(),
            subject: "Reminder: {{Schedule.name}}".to_string(),
            body: "Hi {{Person.first_name}}, see {{BaseUrl}}/groups/{{Group.id}}".to_string(),
        }
    }

    #[tokio::test]
    async fn test_renders_per_recipient_in_order() {
        let transport = Arc::new(DryRunTransport::new());
        let dispatcher = NotificationDispatcher::new(
            Arc::new(HandlebarsRenderer::new()),
            Arc::clone(&transport) as Arc<dyn MessageTransport>,
        );
        let group = Group {
            id: "g1".to_string(),
            name: "Young Adults".to_string(),
            members: vec![member("ann", "ann@x.com"), member("bob", " bob@x.com ")],
            ..Default::default()
        };
        let schedule = Schedule {
            id: "s".to_string(),
            name: "Thursday Night".to_string(),
            ..Default::default()
        };
        let members: Vec<&GroupMember> = group.members.iter().collect();
        let template = template();
        let ctx = DispatchContext {
            template: &template,
            base_url: Some("https://church.org"),
            archive: false,
        };

        let stats = dispatcher
            .notify(&group, &schedule, &members, &ctx)
            .await
            .unwrap();

        assert_eq!(stats.sent, 2);
        let outbox = transport.outbox().await;
        assert_eq!(outbox.len(), 2);
        assert_eq!(outbox[0].to, "ann@x.com");
        assert_eq!(outbox[1].to, "bob@x.com");
        assert_eq!(outbox[0].from_name, "Young Adults");
        assert_eq!(outbox[0].subject, "Reminder: Thursday Night");
        assert_eq!(outbox[0].body, "Hi ann, see https://church.org/groups/g1");
    }

    #[tokio::test]
    async fn test_failed_recipient_does_not_stop_group() {
        let inner = DryRunTransport::new();
        let transport = Arc::new(FlakyTransport {
            inner,
            bad: "bad@x.com",
        });
        let dispatcher = NotificationDispatcher::new(
            Arc::new(HandlebarsRenderer::new()),
            Arc::clone(&transport) as Arc<dyn MessageTransport>,
        );
        let group = Group {
            id: "g1".to_string(),
            members: vec![
                member("a", "a@x.com"),
                member("b", "bad@x.com"),
                member("c", "c@x.com"),
            ],
            ..Default::default()
        };
        let members: Vec<&GroupMember> = group.members.iter().collect();
        let template = template();
        let ctx = DispatchContext {
            template: &template,
            base_url: None,
            archive: false,
        };

        let stats = dispatcher
            .notify(&group, &Schedule::default(), &members, &ctx)
            .await
            .unwrap();

        assert_eq!(stats.sent, 2);
        assert_eq!(stats.failures.len(), 1);
        assert!(matches!(
            &stats.failures[0],
            RunFault::SendFailed { recipient, .. } if recipient == "bad@x.com"
        ));
        let sent: Vec<String> = transport
            .inner
            .outbox()
            .await
            .into_iter()
            .map(|m| m.to)
            .collect();
        assert_eq!(sent, vec!["a@x.com", "c@x.com"]);
    }
}
