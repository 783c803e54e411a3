//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{DomainError, Group, MergeFields, MessageTemplate, OutboundMessage};

/// Group store. Read access to group trees.
#[async_trait::async_trait]
pub trait GroupStore: Send + Sync {
    /// Load a group with its whole subtree (children, locations, schedules, members) already
    /// populated. Schedules carry their precomputed next occurrence.
    ///
    /// Returns `DomainError::NotFound` for an unknown id.
    async fn load_group(&self, group_id: &str) -> Result<Group, DomainError>;
}

/// Template store. Fetch email templates by id.
#[async_trait::async_trait]
pub trait TemplateStore: Send + Sync {
    async fn load_template(&self, template_id: &str) -> Result<MessageTemplate, DomainError>;
}

/// Merge-field renderer. Missing or null context values must render as empty text, not fail.
pub trait TemplateRenderer: Send + Sync {
    fn render(&self, template: &str, fields: &MergeFields<'_>) -> Result<String, DomainError>;
}

/// Message transport. Delivers one rendered message.
#[async_trait::async_trait]
pub trait MessageTransport: Send + Sync {
    /// Send `message`. When `archive` is set the transport also keeps a record of the send.
    /// Implementations bound the call with their own timeout.
    async fn send(&self, message: &OutboundMessage, archive: bool) -> Result<(), DomainError>;
}

/// Application-wide settings exposed to templates.
#[async_trait::async_trait]
pub trait SettingsPort: Send + Sync {
    /// Public base URL of the application, used by templates for absolute links.
    async fn base_url(&self) -> Result<Option<String>, DomainError>;
}
