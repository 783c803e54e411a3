//! Port traits. API boundaries for the hexagon.
//!
//! - Inbound: Called by the job host into the application
//! - Outbound: Called by application into infrastructure

pub mod inbound;
pub mod outbound;

pub use inbound::ReminderJob;
pub use outbound::{GroupStore, MessageTransport, SettingsPort, TemplateRenderer, TemplateStore};
