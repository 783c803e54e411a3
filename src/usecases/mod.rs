//! Application use cases. Orchestrate domain logic via ports.

pub mod dispatcher;
pub mod reminder_service;

pub use dispatcher::{DispatchContext, DispatchStats, NotificationDispatcher};
pub use reminder_service::ReminderService;
