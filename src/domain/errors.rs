//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Group store error: {0}")]
    Store(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Template store error: {0}")]
    Template(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Message transport error: {0}")]
    Transport(String),

    #[error("Settings error: {0}")]
    Settings(String),

    /// A group judged due has no schedule to present. The due check and the
    /// representative selection disagree, so the group must not be mailed.
    #[error("Group {group_id} is due but has no representative schedule")]
    InvariantViolation { group_id: String },

    #[error("Configuration error: {0}")]
    Config(String),
}
