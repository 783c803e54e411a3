//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod occurrence;
pub mod recipients;
pub mod run;
pub mod scan;

pub use entities::{
    Group, GroupLocation, GroupMember, MemberStatus, MergeFields, MessageTemplate,
    OutboundMessage, Person, Schedule,
};
pub use errors::DomainError;
pub use run::{RunFault, RunResult};
