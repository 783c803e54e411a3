//! Persistence adapters: JSON catalog (groups, templates) and the communication archive.

pub mod catalog;
pub mod communication_log;

pub use catalog::{Catalog, JsonCatalogStore};
pub use communication_log::{CommunicationLog, CommunicationRecord};
