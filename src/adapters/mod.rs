//! Infrastructure adapters. Implement outbound ports.
//!
//! JSON catalog, SMTP, handlebars, settings. Map errors to DomainError.

pub mod mail;
pub mod persistence;
pub mod render;
pub mod settings;
