//! Mail adapters. Implement MessageTransport.
//!
//! SMTP for production, dry run when no relay is configured.

pub mod dry_run;
pub mod smtp;

pub use dry_run::DryRunTransport;
pub use smtp::{SmtpSettings, SmtpTransport};
