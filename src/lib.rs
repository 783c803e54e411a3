//! group-reminder: emails members of recurring-meeting groups ahead of their next occurrence.
//! Hexagonal layout: pure domain rules, ports, use cases, adapters.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
