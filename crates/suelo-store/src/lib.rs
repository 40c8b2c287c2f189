//! Suelo Store - Storage ports, adapters and the report store
//!
//! This crate defines the key-value storage port, provides in-memory and
//! file-backed adapters for it, and implements the report lifecycle on top.

pub mod file;
pub mod memory;
pub mod ports;
pub mod reports;
pub mod session;

pub use reports::{ReportStats, ReportStore};
pub use session::Session;
