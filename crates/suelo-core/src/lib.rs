//! Suelo Core - Domain models, risk scoring, and configuration
//!
//! This crate contains the scoring engine, the report data model and the
//! port definitions consumed by the storage and CLI adapters.

pub mod config;
pub mod error;
pub mod models;
pub mod ports;
pub mod scoring;

pub use error::{Result, SueloError};
