//! Shared types and configuration for Amanah.
//!
//! This crate provides common types used across all other crates:
//! - Rupiah amount helpers with decimal precision
//! - Pagination types for list endpoints
//! - Configuration management

pub mod config;
pub mod types;

pub use config::{AppConfig, DeveloperPayee, EngineConfig};
