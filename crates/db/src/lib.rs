//! Database layer with `SeaORM` entities, the disbursement store, and
//! the lifecycle service.
//!
//! This crate provides:
//! - `SeaORM` entity definitions for disbursements and the collaborator
//!   snapshot tables
//! - The transactional `DisbursementService` facade
//! - SQL adapters for the collaborator interfaces
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod repositories;
pub mod resolvers;
pub mod service;

pub use repositories::{DisbursementFilter, DisbursementStore};
pub use resolvers::{SqlDirectoryResolver, SqlPoolResolver, SqlRoleDirectory};
pub use service::DisbursementService;

use amanah_shared::config::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Establishes a connection pool sized from the configuration.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections);
    Database::connect(options).await
}

/// Establishes a connection from a bare URL, for tests and tooling.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect_url(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}
