//! Database layer with `SeaORM` entities and the PostgreSQL store.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - The [`repositories::SeaOrmLedgerStore`] implementation of the core
//!   store capability
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::SeaOrmLedgerStore;

use sea_orm::{Database, DatabaseConnection, DbErr};

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}
