//! Persistence layer shared by the user and license services.
//!
//! Owns the connection pool and the schema migrations for both tables.

mod db;
pub mod migrations;

use sea_orm::DbErr;

use common::DatabaseConfig;

pub use db::Database;
pub use migrations::Migrator;

/// Schema command issued from the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Connect without migrating, then run `action`.
pub async fn run_migrations(config: &DatabaseConfig, action: MigrateAction) -> Result<(), DbErr> {
    let db = Database::connect_without_migrations(config).await?;

    if action == MigrateAction::Status {
        for (name, applied) in db.migration_status().await? {
            println!("[{}] {}", if applied { "x" } else { " " }, name);
        }
        return Ok(());
    }

    db.apply(action).await
}
