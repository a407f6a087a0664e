//! License Service Library
//!
//! Driver licenses over the `licenses` table. License number and email are
//! each unique; the password is stored as an Argon2 hash.

pub mod repository;
pub mod service;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

pub use repository::{LicenseRepository, LicenseStore};
pub use service::{LicenseManager, LicenseService};

/// Build the license service over a database connection.
pub fn build(db: DatabaseConnection) -> Arc<dyn LicenseService> {
    let repo = Arc::new(LicenseStore::new(db));
    Arc::new(LicenseManager::new(repo))
}
