//! User Service Library
//!
//! User accounts: registration with password confirmation, login against the
//! stored Argon2 hash, and account CRUD over the `users` table.

pub mod repository;
pub mod service;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

pub use repository::{UserRepository, UserStore};
pub use service::{UserManager, UserService};

/// Build the user service over a database connection.
pub fn build(db: DatabaseConnection) -> Arc<dyn UserService> {
    let repo = Arc::new(UserStore::new(db));
    Arc::new(UserManager::new(repo))
}
