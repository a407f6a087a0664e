//! Application state for dependency injection.

use std::sync::Arc;

use license_service_lib::LicenseService;
use persistence::Database;
use user_service_lib::UserService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserService>,
    pub licenses: Arc<dyn LicenseService>,
    /// Pinged by the health check; absent when the services run without a store
    pub database: Option<Database>,
}

impl AppState {
    /// Create app state over already-built services.
    pub fn new(users: Arc<dyn UserService>, licenses: Arc<dyn LicenseService>) -> Self {
        Self {
            users,
            licenses,
            database: None,
        }
    }

    /// Build both services over one database.
    pub fn from_database(database: Database) -> Self {
        Self {
            users: user_service_lib::build(database.get_connection()),
            licenses: license_service_lib::build(database.get_connection()),
            database: Some(database),
        }
    }
}
