//! HTTP handlers.

pub mod health_handler;
pub mod license_handler;
pub mod user_handler;

pub use health_handler::{health_routes, root};
pub use license_handler::license_routes;
pub use user_handler::user_routes;

use common::{AppError, AppResult};
use uuid::Uuid;

/// A path id that is not a UUID cannot name any record.
pub(crate) fn parse_id(raw: &str, entity: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::not_found(entity))
}
