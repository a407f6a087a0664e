//! Service layer - license use cases.

mod license_service;

pub use license_service::{LicenseManager, LicenseService};
