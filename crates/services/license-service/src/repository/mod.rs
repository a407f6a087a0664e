//! Repository layer for data access.

pub mod entities;
mod license_repository;
#[cfg(any(test, feature = "test-utils"))]
mod memory;

#[cfg(any(test, feature = "test-utils"))]
pub use license_repository::MockLicenseRepository;
pub use license_repository::{LicenseRepository, LicenseStore};
#[cfg(any(test, feature = "test-utils"))]
pub use memory::InMemoryLicenseStore;
