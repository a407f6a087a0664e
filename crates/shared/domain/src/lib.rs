//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the user and license entities, their request payloads and input rules, and
//! the password value object used to hash and verify credentials.

pub mod constants;
pub mod error;
pub mod input;
pub mod license;
pub mod password;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult, MissingFields};
pub use license::{CreateLicense, License, LicenseChanges, NewLicense, UpdateLicense, ValidLicense};
pub use password::{ensure_change_confirmed, ensure_confirmed, Password};
pub use user::{Credentials, NewUser, RegisterUser, UpdateUser, User, UserChanges, UserResponse};
