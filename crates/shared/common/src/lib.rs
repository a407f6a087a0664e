//! Common utilities shared across the workspace.
//!
//! This crate provides:
//! - Unified error handling and its HTTP rendering
//! - Configuration structures

pub mod config;
pub mod error;

pub use config::*;
#[cfg(feature = "database")]
pub use error::write_error;
pub use error::{AppError, AppResult, OptionExt, INVALID_CREDENTIALS_MESSAGE};
