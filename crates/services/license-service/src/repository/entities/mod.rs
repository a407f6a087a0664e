//! SeaORM entities owned by the license service.

pub mod license;
