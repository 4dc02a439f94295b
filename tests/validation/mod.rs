//! Validation integration tests.

pub mod characteristics;
pub mod properties;
pub mod resources;
