//! Filter integration tests.

pub mod properties;
pub mod shaping;
pub mod value_paths;
