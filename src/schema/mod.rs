//! Schema definitions for SCIM resources.
//!
//! This module provides the attribute type system, schema construction and
//! the schema registry implementing the RFC 7643 core schemas.
//!
//! # Key Types
//!
//! - [`Schema`] - SCIM schema definition with attributes and extensions
//! - [`SchemaRegistry`] - Registry for managing and accessing schemas
//! - [`AttributeDefinition`] - Individual attribute specifications and constraints
//!
//! # Examples
//!
//! ```rust
//! use scim_schema::schema::SchemaRegistry;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = SchemaRegistry::with_core_schemas()?;
//! let user_schema = registry.get("User").expect("core schema");
//! assert!(user_schema.get("USERNAME").is_some());
//! # Ok(())
//! # }
//! ```

pub mod embedded;
pub mod registry;
pub mod types;


// Re-export the main types for convenience
pub use embedded::{ENTERPRISE_USER_SCHEMA_ID, GROUP_SCHEMA_ID, USER_SCHEMA_ID};
pub use registry::SchemaRegistry;
pub use types::{
    AttributeDefinition, AttributeType, Mutability, Returned, Schema, SchemaDocument,
    SchemaExtension, Uniqueness,
};
