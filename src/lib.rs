//! SCIM 2.0 schema library for Rust.
//!
//! Provides the RFC 7643 attribute type system, payload validation with typed
//! casting, attribute path resolution and RFC 7644 filter parsing and
//! evaluation. Everything is synchronous and free of I/O; an HTTP layer or
//! storage backend builds on top of it.
//!
//! # Core Components
//!
//! - [`SchemaRegistry`] - Core and custom schemas, looked up by id or name
//! - [`validation::validate`] - Payload validation producing a [`ResourceInstance`]
//! - [`filter`] - Filter parsing into a [`FilterNode`] tree and evaluation
//! - [`resource::AttributeProjection`] - `attributes` / `excludedAttributes` response shaping
//! - [`sort::Sorter`] - `sortBy` / `sortOrder` ordering
//!
//! # Quick Start
//!
//! ```rust
//! use scim_schema::{SchemaRegistry, ValidationOptions};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = SchemaRegistry::with_core_schemas()?;
//!
//! let user = registry.validate(
//!     "User",
//!     &json!({"userName": "bjensen", "name": {"givenName": "Barbara"}}),
//!     &ValidationOptions::default(),
//! )?;
//!
//! let filter = registry.parse_filter("User", r#"name.givenName sw "bar""#)?;
//! assert!(scim_schema::filter::matches(&filter, &user)?);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod filter;
pub mod path;
pub mod resource;
pub mod schema;
pub mod sort;
pub mod validation;
pub mod validators;

// Re-export commonly used types for convenience
pub use error::{
    EvaluationError, FilterError, IssueKind, PathError, SchemaDefinitionError, ScimError,
    ScimResult, ValidationIssue, ValidationIssues,
};
pub use filter::{FilterConfig, FilterNode};
pub use path::ResolvedPath;
pub use resource::{AttributeProjection, ResourceInstance};
pub use schema::{AttributeDefinition, AttributeType, Schema, SchemaRegistry};
pub use sort::{SortOrder, Sorter};
pub use validation::{ValidationContext, ValidationOptions};
