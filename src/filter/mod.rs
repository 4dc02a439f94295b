//! SCIM filter expressions (RFC 7644 §3.4.2.2).
//!
//! Filters are parsed once against a schema into a [`FilterNode`] tree whose
//! attribute paths are already resolved, then evaluated against any number of
//! [`ResourceInstance`](crate::resource::ResourceInstance)s with [`matches`].
//!
//! ```rust
//! use scim_schema::schema::SchemaRegistry;
//! use scim_schema::validation::{ValidationContext, ValidationOptions};
//! use scim_schema::filter;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = SchemaRegistry::with_core_schemas()?;
//! let options = ValidationOptions::default().with_context(ValidationContext::FilterOnly);
//! let user = registry.validate(
//!     "User",
//!     &json!({"userName": "bjensen", "emails": [{"value": "bjensen@b.com", "type": "work"}]}),
//!     &options,
//! )?;
//!
//! let node = registry.parse_filter("User", r#"emails[type eq "work"].value ew "b.com""#)?;
//! assert!(filter::matches(&node, &user)?);
//! # Ok(())
//! # }
//! ```

pub mod ast;
pub mod eval;
mod lexer;
pub(crate) mod parser;

pub use ast::{CompareOp, FilterNode, Literal, Operand};
pub use eval::matches;

use crate::error::FilterError;
use crate::path::Scope;
use crate::schema::Schema;
use log::trace;
use serde::{Deserialize, Serialize};

/// Default limit on nested parentheses, `not` and bracket filters.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Filter parser configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterConfig {
    /// Maximum nesting depth before parsing fails with `TooDeep`
    pub max_depth: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl FilterConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Parse `filter` against `schema` with the default configuration.
pub fn parse<'s>(schema: &'s Schema, filter: &str) -> Result<FilterNode<'s>, FilterError> {
    parse_with_config(schema, filter, &FilterConfig::default())
}

/// Parse `filter` against `schema`.
pub fn parse_with_config<'s>(
    schema: &'s Schema,
    filter: &str,
    config: &FilterConfig,
) -> Result<FilterNode<'s>, FilterError> {
    trace!("Parsing filter against {}: {}", schema.id(), filter);
    parser::parse_scoped(Scope::Schema(schema), filter, config, 0)
}
