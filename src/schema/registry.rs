//! Schema registry for loading, managing, and accessing SCIM schemas.
//!
//! The registry is an ordinary value: create it, register schemas, look them
//! up, and reset it. Nothing is global, so every test can build its own.

use super::embedded;
use super::types::{AttributeDefinition, Schema};
use crate::error::{ScimError, ScimResult, SchemaDefinitionError};
use crate::filter::{self, FilterConfig, FilterNode};
use crate::path::{self, ResolvedPath};
use crate::resource::ResourceInstance;
use crate::validation::{self, ValidationOptions};
use log::{debug, info, warn};
use serde_json::Value;
use std::collections::HashMap;

/// Registry for SCIM schemas with validation capabilities.
///
/// Schemas are keyed by their identifier; lookups accept the identifier or
/// the schema name and ignore case.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, Schema>,
    filter_config: FilterConfig,
}

impl SchemaRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry preloaded with the embedded core schemas: User (with
    /// the Enterprise User extension), Enterprise User and Group.
    pub fn with_core_schemas() -> Result<Self, SchemaDefinitionError> {
        let mut registry = Self::new();
        for schema in Self::core_schemas()? {
            registry.register(schema)?;
        }
        Ok(registry)
    }

    /// Build the embedded core schemas.
    pub fn core_schemas() -> Result<Vec<Schema>, SchemaDefinitionError> {
        let common: Vec<AttributeDefinition> = serde_json::from_str(embedded::common_attributes())
            .map_err(|e| SchemaDefinitionError::MalformedDocument {
                message: e.to_string(),
            })?;

        let enterprise = Schema::from_json(embedded::enterprise_user_schema())?;
        let user = Self::with_common_attributes(&common, embedded::core_user_schema())?
            .with_extension(enterprise.clone(), false)?;
        let group = Self::with_common_attributes(&common, embedded::core_group_schema())?;

        Ok(vec![user, enterprise, group])
    }

    fn with_common_attributes(
        common: &[AttributeDefinition],
        document: &str,
    ) -> Result<Schema, SchemaDefinitionError> {
        let specific = Schema::from_json(document)?;
        Ok(Schema::compose(
            specific.id(),
            specific.name(),
            common.to_vec(),
            specific.attributes().to_vec(),
        )?
        .with_description(specific.description()))
    }

    /// Use `config` when parsing filters through this registry.
    pub fn with_filter_config(mut self, config: FilterConfig) -> Self {
        self.filter_config = config;
        self
    }

    /// Register a schema. Identifiers must be unique, ignoring case.
    pub fn register(&mut self, schema: Schema) -> Result<(), SchemaDefinitionError> {
        let key = schema.id().to_ascii_lowercase();
        if self.schemas.contains_key(&key) {
            warn!("Rejected duplicate schema {}", schema.id());
            return Err(SchemaDefinitionError::DuplicateSchema {
                schema_id: schema.id().to_string(),
            });
        }
        debug!(
            "Registered schema {} with {} attributes and {} extensions",
            schema.id(),
            schema.attributes().len(),
            schema.extensions().len()
        );
        self.schemas.insert(key, schema);
        Ok(())
    }

    /// Look up a schema by identifier or name, ignoring case.
    pub fn get(&self, id_or_name: &str) -> Option<&Schema> {
        self.schemas
            .get(&id_or_name.to_ascii_lowercase())
            .or_else(|| {
                self.schemas
                    .values()
                    .find(|schema| schema.name().eq_ignore_ascii_case(id_or_name))
            })
    }

    /// All registered schemas, ordered by identifier.
    pub fn schemas(&self) -> Vec<&Schema> {
        let mut schemas: Vec<&Schema> = self.schemas.values().collect();
        schemas.sort_by(|a, b| a.id().cmp(b.id()));
        schemas
    }

    /// Number of registered schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Remove every registered schema.
    pub fn reset(&mut self) {
        info!("Resetting schema registry ({} schemas)", self.schemas.len());
        self.schemas.clear();
    }

    fn require(&self, schema_id: &str) -> ScimResult<&Schema> {
        self.get(schema_id)
            .ok_or_else(|| ScimError::schema_not_found(schema_id))
    }

    /// Validate `payload` against the schema registered as `schema_id`.
    pub fn validate(
        &self,
        schema_id: &str,
        payload: &Value,
        options: &ValidationOptions,
    ) -> ScimResult<ResourceInstance> {
        let schema = self.require(schema_id)?;
        Ok(validation::validate(schema, payload, options)?)
    }

    /// Parse `filter` against the schema registered as `schema_id`.
    pub fn parse_filter(&self, schema_id: &str, filter: &str) -> ScimResult<FilterNode<'_>> {
        let schema = self.require(schema_id)?;
        Ok(filter::parse_with_config(schema, filter, &self.filter_config)?)
    }

    /// Resolve an attribute path against the schema registered as `schema_id`.
    pub fn resolve_path(&self, schema_id: &str, path: &str) -> ScimResult<ResolvedPath<'_>> {
        let schema = self.require(schema_id)?;
        Ok(path::resolve(schema, path)?)
    }
}
