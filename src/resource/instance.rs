//! Validated resource instances.

use super::projection::AttributeProjection;
use super::value::{AttributeValue, ComplexValue};
use crate::error::{ScimError, ScimResult};
use crate::schema::Schema;
use serde_json::{Map, Value};

/// A resource whose attribute values have been cast by validation.
///
/// Instances only come out of [`crate::validation::validate`]; they keep the
/// identifier of the schema that produced them rather than the schema itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceInstance {
    schema_id: String,
    schemas: Vec<String>,
    attributes: ComplexValue,
    extensions: Vec<(String, ComplexValue)>,
}

impl ResourceInstance {
    pub(crate) fn new(
        schema_id: impl Into<String>,
        schemas: Vec<String>,
        attributes: ComplexValue,
        extensions: Vec<(String, ComplexValue)>,
    ) -> Self {
        Self {
            schema_id: schema_id.into(),
            schemas,
            attributes,
            extensions,
        }
    }

    /// Identifier of the schema the instance was validated against.
    pub fn schema_id(&self) -> &str {
        &self.schema_id
    }

    /// Schema URIs the resource declares.
    pub fn schemas(&self) -> &[String] {
        &self.schemas
    }

    /// Base schema attributes.
    pub fn attributes(&self) -> &ComplexValue {
        &self.attributes
    }

    /// Top-level attribute by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    /// Attributes of the extension `uri`, ignoring case.
    pub fn extension(&self, uri: &str) -> Option<&ComplexValue> {
        self.extensions
            .iter()
            .find(|(id, _)| id.eq_ignore_ascii_case(uri))
            .map(|(_, values)| values)
    }

    /// Extensions present on the resource, in schema order.
    pub fn extensions(&self) -> impl Iterator<Item = (&str, &ComplexValue)> {
        self.extensions.iter().map(|(id, values)| (id.as_str(), values))
    }

    /// Attribute values rooted at `extension`, or the base attributes.
    pub(crate) fn root(&self, extension: Option<&str>) -> Option<&ComplexValue> {
        match extension {
            None => Some(&self.attributes),
            Some(uri) => self.extension(uri),
        }
    }

    /// Full JSON representation, including every stored attribute.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert(
            "schemas".to_string(),
            Value::Array(self.schemas.iter().cloned().map(Value::String).collect()),
        );
        for (name, value) in self.attributes.iter() {
            map.insert(name.to_string(), value.to_json());
        }
        for (uri, values) in &self.extensions {
            map.insert(uri.clone(), values.to_json());
        }
        Value::Object(map)
    }

    /// JSON representation for a response: `returned` characteristics and
    /// the requested projection decide which attributes appear.
    pub fn dump(&self, schema: &Schema, projection: &AttributeProjection) -> ScimResult<Value> {
        if !schema.id().eq_ignore_ascii_case(&self.schema_id) {
            return Err(ScimError::SchemaMismatch {
                expected: schema.id().to_string(),
                actual: self.schema_id.clone(),
            });
        }
        let selection = projection.resolve(schema)?;

        let mut map = Map::new();
        map.insert(
            "schemas".to_string(),
            Value::Array(self.schemas.iter().cloned().map(Value::String).collect()),
        );
        for (name, value) in selection.project(None, schema.attributes(), &self.attributes) {
            map.insert(name, value);
        }
        for extension in schema.extensions() {
            let uri = extension.schema.id();
            let Some(values) = self.extension(uri) else {
                continue;
            };
            let projected = selection.project(Some(uri), extension.schema.attributes(), values);
            if !projected.is_empty() {
                map.insert(uri.to_string(), Value::Object(projected.into_iter().collect()));
            }
        }
        Ok(Value::Object(map))
    }
}
