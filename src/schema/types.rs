//! Core schema type definitions for SCIM resources.
//!
//! This module contains the data structures that define SCIM schemas,
//! attribute definitions, and their characteristics as specified in RFC 7643.
//! Schemas are validated once when they are built and are immutable afterwards.

use crate::error::{CastError, IssueKind, SchemaDefinitionError};
use crate::resource::value::TypedValue;
use crate::validators::{StringProfile, ValueFormat, validate_absolute_url, validate_uri_reference};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// SCIM attribute data types.
///
/// Represents the valid data types for SCIM attributes as defined in RFC 7643.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum AttributeType {
    /// String value
    #[default]
    String,
    /// Boolean value
    Boolean,
    /// Decimal number
    Decimal,
    /// Integer number
    Integer,
    /// DateTime in RFC3339 format
    DateTime,
    /// Binary data (base64 encoded)
    Binary,
    /// URI reference
    Reference,
    /// Complex attribute with sub-attributes
    Complex,
}

impl AttributeType {
    /// RFC 7643 name of the type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Decimal => "decimal",
            Self::Integer => "integer",
            Self::DateTime => "dateTime",
            Self::Binary => "binary",
            Self::Reference => "reference",
            Self::Complex => "complex",
        }
    }

    /// Cast a raw JSON value to a scalar of this type.
    ///
    /// Complex values are walked sub-attribute by sub-attribute by the
    /// validation engine and have no scalar form.
    pub fn cast(self, raw: &Value) -> Result<TypedValue, CastError> {
        let mismatch = || CastError::invalid_type(self.as_str(), json_type_name(raw));
        match self {
            Self::String => raw
                .as_str()
                .map(|s| TypedValue::String(s.to_string()))
                .ok_or_else(mismatch),
            Self::Boolean => raw.as_bool().map(TypedValue::Boolean).ok_or_else(mismatch),
            Self::Decimal => raw.as_f64().map(TypedValue::Decimal).ok_or_else(mismatch),
            Self::Integer => raw.as_i64().map(TypedValue::Integer).ok_or_else(mismatch),
            Self::DateTime => {
                let text = raw.as_str().ok_or_else(mismatch)?;
                DateTime::parse_from_rfc3339(text)
                    .map(TypedValue::DateTime)
                    .map_err(|e| {
                        CastError::new(
                            IssueKind::InvalidValue,
                            format!("'{text}' is not an RFC 3339 timestamp: {e}"),
                        )
                    })
            }
            Self::Binary => {
                let text = raw.as_str().ok_or_else(mismatch)?;
                STANDARD.decode(text).map(TypedValue::Binary).map_err(|e| {
                    CastError::new(
                        IssueKind::InvalidValue,
                        format!("value is not canonical base64: {e}"),
                    )
                })
            }
            Self::Reference => {
                let text = raw.as_str().ok_or_else(mismatch)?;
                validate_uri_reference(text)
                    .map(|()| TypedValue::Reference(text.to_string()))
                    .map_err(|e| CastError::new(IssueKind::InvalidValue, e.to_string()))
            }
            Self::Complex => Err(CastError::invalid_type("scalar", "complex")),
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attribute mutability characteristics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum Mutability {
    /// Read-only attribute (managed by server)
    ReadOnly,
    /// Read-write attribute (can be modified by clients)
    #[default]
    ReadWrite,
    /// Immutable attribute (set once, never modified)
    Immutable,
    /// Write-only attribute (passwords, etc.)
    WriteOnly,
}

/// When an attribute is returned in responses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum Returned {
    /// Always returned, even when excluded
    Always,
    /// Never returned
    Never,
    /// Returned unless excluded
    #[default]
    Default,
    /// Returned only when requested
    Request,
}

/// Attribute uniqueness constraints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "camelCase")]
pub enum Uniqueness {
    /// No uniqueness constraint
    #[default]
    None,
    /// Unique within the server
    Server,
    /// Globally unique
    Global,
}

/// Definition of a SCIM attribute.
///
/// Defines all characteristics of an attribute including type,
/// constraints, and validation rules. Field names follow the RFC 7643
/// schema representation, so definitions load straight from schema JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttributeDefinition {
    /// Attribute name
    pub name: String,
    /// Data type of the attribute
    #[serde(rename = "type")]
    pub data_type: AttributeType,
    /// Whether this attribute can have multiple values
    #[serde(rename = "multiValued")]
    pub multi_valued: bool,
    /// Human-readable description
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Whether this attribute is required
    pub required: bool,
    /// Whether string comparison is case-sensitive
    #[serde(rename = "caseExact")]
    pub case_exact: bool,
    /// Mutability characteristics
    pub mutability: Mutability,
    /// How the attribute is returned in responses
    pub returned: Returned,
    /// Uniqueness constraints
    pub uniqueness: Uniqueness,
    /// Allowed values for string attributes
    #[serde(rename = "canonicalValues", skip_serializing_if = "Vec::is_empty")]
    pub canonical_values: Vec<String>,
    /// Sub-attributes for complex types
    #[serde(rename = "subAttributes", skip_serializing_if = "Vec::is_empty")]
    pub sub_attributes: Vec<AttributeDefinition>,
    /// Resource types a reference may point at (`external`, `uri`, `User`, ...)
    #[serde(rename = "referenceTypes", skip_serializing_if = "Vec::is_empty")]
    pub reference_types: Vec<String>,
    /// String preparation profile
    #[serde(skip_serializing_if = "is_free_text")]
    pub profile: StringProfile,
    /// Additional value format for strings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ValueFormat>,
}

fn is_free_text(profile: &StringProfile) -> bool {
    *profile == StringProfile::FreeText
}

impl Default for AttributeDefinition {
    fn default() -> Self {
        Self {
            name: String::new(),
            data_type: AttributeType::String,
            multi_valued: false,
            description: String::new(),
            required: false,
            case_exact: false,
            mutability: Mutability::ReadWrite,
            returned: Returned::Default,
            uniqueness: Uniqueness::None,
            canonical_values: Vec::new(),
            sub_attributes: Vec::new(),
            reference_types: Vec::new(),
            profile: StringProfile::FreeText,
            format: None,
        }
    }
}

impl AttributeDefinition {
    /// Create a single-valued, optional, read-write attribute.
    pub fn new(name: impl Into<String>, data_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            data_type,
            ..Self::default()
        }
    }

    pub fn with_multi_valued(mut self, multi_valued: bool) -> Self {
        self.multi_valued = multi_valued;
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_case_exact(mut self, case_exact: bool) -> Self {
        self.case_exact = case_exact;
        self
    }

    pub fn with_mutability(mut self, mutability: Mutability) -> Self {
        self.mutability = mutability;
        self
    }

    pub fn with_returned(mut self, returned: Returned) -> Self {
        self.returned = returned;
        self
    }

    pub fn with_uniqueness(mut self, uniqueness: Uniqueness) -> Self {
        self.uniqueness = uniqueness;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_canonical_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.canonical_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sub_attributes(mut self, sub_attributes: Vec<AttributeDefinition>) -> Self {
        self.sub_attributes = sub_attributes;
        self
    }

    pub fn with_reference_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reference_types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_profile(mut self, profile: StringProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_format(mut self, format: ValueFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Whether the attribute is of complex type.
    pub fn is_complex(&self) -> bool {
        self.data_type == AttributeType::Complex
    }

    /// Sub-attribute by name, ignoring case.
    pub fn sub_attribute(&self, name: &str) -> Option<&AttributeDefinition> {
        self.sub_attributes
            .iter()
            .find(|sub| sub.name.eq_ignore_ascii_case(name))
    }

    /// Cast one raw scalar value: type conversion, string profile,
    /// canonical values, value format and reference type checks, in that order.
    ///
    /// `default_region` is used to interpret national phone numbers.
    pub fn cast_value(
        &self,
        raw: &Value,
        default_region: Option<&str>,
    ) -> Result<TypedValue, CastError> {
        let value = self.data_type.cast(raw)?;
        match value {
            TypedValue::String(text) => {
                let text = self.profile.enforce(&text).map_err(|e| {
                    CastError::new(IssueKind::InvalidStringProfile, e.to_string())
                })?;
                self.check_canonical(&text)?;
                if let Some(format) = self.format {
                    format.check(&text, default_region)?;
                }
                Ok(TypedValue::String(text))
            }
            TypedValue::Reference(text) => {
                if self.requires_external_url() {
                    validate_absolute_url(&text)
                        .map_err(|e| CastError::new(IssueKind::InvalidValue, e.to_string()))?;
                }
                Ok(TypedValue::Reference(text))
            }
            other => Ok(other),
        }
    }

    fn check_canonical(&self, text: &str) -> Result<(), CastError> {
        if self.canonical_values.is_empty() {
            return Ok(());
        }
        let allowed = self.canonical_values.iter().any(|canonical| {
            if self.case_exact {
                canonical == text
            } else {
                canonical.to_lowercase() == text.to_lowercase()
            }
        });
        if allowed {
            Ok(())
        } else {
            Err(CastError::new(
                IssueKind::InvalidCanonicalValue,
                format!(
                    "'{text}' is not one of {}",
                    self.canonical_values.join(", ")
                ),
            ))
        }
    }

    fn requires_external_url(&self) -> bool {
        !self.reference_types.is_empty()
            && self
                .reference_types
                .iter()
                .all(|kind| kind.eq_ignore_ascii_case("external"))
    }

    /// Check the structural invariants of this definition and its
    /// sub-attributes.
    pub(crate) fn check(&self) -> Result<(), SchemaDefinitionError> {
        if !is_valid_attribute_name(&self.name) {
            return Err(SchemaDefinitionError::InvalidAttributeName {
                attribute: self.name.clone(),
            });
        }
        let data_type = || self.data_type.as_str().to_string();
        if self.is_complex() && self.sub_attributes.is_empty() {
            return Err(SchemaDefinitionError::ComplexWithoutSubAttributes {
                attribute: self.name.clone(),
            });
        }
        if !self.is_complex() && !self.sub_attributes.is_empty() {
            return Err(SchemaDefinitionError::SubAttributesOnNonComplex {
                attribute: self.name.clone(),
                data_type: data_type(),
            });
        }
        if self.data_type != AttributeType::String && !self.canonical_values.is_empty() {
            return Err(SchemaDefinitionError::CanonicalValuesOnNonString {
                attribute: self.name.clone(),
                data_type: data_type(),
            });
        }
        if self.data_type != AttributeType::String && self.format.is_some() {
            return Err(SchemaDefinitionError::FormatOnNonString {
                attribute: self.name.clone(),
                data_type: data_type(),
            });
        }
        check_unique_names(&self.sub_attributes)?;
        for sub in &self.sub_attributes {
            sub.check()?;
        }
        Ok(())
    }
}

/// `ATTRNAME = ALPHA *(nameChar)` from RFC 7643 §2.1, plus the `$ref`
/// convention for reference sub-attributes.
fn is_valid_attribute_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
                && name != "$"
        }
        _ => false,
    }
}

fn check_unique_names(attributes: &[AttributeDefinition]) -> Result<(), SchemaDefinitionError> {
    let mut seen = std::collections::HashSet::new();
    for attribute in attributes {
        if !seen.insert(attribute.name.to_ascii_lowercase()) {
            return Err(SchemaDefinitionError::duplicate(&attribute.name));
        }
    }
    Ok(())
}

/// JSON type name used in issue details.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "decimal",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// An extension schema attached to a base schema.
#[derive(Debug, Clone)]
pub struct SchemaExtension {
    /// Extension schema; its id is the payload key and path prefix
    pub schema: Schema,
    /// Whether resources must carry the extension
    pub required: bool,
}

/// RFC 7643 §7 representation of a schema, used for (de)serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaDocument {
    /// Unique schema identifier (URI)
    pub id: String,
    /// Human-readable schema name
    #[serde(default)]
    pub name: String,
    /// Schema description
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// List of attribute definitions
    #[serde(default)]
    pub attributes: Vec<AttributeDefinition>,
}

/// A SCIM schema definition.
///
/// Represents a complete schema with its metadata and attribute definitions.
/// Construction checks every structural invariant, so a `Schema` value is
/// always well formed. Attribute lookup ignores case and is backed by an index
/// built once.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "SchemaDocument", into = "SchemaDocument")]
pub struct Schema {
    id: String,
    name: String,
    description: String,
    attributes: Vec<AttributeDefinition>,
    extensions: Vec<SchemaExtension>,
    index: HashMap<String, usize>,
}

impl Schema {
    /// Build a schema from its top-level attributes.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        attributes: Vec<AttributeDefinition>,
    ) -> Result<Self, SchemaDefinitionError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(SchemaDefinitionError::EmptySchemaId);
        }
        check_unique_names(&attributes)?;
        for attribute in &attributes {
            attribute.check()?;
        }
        let index = attributes
            .iter()
            .enumerate()
            .map(|(position, attribute)| (attribute.name.to_ascii_lowercase(), position))
            .collect();
        Ok(Self {
            id,
            name: name.into(),
            description: String::new(),
            attributes,
            extensions: Vec::new(),
            index,
        })
    }

    /// Merge a base attribute sequence with a specific one.
    ///
    /// Each sequence must have unique names on its own. Specific attributes
    /// replace base attributes of the same name in place; the rest are
    /// appended in order.
    pub fn compose(
        id: impl Into<String>,
        name: impl Into<String>,
        base: Vec<AttributeDefinition>,
        specific: Vec<AttributeDefinition>,
    ) -> Result<Self, SchemaDefinitionError> {
        check_unique_names(&base)?;
        check_unique_names(&specific)?;
        let mut merged = base;
        for attribute in specific {
            match merged
                .iter_mut()
                .find(|existing| existing.name.eq_ignore_ascii_case(&attribute.name))
            {
                Some(existing) => *existing = attribute,
                None => merged.push(attribute),
            }
        }
        Self::new(id, name, merged)
    }

    /// Load a schema from its RFC 7643 JSON representation.
    pub fn from_json(json: &str) -> Result<Self, SchemaDefinitionError> {
        let document: SchemaDocument = serde_json::from_str(json).map_err(|e| {
            SchemaDefinitionError::MalformedDocument {
                message: e.to_string(),
            }
        })?;
        Self::try_from(document)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Attach an extension schema.
    pub fn with_extension(
        mut self,
        extension: Schema,
        required: bool,
    ) -> Result<Self, SchemaDefinitionError> {
        let duplicate = extension.id.eq_ignore_ascii_case(&self.id)
            || self
                .extensions
                .iter()
                .any(|existing| existing.schema.id.eq_ignore_ascii_case(&extension.id));
        if duplicate {
            return Err(SchemaDefinitionError::DuplicateExtension {
                schema_id: extension.id,
            });
        }
        self.extensions.push(SchemaExtension {
            schema: extension,
            required,
        });
        Ok(self)
    }

    /// Schema identifier (URI).
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Top-level attributes in declaration order.
    pub fn attributes(&self) -> &[AttributeDefinition] {
        &self.attributes
    }

    /// Top-level attribute by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&AttributeDefinition> {
        self.index
            .get(&name.to_ascii_lowercase())
            .map(|&position| &self.attributes[position])
    }

    /// Attached extensions in registration order.
    pub fn extensions(&self) -> &[SchemaExtension] {
        &self.extensions
    }

    /// Extension by URI, ignoring case.
    pub fn extension(&self, uri: &str) -> Option<&SchemaExtension> {
        self.extensions
            .iter()
            .find(|extension| extension.schema.id.eq_ignore_ascii_case(uri))
    }

    /// Whether `uri` names this schema or one of its extensions.
    pub fn accepts_schema_uri(&self, uri: &str) -> bool {
        self.id.eq_ignore_ascii_case(uri) || self.extension(uri).is_some()
    }
}

impl TryFrom<SchemaDocument> for Schema {
    type Error = SchemaDefinitionError;

    fn try_from(document: SchemaDocument) -> Result<Self, Self::Error> {
        Ok(Schema::new(document.id, document.name, document.attributes)?
            .with_description(document.description))
    }
}

impl From<Schema> for SchemaDocument {
    fn from(schema: Schema) -> Self {
        Self {
            id: schema.id,
            name: schema.name,
            description: schema.description,
            attributes: schema.attributes,
        }
    }
}
