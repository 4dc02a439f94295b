//! Error types for schema construction, validation, path resolution and filtering.
//!
//! Construction-time failures ([`SchemaDefinitionError`], [`PathError`],
//! [`FilterError`]) stop processing immediately. Data problems found while
//! validating a payload are never raised one at a time: they are collected as
//! [`ValidationIssue`]s and returned together in [`ValidationIssues`].

use serde::Serialize;
use std::fmt;

/// Main error type for the crate's public entry points.
///
/// Every concern has its own error enum; this type wraps them so callers
/// working through [`crate::SchemaRegistry`] can use a single `?`.
#[derive(Debug, thiserror::Error)]
pub enum ScimError {
    /// Malformed schema definition
    #[error("Schema definition error: {0}")]
    SchemaDefinition(#[from] SchemaDefinitionError),

    /// Payload does not conform to its schema
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationIssues),

    /// Attribute path could not be parsed or resolved
    #[error("Invalid attribute path: {0}")]
    Path(#[from] PathError),

    /// Filter expression could not be parsed
    #[error("Invalid filter: {0}")]
    Filter(#[from] FilterError),

    /// Filter could not be evaluated against a resource
    #[error("Filter evaluation failed: {0}")]
    Evaluation(#[from] EvaluationError),

    /// Schema not found errors
    #[error("Schema not found: {schema_id}")]
    SchemaNotFound { schema_id: String },

    /// Resource was produced by a different schema than the one supplied
    #[error("Resource of schema '{actual}' cannot be used with schema '{expected}'")]
    SchemaMismatch { expected: String, actual: String },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScimError {
    /// Create a schema not found error
    pub fn schema_not_found(schema_id: impl Into<String>) -> Self {
        Self::SchemaNotFound {
            schema_id: schema_id.into(),
        }
    }

    /// The RFC 7644 §3.12 `scimType` an HTTP layer should report, if any.
    pub fn scim_type(&self) -> Option<&'static str> {
        match self {
            Self::Validation(issues) => Some(issues.scim_type()),
            Self::Path(_) => Some("invalidPath"),
            Self::Filter(_) | Self::Evaluation(_) => Some("invalidFilter"),
            Self::Json(_) => Some("invalidSyntax"),
            Self::SchemaDefinition(_) | Self::SchemaNotFound { .. } | Self::SchemaMismatch { .. } => {
                None
            }
        }
    }

    /// The HTTP status an HTTP layer should report.
    pub fn status(&self) -> u16 {
        match self {
            Self::SchemaNotFound { .. } => 404,
            Self::SchemaDefinition(_) | Self::SchemaMismatch { .. } => 500,
            _ => 400,
        }
    }
}

/// A schema definition violates a structural invariant.
///
/// Raised eagerly by [`crate::schema::Schema::new`] and friends, never at
/// first use.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaDefinitionError {
    /// Schema identifier is empty
    #[error("Schema identifier cannot be empty")]
    EmptySchemaId,

    /// Attribute name is empty or contains characters outside the SCIM grammar
    #[error("Invalid attribute name '{attribute}'")]
    InvalidAttributeName { attribute: String },

    /// Two attributes share a name at the same nesting level
    #[error("Duplicate attribute '{attribute}'")]
    DuplicateAttribute { attribute: String },

    /// Complex attribute declared without sub-attributes
    #[error("Complex attribute '{attribute}' must declare sub-attributes")]
    ComplexWithoutSubAttributes { attribute: String },

    /// Sub-attributes declared on a non-complex attribute
    #[error("Attribute '{attribute}' of type {data_type} cannot declare sub-attributes")]
    SubAttributesOnNonComplex { attribute: String, data_type: String },

    /// Canonical values declared on a non-string attribute
    #[error("Attribute '{attribute}' of type {data_type} cannot declare canonical values")]
    CanonicalValuesOnNonString { attribute: String, data_type: String },

    /// Value format declared on a non-string attribute
    #[error("Attribute '{attribute}' of type {data_type} cannot declare a value format")]
    FormatOnNonString { attribute: String, data_type: String },

    /// Extension registered twice, or with the base schema's own identifier
    #[error("Duplicate schema extension '{schema_id}'")]
    DuplicateExtension { schema_id: String },

    /// Schema registered twice in one registry
    #[error("Schema '{schema_id}' is already registered")]
    DuplicateSchema { schema_id: String },

    /// Schema document could not be decoded
    #[error("Malformed schema document: {message}")]
    MalformedDocument { message: String },
}

impl SchemaDefinitionError {
    pub(crate) fn duplicate(attribute: impl Into<String>) -> Self {
        Self::DuplicateAttribute {
            attribute: attribute.into(),
        }
    }
}

/// Classification of a single validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum IssueKind {
    /// Required attribute is absent, null or an empty array
    MissingRequiredAttribute,
    /// Array supplied for a single-valued attribute or vice versa
    MultiplicityMismatch,
    /// JSON type does not match the attribute type
    InvalidType,
    /// Right JSON type but unparseable content (dateTime, binary, reference)
    InvalidValue,
    /// String outside the attribute's closed set of canonical values
    InvalidCanonicalValue,
    /// Phone number could not be parsed into a valid number
    InvalidPhoneNumber,
    /// Not an ISO 3166-1 country code
    InvalidCountryCode,
    /// String rejected by its internationalized string profile
    InvalidStringProfile,
    /// Attribute not declared by the schema (strict mode only)
    UnknownAttribute,
    /// `schemas` names a URI that is neither the schema nor one of its extensions
    UnknownSchema,
    /// Client attempted to write an attribute it may not write
    ReadOnlyViolation,
    /// More than one element of a multi-valued attribute is marked primary
    MultiplePrimaryValues,
}

impl IssueKind {
    /// The RFC 7644 `scimType` for this kind of issue.
    pub fn scim_type(self) -> &'static str {
        match self {
            Self::ReadOnlyViolation => "mutability",
            Self::InvalidType => "invalidSyntax",
            _ => "invalidValue",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MissingRequiredAttribute => "missing required attribute",
            Self::MultiplicityMismatch => "multiplicity mismatch",
            Self::InvalidType => "invalid type",
            Self::InvalidValue => "invalid value",
            Self::InvalidCanonicalValue => "invalid canonical value",
            Self::InvalidPhoneNumber => "invalid phone number",
            Self::InvalidCountryCode => "invalid country code",
            Self::InvalidStringProfile => "invalid string profile",
            Self::UnknownAttribute => "unknown attribute",
            Self::UnknownSchema => "unknown schema",
            Self::ReadOnlyViolation => "read-only violation",
            Self::MultiplePrimaryValues => "multiple primary values",
        };
        f.write_str(name)
    }
}

/// One problem found while validating a payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Dotted attribute path, e.g. `emails.value`; extension attributes are
    /// prefixed with the extension URI and a colon
    pub path: String,
    /// Index of the multi-valued element the issue was found in, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    /// Issue classification
    pub kind: IssueKind,
    /// Human-readable explanation
    pub detail: String,
}

impl ValidationIssue {
    /// Create an issue for `path`.
    pub fn new(path: impl Into<String>, kind: IssueKind, detail: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            index: None,
            kind,
            detail: detail.into(),
        }
    }

    /// Create a missing required attribute issue
    pub fn missing_required(path: impl Into<String>) -> Self {
        let path = path.into();
        let detail = format!("required attribute '{path}' is missing");
        Self::new(path, IssueKind::MissingRequiredAttribute, detail)
    }

    /// Attach the index of the multi-valued element.
    pub fn at_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{} (item {}): {}", self.path, index, self.detail),
            None => write!(f, "{}: {}", self.path, self.detail),
        }
    }
}

/// Non-empty batch of issues returned by a failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ValidationIssues(Vec<ValidationIssue>);

impl ValidationIssues {
    pub(crate) fn new() -> Self {
        Self(Vec::new())
    }

    pub(crate) fn push(&mut self, issue: ValidationIssue) {
        self.0.push(issue);
    }

    pub(crate) fn extend(&mut self, other: ValidationIssues) {
        self.0.extend(other.0);
    }

    /// Number of issues.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no issue was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Issues in the order they were found.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationIssue> {
        self.0.iter()
    }

    /// Issues recorded for exactly `path`.
    pub fn for_path<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a ValidationIssue> {
        self.0.iter().filter(move |issue| issue.path == path)
    }

    /// Whether any issue of `kind` was recorded.
    pub fn contains_kind(&self, kind: IssueKind) -> bool {
        self.0.iter().any(|issue| issue.kind == kind)
    }

    /// `scimType` of the first issue, which is what a single error response reports.
    pub fn scim_type(&self) -> &'static str {
        self.0
            .first()
            .map_or("invalidValue", |issue| issue.kind.scim_type())
    }

    /// Consume into the underlying vector.
    pub fn into_vec(self) -> Vec<ValidationIssue> {
        self.0
    }
}

impl fmt::Display for ValidationIssues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} issue(s)", self.0.len())?;
        for issue in &self.0 {
            write!(f, "; {issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationIssues {}

impl IntoIterator for ValidationIssues {
    type Item = ValidationIssue;
    type IntoIter = std::vec::IntoIter<ValidationIssue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationIssues {
    type Item = &'a ValidationIssue;
    type IntoIter = std::slice::Iter<'a, ValidationIssue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Failure to cast one raw value to its attribute type.
///
/// Carries the issue kind the validation engine records for it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{detail}")]
pub struct CastError {
    /// Issue kind to report
    pub kind: IssueKind,
    /// Human-readable explanation
    pub detail: String,
}

impl CastError {
    /// Create a cast error.
    pub fn new(kind: IssueKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    pub(crate) fn invalid_type(expected: &str, actual: &str) -> Self {
        Self::new(
            IssueKind::InvalidType,
            format!("expected {expected}, got {actual}"),
        )
    }

    pub(crate) fn into_issue(self, path: impl Into<String>) -> ValidationIssue {
        ValidationIssue::new(path, self.kind, self.detail)
    }
}

/// Failure to parse or resolve an attribute path.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PathError {
    /// A segment does not exist in its scope
    #[error("Unknown attribute '{path}'")]
    UnknownAttribute { path: String },

    /// Malformed dot/bracket sequence
    #[error("Invalid path syntax at byte {position} in '{path}': {reason}")]
    InvalidPathSyntax {
        path: String,
        position: usize,
        reason: String,
    },

    /// The bracket filter inside a path is invalid
    #[error("Invalid filter in path '{path}': {source}")]
    Filter {
        path: String,
        #[source]
        source: Box<FilterError>,
    },
}

impl PathError {
    pub(crate) fn unknown(path: impl Into<String>) -> Self {
        Self::UnknownAttribute { path: path.into() }
    }

    pub(crate) fn syntax(path: &str, position: usize, reason: impl Into<String>) -> Self {
        Self::InvalidPathSyntax {
            path: path.to_string(),
            position,
            reason: reason.into(),
        }
    }
}

/// Token class the filter parser expected to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// Start of an expression: path, `not` or `(`
    Expression,
    /// An attribute path
    AttributePath,
    /// A comparison operator or `pr`
    Operator,
    /// A string, number, boolean or `null`
    Literal,
    /// `and`, `or` or end of input
    Connective,
    /// `)`
    ClosingParenthesis,
    /// `]`
    ClosingBracket,
    /// Closing `"` of a string literal
    ClosingQuote,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Expression => "expression",
            Self::AttributePath => "attribute path",
            Self::Operator => "comparison operator",
            Self::Literal => "literal value",
            Self::Connective => "'and', 'or' or end of filter",
            Self::ClosingParenthesis => "')'",
            Self::ClosingBracket => "']'",
            Self::ClosingQuote => "closing '\"'",
        };
        f.write_str(text)
    }
}

/// Syntax error with the byte offset it was detected at.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("syntax error at byte {position}: expected {expected}, found {found}")]
pub struct FilterSyntaxError {
    /// Byte offset into the filter string, never past its end
    pub position: usize,
    /// Token class the parser expected
    pub expected: Expected,
    /// Description of what was found instead
    pub found: String,
}

/// Failure to parse a filter expression.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FilterError {
    /// Grammar violation
    #[error(transparent)]
    Syntax(#[from] FilterSyntaxError),

    /// Nesting exceeds the configured maximum depth
    #[error("filter nesting exceeds {max_depth} levels at byte {position}")]
    TooDeep { position: usize, max_depth: usize },

    /// An attribute path in the filter does not resolve
    #[error(transparent)]
    Path(#[from] PathError),
}

impl FilterError {
    /// Byte offset of the failure, when it is known.
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::Syntax(error) => Some(error.position),
            Self::TooDeep { position, .. } => Some(*position),
            Self::Path(_) => None,
        }
    }

    /// Move the reported position `offset` bytes right, for an error raised
    /// on a slice of a larger input.
    pub(crate) fn shifted(self, offset: usize) -> Self {
        match self {
            Self::Syntax(mut error) => {
                error.position += offset;
                Self::Syntax(error)
            }
            Self::TooDeep {
                position,
                max_depth,
            } => Self::TooDeep {
                position: position + offset,
                max_depth,
            },
            Self::Path(error) => Self::Path(error),
        }
    }
}

/// Failure while evaluating a parsed filter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvaluationError {
    /// Operator not defined for the attribute type, or literal of the wrong type
    #[error("Operator '{operator}' is not supported for attribute '{attribute}' of type {data_type} with {literal}")]
    UnsupportedOperatorForType {
        attribute: String,
        operator: String,
        data_type: String,
        literal: String,
    },
}

// Result type aliases for convenience
pub type ScimResult<T> = Result<T, ScimError>;
pub type ValidationResult<T> = Result<T, ValidationIssues>;
