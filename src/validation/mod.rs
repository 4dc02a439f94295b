//! Payload validation and casting.
//!
//! [`validate`] walks a JSON payload against a [`Schema`] depth-first, in
//! schema order, and either returns a [`ResourceInstance`] with every value
//! cast to its attribute type or the complete list of issues found. It never
//! stops at the first problem (except under
//! [`UnknownAttributePolicy::Abort`]).
//!
//! Issue paths are dotted (`name.givenName`, `emails.value`); extension
//! attributes are prefixed with the extension URI and a colon. Issues inside
//! an element of a multi-valued attribute carry the element's index.

pub mod options;


pub use options::{UnknownAttributePolicy, ValidationContext, ValidationOptions};

use crate::error::{IssueKind, ValidationIssue, ValidationIssues, ValidationResult};
use crate::resource::{AttributeValue, ComplexValue, ResourceInstance, TypedValue};
use crate::schema::types::json_type_name;
use crate::schema::{AttributeDefinition, Mutability, Returned, Schema};
use log::{debug, trace};
use serde_json::{Map, Value};

const SCHEMAS_KEY: &str = "schemas";

/// Validate `payload` against `schema`.
pub fn validate(
    schema: &Schema,
    payload: &Value,
    options: &ValidationOptions,
) -> ValidationResult<ResourceInstance> {
    let Some(object) = payload.as_object() else {
        let mut issues = ValidationIssues::new();
        issues.push(ValidationIssue::new(
            "",
            IssueKind::InvalidType,
            format!("resource must be a JSON object, got {}", json_type_name(payload)),
        ));
        return Err(issues);
    };

    if options.unknown_attributes == UnknownAttributePolicy::Abort {
        let unknown = unknown_attributes(schema, object);
        if !unknown.is_empty() {
            debug!(
                "Rejected {} payload with {} unknown attribute(s)",
                schema.id(),
                unknown.len()
            );
            return Err(unknown);
        }
    }

    let mut validator = Validator {
        options,
        issues: ValidationIssues::new(),
    };

    let declared_schemas = validator.check_schemas(schema, object);
    let attributes = validator.walk(schema.attributes(), object, "", None);

    let mut extensions = Vec::new();
    for extension in schema.extensions() {
        let uri = extension.schema.id();
        match lookup(object, uri) {
            Some(Value::Object(values)) => {
                let prefix = format!("{uri}:");
                let values = validator.walk(extension.schema.attributes(), values, &prefix, None);
                if !values.is_empty() {
                    extensions.push((uri.to_string(), values));
                }
            }
            Some(value) if !is_absent(value) => validator.issues.push(ValidationIssue::new(
                uri,
                IssueKind::InvalidType,
                format!("extension must be a JSON object, got {}", json_type_name(value)),
            )),
            _ if extension.required => validator
                .issues
                .push(ValidationIssue::missing_required(uri)),
            _ => {}
        }
    }

    if options.unknown_attributes == UnknownAttributePolicy::Collect {
        validator.issues.extend(unknown_attributes(schema, object));
    }

    if !validator.issues.is_empty() {
        debug!(
            "Validation of {} payload ({:?}) found {} issue(s)",
            schema.id(),
            options.context,
            validator.issues.len()
        );
        return Err(validator.issues);
    }

    let schemas = declared_schemas.unwrap_or_else(|| {
        std::iter::once(schema.id().to_string())
            .chain(extensions.iter().map(|(uri, _)| uri.clone()))
            .collect()
    });
    trace!("Validated {} payload", schema.id());
    Ok(ResourceInstance::new(
        schema.id(),
        schemas,
        attributes,
        extensions,
    ))
}

struct Validator<'o> {
    options: &'o ValidationOptions,
    issues: ValidationIssues,
}

impl Validator<'_> {
    fn report(&mut self, mut issue: ValidationIssue, index: Option<usize>) {
        if issue.index.is_none() {
            issue.index = index;
        }
        self.issues.push(issue);
    }

    /// Check the `schemas` attribute; returns the declared URIs in their
    /// canonical spelling when the payload has any.
    fn check_schemas(&mut self, schema: &Schema, object: &Map<String, Value>) -> Option<Vec<String>> {
        let raw = lookup(object, SCHEMAS_KEY)?;
        let items = match raw {
            Value::Null => return None,
            Value::Array(items) => items,
            other => {
                self.issues.push(ValidationIssue::new(
                    SCHEMAS_KEY,
                    IssueKind::InvalidType,
                    format!("expected an array of URIs, got {}", json_type_name(other)),
                ));
                return None;
            }
        };

        let mut declared = Vec::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            match item.as_str() {
                Some(uri) if schema.id().eq_ignore_ascii_case(uri) => {
                    declared.push(schema.id().to_string());
                }
                Some(uri) => match schema.extension(uri) {
                    Some(extension) => declared.push(extension.schema.id().to_string()),
                    None => self.report(
                        ValidationIssue::new(
                            SCHEMAS_KEY,
                            IssueKind::UnknownSchema,
                            format!("'{uri}' is not {} or one of its extensions", schema.id()),
                        ),
                        Some(position),
                    ),
                },
                None => self.report(
                    ValidationIssue::new(
                        SCHEMAS_KEY,
                        IssueKind::InvalidType,
                        format!("expected a URI string, got {}", json_type_name(item)),
                    ),
                    Some(position),
                ),
            }
        }
        (!declared.is_empty()).then_some(declared)
    }

    /// Validate the attributes of one object level.
    fn walk(
        &mut self,
        definitions: &[AttributeDefinition],
        object: &Map<String, Value>,
        parent: &str,
        index: Option<usize>,
    ) -> ComplexValue {
        let mut values = ComplexValue::new();
        for definition in definitions {
            let path = child_path(parent, &definition.name);
            let raw = lookup(object, &definition.name);
            let Some(value) = self.validate_attribute(definition, raw, &path, index) else {
                continue;
            };
            let hidden = self.options.context == ValidationContext::FilterOnly
                && definition.returned == Returned::Never;
            if !hidden {
                values.insert(definition.name.clone(), value);
            }
        }
        values
    }

    fn validate_attribute(
        &mut self,
        definition: &AttributeDefinition,
        raw: Option<&Value>,
        path: &str,
        index: Option<usize>,
    ) -> Option<AttributeValue> {
        let context = self.options.context;
        let read_only = definition.mutability == Mutability::ReadOnly;

        let raw = match raw {
            Some(raw) if !is_absent(raw) => raw,
            _ => {
                if definition.required && !(read_only && context.is_write()) {
                    self.report(ValidationIssue::missing_required(path), index);
                }
                return None;
            }
        };

        if read_only && context.is_write() {
            self.report(
                ValidationIssue::new(
                    path,
                    IssueKind::ReadOnlyViolation,
                    format!("attribute '{path}' is read-only"),
                ),
                index,
            );
            return None;
        }

        match (definition.multi_valued, raw) {
            (true, Value::Array(items)) => {
                let mut values = Vec::with_capacity(items.len());
                for (position, item) in items.iter().enumerate() {
                    if let Some(value) = self.cast_element(definition, item, path, Some(position)) {
                        values.push(value);
                    }
                }
                if definition.is_complex() {
                    self.check_primary(&values, path, index);
                }
                Some(AttributeValue::Multi(values))
            }
            (true, other) => {
                self.report(
                    ValidationIssue::new(
                        path,
                        IssueKind::MultiplicityMismatch,
                        format!(
                            "multi-valued attribute expects an array, got {}",
                            json_type_name(other)
                        ),
                    ),
                    index,
                );
                None
            }
            (false, Value::Array(_)) => {
                self.report(
                    ValidationIssue::new(
                        path,
                        IssueKind::MultiplicityMismatch,
                        "single-valued attribute got an array",
                    ),
                    index,
                );
                None
            }
            (false, other) => self
                .cast_element(definition, other, path, index)
                .map(AttributeValue::Single),
        }
    }

    fn cast_element(
        &mut self,
        definition: &AttributeDefinition,
        raw: &Value,
        path: &str,
        index: Option<usize>,
    ) -> Option<TypedValue> {
        if definition.is_complex() {
            let Value::Object(object) = raw else {
                self.report(
                    ValidationIssue::new(
                        path,
                        IssueKind::InvalidType,
                        format!("expected complex, got {}", json_type_name(raw)),
                    ),
                    index,
                );
                return None;
            };
            let values = self.walk(&definition.sub_attributes, object, path, index);
            return Some(TypedValue::Complex(values));
        }

        let region = self.options.default_phone_region.as_deref();
        match definition.cast_value(raw, region) {
            Ok(value) => Some(value),
            Err(error) => {
                self.report(error.into_issue(path), index);
                None
            }
        }
    }

    fn check_primary(&mut self, values: &[TypedValue], path: &str, index: Option<usize>) {
        let primaries = values
            .iter()
            .filter_map(TypedValue::as_complex)
            .filter(|element| {
                element
                    .get("primary")
                    .and_then(|primary| primary.values().first())
                    .and_then(TypedValue::as_bool)
                    == Some(true)
            })
            .count();
        if primaries > 1 {
            self.report(
                ValidationIssue::new(
                    path,
                    IssueKind::MultiplePrimaryValues,
                    format!("{primaries} values are marked primary; at most one may be"),
                ),
                index,
            );
        }
    }
}

/// Payload attributes the schema does not declare, at any depth.
fn unknown_attributes(schema: &Schema, object: &Map<String, Value>) -> ValidationIssues {
    let mut issues = ValidationIssues::new();
    for (key, value) in object {
        if key.eq_ignore_ascii_case(SCHEMAS_KEY) {
            continue;
        }
        if let Some(extension) = schema.extension(key) {
            if let Value::Object(values) = value {
                let prefix = format!("{}:", extension.schema.id());
                scan_object(extension.schema.attributes(), values, &prefix, None, &mut issues);
            }
            continue;
        }
        match schema.get(key) {
            Some(definition) => scan_value(definition, value, key, &mut issues),
            None => issues.push(unknown_issue(key, None)),
        }
    }
    issues
}

fn scan_value(
    definition: &AttributeDefinition,
    value: &Value,
    path: &str,
    issues: &mut ValidationIssues,
) {
    if !definition.is_complex() {
        return;
    }
    match value {
        Value::Object(object) => {
            scan_object(&definition.sub_attributes, object, path, None, issues);
        }
        Value::Array(items) => {
            for (position, item) in items.iter().enumerate() {
                if let Value::Object(object) = item {
                    scan_object(&definition.sub_attributes, object, path, Some(position), issues);
                }
            }
        }
        _ => {}
    }
}

fn scan_object(
    definitions: &[AttributeDefinition],
    object: &Map<String, Value>,
    parent: &str,
    index: Option<usize>,
    issues: &mut ValidationIssues,
) {
    for (key, value) in object {
        let path = child_path(parent, key);
        match definitions
            .iter()
            .find(|definition| definition.name.eq_ignore_ascii_case(key))
        {
            Some(definition) => scan_value(definition, value, &path, issues),
            None => issues.push(unknown_issue(&path, index)),
        }
    }
}

fn unknown_issue(path: &str, index: Option<usize>) -> ValidationIssue {
    let issue = ValidationIssue::new(
        path,
        IssueKind::UnknownAttribute,
        format!("attribute '{path}' is not defined by the schema"),
    );
    match index {
        Some(index) => issue.at_index(index),
        None => issue,
    }
}

/// `name` under `parent`: top level (`""`), extension (`"urn:...:"`) or
/// nested (`"emails"`).
fn child_path(parent: &str, name: &str) -> String {
    if parent.is_empty() || parent.ends_with(':') {
        format!("{parent}{name}")
    } else {
        format!("{parent}.{name}")
    }
}

/// Member `name` of `object`, matched exactly first and then ignoring case.
fn lookup<'a>(object: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    object.get(name).or_else(|| {
        object
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    })
}

/// Missing, `null` and `[]` all count as unassigned.
fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}
