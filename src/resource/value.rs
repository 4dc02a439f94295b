//! Typed attribute values produced by casting.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde_json::{Map, Number, Value};

/// A single cast value of one of the SCIM attribute types.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    /// Profile-normalized string
    String(String),
    /// Boolean
    Boolean(bool),
    /// Decimal number
    Decimal(f64),
    /// Integer number
    Integer(i64),
    /// Instant with its original offset; equality compares instants
    DateTime(DateTime<FixedOffset>),
    /// Decoded base64 content
    Binary(Vec<u8>),
    /// URI reference
    Reference(String),
    /// Sub-attribute values of a complex attribute
    Complex(ComplexValue),
}

impl TypedValue {
    /// Name of the SCIM type this value belongs to.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Boolean(_) => "boolean",
            Self::Decimal(_) => "decimal",
            Self::Integer(_) => "integer",
            Self::DateTime(_) => "dateTime",
            Self::Binary(_) => "binary",
            Self::Reference(_) => "reference",
            Self::Complex(_) => "complex",
        }
    }

    /// String content of string and reference values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::Reference(s) => Some(s),
            _ => None,
        }
    }

    /// Boolean content.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Sub-attributes of a complex value.
    pub fn as_complex(&self) -> Option<&ComplexValue> {
        match self {
            Self::Complex(complex) => Some(complex),
            _ => None,
        }
    }

    /// Whether the value counts as unassigned for presence checks.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::String(s) | Self::Reference(s) => s.is_empty(),
            Self::Binary(bytes) => bytes.is_empty(),
            Self::Complex(complex) => complex.is_empty(),
            _ => false,
        }
    }

    /// Plain JSON representation.
    pub fn to_json(&self) -> Value {
        match self {
            Self::String(s) | Self::Reference(s) => Value::String(s.clone()),
            Self::Boolean(b) => Value::Bool(*b),
            Self::Decimal(d) => Number::from_f64(*d).map_or(Value::Null, Value::Number),
            Self::Integer(i) => Value::Number((*i).into()),
            Self::DateTime(dt) => Value::String(dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Self::Binary(bytes) => Value::String(STANDARD.encode(bytes)),
            Self::Complex(complex) => complex.to_json(),
        }
    }
}

/// Value of one attribute: single or multi-valued.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// Single-valued attribute
    Single(TypedValue),
    /// Multi-valued attribute, in payload order
    Multi(Vec<TypedValue>),
}

impl AttributeValue {
    /// All values as a slice; a single value is a one-element slice.
    pub fn values(&self) -> &[TypedValue] {
        match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::Multi(values) => values,
        }
    }

    /// Whether every value is empty.
    pub fn is_empty(&self) -> bool {
        self.values().iter().all(TypedValue::is_empty)
    }

    /// Plain JSON representation.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Single(value) => value.to_json(),
            Self::Multi(values) => Value::Array(values.iter().map(TypedValue::to_json).collect()),
        }
    }
}

/// Named sub-attribute values, kept in schema order.
///
/// Names are the schema's canonical spelling; lookups ignore case.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComplexValue {
    entries: Vec<(String, AttributeValue)>,
}

impl ComplexValue {
    /// Create an empty value.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name`, replacing an existing entry with the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: AttributeValue) {
        let name = name.into();
        match self
            .entries
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
        {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Value of `name`, ignoring case.
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Plain JSON object.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        for (name, value) in &self.entries {
            map.insert(name.clone(), value.to_json());
        }
        Value::Object(map)
    }
}
