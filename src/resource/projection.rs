//! Attribute projection for responses (`attributes` / `excludedAttributes`).
//!
//! The `returned` characteristic always wins: `never` and writeOnly attributes
//! are never emitted, `always` attributes are always emitted. In between,
//! `default` attributes appear unless excluded (or left out of an include
//! list) and `request` attributes appear only when named.

use super::value::{AttributeValue, ComplexValue, TypedValue};
use crate::error::PathError;
use crate::path;
use crate::schema::{AttributeDefinition, Mutability, Returned, Schema};
use serde_json::Value;

/// Which attributes a response should contain.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AttributeProjection {
    /// Attributes returned by default
    #[default]
    Default,
    /// Only the listed attribute paths, plus `always` attributes
    Include(Vec<String>),
    /// Default attributes except the listed paths
    Exclude(Vec<String>),
}

impl AttributeProjection {
    pub fn include<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Include(paths.into_iter().map(Into::into).collect())
    }

    pub fn exclude<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Exclude(paths.into_iter().map(Into::into).collect())
    }

    /// Build from the comma-separated `attributes` and `excludedAttributes`
    /// query parameters. `attributes` takes precedence when both are given.
    pub fn from_query(attributes: Option<&str>, excluded_attributes: Option<&str>) -> Self {
        let split = |list: &str| -> Vec<String> {
            list.split(',')
                .map(str::trim)
                .filter(|path| !path.is_empty())
                .map(str::to_string)
                .collect()
        };
        match (attributes, excluded_attributes) {
            (Some(list), _) if !split(list).is_empty() => Self::Include(split(list)),
            (_, Some(list)) if !split(list).is_empty() => Self::Exclude(split(list)),
            _ => Self::Default,
        }
    }

    /// Resolve the listed paths against `schema`.
    pub(crate) fn resolve(&self, schema: &Schema) -> Result<Selection, PathError> {
        let (mode, paths) = match self {
            Self::Default => (Mode::Default, &[][..]),
            Self::Include(paths) => (Mode::Include, &paths[..]),
            Self::Exclude(paths) => (Mode::Exclude, &paths[..]),
        };

        let mut entries = Vec::with_capacity(paths.len());
        for text in paths {
            let entry = if let Some(extension) = schema.extension(text) {
                SelectedPath {
                    extension: Some(extension.schema.id().to_ascii_lowercase()),
                    names: Vec::new(),
                }
            } else {
                let resolved = path::resolve(schema, text)?;
                SelectedPath {
                    extension: resolved.extension().map(str::to_ascii_lowercase),
                    names: resolved.names(),
                }
            };
            entries.push(entry);
        }
        Ok(Selection { mode, entries })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Default,
    Include,
    Exclude,
}

/// A listed path as lowercased names under an optional extension.
#[derive(Debug, Clone)]
struct SelectedPath {
    extension: Option<String>,
    names: Vec<String>,
}

enum Decision {
    Skip,
    /// Emit the attribute; children follow the default rules when set
    Emit { default_children: bool },
    /// Emit only the selected descendants
    Descend,
}

/// A projection resolved against a schema.
#[derive(Debug, Clone)]
pub(crate) struct Selection {
    mode: Mode,
    entries: Vec<SelectedPath>,
}

impl Selection {
    /// Project the attributes of one schema (or extension) to JSON entries.
    pub(crate) fn project(
        &self,
        extension: Option<&str>,
        definitions: &[AttributeDefinition],
        values: &ComplexValue,
    ) -> Vec<(String, Value)> {
        let extension = extension.map(str::to_ascii_lowercase);
        self.project_level(extension.as_deref(), &[], definitions, values, false)
    }

    fn project_level(
        &self,
        extension: Option<&str>,
        parent: &[String],
        definitions: &[AttributeDefinition],
        values: &ComplexValue,
        default_rules: bool,
    ) -> Vec<(String, Value)> {
        let mut out = Vec::new();
        for definition in definitions {
            let Some(value) = values.get(&definition.name) else {
                continue;
            };
            let mut path = parent.to_vec();
            path.push(definition.name.to_ascii_lowercase());

            let default_children = match self.decide(extension, &path, definition, default_rules) {
                Decision::Skip => continue,
                Decision::Emit { default_children } => default_children,
                Decision::Descend => false,
            };

            if !definition.is_complex() {
                out.push((definition.name.clone(), value.to_json()));
                continue;
            }

            let project_element = |element: &TypedValue| -> Option<Value> {
                let complex = element.as_complex()?;
                let fields = self.project_level(
                    extension,
                    &path,
                    &definition.sub_attributes,
                    complex,
                    default_children,
                );
                (!fields.is_empty()).then(|| Value::Object(fields.into_iter().collect()))
            };
            let projected = match value {
                AttributeValue::Single(element) => project_element(element),
                AttributeValue::Multi(elements) => {
                    let items: Vec<Value> = elements.iter().filter_map(project_element).collect();
                    (!items.is_empty()).then_some(Value::Array(items))
                }
            };
            if let Some(projected) = projected {
                out.push((definition.name.clone(), projected));
            }
        }
        out
    }

    fn decide(
        &self,
        extension: Option<&str>,
        path: &[String],
        definition: &AttributeDefinition,
        default_rules: bool,
    ) -> Decision {
        if definition.returned == Returned::Never || definition.mutability == Mutability::WriteOnly {
            return Decision::Skip;
        }
        if definition.returned == Returned::Always {
            return Decision::Emit {
                default_children: true,
            };
        }
        let requested_only = definition.returned == Returned::Request;

        if default_rules || self.mode == Mode::Default {
            return if requested_only {
                Decision::Skip
            } else {
                Decision::Emit {
                    default_children: true,
                }
            };
        }

        let relevant = self
            .entries
            .iter()
            .filter(|entry| entry.extension.as_deref() == extension);
        let mut exact = false;
        let mut ancestor = false;
        let mut descendant = false;
        for entry in relevant {
            if entry.names == path {
                exact = true;
            } else if entry.names.len() < path.len() && path.starts_with(&entry.names) {
                ancestor = true;
            } else if entry.names.len() > path.len() && entry.names.starts_with(path) {
                descendant = true;
            }
        }

        match self.mode {
            Mode::Include if exact => Decision::Emit {
                default_children: false,
            },
            Mode::Include if ancestor && !requested_only => Decision::Emit {
                default_children: false,
            },
            Mode::Include if descendant => Decision::Descend,
            Mode::Include => Decision::Skip,
            Mode::Exclude if exact || ancestor || requested_only => Decision::Skip,
            _ => Decision::Emit {
                default_children: false,
            },
        }
    }
}
