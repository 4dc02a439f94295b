//! Attribute path resolution.
//!
//! Paths address attributes of a schema:
//!
//! ```text
//! path    = [schema-uri ":"] segment *("." segment)
//! segment = attrname ["[" filter "]"]
//! ```
//!
//! `name.givenName`, `emails[type eq "work"].value` and
//! `urn:ietf:params:scim:schemas:extension:enterprise:2.0:User:employeeNumber`
//! are all valid against the core User schema. Resolution checks every segment
//! against the schema and parses bracket filters with the multi-valued
//! attribute as their scope, so a [`ResolvedPath`] can be evaluated without
//! further lookups.

use crate::error::PathError;
use crate::filter::{FilterConfig, FilterNode, parser};
use crate::schema::{AttributeDefinition, Schema};
use std::fmt;

/// One resolved segment of a path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathStep<'s> {
    /// Definition the segment resolved to
    pub attribute: &'s AttributeDefinition,
    /// Bracket filter selecting elements of a multi-valued complex attribute
    pub filter: Option<FilterNode<'s>>,
}

/// A path resolved against a schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPath<'s> {
    extension: Option<&'s str>,
    steps: Vec<PathStep<'s>>,
}

impl<'s> ResolvedPath<'s> {
    /// Identifier of the extension schema the path is rooted in, if any.
    pub fn extension(&self) -> Option<&'s str> {
        self.extension
    }

    /// Steps from the outermost attribute inwards; never empty.
    pub fn steps(&self) -> &[PathStep<'s>] {
        &self.steps
    }

    /// Definition of the attribute the path ends at.
    pub fn target(&self) -> &'s AttributeDefinition {
        // resolution never produces an empty path
        self.steps[self.steps.len() - 1].attribute
    }

    /// Whether the last segment carries a bracket filter.
    pub fn ends_with_filter(&self) -> bool {
        self.steps.last().is_some_and(|step| step.filter.is_some())
    }

    /// Lowercased attribute names along the path.
    pub(crate) fn names(&self) -> Vec<String> {
        self.steps
            .iter()
            .map(|step| step.attribute.name.to_ascii_lowercase())
            .collect()
    }
}

impl fmt::Display for ResolvedPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(extension) = self.extension {
            write!(f, "{extension}:")?;
        }
        for (position, step) in self.steps.iter().enumerate() {
            if position > 0 {
                f.write_str(".")?;
            }
            f.write_str(&step.attribute.name)?;
            if let Some(filter) = &step.filter {
                write!(f, "[{filter}]")?;
            }
        }
        Ok(())
    }
}

/// What the first segment of a path is looked up in.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Scope<'s> {
    /// Top-level attributes of a schema and its extensions
    Schema(&'s Schema),
    /// Sub-attributes of a complex attribute, inside a bracket filter
    Complex(&'s AttributeDefinition),
}

/// Resolve `path` against `schema`.
pub fn resolve<'s>(schema: &'s Schema, path: &str) -> Result<ResolvedPath<'s>, PathError> {
    resolve_in(Scope::Schema(schema), path, &FilterConfig::default(), 0)
}

pub(crate) fn resolve_in<'s>(
    scope: Scope<'s>,
    path: &str,
    config: &FilterConfig,
    depth: usize,
) -> Result<ResolvedPath<'s>, PathError> {
    let (extension, scope, start) = split_schema_prefix(scope, path)?;

    let mut steps: Vec<PathStep<'s>> = Vec::new();
    let bytes = path.as_bytes();
    let mut position = start;

    loop {
        let name_start = position;
        while position < bytes.len() && is_name_byte(bytes[position]) {
            position += 1;
        }
        if position == name_start {
            let reason = if position == bytes.len() {
                "expected attribute name"
            } else {
                "unexpected character"
            };
            return Err(PathError::syntax(path, position, reason));
        }
        let name = &path[name_start..position];

        let attribute = match steps.last() {
            None => match scope {
                Scope::Schema(schema) => schema.get(name),
                Scope::Complex(parent) => parent.sub_attribute(name),
            },
            Some(parent) => parent.attribute.sub_attribute(name),
        }
        .ok_or_else(|| PathError::unknown(path))?;

        let mut filter = None;
        if position < bytes.len() && bytes[position] == b'[' {
            if !(attribute.multi_valued && attribute.is_complex()) {
                return Err(PathError::syntax(
                    path,
                    position,
                    "filters are only allowed on multi-valued complex attributes",
                ));
            }
            let close = find_closing_bracket(path, position)?;
            let inner = &path[position + 1..close];
            let node = parser::parse_scoped(Scope::Complex(attribute), inner, config, depth + 1)
                .map_err(|source| PathError::Filter {
                    path: path.to_string(),
                    source: Box::new(source.shifted(position + 1)),
                })?;
            filter = Some(node);
            position = close + 1;
        }

        steps.push(PathStep { attribute, filter });

        match bytes.get(position) {
            None => break,
            Some(b'.') => position += 1,
            Some(_) => return Err(PathError::syntax(path, position, "expected '.' or end of path")),
        }
    }

    Ok(ResolvedPath { extension, steps })
}

/// Split a leading schema URI off `path`.
///
/// The base schema's own URI is accepted and ignored; an extension URI moves
/// the scope into that extension.
fn split_schema_prefix<'s>(
    scope: Scope<'s>,
    path: &str,
) -> Result<(Option<&'s str>, Scope<'s>, usize), PathError> {
    let Scope::Schema(schema) = scope else {
        return Ok((None, scope, 0));
    };
    if !path
        .get(..4)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("urn:"))
    {
        return Ok((None, scope, 0));
    }

    if has_uri_prefix(path, schema.id()) {
        return Ok((None, scope, schema.id().len() + 1));
    }
    for extension in schema.extensions() {
        let uri = extension.schema.id();
        if has_uri_prefix(path, uri) {
            return Ok((Some(uri), Scope::Schema(&extension.schema), uri.len() + 1));
        }
    }
    Err(PathError::unknown(path))
}

fn has_uri_prefix(path: &str, uri: &str) -> bool {
    path.get(..uri.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(uri))
        && path.as_bytes().get(uri.len()) == Some(&b':')
}

fn is_name_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'_' | b'-' | b'$')
}

/// Byte offset of the `]` closing the `[` at `open`, skipping quoted strings.
fn find_closing_bracket(path: &str, open: usize) -> Result<usize, PathError> {
    let bytes = path.as_bytes();
    let mut position = open + 1;
    let mut in_string = false;
    while position < bytes.len() {
        match (in_string, bytes[position]) {
            (true, b'\\') => position += 1,
            (true, b'"') => in_string = false,
            (false, b'"') => in_string = true,
            (false, b']') => return Ok(position),
            _ => {}
        }
        position += 1;
    }
    Err(PathError::syntax(path, path.len(), "unterminated '['"))
}
