//! Filter evaluation against resource instances.
//!
//! Comparisons follow the attribute's type: strings honour `caseExact`,
//! numbers and timestamps compare by value, and a multi-valued attribute
//! matches when any of its values does. Literals are typed once, when the
//! filter is parsed; a literal that does not fit its attribute is reported
//! before any data is looked at, even when `and`/`or` would have
//! short-circuited past it.

use super::ast::{CompareOp, FilterNode, Literal, Operand};
use crate::error::EvaluationError;
use crate::path::ResolvedPath;
use crate::resource::{ComplexValue, ResourceInstance, TypedValue};
use crate::schema::{AttributeDefinition, AttributeType};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::DateTime;
use std::cmp::Ordering;

/// Evaluate `node` against `resource`.
pub fn matches(node: &FilterNode<'_>, resource: &ResourceInstance) -> Result<bool, EvaluationError> {
    check_types(node)?;
    evaluate(node, Root::Resource(resource))
}

/// Evaluate a bracket filter against one element of a multi-valued attribute.
///
/// The filter must already have passed [`check_path_filters`].
pub(crate) fn element_matches(
    node: &FilterNode<'_>,
    element: &ComplexValue,
) -> Result<bool, EvaluationError> {
    evaluate(node, Root::Element(element))
}

/// Where paths start: a whole resource, or one complex element inside a
/// bracket filter.
#[derive(Clone, Copy)]
enum Root<'a> {
    Resource(&'a ResourceInstance),
    Element(&'a ComplexValue),
}

impl<'a> Root<'a> {
    fn attributes(self, extension: Option<&str>) -> Option<&'a ComplexValue> {
        match self {
            Self::Resource(resource) => resource.root(extension),
            Self::Element(element) => extension.is_none().then_some(element),
        }
    }
}

/// First unsupported comparison in the tree, including bracket filters.
fn check_types(node: &FilterNode<'_>) -> Result<(), EvaluationError> {
    match node {
        FilterNode::Comparison { path, operand, .. } => {
            check_path_filters(path)?;
            operand.as_ref().map(|_| ()).map_err(Clone::clone)
        }
        FilterNode::Present(path) | FilterNode::ValuePath(path) => check_path_filters(path),
        FilterNode::And(left, right) | FilterNode::Or(left, right) => {
            check_types(left)?;
            check_types(right)
        }
        FilterNode::Not(inner) | FilterNode::Grouping(inner) => check_types(inner),
    }
}

/// Check the bracket filters along `path`.
pub(crate) fn check_path_filters(path: &ResolvedPath<'_>) -> Result<(), EvaluationError> {
    for step in path.steps() {
        if let Some(filter) = &step.filter {
            check_types(filter)?;
        }
    }
    Ok(())
}

fn evaluate(node: &FilterNode<'_>, root: Root<'_>) -> Result<bool, EvaluationError> {
    match node {
        FilterNode::Comparison {
            path,
            operator,
            operand,
            ..
        } => {
            let operand = operand.as_ref().map_err(Clone::clone)?;
            compare(path, *operator, operand, root)
        }
        FilterNode::Present(path) => present(path, root),
        FilterNode::ValuePath(path) => Ok(!collect(path, root)?.is_empty()),
        FilterNode::And(left, right) => Ok(evaluate(left, root)? && evaluate(right, root)?),
        FilterNode::Or(left, right) => Ok(evaluate(left, root)? || evaluate(right, root)?),
        FilterNode::Not(inner) => Ok(!evaluate(inner, root)?),
        FilterNode::Grouping(inner) => evaluate(inner, root),
    }
}

/// `pr`: a multi-valued complex attribute needs an element with a non-empty
/// `value`; anything else needs a non-empty value.
fn present(path: &ResolvedPath<'_>, root: Root<'_>) -> Result<bool, EvaluationError> {
    let target = path.target();
    let values = collect(path, root)?;
    if target.multi_valued && target.sub_attribute("value").is_some() {
        return Ok(values
            .iter()
            .filter_map(|v| v.as_complex())
            .any(|element| element.get("value").is_some_and(|value| !value.is_empty())));
    }
    Ok(values.iter().any(|v| !v.is_empty()))
}

/// All values the path reaches, after applying bracket filters.
fn collect<'a>(
    path: &ResolvedPath<'_>,
    root: Root<'a>,
) -> Result<Vec<&'a TypedValue>, EvaluationError> {
    let Some(start) = root.attributes(path.extension()) else {
        return Ok(Vec::new());
    };
    let steps = path.steps();
    let mut containers: Vec<&'a ComplexValue> = vec![start];
    let mut values: Vec<&'a TypedValue> = Vec::new();

    for (position, step) in steps.iter().enumerate() {
        values.clear();
        for &container in &containers {
            let Some(value) = container.get(&step.attribute.name) else {
                continue;
            };
            for element in value.values() {
                if let Some(filter) = &step.filter {
                    let Some(complex) = element.as_complex() else {
                        continue;
                    };
                    if !evaluate(filter, Root::Element(complex))? {
                        continue;
                    }
                }
                values.push(element);
            }
        }
        if position + 1 < steps.len() {
            containers = values.iter().copied().filter_map(TypedValue::as_complex).collect();
        }
    }
    Ok(values)
}

/// Definition whose values a comparison on `path` looks at: the target
/// itself, or its `value` sub-attribute when the target is complex.
fn compared_definition<'s>(path: &ResolvedPath<'s>) -> Option<&'s AttributeDefinition> {
    let target = path.target();
    if target.is_complex() {
        target.sub_attribute("value")
    } else {
        Some(target)
    }
}

/// Convert `literal` to the type of the attribute `path` compares, checking
/// that `operator` is defined for that type.
///
/// String literals go through the attribute's profile, as stored values do.
pub(crate) fn type_literal(
    path: &ResolvedPath<'_>,
    operator: CompareOp,
    literal: &Literal,
) -> Result<Operand, EvaluationError> {
    let definition = compared_definition(path);
    let data_type = definition.map_or(AttributeType::Complex, |d| d.data_type);
    let unsupported = || EvaluationError::UnsupportedOperatorForType {
        attribute: path.to_string(),
        operator: operator.to_string(),
        data_type: data_type.to_string(),
        literal: literal.kind().to_string(),
    };

    let operator_supported = match data_type {
        AttributeType::Complex => false,
        _ if operator.is_substring() => {
            matches!(data_type, AttributeType::String | AttributeType::Reference)
        }
        _ if operator.is_ordering() => matches!(
            data_type,
            AttributeType::String
                | AttributeType::DateTime
                | AttributeType::Integer
                | AttributeType::Decimal
        ),
        _ => true,
    };
    if !operator_supported {
        return Err(unsupported());
    }

    let operand = match (definition, data_type, literal) {
        (_, _, Literal::Null) if matches!(operator, CompareOp::Equal | CompareOp::NotEqual) => {
            Operand::Null
        }
        (Some(definition), AttributeType::String, Literal::String(text)) if !text.is_empty() => {
            match definition.profile.enforce(text) {
                Ok(prepared) => Operand::Text(prepared),
                Err(_) => Operand::Unmatchable,
            }
        }
        (_, AttributeType::String | AttributeType::Reference, Literal::String(text)) => {
            Operand::Text(text.clone())
        }
        (_, AttributeType::Boolean, Literal::Boolean(b)) => Operand::Boolean(*b),
        (_, AttributeType::Integer, Literal::Number(n)) => match n.as_i64() {
            Some(i) => Operand::Integer(i),
            None => Operand::Decimal(n.as_f64().ok_or_else(unsupported)?),
        },
        (_, AttributeType::Decimal, Literal::Number(n)) => {
            Operand::Decimal(n.as_f64().ok_or_else(unsupported)?)
        }
        (_, AttributeType::DateTime, Literal::String(text)) => DateTime::parse_from_rfc3339(text)
            .map(Operand::DateTime)
            .map_err(|_| unsupported())?,
        (_, AttributeType::Binary, Literal::String(text)) => STANDARD
            .decode(text)
            .map(Operand::Binary)
            .map_err(|_| unsupported())?,
        _ => return Err(unsupported()),
    };
    Ok(operand)
}

fn compare(
    path: &ResolvedPath<'_>,
    operator: CompareOp,
    operand: &Operand,
    root: Root<'_>,
) -> Result<bool, EvaluationError> {
    let case_exact = compared_definition(path).is_some_and(|d| d.case_exact);

    let mut values = collect(path, root)?;
    if path.target().is_complex() {
        values = values
            .into_iter()
            .filter_map(TypedValue::as_complex)
            .filter_map(|complex| complex.get("value"))
            .flat_map(|value| value.values())
            .collect();
    }

    if let Operand::Null = operand {
        let has_value = values.iter().any(|v| !v.is_empty());
        return Ok(match operator {
            CompareOp::NotEqual => has_value,
            _ => !has_value,
        });
    }
    Ok(values
        .iter()
        .any(|value| satisfies(value, operator, operand, case_exact)))
}

fn satisfies(value: &TypedValue, operator: CompareOp, operand: &Operand, case_exact: bool) -> bool {
    match (value, operand) {
        (_, Operand::Unmatchable) => operator == CompareOp::NotEqual,
        (TypedValue::String(s) | TypedValue::Reference(s), Operand::Text(t)) => {
            test_text(s, t, operator, case_exact)
        }
        (TypedValue::Boolean(a), Operand::Boolean(b)) => test_ordering(Some(a.cmp(b)), operator),
        (TypedValue::Integer(a), Operand::Integer(b)) => test_ordering(Some(a.cmp(b)), operator),
        (TypedValue::Integer(a), Operand::Decimal(b)) => {
            test_ordering((*a as f64).partial_cmp(b), operator)
        }
        (TypedValue::Decimal(a), Operand::Decimal(b)) => test_ordering(a.partial_cmp(b), operator),
        (TypedValue::Decimal(a), Operand::Integer(b)) => {
            test_ordering(a.partial_cmp(&(*b as f64)), operator)
        }
        (TypedValue::DateTime(a), Operand::DateTime(b)) => test_ordering(Some(a.cmp(b)), operator),
        (TypedValue::Binary(a), Operand::Binary(b)) => test_ordering(Some(a.cmp(b)), operator),
        _ => false,
    }
}

fn test_text(value: &str, literal: &str, operator: CompareOp, case_exact: bool) -> bool {
    let (value, literal) = if case_exact {
        (value.to_string(), literal.to_string())
    } else {
        (value.to_lowercase(), literal.to_lowercase())
    };
    match operator {
        CompareOp::Contains => value.contains(&literal),
        CompareOp::StartsWith => value.starts_with(&literal),
        CompareOp::EndsWith => value.ends_with(&literal),
        _ => test_ordering(Some(value.cmp(&literal)), operator),
    }
}

fn test_ordering(ordering: Option<Ordering>, operator: CompareOp) -> bool {
    let Some(ordering) = ordering else {
        return false;
    };
    match operator {
        CompareOp::Equal => ordering == Ordering::Equal,
        CompareOp::NotEqual => ordering != Ordering::Equal,
        CompareOp::GreaterThan => ordering == Ordering::Greater,
        CompareOp::GreaterOrEqual => ordering != Ordering::Less,
        CompareOp::LessThan => ordering == Ordering::Less,
        CompareOp::LessOrEqual => ordering != Ordering::Greater,
        CompareOp::Contains | CompareOp::StartsWith | CompareOp::EndsWith => false,
    }
}

/// Order two values of the attribute `definition` the way comparisons do.
pub(crate) fn compare_values(
    definition: &AttributeDefinition,
    a: &TypedValue,
    b: &TypedValue,
) -> Option<Ordering> {
    match (a, b) {
        (
            TypedValue::String(a) | TypedValue::Reference(a),
            TypedValue::String(b) | TypedValue::Reference(b),
        ) => Some(if definition.case_exact {
            a.cmp(b)
        } else {
            a.to_lowercase().cmp(&b.to_lowercase())
        }),
        (TypedValue::Integer(a), TypedValue::Integer(b)) => Some(a.cmp(b)),
        (TypedValue::Integer(a), TypedValue::Decimal(b)) => (*a as f64).partial_cmp(b),
        (TypedValue::Decimal(a), TypedValue::Integer(b)) => a.partial_cmp(&(*b as f64)),
        (TypedValue::Decimal(a), TypedValue::Decimal(b)) => a.partial_cmp(b),
        (TypedValue::DateTime(a), TypedValue::DateTime(b)) => Some(a.cmp(b)),
        (TypedValue::Boolean(a), TypedValue::Boolean(b)) => Some(a.cmp(b)),
        (TypedValue::Binary(a), TypedValue::Binary(b)) => Some(a.cmp(b)),
        _ => None,
    }
}
