//! Ordering of resource instances by `sortBy` / `sortOrder`.
//!
//! Values compare exactly as they do in filters: strings honour `caseExact`,
//! numbers and timestamps by value. A multi-valued attribute sorts by its
//! `primary` element, or its first element when none is marked primary.
//!
//! ```rust
//! use scim_schema::schema::SchemaRegistry;
//! use scim_schema::sort::{SortOrder, Sorter};
//! use scim_schema::validation::ValidationOptions;
//! use serde_json::json;
//!
//! let registry = SchemaRegistry::with_core_schemas().unwrap();
//! let schema = registry.get("User").unwrap();
//! let options = ValidationOptions::default();
//! let mut users = vec![
//!     registry.validate(schema.id(), &json!({"userName": "mike"}), &options).unwrap(),
//!     registry.validate(schema.id(), &json!({"userName": "Alice"}), &options).unwrap(),
//! ];
//!
//! Sorter::new(schema, "userName", SortOrder::Ascending).unwrap().sort(&mut users);
//! assert_eq!(users[0].to_json()["userName"], "Alice");
//! ```

use crate::error::{PathError, ScimResult};
use crate::filter::eval::{check_path_filters, compare_values, element_matches};
use crate::path::{self, ResolvedPath};
use crate::resource::{ComplexValue, ResourceInstance, TypedValue};
use crate::schema::{AttributeDefinition, Schema};
use log::trace;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Direction of a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// A `sortBy` path resolved against a schema.
#[derive(Debug, Clone)]
pub struct Sorter<'s> {
    path: ResolvedPath<'s>,
    key: &'s AttributeDefinition,
    order: SortOrder,
}

impl<'s> Sorter<'s> {
    /// Resolve `sort_by` against `schema`.
    ///
    /// Fails with a path error for an unknown attribute and with an
    /// evaluation error when a bracket filter compares against the wrong type.
    pub fn new(schema: &'s Schema, sort_by: &str, order: SortOrder) -> ScimResult<Self> {
        let path = path::resolve(schema, sort_by)?;
        check_path_filters(&path)?;
        let target = path.target();
        let key = if target.is_complex() {
            target
                .sub_attribute("value")
                .ok_or_else(|| PathError::unknown(format!("{sort_by}.value")))?
        } else {
            target
        };
        Ok(Self { path, key, order })
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    /// Sort `resources` in place; resources with equal keys keep their order.
    pub fn sort(&self, resources: &mut [ResourceInstance]) {
        trace!(
            "Sorting {} resource(s) by {} ({:?})",
            resources.len(),
            self.path,
            self.order
        );
        resources.sort_by(|a, b| self.compare(a, b));
    }

    /// Compare two resources by this sorter's key and direction.
    pub fn compare(&self, a: &ResourceInstance, b: &ResourceInstance) -> Ordering {
        let ordering = match (self.sort_key(a), self.sort_key(b)) {
            (Some(a), Some(b)) => compare_values(self.key, a, b).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        match self.order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }

    fn sort_key<'r>(&self, resource: &'r ResourceInstance) -> Option<&'r TypedValue> {
        let mut container = resource.root(self.path.extension())?;
        let steps = self.path.steps();
        let mut chosen = None;

        for (position, step) in steps.iter().enumerate() {
            let value = container.get(&step.attribute.name)?;
            let candidates: Vec<&TypedValue> = value
                .values()
                .iter()
                .filter(|element| match (&step.filter, element.as_complex()) {
                    (None, _) => true,
                    // filters were type-checked in `new`
                    (Some(filter), Some(complex)) => {
                        element_matches(filter, complex).unwrap_or(false)
                    }
                    (Some(_), None) => false,
                })
                .collect();
            let element = pick(&candidates)?;
            if position + 1 < steps.len() {
                container = element.as_complex()?;
            } else {
                chosen = Some(element);
            }
        }

        let chosen = chosen?;
        let key = match chosen.as_complex() {
            Some(complex) => complex.get("value")?.values().first()?,
            None => chosen,
        };
        (!key.is_empty()).then_some(key)
    }
}

/// The element marked primary, else the first.
fn pick<'r>(candidates: &[&'r TypedValue]) -> Option<&'r TypedValue> {
    candidates
        .iter()
        .copied()
        .find(|element| element.as_complex().is_some_and(is_primary))
        .or_else(|| candidates.first().copied())
}

fn is_primary(element: &ComplexValue) -> bool {
    element
        .get("primary")
        .and_then(|primary| primary.values().first())
        .and_then(TypedValue::as_bool)
        == Some(true)
}
