//! Property-Based Testing for filter parsing
//!
//! Malformed filters must fail with a syntax error whose position lies inside
//! the input, and arbitrary input must never make the parser panic.

use crate::common;
use proptest::prelude::*;
use scim_schema::error::FilterError;
use scim_schema::filter;

/// Strategy for well-formed filters over the core User schema
fn valid_filter_strategy() -> impl Strategy<Value = String> {
    let attribute = prop::sample::select(vec![
        "userName", "title", "name.givenName", "emails.value", "emails.type", "displayName",
    ]);
    let operator = prop::sample::select(vec!["eq", "ne", "co", "sw", "ew", "gt", "ge", "lt", "le"]);
    let leaf = (attribute, operator, "[a-z]{0,8}")
        .prop_map(|(attribute, operator, literal)| format!("{attribute} {operator} \"{literal}\""));
    leaf.prop_recursive(3, 12, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(l, r)| format!("{l} and {r}")),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| format!("{l} or {r}")),
            inner.clone().prop_map(|f| format!("not ({f})")),
            inner.prop_map(|f| format!("({f})")),
        ]
    })
}

/// Strategy for filters broken in one of several ways
fn malformed_filter_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        valid_filter_strategy().prop_map(|f| format!("({f}")),
        valid_filter_strategy().prop_map(|f| format!("{f})")),
        valid_filter_strategy().prop_map(|f| format!("{f} and")),
        valid_filter_strategy().prop_map(|f| format!("{f} or (")),
        "[a-z]{0,8}".prop_map(|s| format!("userName eq \"{s}")),
        Just("userName eq".to_string()),
        Just("userName".to_string()),
        Just(String::new()),
        Just("emails[type eq].value pr".to_string()),
        Just("emails[(type pr].value pr".to_string()),
        "[a-z]{1,8}".prop_map(|s| format!("userName pr and emails[type eq \"{s}\" {s}].value pr")),
    ]
}

proptest! {
    #[test]
    fn test_valid_filters_parse(expression in valid_filter_strategy()) {
        let registry = common::registry();
        let schema = registry.get("User").unwrap();
        prop_assert!(filter::parse(schema, &expression).is_ok(), "{}", expression);
    }

    #[test]
    fn test_malformed_filters_report_position(expression in malformed_filter_strategy()) {
        let registry = common::registry();
        let schema = registry.get("User").unwrap();
        match filter::parse(schema, &expression) {
            Err(FilterError::Syntax(error)) => prop_assert!(error.position <= expression.len()),
            other => prop_assert!(false, "'{}' should be a syntax error, got {:?}", expression, other),
        }
    }

    #[test]
    fn test_arbitrary_input_never_panics(expression in "[a-zA-Z \"()\\[\\].:0-9]{0,40}") {
        let registry = common::registry();
        let schema = registry.get("User").unwrap();
        if let Err(error) = filter::parse(schema, &expression) {
            if let Some(position) = error.position() {
                prop_assert!(position <= expression.len());
            }
        }
    }
}
