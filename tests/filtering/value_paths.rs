//! Bracket filter, extension path and parse error tests.

use serde_json::json;

use crate::common::{self, fixtures::rfc_examples};

use scim_schema::error::{Expected, FilterError, PathError};
use scim_schema::filter::{self, FilterNode};
use scim_schema::{FilterConfig, ScimError};

fn user_with_email(registry: &scim_schema::SchemaRegistry, kind: &str) -> scim_schema::ResourceInstance {
    common::stored(
        registry,
        "User",
        &json!({
            "userName": "bjensen",
            "emails": [{"value": "bjensen@b.com", "type": kind}]
        }),
    )
}

#[test]
fn test_value_path_selects_typed_email() {
    let registry = common::registry();
    let node = registry
        .parse_filter("User", r#"emails[type eq "work"].value ew "b.com""#)
        .unwrap();

    let work = user_with_email(&registry, "work");
    let home = user_with_email(&registry, "home");
    assert!(filter::matches(&node, &work).unwrap());
    assert!(!filter::matches(&node, &home).unwrap());
}

#[test]
fn test_bare_value_path() {
    let registry = common::registry();
    let node = registry
        .parse_filter("User", r#"emails[type eq "work" and value co "@"]"#)
        .unwrap();
    assert!(matches!(node, FilterNode::ValuePath(_)));

    assert!(filter::matches(&node, &user_with_email(&registry, "work")).unwrap());
    assert!(!filter::matches(&node, &user_with_email(&registry, "other")).unwrap());
}

#[test]
fn test_value_path_with_not() {
    let registry = common::registry();
    let node = registry
        .parse_filter("User", r#"emails[not (type eq "work")]"#)
        .unwrap();
    assert!(!filter::matches(&node, &user_with_email(&registry, "work")).unwrap());
    assert!(filter::matches(&node, &user_with_email(&registry, "home")).unwrap());
}

#[test]
fn test_extension_attribute_paths() {
    let registry = common::registry();
    let user = common::stored(&registry, "User", &rfc_examples::enterprise_user());

    for (expression, expected) in [
        (
            r#"urn:ietf:params:scim:schemas:extension:enterprise:2.0:User:employeeNumber eq "701984""#,
            true,
        ),
        (
            r#"urn:ietf:params:scim:schemas:extension:enterprise:2.0:User:manager.value sw "2611""#,
            true,
        ),
        (
            r#"urn:ietf:params:scim:schemas:extension:enterprise:2.0:User:department eq "Sales""#,
            false,
        ),
        (r#"urn:ietf:params:scim:schemas:core:2.0:User:userName eq "bjensen@example.com""#, true),
        (r#"addresses[type eq "work"].country eq "usa""#, true),
        (r#"phoneNumbers[type eq "mobile"]"#, true),
        (r#"ims[type eq "skype"]"#, false),
    ] {
        let node = registry.parse_filter("User", expression).unwrap();
        assert_eq!(filter::matches(&node, &user).unwrap(), expected, "filter: {expression}");
    }
}

#[test]
fn test_group_member_filter() {
    let registry = common::registry();
    let group = common::stored(&registry, "Group", &rfc_examples::group());
    let node = registry
        .parse_filter("Group", r#"members[value eq "902c246b-6245-4190-8e05-00816be7344a"]"#)
        .unwrap();
    assert!(filter::matches(&node, &group).unwrap());
}

#[test]
fn test_syntax_errors_carry_position() {
    let registry = common::registry();
    let cases = [
        (r#"userName eq "bjensen"#, 20, Expected::ClosingQuote),
        (r#"(userName eq "x""#, 16, Expected::ClosingParenthesis),
        ("userName eq", 11, Expected::Literal),
        (r#"userName eq "x" and"#, 19, Expected::Expression),
        (r#"userName eq "x")"#, 15, Expected::Connective),
        ("userName", 8, Expected::Operator),
    ];

    for (expression, position, expected) in cases {
        let schema = registry.get("User").unwrap();
        match filter::parse(schema, expression) {
            Err(FilterError::Syntax(error)) => {
                assert_eq!(error.position, position, "filter: {expression}");
                assert_eq!(error.expected, expected, "filter: {expression}");
            }
            other => panic!("'{expression}' should be a syntax error, got {:?}", other),
        }
    }
}

#[test]
fn test_unknown_attribute_in_filter() {
    let registry = common::registry();
    match registry.parse_filter("User", "shoeSize gt 40") {
        Err(ScimError::Filter(FilterError::Path(PathError::UnknownAttribute { path }))) => {
            assert_eq!(path, "shoeSize");
        }
        other => panic!("Expected unknown attribute, got {:?}", other),
    }
}

#[test]
fn test_bracket_on_single_valued_attribute() {
    let registry = common::registry();
    assert!(matches!(
        registry.parse_filter("User", r#"name[givenName eq "Barbara"]"#),
        Err(ScimError::Filter(FilterError::Syntax(_)))
    ));
}

#[test]
fn test_configured_depth_limit() {
    let registry = common::registry().with_filter_config(FilterConfig::default().with_max_depth(2));

    assert!(registry.parse_filter("User", "((userName pr))").is_ok());
    match registry.parse_filter("User", "(((userName pr)))") {
        Err(ScimError::Filter(FilterError::TooDeep {
            position,
            max_depth,
        })) => {
            assert_eq!(position, 2);
            assert_eq!(max_depth, 2);
        }
        other => panic!("Expected TooDeep, got {:?}", other),
    }
}

#[test]
fn test_parsed_filter_displays_normalized() {
    let registry = common::registry();
    let node = registry
        .parse_filter("User", r#"userName EQ "bjensen" AND NOT (title pr)"#)
        .unwrap();
    assert_eq!(node.to_string(), r#"userName eq "bjensen" and not (title pr)"#);
}
