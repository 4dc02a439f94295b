//! Resource validation tests.
//!
//! RFC 7643 User, Enterprise User and Group payloads validated through the
//! registry, plus the value formats attached to core attributes.

use serde_json::json;

use crate::common::{
    self,
    builders::{GroupBuilder, UserBuilder},
    fixtures::rfc_examples,
};

use scim_schema::resource::TypedValue;
use scim_schema::schema::ENTERPRISE_USER_SCHEMA_ID;
use scim_schema::{IssueKind, ScimError, ValidationOptions};

#[test]
fn test_missing_user_name_is_the_only_issue() {
    let registry = common::registry();
    let payload = UserBuilder::new().without_username().build();

    match common::create(&registry, "User", &payload) {
        Err(ScimError::Validation(issues)) => {
            let issues = issues.into_vec();
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0].kind, IssueKind::MissingRequiredAttribute);
            assert_eq!(issues[0].path, "userName");
        }
        other => panic!("Expected missing userName, got {:?}", other),
    }
}

#[test]
fn test_minimal_rfc_user() {
    let registry = common::registry();
    let user = common::stored(&registry, "User", &rfc_examples::user_minimal());

    let created = user
        .get("meta")
        .and_then(|meta| meta.values().first())
        .and_then(TypedValue::as_complex)
        .and_then(|meta| meta.get("created"))
        .map(|created| created.values()[0].clone());
    assert!(matches!(created, Some(TypedValue::DateTime(_))));
}

#[test]
fn test_enterprise_rfc_user() {
    let registry = common::registry();
    let user = common::stored(&registry, "User", &rfc_examples::enterprise_user());

    assert_eq!(user.schemas().len(), 2);
    let enterprise = user.extension(ENTERPRISE_USER_SCHEMA_ID).expect("extension values");
    assert_eq!(
        enterprise.get("costCenter").unwrap().values()[0].as_str(),
        Some("4130")
    );
    assert!(matches!(
        user.get("x509Certificates").unwrap().values()[0]
            .as_complex()
            .unwrap()
            .get("value")
            .unwrap()
            .values()[0],
        TypedValue::Binary(ref bytes) if bytes == b"Hello World"
    ));
}

#[test]
fn test_rfc_group() {
    let registry = common::registry();
    let group = common::stored(&registry, "Group", &rfc_examples::group());
    assert_eq!(group.get("members").unwrap().values().len(), 2);
}

#[test]
fn test_group_builder_payload() {
    let registry = common::registry();
    let payload = GroupBuilder::new("Tour Guides")
        .with_member("2819c223", "User")
        .with_member("e9e30dba", "Group")
        .build();
    crate::assert_validation_success!(common::create(&registry, "Group", &payload));

    let payload = GroupBuilder::new("Tour Guides")
        .with_member("2819c223", "Robot")
        .build();
    crate::assert_issue!(
        common::create(&registry, "Group", &payload),
        IssueKind::InvalidCanonicalValue,
        "members.type"
    );
}

#[test]
fn test_phone_numbers() {
    let registry = common::registry();

    let payload = UserBuilder::new().with_phone_number("+1-202-555-0191").build();
    crate::assert_validation_success!(common::create(&registry, "User", &payload));

    let payload = UserBuilder::new().with_phone_number("not-a-number").build();
    crate::assert_issue!(
        common::create(&registry, "User", &payload),
        IssueKind::InvalidPhoneNumber,
        "phoneNumbers.value"
    );
}

#[test]
fn test_national_phone_number_with_region() {
    let registry = common::registry();
    let payload = UserBuilder::new().with_phone_number("(202) 555-0191").build();

    assert!(common::create(&registry, "User", &payload).is_err());

    let options = ValidationOptions::default().with_default_phone_region("US");
    assert!(registry.validate("User", &payload, &options).is_ok());
}

#[test]
fn test_country_codes() {
    let registry = common::registry();

    for country in ["US", "us", "USA", "840"] {
        let payload = UserBuilder::new().with_address_country(country).build();
        crate::assert_validation_success!(common::create(&registry, "User", &payload));
    }

    let payload = UserBuilder::new().with_address_country("ZZ").build();
    crate::assert_issue!(
        common::create(&registry, "User", &payload),
        IssueKind::InvalidCountryCode,
        "addresses.country"
    );
}

#[test]
fn test_issue_index_points_at_element() {
    let registry = common::registry();
    let payload = UserBuilder::new()
        .with_address_country("NZ")
        .with_address_country("XX")
        .build();

    match common::create(&registry, "User", &payload) {
        Err(ScimError::Validation(issues)) => {
            let issue = issues.iter().next().unwrap();
            assert_eq!(issue.index, Some(1));
            assert_eq!(issue.path, "addresses.country");
        }
        other => panic!("Expected country code issue, got {:?}", other),
    }
}

#[test]
fn test_data_type_issues() {
    let registry = common::registry();
    let cases = [
        ("active", json!("true"), IssueKind::InvalidType),
        ("displayName", json!(7), IssueKind::InvalidType),
        ("profileUrl", json!("not a url"), IssueKind::InvalidValue),
        ("profileUrl", json!("/relative/photo"), IssueKind::InvalidValue),
        ("emails", json!({"value": "a@example.com"}), IssueKind::MultiplicityMismatch),
        ("name", json!([{"givenName": "Barbara"}]), IssueKind::MultiplicityMismatch),
        ("name", json!("Barbara"), IssueKind::InvalidType),
    ];

    for (attribute, value, kind) in cases {
        let payload = UserBuilder::new().with_attribute(attribute, value.clone()).build();
        crate::assert_issue!(common::create(&registry, "User", &payload), kind, attribute);
    }
}

#[test]
fn test_string_profiles() {
    let registry = common::registry();

    let payload = UserBuilder::new().with_username("bjensen example").build();
    crate::assert_issue!(
        common::create(&registry, "User", &payload),
        IssueKind::InvalidStringProfile,
        "userName"
    );

    let payload = UserBuilder::new().with_username("ｂｊｅｎｓｅｎ").build();
    let user = crate::assert_validation_success!(common::create(&registry, "User", &payload));
    assert_eq!(user.to_json()["userName"], "bjensen");

    let payload = UserBuilder::new()
        .with_attribute("displayName", json!("Babs\u{00A0}Jensen"))
        .build();
    let user = crate::assert_validation_success!(common::create(&registry, "User", &payload));
    assert_eq!(user.to_json()["displayName"], "Babs Jensen");
}

#[test]
fn test_enterprise_extension_payload() {
    let registry = common::registry();
    let payload = UserBuilder::new()
        .with_enterprise(json!({"employeeNumber": "701984", "manager": {"value": "26118915"}}))
        .build();
    let user = crate::assert_validation_success!(common::create(&registry, "User", &payload));
    assert!(user.extension(ENTERPRISE_USER_SCHEMA_ID).is_some());

    let payload = UserBuilder::new()
        .with_enterprise(json!({"manager": {"value": "26118915", "displayName": "John Smith"}}))
        .build();
    crate::assert_issue!(
        common::create(&registry, "User", &payload),
        IssueKind::ReadOnlyViolation,
        format!("{ENTERPRISE_USER_SCHEMA_ID}:manager.displayName")
    );
}

#[test]
fn test_unknown_schema_id() {
    let registry = common::registry();
    let result = registry.validate("Device", &json!({}), &ValidationOptions::default());
    assert!(matches!(result, Err(ScimError::SchemaNotFound { .. })));
}
