//! Attribute characteristic tests.
//!
//! Mutability per validation context, returnability in dumped output and the
//! unknown-attribute policies.

use serde_json::json;

use crate::common::{self, builders::UserBuilder, fixtures::rfc_examples};

use scim_schema::validation::UnknownAttributePolicy;
use scim_schema::{
    AttributeProjection, IssueKind, ScimError, ValidationContext, ValidationOptions,
};

#[test]
fn test_client_supplied_id_rejected_on_create_and_update() {
    let registry = common::registry();
    let payload = UserBuilder::new()
        .with_attribute("id", json!("2819c223"))
        .build();

    for context in [ValidationContext::Create, ValidationContext::Update] {
        let options = ValidationOptions::default().with_context(context);
        crate::assert_issue!(
            registry.validate("User", &payload, &options),
            IssueKind::ReadOnlyViolation,
            "id"
        );
    }
}

#[test]
fn test_client_supplied_meta_rejected() {
    let registry = common::registry();
    let payload = UserBuilder::new()
        .with_attribute("meta", json!({"resourceType": "User"}))
        .build();
    crate::assert_issue!(
        common::create(&registry, "User", &payload),
        IssueKind::ReadOnlyViolation,
        "meta"
    );
}

#[test]
fn test_stored_representation_accepts_read_only() {
    let registry = common::registry();
    let user = common::stored(&registry, "User", &rfc_examples::user_minimal());
    assert!(user.get("id").is_some());
    assert!(user.get("meta").is_some());
}

#[test]
fn test_password_is_write_only() {
    let registry = common::registry();
    let schema = registry.get("User").unwrap();
    let payload = UserBuilder::new()
        .with_attribute("password", json!("t1meMa$heen"))
        .build();

    let user = crate::assert_validation_success!(common::create(&registry, "User", &payload));
    let dumped = user.dump(schema, &AttributeProjection::Default).unwrap();
    assert!(dumped.get("password").is_none());
    assert_eq!(dumped["userName"], "bjensen@example.com");
}

#[test]
fn test_multiple_primary_emails() {
    let registry = common::registry();
    let payload = UserBuilder::new()
        .with_email("bjensen@example.com", "work", true)
        .with_email("babs@jensen.org", "home", true)
        .build();
    crate::assert_issue!(
        common::create(&registry, "User", &payload),
        IssueKind::MultiplePrimaryValues,
        "emails"
    );
}

#[test]
fn test_unknown_attributes_by_policy() {
    let registry = common::registry();
    let payload = UserBuilder::new()
        .with_attribute("favouriteColour", json!("teal"))
        .build();

    crate::assert_validation_success!(common::create(&registry, "User", &payload));

    for policy in [UnknownAttributePolicy::Collect, UnknownAttributePolicy::Abort] {
        let options = ValidationOptions::default().with_unknown_attributes(policy);
        crate::assert_issue!(
            registry.validate("User", &payload, &options),
            IssueKind::UnknownAttribute,
            "favouriteColour"
        );
    }
}

#[test]
fn test_collect_reports_everything() {
    let registry = common::registry();
    let payload = UserBuilder::new()
        .without_username()
        .with_attribute("favouriteColour", json!("teal"))
        .build();
    let options =
        ValidationOptions::default().with_unknown_attributes(UnknownAttributePolicy::Collect);

    match registry.validate("User", &payload, &options) {
        Err(ScimError::Validation(issues)) => {
            assert_eq!(issues.len(), 2);
            assert!(issues.contains_kind(IssueKind::MissingRequiredAttribute));
            assert!(issues.contains_kind(IssueKind::UnknownAttribute));
        }
        other => panic!("Expected two issues, got {:?}", other),
    }

    let options =
        ValidationOptions::default().with_unknown_attributes(UnknownAttributePolicy::Abort);
    match registry.validate("User", &payload, &options) {
        Err(ScimError::Validation(issues)) => {
            assert_eq!(issues.len(), 1);
            assert!(issues.contains_kind(IssueKind::UnknownAttribute));
        }
        other => panic!("Expected the unknown attribute only, got {:?}", other),
    }
}

#[test]
fn test_unknown_schema_uri() {
    let registry = common::registry();
    let payload = UserBuilder::new()
        .with_attribute(
            "schemas",
            json!(["urn:ietf:params:scim:schemas:core:2.0:User", "urn:example:Other"]),
        )
        .build();
    crate::assert_issue!(
        common::create(&registry, "User", &payload),
        IssueKind::UnknownSchema,
        "schemas"
    );
}

#[test]
fn test_error_reporting_for_http_layer() {
    let registry = common::registry();
    let payload = UserBuilder::new()
        .with_attribute("id", json!("2819c223"))
        .build();
    let error = common::create(&registry, "User", &payload).unwrap_err();
    assert_eq!(error.scim_type(), Some("mutability"));
    assert_eq!(error.status(), 400);

    let issues = match error {
        ScimError::Validation(issues) => issues,
        other => panic!("Expected validation issues, got {:?}", other),
    };
    let serialized = serde_json::to_value(&issues).unwrap();
    assert_eq!(serialized[0]["kind"], "readOnlyViolation");
    assert_eq!(serialized[0]["path"], "id");
}
