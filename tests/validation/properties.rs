//! Property-Based Testing for payload validation
//!
//! Generates valid and invalid User payloads to check that issue collection
//! is complete and that serialized instances validate back to themselves.

use crate::common;
use proptest::prelude::*;
use scim_schema::{IssueKind, ScimError, ValidationOptions};
use serde_json::{Map, Value, json};

/// Strategy for arbitrary, mostly ill-typed, JSON values
fn json_value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<String>().prop_map(|s| json!(s)),
        any::<i32>().prop_map(|n| json!(n)),
        any::<bool>().prop_map(|b| json!(b)),
        Just(Value::Null),
        Just(json!({"value": 7, "type": "nowhere"})),
        Just(json!(["item1", "item2"])),
        Just(json!([{"value": "a@example.com", "primary": true}, {"primary": true}])),
    ]
}

/// Strategy for User attribute names other than `userName`
fn attribute_name_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "id".to_string(),
        "name".to_string(),
        "displayName".to_string(),
        "active".to_string(),
        "emails".to_string(),
        "phoneNumbers".to_string(),
        "addresses".to_string(),
        "x509Certificates".to_string(),
        "meta".to_string(),
        "unknownThing".to_string(),
    ])
}

prop_compose! {
    fn payload_without_user_name()
        (entries in prop::collection::vec((attribute_name_strategy(), json_value_strategy()), 0..8))
        -> Value {
        let object: Map<String, Value> = entries.into_iter().collect();
        Value::Object(object)
    }
}

prop_compose! {
    fn valid_user_payload()
        (user_name in "[a-z][a-z0-9._-]{0,15}",
         given in "[A-Z][a-z]{1,10}",
         display in "[A-Za-z]{1,10}( [A-Za-z]{1,10})?",
         active in any::<bool>(),
         emails in prop::collection::vec(
             ("[a-z]{1,8}@[a-z]{1,8}\\.(com|org)", prop::sample::select(vec!["work", "home", "other"])),
             0..3))
        -> Value {
        let mut payload = json!({
            "userName": user_name,
            "name": {"givenName": given},
            "displayName": display,
            "active": active
        });
        if !emails.is_empty() {
            let emails: Vec<Value> = emails
                .into_iter()
                .enumerate()
                .map(|(index, (value, kind))| json!({"value": value, "type": kind, "primary": index == 0}))
                .collect();
            payload["emails"] = json!(emails);
        }
        payload
    }
}

proptest! {
    #[test]
    fn test_missing_required_reported_exactly_once(payload in payload_without_user_name()) {
        let registry = common::registry();
        match common::create(&registry, "User", &payload) {
            Err(ScimError::Validation(issues)) => {
                let missing = issues
                    .iter()
                    .filter(|issue| issue.kind == IssueKind::MissingRequiredAttribute && issue.path == "userName")
                    .count();
                prop_assert_eq!(missing, 1);
            }
            other => prop_assert!(false, "expected validation issues, got {:?}", other),
        }
    }

    #[test]
    fn test_serialized_instance_revalidates(payload in valid_user_payload()) {
        let registry = common::registry();
        let options = ValidationOptions::default();
        let first = registry.validate("User", &payload, &options).unwrap();
        let second = registry.validate("User", &first.to_json(), &options).unwrap();
        prop_assert_eq!(first, second);
    }
}
