//! Query result shaping: filter, sort and project a population of users.

use serde_json::{Value, json};

use crate::common;

use scim_schema::filter;
use scim_schema::schema::ENTERPRISE_USER_SCHEMA_ID;
use scim_schema::{AttributeProjection, ResourceInstance, SchemaRegistry, SortOrder, Sorter};

fn population(registry: &SchemaRegistry) -> Vec<ResourceInstance> {
    let people = [
        ("u1", "mike", "Mike", "Sales", Some("+1-202-555-0123")),
        ("u2", "alice", "Alice", "Engineering", None),
        ("u3", "Zoe", "Zoe", "Engineering", Some("+1-202-555-0191")),
        ("u4", "bob", "Bob", "Support", None),
    ];
    people
        .iter()
        .map(|(id, user_name, given, department, phone)| {
            let mut payload = json!({
                "id": id,
                "userName": user_name,
                "name": {"givenName": given, "familyName": "Example"},
                "emails": [{"value": format!("{user_name}@example.com"), "type": "work"}],
                ENTERPRISE_USER_SCHEMA_ID: {"department": department}
            });
            if let Some(phone) = phone {
                payload["phoneNumbers"] = json!([{"value": phone, "type": "work"}]);
            }
            common::stored(registry, "User", &payload)
        })
        .collect()
}

fn user_names(resources: &[ResourceInstance]) -> Vec<String> {
    resources
        .iter()
        .map(|resource| resource.to_json()["userName"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_filter_then_sort() {
    let registry = common::registry();
    let schema = registry.get("User").unwrap();
    let node = registry
        .parse_filter(
            "User",
            r#"urn:ietf:params:scim:schemas:extension:enterprise:2.0:User:department eq "engineering" or phoneNumbers pr"#,
        )
        .unwrap();

    let mut selected: Vec<ResourceInstance> = population(&registry)
        .into_iter()
        .filter(|user| filter::matches(&node, user).unwrap())
        .collect();
    assert_eq!(selected.len(), 3);

    Sorter::new(schema, "userName", SortOrder::Ascending)
        .unwrap()
        .sort(&mut selected);
    assert_eq!(user_names(&selected), vec!["alice", "mike", "Zoe"]);

    Sorter::new(schema, "name.givenName", SortOrder::Descending)
        .unwrap()
        .sort(&mut selected);
    assert_eq!(user_names(&selected), vec!["Zoe", "mike", "alice"]);
}

#[test]
fn test_sort_with_missing_values() {
    let registry = common::registry();
    let schema = registry.get("User").unwrap();
    let mut users = population(&registry);

    Sorter::new(schema, "phoneNumbers.value", SortOrder::Ascending)
        .unwrap()
        .sort(&mut users);
    assert_eq!(user_names(&users), vec!["mike", "Zoe", "alice", "bob"]);

    Sorter::new(schema, "phoneNumbers.value", SortOrder::Descending)
        .unwrap()
        .sort(&mut users);
    assert_eq!(user_names(&users), vec!["alice", "bob", "Zoe", "mike"]);
}

#[test]
fn test_projection_of_results() {
    let registry = common::registry();
    let schema = registry.get("User").unwrap();
    let users = population(&registry);

    let projection = AttributeProjection::from_query(Some("userName,emails.value"), None);
    let dumped: Vec<Value> = users
        .iter()
        .map(|user| user.dump(schema, &projection).unwrap())
        .collect();
    assert_eq!(
        dumped[0],
        json!({
            "schemas": ["urn:ietf:params:scim:schemas:core:2.0:User", ENTERPRISE_USER_SCHEMA_ID],
            "id": "u1",
            "userName": "mike",
            "emails": [{"value": "mike@example.com"}]
        })
    );

    let projection = AttributeProjection::from_query(None, Some(&format!("name,{ENTERPRISE_USER_SCHEMA_ID}")));
    let dumped = users[1].dump(schema, &projection).unwrap();
    assert!(dumped.get("name").is_none());
    assert!(dumped.get(ENTERPRISE_USER_SCHEMA_ID).is_none());
    assert_eq!(dumped["emails"][0]["type"], "work");
}
