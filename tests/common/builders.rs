//! Test data builders for creating valid and invalid SCIM payloads.
//!
//! Builders start from a minimal valid client payload (no `id` or `meta`,
//! which are read-only) and are then modified to trigger specific issues.

use scim_schema::schema::{ENTERPRISE_USER_SCHEMA_ID, GROUP_SCHEMA_ID, USER_SCHEMA_ID};
use serde_json::{Value, json};

/// Builder for User payloads
#[derive(Debug, Clone)]
pub struct UserBuilder {
    data: Value,
}

impl UserBuilder {
    /// Minimal valid User payload
    pub fn new() -> Self {
        Self {
            data: json!({
                "schemas": [USER_SCHEMA_ID],
                "userName": "bjensen@example.com"
            }),
        }
    }

    pub fn without_username(mut self) -> Self {
        self.remove("userName");
        self
    }

    pub fn with_username(self, user_name: &str) -> Self {
        self.with_attribute("userName", json!(user_name))
    }

    pub fn with_name(self, given: &str, family: &str) -> Self {
        self.with_attribute("name", json!({"givenName": given, "familyName": family}))
    }

    pub fn with_email(mut self, value: &str, kind: &str, primary: bool) -> Self {
        self.push("emails", json!({"value": value, "type": kind, "primary": primary}));
        self
    }

    pub fn with_phone_number(mut self, value: &str) -> Self {
        self.push("phoneNumbers", json!({"value": value, "type": "work"}));
        self
    }

    pub fn with_address_country(mut self, country: &str) -> Self {
        self.push("addresses", json!({"locality": "Hollywood", "country": country}));
        self
    }

    pub fn with_enterprise(mut self, attributes: Value) -> Self {
        self.data["schemas"] = json!([USER_SCHEMA_ID, ENTERPRISE_USER_SCHEMA_ID]);
        self.data[ENTERPRISE_USER_SCHEMA_ID] = attributes;
        self
    }

    pub fn with_attribute(mut self, name: &str, value: Value) -> Self {
        self.data[name] = value;
        self
    }

    pub fn build(self) -> Value {
        self.data
    }

    fn remove(&mut self, name: &str) {
        if let Some(object) = self.data.as_object_mut() {
            object.remove(name);
        }
    }

    fn push(&mut self, name: &str, element: Value) {
        match self.data[name].as_array_mut() {
            Some(items) => items.push(element),
            None => self.data[name] = json!([element]),
        }
    }
}

impl Default for UserBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for Group payloads
#[derive(Debug, Clone)]
pub struct GroupBuilder {
    data: Value,
}

impl GroupBuilder {
    pub fn new(display_name: &str) -> Self {
        Self {
            data: json!({
                "schemas": [GROUP_SCHEMA_ID],
                "displayName": display_name
            }),
        }
    }

    pub fn with_member(mut self, value: &str, kind: &str) -> Self {
        let member = json!({"value": value, "type": kind});
        match self.data["members"].as_array_mut() {
            Some(members) => members.push(member),
            None => self.data["members"] = json!([member]),
        }
        self
    }

    pub fn build(self) -> Value {
        self.data
    }
}
