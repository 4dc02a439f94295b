//! Embedded core SCIM schemas.
//!
//! The RFC 7643 User, Enterprise User and Group schemas as static JSON
//! strings. The common attributes every resource carries (`id`, `externalId`,
//! `meta`) are kept in a separate attribute list and merged into User and
//! Group with [`Schema::compose`](super::Schema::compose).
//!
//! Beyond the RFC text, string attributes that hold identifiers use the
//! `identifier` profile, `phoneNumbers.value` carries the `phoneNumber` format
//! and `addresses.country` carries the `countryCode` format.

pub const USER_SCHEMA_ID: &str = "urn:ietf:params:scim:schemas:core:2.0:User";
pub const GROUP_SCHEMA_ID: &str = "urn:ietf:params:scim:schemas:core:2.0:Group";
pub const ENTERPRISE_USER_SCHEMA_ID: &str =
    "urn:ietf:params:scim:schemas:extension:enterprise:2.0:User";

/// Attributes common to all resources (RFC 7643 §3.1), as a JSON array.
pub fn common_attributes() -> &'static str {
    r#"[
  {
    "name": "id",
    "type": "string",
    "multiValued": false,
    "description": "Unique identifier for the SCIM resource as defined by the Service Provider.",
    "required": false,
    "caseExact": true,
    "mutability": "readOnly",
    "returned": "always",
    "uniqueness": "server",
    "profile": "identifier"
  },
  {
    "name": "externalId",
    "type": "string",
    "multiValued": false,
    "description": "Identifier for the resource as defined by the provisioning client.",
    "required": false,
    "caseExact": true,
    "mutability": "readWrite",
    "returned": "default",
    "uniqueness": "none"
  },
  {
    "name": "meta",
    "type": "complex",
    "multiValued": false,
    "description": "Resource metadata.",
    "required": false,
    "mutability": "readOnly",
    "returned": "default",
    "subAttributes": [
      {
        "name": "resourceType",
        "type": "string",
        "caseExact": true,
        "mutability": "readOnly",
        "profile": "identifier"
      },
      {
        "name": "created",
        "type": "dateTime",
        "mutability": "readOnly"
      },
      {
        "name": "lastModified",
        "type": "dateTime",
        "mutability": "readOnly"
      },
      {
        "name": "location",
        "type": "reference",
        "referenceTypes": ["uri"],
        "caseExact": true,
        "mutability": "readOnly"
      },
      {
        "name": "version",
        "type": "string",
        "caseExact": true,
        "mutability": "readOnly"
      }
    ]
  }
]"#
}

/// The core User schema, without the common attributes.
pub fn core_user_schema() -> &'static str {
    r#"{
  "id": "urn:ietf:params:scim:schemas:core:2.0:User",
  "name": "User",
  "description": "User Account",
  "attributes": [
    {
      "name": "userName",
      "type": "string",
      "multiValued": false,
      "description": "Unique identifier for the User, typically used by the user to directly authenticate.",
      "required": true,
      "caseExact": false,
      "mutability": "readWrite",
      "returned": "default",
      "uniqueness": "server",
      "profile": "identifier"
    },
    {
      "name": "name",
      "type": "complex",
      "description": "The components of the user's real name.",
      "subAttributes": [
        { "name": "formatted", "type": "string" },
        { "name": "familyName", "type": "string" },
        { "name": "givenName", "type": "string" },
        { "name": "middleName", "type": "string" },
        { "name": "honorificPrefix", "type": "string" },
        { "name": "honorificSuffix", "type": "string" }
      ]
    },
    { "name": "displayName", "type": "string", "description": "The name of the User, suitable for display to end-users." },
    { "name": "nickName", "type": "string" },
    { "name": "profileUrl", "type": "reference", "referenceTypes": ["external"] },
    { "name": "title", "type": "string" },
    { "name": "userType", "type": "string" },
    { "name": "preferredLanguage", "type": "string", "profile": "identifier" },
    { "name": "locale", "type": "string", "profile": "identifier" },
    { "name": "timezone", "type": "string", "profile": "identifier" },
    { "name": "active", "type": "boolean" },
    {
      "name": "password",
      "type": "string",
      "description": "The User's cleartext password.",
      "mutability": "writeOnly",
      "returned": "never"
    },
    {
      "name": "emails",
      "type": "complex",
      "multiValued": true,
      "description": "Email addresses for the user.",
      "subAttributes": [
        { "name": "value", "type": "string", "profile": "identifier" },
        { "name": "display", "type": "string" },
        { "name": "type", "type": "string", "canonicalValues": ["work", "home", "other"] },
        { "name": "primary", "type": "boolean" }
      ]
    },
    {
      "name": "phoneNumbers",
      "type": "complex",
      "multiValued": true,
      "description": "Phone numbers for the User.",
      "subAttributes": [
        { "name": "value", "type": "string", "format": "phoneNumber" },
        { "name": "display", "type": "string" },
        { "name": "type", "type": "string", "canonicalValues": ["work", "home", "mobile", "fax", "pager", "other"] },
        { "name": "primary", "type": "boolean" }
      ]
    },
    {
      "name": "ims",
      "type": "complex",
      "multiValued": true,
      "subAttributes": [
        { "name": "value", "type": "string" },
        { "name": "display", "type": "string" },
        { "name": "type", "type": "string", "canonicalValues": ["aim", "gtalk", "icq", "xmpp", "msn", "skype", "qq", "yahoo"] },
        { "name": "primary", "type": "boolean" }
      ]
    },
    {
      "name": "photos",
      "type": "complex",
      "multiValued": true,
      "subAttributes": [
        { "name": "value", "type": "reference", "referenceTypes": ["external"] },
        { "name": "display", "type": "string" },
        { "name": "type", "type": "string", "canonicalValues": ["photo", "thumbnail"] },
        { "name": "primary", "type": "boolean" }
      ]
    },
    {
      "name": "addresses",
      "type": "complex",
      "multiValued": true,
      "description": "A physical mailing address for this User.",
      "subAttributes": [
        { "name": "formatted", "type": "string" },
        { "name": "streetAddress", "type": "string" },
        { "name": "locality", "type": "string" },
        { "name": "region", "type": "string" },
        { "name": "postalCode", "type": "string" },
        { "name": "country", "type": "string", "format": "countryCode" },
        { "name": "type", "type": "string", "canonicalValues": ["work", "home", "other"] },
        { "name": "primary", "type": "boolean" }
      ]
    },
    {
      "name": "groups",
      "type": "complex",
      "multiValued": true,
      "description": "A list of groups to which the user belongs.",
      "mutability": "readOnly",
      "subAttributes": [
        { "name": "value", "type": "string", "mutability": "readOnly" },
        { "name": "$ref", "type": "reference", "referenceTypes": ["User", "Group"], "mutability": "readOnly" },
        { "name": "display", "type": "string", "mutability": "readOnly" },
        { "name": "type", "type": "string", "canonicalValues": ["direct", "indirect"], "mutability": "readOnly" }
      ]
    },
    {
      "name": "entitlements",
      "type": "complex",
      "multiValued": true,
      "subAttributes": [
        { "name": "value", "type": "string" },
        { "name": "display", "type": "string" },
        { "name": "type", "type": "string" },
        { "name": "primary", "type": "boolean" }
      ]
    },
    {
      "name": "roles",
      "type": "complex",
      "multiValued": true,
      "subAttributes": [
        { "name": "value", "type": "string" },
        { "name": "display", "type": "string" },
        { "name": "type", "type": "string" },
        { "name": "primary", "type": "boolean" }
      ]
    },
    {
      "name": "x509Certificates",
      "type": "complex",
      "multiValued": true,
      "subAttributes": [
        { "name": "value", "type": "binary" },
        { "name": "display", "type": "string" },
        { "name": "type", "type": "string" },
        { "name": "primary", "type": "boolean" }
      ]
    }
  ]
}"#
}

/// The Enterprise User extension schema.
pub fn enterprise_user_schema() -> &'static str {
    r#"{
  "id": "urn:ietf:params:scim:schemas:extension:enterprise:2.0:User",
  "name": "EnterpriseUser",
  "description": "Enterprise User",
  "attributes": [
    { "name": "employeeNumber", "type": "string", "profile": "identifier" },
    { "name": "costCenter", "type": "string" },
    { "name": "organization", "type": "string" },
    { "name": "division", "type": "string" },
    { "name": "department", "type": "string" },
    {
      "name": "manager",
      "type": "complex",
      "subAttributes": [
        { "name": "value", "type": "string" },
        { "name": "$ref", "type": "reference", "referenceTypes": ["User"] },
        { "name": "displayName", "type": "string", "mutability": "readOnly" }
      ]
    }
  ]
}"#
}

/// The core Group schema, without the common attributes.
pub fn core_group_schema() -> &'static str {
    r#"{
  "id": "urn:ietf:params:scim:schemas:core:2.0:Group",
  "name": "Group",
  "description": "Group",
  "attributes": [
    {
      "name": "displayName",
      "type": "string",
      "description": "A human-readable name for the Group.",
      "required": true,
      "uniqueness": "none"
    },
    {
      "name": "members",
      "type": "complex",
      "multiValued": true,
      "description": "A list of members of the Group.",
      "subAttributes": [
        { "name": "value", "type": "string", "mutability": "immutable" },
        { "name": "$ref", "type": "reference", "referenceTypes": ["User", "Group"], "mutability": "immutable" },
        { "name": "display", "type": "string", "mutability": "readOnly" },
        { "name": "type", "type": "string", "canonicalValues": ["User", "Group"], "mutability": "immutable" }
      ]
    }
  ]
}"#
}
