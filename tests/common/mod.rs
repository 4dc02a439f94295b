//! Common test utilities for SCIM schema testing.
//!
//! Provides a per-test registry, logging setup, payload builders, RFC 7643
//! fixtures and assertion macros for validation results.

use scim_schema::{
    ResourceInstance, SchemaRegistry, ScimResult, ValidationContext, ValidationOptions,
};
use serde_json::Value;

pub mod builders;

/// Install `env_logger` once; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Fresh registry with the core schemas. Each test owns its own.
pub fn registry() -> SchemaRegistry {
    init_logging();
    SchemaRegistry::with_core_schemas().expect("Failed to create registry")
}

/// Validate a stored representation, as a filter or sort would load it.
pub fn stored(registry: &SchemaRegistry, schema_id: &str, payload: &Value) -> ResourceInstance {
    let options = ValidationOptions::default().with_context(ValidationContext::FilterOnly);
    registry
        .validate(schema_id, payload, &options)
        .unwrap_or_else(|err| panic!("stored payload should validate: {err}"))
}

/// Validate a client payload for create.
pub fn create(registry: &SchemaRegistry, schema_id: &str, payload: &Value) -> ScimResult<ResourceInstance> {
    registry.validate(schema_id, payload, &ValidationOptions::default())
}

/// Assert that a validation result failed with an issue of `kind` at `path`
#[macro_export]
macro_rules! assert_issue {
    ($result:expr, $kind:expr, $path:expr) => {
        match $result {
            Err(scim_schema::ScimError::Validation(issues)) => assert!(
                issues
                    .iter()
                    .any(|issue| issue.kind == $kind && issue.path == $path),
                "Expected {:?} at '{}', got {}",
                $kind,
                $path,
                issues
            ),
            Ok(_) => panic!("Expected {:?} at '{}', but validation passed", $kind, $path),
            Err(other) => panic!("Expected validation issues, got {:?}", other),
        }
    };
}

/// Assert that a validation result succeeded
#[macro_export]
macro_rules! assert_validation_success {
    ($result:expr) => {
        match $result {
            Ok(instance) => instance,
            Err(err) => panic!("Expected validation to succeed, but got error: {}", err),
        }
    };
}

/// Assert that an error's message contains a substring
#[macro_export]
macro_rules! assert_error_message_contains {
    ($result:expr, $substring:expr) => {
        match $result {
            Err(err) => assert!(
                err.to_string().contains($substring),
                "Error message '{}' does not contain '{}'",
                err,
                $substring
            ),
            Ok(_) => panic!("Expected error containing '{}', but got success", $substring),
        }
    };
}
