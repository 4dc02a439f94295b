//! Validation configuration.
//!
//! Options derive `Deserialize` with `#[serde(default)]` so an embedding
//! application can read them from its own configuration file:
//!
//! ```rust
//! use scim_schema::validation::{UnknownAttributePolicy, ValidationOptions};
//!
//! let options: ValidationOptions =
//!     serde_json::from_str(r#"{"unknownAttributes": "collect", "defaultPhoneRegion": "NZ"}"#)
//!         .unwrap();
//! assert_eq!(options.unknown_attributes, UnknownAttributePolicy::Collect);
//! ```

use serde::{Deserialize, Serialize};

/// What the payload is being validated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationContext {
    /// Client payload for a new resource
    #[default]
    Create,
    /// Client payload replacing an existing resource
    Update,
    /// Stored resource loaded for filtering; mutability is not enforced
    FilterOnly,
}

impl ValidationContext {
    /// Whether the payload comes from a client write.
    pub fn is_write(self) -> bool {
        matches!(self, Self::Create | Self::Update)
    }
}

/// Treatment of payload attributes the schema does not declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnknownAttributePolicy {
    /// Drop them silently
    #[default]
    Ignore,
    /// Report each as an `UnknownAttribute` issue alongside all other issues
    Collect,
    /// Report only the unknown attributes and skip all other checks
    Abort,
}

/// Options for a single validation run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidationOptions {
    /// Validation context
    pub context: ValidationContext,
    /// Unknown attribute handling
    pub unknown_attributes: UnknownAttributePolicy,
    /// ISO 3166-1 alpha-2 region for national phone numbers
    pub default_phone_region: Option<String>,
}

impl ValidationOptions {
    pub fn with_context(mut self, context: ValidationContext) -> Self {
        self.context = context;
        self
    }

    pub fn with_unknown_attributes(mut self, policy: UnknownAttributePolicy) -> Self {
        self.unknown_attributes = policy;
        self
    }

    pub fn with_default_phone_region(mut self, region: impl Into<String>) -> Self {
        self.default_phone_region = Some(region.into());
        self
    }
}
