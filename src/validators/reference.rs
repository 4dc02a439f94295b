//! URI reference validation for `reference` attributes.

use url::Url;

/// Base used to check that a relative reference resolves.
const RELATIVE_BASE: &str = "https://scim.invalid/";

/// Rejected reference values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReferenceError {
    /// Empty string
    #[error("reference is empty")]
    Empty,

    /// Neither an absolute URI nor a relative reference
    #[error("'{value}' is not a valid URI reference")]
    Malformed { value: String },

    /// Absolute URL with a host was required
    #[error("'{value}' is not an absolute URL")]
    NotAbsolute { value: String },
}

/// Accept an absolute URI (`urn:...`, `https://...`) or a relative reference
/// (`../Users/2819c223`).
pub fn validate_uri_reference(value: &str) -> Result<(), ReferenceError> {
    if value.is_empty() {
        return Err(ReferenceError::Empty);
    }
    if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(malformed(value));
    }

    match Url::parse(value) {
        Ok(_) => Ok(()),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = Url::parse(RELATIVE_BASE).map_err(|_| malformed(value))?;
            base.join(value).map(|_| ()).map_err(|_| malformed(value))
        }
        Err(_) => Err(malformed(value)),
    }
}

/// Accept only absolute URLs with a host, as required for `external`
/// reference types.
pub fn validate_absolute_url(value: &str) -> Result<Url, ReferenceError> {
    if value.is_empty() {
        return Err(ReferenceError::Empty);
    }
    let url = Url::parse(value).map_err(|_| ReferenceError::NotAbsolute {
        value: value.to_string(),
    })?;
    if !url.has_host() {
        return Err(ReferenceError::NotAbsolute {
            value: value.to_string(),
        });
    }
    Ok(url)
}

fn malformed(value: &str) -> ReferenceError {
    ReferenceError::Malformed {
        value: value.to_string(),
    }
}
