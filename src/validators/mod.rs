//! Pure value checks applied while casting attribute values.
//!
//! Every validator is a plain function of its input: no shared state, no I/O.
//!
//! - [`string_profile`] - internationalized string preparation
//! - [`phone_number`] - region-aware phone number grammar
//! - [`country_code`] - ISO 3166-1 codes
//! - [`reference`] - URI references

pub mod country_code;
pub mod phone_number;
pub mod reference;
pub mod string_profile;

pub use country_code::{CountryCode, CountryCodeError, validate_country_code};
pub use phone_number::{PhoneNumberError, validate_phone_number};
pub use reference::{ReferenceError, validate_absolute_url, validate_uri_reference};
pub use string_profile::{ProfileError, StringProfile};

use crate::error::{CastError, IssueKind};
use serde::{Deserialize, Serialize};

/// Extra format a string attribute's values must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueFormat {
    /// Phone number parseable to a valid national or international number
    PhoneNumber,
    /// ISO 3166-1 alpha-2, alpha-3 or numeric country code
    CountryCode,
}

impl ValueFormat {
    /// Check `value`, interpreting national phone numbers in `default_region`.
    pub fn check(self, value: &str, default_region: Option<&str>) -> Result<(), CastError> {
        match self {
            Self::PhoneNumber => validate_phone_number(value, default_region)
                .map(|_| ())
                .map_err(|e| CastError::new(IssueKind::InvalidPhoneNumber, e.to_string())),
            Self::CountryCode => validate_country_code(value)
                .map(|_| ())
                .map_err(|e| CastError::new(IssueKind::InvalidCountryCode, e.to_string())),
        }
    }
}
