//! Phone number validation.
//!
//! Values are parsed with the libphonenumber grammar and metadata. Numbers in
//! international form (`+1-202-555-0191`) carry their own country calling
//! code; national numbers (`(202) 555-0191`) are only valid when a default
//! region is supplied. The RFC 3966 `tel:` form is accepted, including
//! trailing `;` parameters.

use phonenumber::{Mode, country};

/// Rejected phone number values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PhoneNumberError {
    /// Nothing to parse
    #[error("phone number is empty")]
    Empty,

    /// Not recognizable as a phone number at all
    #[error("'{value}' cannot be parsed as a phone number")]
    Unparseable { value: String },

    /// Parsed, but not a valid number for its region
    #[error("'{value}' is not a valid phone number")]
    Invalid { value: String },

    /// Default region is not an ISO 3166-1 alpha-2 code known to the metadata
    #[error("unknown phone number region '{region}'")]
    UnknownRegion { region: String },
}

/// Validate `value` and return it in E.164 form.
///
/// `default_region` is an ISO 3166-1 alpha-2 code used to interpret numbers
/// without a leading `+`.
pub fn validate_phone_number(
    value: &str,
    default_region: Option<&str>,
) -> Result<String, PhoneNumberError> {
    let trimmed = value.trim();
    let without_scheme = strip_tel_scheme(trimmed);
    let number = without_scheme
        .split(';')
        .next()
        .unwrap_or(without_scheme)
        .trim();
    if number.is_empty() {
        return Err(PhoneNumberError::Empty);
    }

    let region = match default_region {
        Some(region) => Some(
            region
                .to_ascii_uppercase()
                .parse::<country::Id>()
                .map_err(|_| PhoneNumberError::UnknownRegion {
                    region: region.to_string(),
                })?,
        ),
        None => None,
    };

    let parsed =
        phonenumber::parse(region, number).map_err(|_| PhoneNumberError::Unparseable {
            value: value.to_string(),
        })?;
    if !phonenumber::is_valid(&parsed) {
        return Err(PhoneNumberError::Invalid {
            value: value.to_string(),
        });
    }

    Ok(parsed.format().mode(Mode::E164).to_string())
}

fn strip_tel_scheme(value: &str) -> &str {
    match value.get(..4) {
        Some(prefix) if prefix.eq_ignore_ascii_case("tel:") => &value[4..],
        _ => value,
    }
}
