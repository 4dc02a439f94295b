//! Internationalized string profiles.
//!
//! A profile prepares a string for storage and comparison: it applies a
//! character mapping, Unicode normalization form C, and then rejects code
//! points outside the profile's character class. The two profiles follow the
//! PRECIS classes of RFC 8264: [`StringProfile::Identifier`] behaves like the
//! `UsernameCasePreserved` profile and [`StringProfile::FreeText`] like the
//! `OpaqueString` profile. Case mapping is not part of a profile; it is applied
//! afterwards by comparisons on attributes that are not `caseExact`.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Character class applied to a string attribute before it is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StringProfile {
    /// Identifier-safe strings: user names, codes, e-mail addresses.
    ///
    /// Full-width and half-width forms are mapped to their ordinary
    /// equivalents. Whitespace, controls, private-use code points and
    /// non-ASCII symbols are rejected.
    Identifier,
    /// Free text: display names, descriptions, passwords.
    ///
    /// Non-ASCII spaces are mapped to U+0020. Controls and noncharacters are
    /// rejected.
    #[default]
    FreeText,
}

/// A string rejected by its profile.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    /// Nothing left after mapping and normalization
    #[error("value is empty")]
    Empty,

    /// Code point outside the profile's character class
    #[error("code point U+{codepoint:04X} at character {index} is not allowed by the {profile} profile")]
    Disallowed {
        codepoint: u32,
        index: usize,
        profile: &'static str,
    },
}

impl StringProfile {
    /// Profile name used in messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Identifier => "identifier",
            Self::FreeText => "freeText",
        }
    }

    /// Map, normalize and check `value`, returning the prepared string.
    pub fn enforce(self, value: &str) -> Result<String, ProfileError> {
        let mapped = match self {
            Self::Identifier => map_width(value),
            Self::FreeText => map_spaces(value),
        };
        let normalized: String = mapped.nfc().collect();
        if normalized.is_empty() {
            return Err(ProfileError::Empty);
        }

        for (index, c) in normalized.chars().enumerate() {
            let allowed = match self {
                Self::Identifier => is_identifier_char(c),
                Self::FreeText => is_free_text_char(c),
            };
            if !allowed {
                return Err(ProfileError::Disallowed {
                    codepoint: u32::from(c),
                    index,
                    profile: self.as_str(),
                });
            }
        }

        Ok(normalized)
    }
}

/// Decompose full-width and half-width forms to their compatibility equivalents.
fn map_width(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if ('\u{FF01}'..='\u{FFEE}').contains(&c) || c == '\u{3000}' {
            out.extend(std::iter::once(c).nfkc());
        } else {
            out.push(c);
        }
    }
    out
}

fn map_spaces(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_whitespace() && !c.is_ascii() { ' ' } else { c })
        .collect()
}

fn is_identifier_char(c: char) -> bool {
    if c.is_ascii() {
        return c.is_ascii_graphic();
    }
    if c.is_whitespace() || c.is_control() || is_noncharacter(c) || is_private_use(c) {
        return false;
    }
    c.is_alphanumeric() || is_combining_mark(c)
}

fn is_free_text_char(c: char) -> bool {
    !c.is_control() && !is_noncharacter(c)
}

fn is_noncharacter(c: char) -> bool {
    let cp = u32::from(c);
    (0xFDD0..=0xFDEF).contains(&cp) || cp & 0xFFFE == 0xFFFE
}

fn is_private_use(c: char) -> bool {
    let cp = u32::from(c);
    (0xE000..=0xF8FF).contains(&cp)
        || (0xF0000..=0xFFFFD).contains(&cp)
        || (0x100000..=0x10FFFD).contains(&cp)
}
