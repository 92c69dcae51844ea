//! Locale tags used to scope redirect paths (`/de/payment/...`).

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{DomainError, ValueObject};

/// A language/region tag such as `en`, `de` or `sr-Latn`.
///
/// Only the shape is checked: a 2–3 letter language subtag, optionally
/// followed by one `-` and a 2–8 character alphanumeric region/script subtag.
/// The tag is embedded verbatim into redirect paths, so anything outside that
/// shape is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale(String);

impl Locale {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let raw = raw.trim();
        let (lang, region) = match raw.split_once('-') {
            Some((lang, region)) => (lang, Some(region)),
            None => (raw, None),
        };

        let lang_ok = (2..=3).contains(&lang.len()) && lang.chars().all(|c| c.is_ascii_alphabetic());
        let region_ok = region.is_none_or(|r| {
            (2..=8).contains(&r.len()) && r.chars().all(|c| c.is_ascii_alphanumeric())
        });

        if lang_ok && region_ok {
            Ok(Self(raw.to_string()))
        } else {
            Err(DomainError::validation(format!("invalid locale tag: {raw:?}")))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Locale {}

impl core::fmt::Display for Locale {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Locale {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Locale {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Locale> for String {
    fn from(value: Locale) -> Self {
        value.0
    }
}
