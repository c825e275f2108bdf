//! Locale identifier model.
//!
//! # Responsibility
//! - Represent `language[_REGION[_variant]]` identifiers used for lookup.
//! - Provide the canonical textual form used as default column basis.
//!
//! # Invariants
//! - `language` is lowercase ASCII letters (2..=8).
//! - `region` is two uppercase ASCII letters or three digits.
//! - `variant` is non-empty ASCII alphanumerics when present.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

static LANGUAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]{2,8}$").expect("valid language regex"));
static REGION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[A-Za-z]{2}|[0-9]{3})$").expect("valid region regex"));
static VARIANT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]{1,16}$").expect("valid variant regex"));

/// Language identifier with optional region and variant qualifiers.
///
/// Serialized as its textual form (`es_MX`), so configuration files can list
/// locales as plain strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale {
    language: String,
    region: Option<String>,
    variant: Option<String>,
}

impl Locale {
    /// Creates a bare-language locale.
    ///
    /// # Errors
    /// - Returns an error when `language` is not 2..=8 ASCII letters.
    pub fn new(language: &str) -> Result<Self, LocaleParseError> {
        Ok(Self {
            language: normalize_language(language)?,
            region: None,
            variant: None,
        })
    }

    /// Creates a `language_REGION` locale.
    pub fn with_region(language: &str, region: &str) -> Result<Self, LocaleParseError> {
        Ok(Self {
            language: normalize_language(language)?,
            region: Some(normalize_region(region)?),
            variant: None,
        })
    }

    /// Creates a fully qualified locale. Empty `region`/`variant` mean absent.
    pub fn with_parts(
        language: &str,
        region: Option<&str>,
        variant: Option<&str>,
    ) -> Result<Self, LocaleParseError> {
        let region = match region.filter(|value| !value.is_empty()) {
            Some(value) => Some(normalize_region(value)?),
            None => None,
        };
        let variant = match variant.filter(|value| !value.is_empty()) {
            Some(value) => Some(normalize_variant(value)?),
            None => None,
        };

        Ok(Self {
            language: normalize_language(language)?,
            region,
            variant,
        })
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }

    /// Returns `true` for a locale without region or variant.
    pub fn is_bare_language(&self) -> bool {
        self.region.is_none() && self.variant.is_none()
    }

    /// Returns this locale with its variant removed.
    pub fn without_variant(&self) -> Self {
        Self {
            language: self.language.clone(),
            region: self.region.clone(),
            variant: None,
        }
    }

    /// Returns the bare-language locale for this identifier.
    pub fn language_only(&self) -> Self {
        Self {
            language: self.language.clone(),
            region: None,
            variant: None,
        }
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.language)?;
        match (&self.region, &self.variant) {
            (Some(region), Some(variant)) => write!(f, "_{region}_{variant}"),
            (Some(region), None) => write!(f, "_{region}"),
            (None, Some(variant)) => write!(f, "__{variant}"),
            (None, None) => Ok(()),
        }
    }
}

impl FromStr for Locale {
    type Err = LocaleParseError;

    /// Parses `es`, `es_MX`, `es-MX`, `es_ES_valencia` or `es__valencia`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(LocaleParseError::Empty);
        }

        let parts: Vec<&str> = trimmed.split(['_', '-']).collect();
        match parts.as_slice() {
            [language] => Self::new(language),
            [language, region] => Self::with_region(language, region),
            [language, region, variant] => {
                if variant.is_empty() {
                    return Err(LocaleParseError::InvalidVariant(String::new()));
                }
                Self::with_parts(language, Some(region), Some(variant))
            }
            _ => Err(LocaleParseError::Malformed(trimmed.to_string())),
        }
    }
}

impl TryFrom<String> for Locale {
    type Error = LocaleParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Locale> for String {
    fn from(value: Locale) -> Self {
        value.to_string()
    }
}

/// Locale parse/construction errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleParseError {
    Empty,
    InvalidLanguage(String),
    InvalidRegion(String),
    InvalidVariant(String),
    Malformed(String),
}

impl Display for LocaleParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "locale must not be empty"),
            Self::InvalidLanguage(value) => write!(f, "invalid locale language `{value}`"),
            Self::InvalidRegion(value) => write!(f, "invalid locale region `{value}`"),
            Self::InvalidVariant(value) => write!(f, "invalid locale variant `{value}`"),
            Self::Malformed(value) => write!(f, "malformed locale `{value}`"),
        }
    }
}

impl Error for LocaleParseError {}

fn normalize_language(value: &str) -> Result<String, LocaleParseError> {
    if !LANGUAGE_RE.is_match(value) {
        return Err(LocaleParseError::InvalidLanguage(value.to_string()));
    }
    Ok(value.to_ascii_lowercase())
}

fn normalize_region(value: &str) -> Result<String, LocaleParseError> {
    if !REGION_RE.is_match(value) {
        return Err(LocaleParseError::InvalidRegion(value.to_string()));
    }
    Ok(value.to_ascii_uppercase())
}

fn normalize_variant(value: &str) -> Result<String, LocaleParseError> {
    if !VARIANT_RE.is_match(value) {
        return Err(LocaleParseError::InvalidVariant(value.to_string()));
    }
    Ok(value.to_string())
}
