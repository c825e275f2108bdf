//! Write/read DTOs for multi-locale rows.
//!
//! # Responsibility
//! - Carry one key plus its per-locale values for a single write.
//! - Carry per-locale read results zipped against registry order.
//!
//! # Invariants
//! - `LocalizedKey::values` order is the column order used for inserts.

use crate::model::locale::Locale;
use serde::{Deserialize, Serialize};

/// One `(locale, value)` cell. `value = None` means no stored translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleValue {
    pub locale: Locale,
    pub value: Option<String>,
}

impl LocaleValue {
    pub fn new(locale: Locale, value: impl Into<String>) -> Self {
        Self {
            locale,
            value: Some(value.into()),
        }
    }

    /// Creates an explicit empty cell (written as SQL `NULL`).
    pub fn null(locale: Locale) -> Self {
        Self {
            locale,
            value: None,
        }
    }
}

/// A key together with the locale values written for it in one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedKey {
    pub key: String,
    pub values: Vec<LocaleValue>,
}

impl LocalizedKey {
    pub fn new(key: impl Into<String>, values: Vec<LocaleValue>) -> Self {
        Self {
            key: key.into(),
            values,
        }
    }

    /// Appends one value, builder style.
    pub fn with_value(mut self, locale: Locale, value: impl Into<String>) -> Self {
        self.values.push(LocaleValue::new(locale, value));
        self
    }

    /// Locales in declaration order.
    pub fn locales(&self) -> impl Iterator<Item = &Locale> + '_ {
        self.values.iter().map(|entry| &entry.locale)
    }

    /// Returns the value supplied for `locale`, if any entry declares it.
    pub fn value_for(&self, locale: &Locale) -> Option<&LocaleValue> {
        self.values.iter().find(|entry| &entry.locale == locale)
    }
}
