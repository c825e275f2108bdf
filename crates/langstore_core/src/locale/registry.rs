//! Ordered locale -> column registry.

use crate::model::locale::Locale;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Registry configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    EmptyColumnName(Locale),
    DuplicateLocale(Locale),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyColumnName(locale) => {
                write!(f, "column name for locale {locale} must not be empty")
            }
            Self::DuplicateLocale(locale) => write!(f, "locale already registered: {locale}"),
        }
    }
}

impl Error for RegistryError {}

/// Ordered mapping from registered locale to its table column.
///
/// Iteration order is registration order. Multi-column selects and the
/// positional zip of their result rows both follow it, so entries are never
/// reordered or removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleRegistry {
    entries: Vec<(Locale, String)>,
}

impl LocaleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry where every locale maps to its textual form.
    pub fn with_locales(
        locales: impl IntoIterator<Item = Locale>,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for locale in locales {
            let column = locale.to_string();
            registry.register(locale, column)?;
        }
        Ok(registry)
    }

    /// Appends one locale column mapping.
    ///
    /// Column names are used verbatim in generated SQL and are not checked
    /// as identifiers.
    pub fn register(
        &mut self,
        locale: Locale,
        column: impl Into<String>,
    ) -> Result<(), RegistryError> {
        let column = column.into().trim().to_string();
        if column.is_empty() {
            return Err(RegistryError::EmptyColumnName(locale));
        }
        if self.contains(&locale) {
            return Err(RegistryError::DuplicateLocale(locale));
        }

        self.entries.push((locale, column));
        Ok(())
    }

    pub fn contains(&self, locale: &Locale) -> bool {
        self.entries.iter().any(|(entry, _)| entry == locale)
    }

    /// Returns the column registered for `locale` (exact match only).
    pub fn column(&self, locale: &Locale) -> Option<&str> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == locale)
            .map(|(_, column)| column.as_str())
    }

    /// Ordered `(locale, column)` pairs.
    pub fn columns(&self) -> impl ExactSizeIterator<Item = (&Locale, &str)> + '_ {
        self.entries
            .iter()
            .map(|(locale, column)| (locale, column.as_str()))
    }

    pub fn locales(&self) -> impl ExactSizeIterator<Item = &Locale> + '_ {
        self.entries.iter().map(|(locale, _)| locale)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
