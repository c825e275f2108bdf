//! Store configuration.
//!
//! # Responsibility
//! - Name the managed table and its key column.
//! - Carry the default locale that terminates every fallback chain.
//!
//! # Invariants
//! - Table and key-column names are non-blank after `validate()`.
//! - Names are embedded verbatim in SQL; callers supply safe identifiers.

use crate::model::locale::Locale;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_TABLE_NAME: &str = "multilanguage";
pub const DEFAULT_KEY_COLUMN: &str = "key";
pub const DEFAULT_LANGUAGE: &str = "en";

/// Table layout and default locale for one managed domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub table_name: String,
    pub key_column: String,
    pub default_locale: Locale,
}

impl StoreConfig {
    /// Creates a config for `table_name` keyed by `key_column`.
    pub fn new(
        table_name: impl Into<String>,
        key_column: impl Into<String>,
        default_locale: Locale,
    ) -> Self {
        Self {
            table_name: table_name.into(),
            key_column: key_column.into(),
            default_locale,
        }
    }

    /// Default table layout with a custom default locale.
    pub fn with_default_locale(default_locale: Locale) -> Self {
        Self {
            default_locale,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.table_name.trim().is_empty() {
            return Err(ConfigError::EmptyTableName);
        }
        if self.key_column.trim().is_empty() {
            return Err(ConfigError::EmptyKeyColumn);
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
            key_column: DEFAULT_KEY_COLUMN.to_string(),
            default_locale: Locale::new(DEFAULT_LANGUAGE)
                .expect("default language literal is a valid locale"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyTableName,
    EmptyKeyColumn,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTableName => write!(f, "table name must not be empty"),
            Self::EmptyKeyColumn => write!(f, "key column must not be empty"),
        }
    }
}

impl Error for ConfigError {}
