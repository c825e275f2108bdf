//! SQL statement builders for the multilingual table.
//!
//! # Responsibility
//! - Turn key/locale operations into SQL text plus positional parameters.
//! - Validate write batches before any SQL text exists.
//!
//! # Invariants
//! - Multi-column SELECT/INSERT lists follow registry order exactly.
//! - Caller values are bound as `?` parameters; the only inlined values
//!   (duplicate destination key, export literals) go through `quote_literal`.
//! - Table, key and locale column names are emitted verbatim.

use crate::config::StoreConfig;
use crate::executor::SqlValue;
use crate::locale::registry::LocaleRegistry;
use crate::model::locale::Locale;
use crate::model::localized_key::LocalizedKey;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// SQL text with its positional parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl Statement {
    fn new(sql: String, params: Vec<SqlValue>) -> Self {
        Self { sql, params }
    }
}

/// Batch rejected before SQL generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyBatch,
    DuplicateKey(String),
    DuplicateLocale {
        key: String,
        locale: Locale,
    },
    UnregisteredLocale {
        key: String,
        locale: Locale,
    },
    /// Insert entry whose locale list differs from the first entry's.
    LocaleSetMismatch {
        key: String,
        expected: Vec<Locale>,
        found: Vec<Locale>,
    },
    NothingToUpdate,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyBatch => write!(f, "localized key batch must not be empty"),
            Self::DuplicateKey(key) => write!(f, "key `{key}` appears more than once in batch"),
            Self::DuplicateLocale { key, locale } => {
                write!(f, "key `{key}` declares locale {locale} more than once")
            }
            Self::UnregisteredLocale { key, locale } => {
                write!(f, "key `{key}` uses unregistered locale {locale}")
            }
            Self::LocaleSetMismatch {
                key,
                expected,
                found,
            } => write!(
                f,
                "key `{key}` declares locales [{}] but batch expects [{}]",
                join_locales(found),
                join_locales(expected)
            ),
            Self::NothingToUpdate => write!(f, "update batch carries no locale values"),
        }
    }
}

impl Error for ValidationError {}

/// `SELECT <column> FROM t WHERE key = ?`
pub fn select_value(config: &StoreConfig, column: &str, key: &str) -> Statement {
    Statement::new(
        format!(
            "SELECT {column} FROM {} WHERE {} = ?",
            config.table_name, config.key_column
        ),
        vec![Some(key.to_string())],
    )
}

/// Selects the key column followed by every locale column in registry order.
///
/// The leading key column lets callers tell a missing row from a row of
/// nulls, including when the registry is empty.
pub fn select_all_locales(config: &StoreConfig, registry: &LocaleRegistry, key: &str) -> Statement {
    Statement::new(
        format!(
            "SELECT {} FROM {} WHERE {} = ?",
            column_list(config, registry),
            config.table_name,
            config.key_column
        ),
        vec![Some(key.to_string())],
    )
}

/// Builds one multi-row INSERT for `keys`.
///
/// Column order comes from the first entry; every other entry must declare
/// the same locales in the same order.
pub fn insert_batch(
    config: &StoreConfig,
    registry: &LocaleRegistry,
    keys: &[LocalizedKey],
) -> Result<Statement, ValidationError> {
    let first = keys.first().ok_or(ValidationError::EmptyBatch)?;
    ensure_distinct_keys(keys)?;

    let expected: Vec<&Locale> = first.locales().collect();
    let columns = registered_columns(registry, first)?;

    for entry in &keys[1..] {
        let found: Vec<&Locale> = entry.locales().collect();
        if found != expected {
            return Err(ValidationError::LocaleSetMismatch {
                key: entry.key.clone(),
                expected: expected.iter().map(|locale| (*locale).clone()).collect(),
                found: found.iter().map(|locale| (*locale).clone()).collect(),
            });
        }
    }

    let mut column_names = vec![config.key_column.as_str()];
    column_names.extend(columns.iter().copied());

    let tuple = format!("({})", placeholders(column_names.len()));
    let tuples = vec![tuple; keys.len()].join(", ");

    let mut params = Vec::with_capacity(keys.len() * column_names.len());
    for entry in keys {
        params.push(Some(entry.key.clone()));
        params.extend(entry.values.iter().map(|cell| cell.value.clone()));
    }

    Ok(Statement::new(
        format!(
            "INSERT INTO {} ({}) VALUES {tuples}",
            config.table_name,
            column_names.join(", ")
        ),
        params,
    ))
}

/// Builds one UPDATE covering a heterogeneous batch.
///
/// Each touched column gets `CASE key WHEN ? THEN ? .. ELSE column END`
/// over exactly the keys that supplied it, so other keys keep their value.
pub fn update_batch(
    config: &StoreConfig,
    registry: &LocaleRegistry,
    keys: &[LocalizedKey],
) -> Result<Statement, ValidationError> {
    if keys.is_empty() {
        return Err(ValidationError::EmptyBatch);
    }
    ensure_distinct_keys(keys)?;
    for entry in keys {
        registered_columns(registry, entry)?;
    }

    let mut assignments = Vec::new();
    let mut params = Vec::new();

    for (locale, column) in registry.columns() {
        let mut arms = String::new();
        for entry in keys {
            if let Some(cell) = entry.value_for(locale) {
                arms.push_str(" WHEN ? THEN ?");
                params.push(Some(entry.key.clone()));
                params.push(cell.value.clone());
            }
        }
        if !arms.is_empty() {
            assignments.push(format!(
                "{column} = CASE {}{arms} ELSE {column} END",
                config.key_column
            ));
        }
    }

    if assignments.is_empty() {
        return Err(ValidationError::NothingToUpdate);
    }

    params.extend(keys.iter().map(|entry| Some(entry.key.clone())));

    Ok(Statement::new(
        format!(
            "UPDATE {} SET {} WHERE {} IN ({})",
            config.table_name,
            assignments.join(", "),
            config.key_column,
            placeholders(keys.len())
        ),
        params,
    ))
}

/// `DELETE FROM t WHERE key = ?`
pub fn delete_key(config: &StoreConfig, key: &str) -> Statement {
    Statement::new(
        format!(
            "DELETE FROM {} WHERE {} = ?",
            config.table_name, config.key_column
        ),
        vec![Some(key.to_string())],
    )
}

/// Copies every registered column of `source` into a new `destination` row.
pub fn duplicate_key(
    config: &StoreConfig,
    registry: &LocaleRegistry,
    source: &str,
    destination: &str,
) -> Statement {
    let mut selected = vec![quote_literal(Some(destination))];
    selected.extend(registry.columns().map(|(_, column)| column.to_string()));

    Statement::new(
        format!(
            "INSERT INTO {table} ({columns}) SELECT {selected} FROM {table} WHERE {key} = ?",
            table = config.table_name,
            columns = column_list(config, registry),
            selected = selected.join(", "),
            key = config.key_column
        ),
        vec![Some(source.to_string())],
    )
}

/// Renders a self-contained INSERT with every value inlined as a literal.
///
/// `values` must be aligned with registry order.
pub fn export_insert(
    config: &StoreConfig,
    registry: &LocaleRegistry,
    key: &str,
    values: &[SqlValue],
) -> String {
    let mut literals = vec![quote_literal(Some(key))];
    literals.extend(values.iter().map(|value| quote_literal(value.as_deref())));

    format!(
        "INSERT INTO {} ({}) VALUES ({});",
        config.table_name,
        column_list(config, registry),
        literals.join(", ")
    )
}

/// Renders `value` as an ANSI string literal, doubling embedded quotes.
/// `None` renders as `NULL`.
pub fn quote_literal(value: Option<&str>) -> String {
    match value {
        Some(text) => format!("'{}'", text.replace('\'', "''")),
        None => "NULL".to_string(),
    }
}

fn column_list(config: &StoreConfig, registry: &LocaleRegistry) -> String {
    let mut columns = vec![config.key_column.as_str()];
    columns.extend(registry.columns().map(|(_, column)| column));
    columns.join(", ")
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

fn ensure_distinct_keys(keys: &[LocalizedKey]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(keys.len());
    for entry in keys {
        if !seen.insert(entry.key.as_str()) {
            return Err(ValidationError::DuplicateKey(entry.key.clone()));
        }
    }
    Ok(())
}

/// Maps each declared locale of `entry` to its column, in declaration order.
fn registered_columns<'r>(
    registry: &'r LocaleRegistry,
    entry: &LocalizedKey,
) -> Result<Vec<&'r str>, ValidationError> {
    let mut seen = HashSet::with_capacity(entry.values.len());
    let mut columns = Vec::with_capacity(entry.values.len());

    for locale in entry.locales() {
        if !seen.insert(locale) {
            return Err(ValidationError::DuplicateLocale {
                key: entry.key.clone(),
                locale: locale.clone(),
            });
        }
        let column =
            registry
                .column(locale)
                .ok_or_else(|| ValidationError::UnregisteredLocale {
                    key: entry.key.clone(),
                    locale: locale.clone(),
                })?;
        columns.push(column);
    }

    Ok(columns)
}

fn join_locales(locales: &[Locale]) -> String {
    locales
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
