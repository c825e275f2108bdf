//! Multilingual key store over one table.
//!
//! # Responsibility
//! - Run fetch/insert/update/delete/duplicate/export for localized keys.
//! - Map result rows back to locales positionally.
//!
//! # Invariants
//! - The store never resolves locales; callers pass already-resolved ones.
//! - Validation failures happen before any statement reaches the executor.
//! - Executor errors surface unchanged as `StoreError::Db`.
//!
//! # See also
//! - `sql` for the statement shapes.

pub mod sql;

use crate::config::{ConfigError, StoreConfig};
use crate::db::DbError;
use crate::executor::{QueryExecutor, SqlRow, SqlValue};
use crate::locale::registry::LocaleRegistry;
use crate::model::locale::Locale;
use crate::model::localized_key::{LocaleValue, LocalizedKey};
use crate::service::lifecycle::LifecycleError;
use log::{debug, error};
use sql::Statement;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use sql::ValidationError;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for every key store and manager operation.
#[derive(Debug)]
pub enum StoreError {
    Lifecycle(LifecycleError),
    Config(ConfigError),
    Validation(ValidationError),
    Db(DbError),
    NotFound(String),
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lifecycle(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "invalid store config: {err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(key) => write!(f, "localized key not found: {key}"),
            Self::InvalidData(message) => write!(f, "invalid localized row: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Lifecycle(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<LifecycleError> for StoreError {
    fn from(value: LifecycleError) -> Self {
        Self::Lifecycle(value)
    }
}

impl From<ConfigError> for StoreError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Key store bound to one table layout, one frozen registry and one executor.
pub struct MultilingualKeyStore<E: QueryExecutor> {
    config: StoreConfig,
    registry: LocaleRegistry,
    executor: E,
}

impl<E: QueryExecutor> MultilingualKeyStore<E> {
    /// Creates a store; the registry is frozen from here on.
    pub fn new(config: StoreConfig, registry: LocaleRegistry, executor: E) -> StoreResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            registry,
            executor,
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn registry(&self) -> &LocaleRegistry {
        &self.registry
    }

    pub fn default_locale(&self) -> &Locale {
        &self.config.default_locale
    }

    pub fn set_default_locale(&mut self, locale: Locale) {
        self.config.default_locale = locale;
    }

    /// Reads one locale column for `key`.
    ///
    /// Returns `Ok(None)` for a missing row, a `NULL` cell, or a locale with
    /// no registered column (no SQL is issued in that case).
    pub fn fetch_value(&self, key: &str, locale: &Locale) -> StoreResult<Option<String>> {
        let Some(column) = self.registry.column(locale) else {
            debug!(
                "event=fetch_value module=store status=miss reason=unregistered_locale locale={locale}"
            );
            return Ok(None);
        };

        let rows = self.run_query("fetch_value", sql::select_value(&self.config, column, key))?;
        match rows.into_iter().next() {
            Some(row) => Ok(row.into_iter().next().flatten()),
            None => Ok(None),
        }
    }

    /// Reads every registered locale for `key`, in registry order.
    ///
    /// Returns `Ok(None)` when the key does not exist.
    pub fn fetch_all_locales(&self, key: &str) -> StoreResult<Option<Vec<LocaleValue>>> {
        let statement = sql::select_all_locales(&self.config, &self.registry, key);
        let rows = self.run_query("fetch_all_locales", statement)?;

        match rows.into_iter().next() {
            Some(row) => Ok(Some(zip_row(&self.registry, row)?)),
            None => Ok(None),
        }
    }

    /// Inserts all `keys` with one multi-row INSERT.
    pub fn insert_batch(&self, keys: &[LocalizedKey]) -> StoreResult<usize> {
        let statement = sql::insert_batch(&self.config, &self.registry, keys)?;
        self.run_update("insert_batch", statement)
    }

    /// Updates all `keys` with one UPDATE; unsupplied locale cells are kept.
    pub fn update_batch(&self, keys: &[LocalizedKey]) -> StoreResult<usize> {
        let statement = sql::update_batch(&self.config, &self.registry, keys)?;
        self.run_update("update_batch", statement)
    }

    pub fn delete_key(&self, key: &str) -> StoreResult<usize> {
        self.run_update("delete_key", sql::delete_key(&self.config, key))
    }

    /// Copies the `source` row into a new `destination` row.
    ///
    /// Returns `0` when `source` does not exist.
    pub fn duplicate_key(&self, source: &str, destination: &str) -> StoreResult<usize> {
        let statement = sql::duplicate_key(&self.config, &self.registry, source, destination);
        self.run_update("duplicate_key", statement)
    }

    /// Renders the stored row of `key` as an executable INSERT statement.
    pub fn export_key(&self, key: &str) -> StoreResult<String> {
        let values = self
            .fetch_all_locales(key)?
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
        let cells: Vec<SqlValue> = values.into_iter().map(|cell| cell.value).collect();

        Ok(sql::export_insert(&self.config, &self.registry, key, &cells))
    }

    /// Exports several keys as a newline-separated script, in input order.
    pub fn export_keys(&self, keys: &[&str]) -> StoreResult<String> {
        let statements = keys
            .iter()
            .map(|key| self.export_key(key))
            .collect::<StoreResult<Vec<_>>>()?;
        Ok(statements.join("\n"))
    }

    fn run_query(&self, event: &str, statement: Statement) -> StoreResult<Vec<SqlRow>> {
        debug!(
            "event={event} module=store status=start params={}",
            statement.params.len()
        );
        self.executor
            .query(&statement.sql, &statement.params)
            .map_err(|err| log_db_error(event, err))
    }

    fn run_update(&self, event: &str, statement: Statement) -> StoreResult<usize> {
        debug!(
            "event={event} module=store status=start params={}",
            statement.params.len()
        );
        let changed = self
            .executor
            .update(&statement.sql, &statement.params)
            .map_err(|err| log_db_error(event, err))?;
        debug!("event={event} module=store status=ok changed={changed}");
        Ok(changed)
    }
}

fn log_db_error(event: &str, err: DbError) -> StoreError {
    error!("event={event} module=store status=error error_code=query_failed error={err}");
    StoreError::Db(err)
}

/// Pairs `[key, v1, v2, ..]` with registry locales by position.
fn zip_row(registry: &LocaleRegistry, row: SqlRow) -> StoreResult<Vec<LocaleValue>> {
    let expected = registry.len() + 1;
    if row.len() != expected {
        return Err(StoreError::InvalidData(format!(
            "expected {expected} columns, got {}",
            row.len()
        )));
    }

    Ok(registry
        .locales()
        .zip(row.into_iter().skip(1))
        .map(|(locale, value)| LocaleValue {
            locale: locale.clone(),
            value,
        })
        .collect())
}
