//! Language manager use-case facade.
//!
//! # Responsibility
//! - Own the lifecycle guard and the default locale.
//! - Resolve requested locales before delegating reads to the key store.
//!
//! # Invariants
//! - Every key/locale operation fails with `StoreError::Lifecycle` unless
//!   the manager is initialized, and does so before touching the store.
//! - Service APIs never bypass store validation.

use crate::config::StoreConfig;
use crate::executor::QueryExecutor;
use crate::locale::registry::LocaleRegistry;
use crate::locale::resolver::resolve;
use crate::model::locale::Locale;
use crate::model::localized_key::{LocaleValue, LocalizedKey};
use crate::service::lifecycle::{Lifecycle, LifecycleState};
use crate::store::{MultilingualKeyStore, StoreResult};
use log::{debug, info, warn};

/// Lifecycle-guarded entry point for localized key access.
pub struct LanguageManager<E: QueryExecutor> {
    store: MultilingualKeyStore<E>,
    lifecycle: Lifecycle,
}

impl<E: QueryExecutor> LanguageManager<E> {
    /// Creates an uninitialized manager.
    ///
    /// `config.default_locale` is the fallback target until changed.
    pub fn new(config: StoreConfig, registry: LocaleRegistry, executor: E) -> StoreResult<Self> {
        Ok(Self {
            store: MultilingualKeyStore::new(config, registry, executor)?,
            lifecycle: Lifecycle::new(),
        })
    }

    pub fn init(&mut self) {
        if self.lifecycle.init() {
            info!(
                "event=manager_init module=service status=ok table={} locales={}",
                self.store.config().table_name,
                self.store.registry().len()
            );
        } else {
            warn!("event=manager_init module=service status=skipped reason=already_initialized");
        }
    }

    pub fn destroy(&mut self) {
        if self.lifecycle.destroy() {
            info!(
                "event=manager_destroy module=service status=ok table={}",
                self.store.config().table_name
            );
        } else {
            warn!("event=manager_destroy module=service status=skipped reason=not_initialized");
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.lifecycle.is_initialized()
    }

    pub fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    pub fn default_locale(&self) -> &Locale {
        self.store.default_locale()
    }

    /// Changes the fallback target for subsequent lookups; `config()` reflects it.
    pub fn set_default_locale(&mut self, locale: Locale) {
        info!("event=default_locale_set module=service status=ok locale={locale}");
        self.store.set_default_locale(locale);
    }

    pub fn config(&self) -> &StoreConfig {
        self.store.config()
    }

    pub fn registry(&self) -> &LocaleRegistry {
        self.store.registry()
    }

    /// Resolves `locale` against the registry and current default.
    pub fn normalize_locale(&self, locale: Option<&Locale>) -> Locale {
        resolve(locale, self.store.registry(), self.store.default_locale())
    }

    /// Column that a lookup for `locale` would read, if any.
    pub fn column_for(&self, locale: Option<&Locale>) -> Option<&str> {
        let resolved = self.normalize_locale(locale);
        self.store.registry().column(&resolved)
    }

    /// Reads `key` in the best available locale for `locale`.
    ///
    /// `None` means the row, the cell, or any registered fallback is missing.
    pub fn localized_value(
        &self,
        key: &str,
        locale: Option<&Locale>,
    ) -> StoreResult<Option<String>> {
        self.lifecycle.ensure_initialized()?;
        let resolved = self.normalize_locale(locale);
        debug!(
            "event=localized_value module=service status=resolved requested={} resolved={resolved}",
            locale.map_or_else(|| "none".to_string(), ToString::to_string)
        );
        self.store.fetch_value(key, &resolved)
    }

    pub fn locale_values(&self, key: &str) -> StoreResult<Option<Vec<LocaleValue>>> {
        self.lifecycle.ensure_initialized()?;
        self.store.fetch_all_locales(key)
    }

    pub fn add_keys(&self, keys: &[LocalizedKey]) -> StoreResult<usize> {
        self.lifecycle.ensure_initialized()?;
        self.store.insert_batch(keys)
    }

    pub fn set_keys(&self, keys: &[LocalizedKey]) -> StoreResult<usize> {
        self.lifecycle.ensure_initialized()?;
        self.store.update_batch(keys)
    }

    pub fn remove_key(&self, key: &str) -> StoreResult<usize> {
        self.lifecycle.ensure_initialized()?;
        self.store.delete_key(key)
    }

    pub fn duplicate_key(&self, source: &str, destination: &str) -> StoreResult<usize> {
        self.lifecycle.ensure_initialized()?;
        self.store.duplicate_key(source, destination)
    }

    pub fn export_key(&self, key: &str) -> StoreResult<String> {
        self.lifecycle.ensure_initialized()?;
        self.store.export_key(key)
    }

    pub fn export_keys(&self, keys: &[&str]) -> StoreResult<String> {
        self.lifecycle.ensure_initialized()?;
        self.store.export_keys(keys)
    }
}
