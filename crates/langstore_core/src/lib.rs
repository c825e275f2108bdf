//! Core logic for langstore.
//! Localized strings live in one table with a column per locale; this crate
//! resolves locales and shapes the SQL that reads and writes those rows.

pub mod config;
pub mod db;
pub mod executor;
pub mod locale;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use config::{ConfigError, StoreConfig};
pub use executor::{QueryExecutor, SqlRow, SqlValue, SqliteExecutor};
pub use locale::registry::{LocaleRegistry, RegistryError};
pub use locale::resolver::{fallback_chain, resolve};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::locale::{Locale, LocaleParseError};
pub use model::localized_key::{LocaleValue, LocalizedKey};
pub use service::language_manager::LanguageManager;
pub use service::lifecycle::{Lifecycle, LifecycleError, LifecycleState};
pub use store::{MultilingualKeyStore, StoreError, StoreResult, ValidationError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
