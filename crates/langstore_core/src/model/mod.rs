//! Domain model for localized rows.
//!
//! # Responsibility
//! - Define locale identifiers and the DTOs exchanged with the key store.
//!
//! # Invariants
//! - A `Locale` is always normalized; equality is textual-form equality.

pub mod locale;
pub mod localized_key;
