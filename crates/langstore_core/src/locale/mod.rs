//! Locale registry and fallback resolution.
//!
//! # Responsibility
//! - Hold the ordered locale -> column configuration.
//! - Resolve arbitrary requested locales to registered ones.
//!
//! # Invariants
//! - The registry is configured before any store uses it and is only read
//!   afterwards.

pub mod registry;
pub mod resolver;
