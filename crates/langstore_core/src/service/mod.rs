//! Core use-case services.
//!
//! # Responsibility
//! - Wrap the key store with lifecycle guards and locale resolution.
//! - Keep callers decoupled from statement building.

pub mod language_manager;
pub mod lifecycle;
