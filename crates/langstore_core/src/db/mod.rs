//! SQLite connection bootstrap and transport errors.
//!
//! # Responsibility
//! - Open SQLite connections configured for the key store.
//! - Define the transport error shared by every query executor.
//!
//! # Invariants
//! - Table creation is the caller's concern; no schema is applied here.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Error raised by the execution layer.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// Failure reported by a non-SQLite executor implementation.
    Backend(String),
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Backend(message) => write!(f, "query backend error: {message}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Backend(_) => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
