//! Query execution seam.
//!
//! # Responsibility
//! - Define the minimal contract the key store needs from a database.
//! - Keep statement building independent from any one driver.
//!
//! # Invariants
//! - Parameters bind positionally to `?` placeholders in statement order.
//! - Driver errors are returned unchanged; executors never retry.

use crate::db::DbResult;

mod sqlite;

pub use sqlite::SqliteExecutor;

/// One bound parameter or result cell. Locale columns are nullable text.
pub type SqlValue = Option<String>;

/// One result row, columns in SELECT-list order.
pub type SqlRow = Vec<SqlValue>;

/// Executes parameterized SQL on behalf of the key store.
pub trait QueryExecutor {
    /// Runs a SELECT and returns every row.
    fn query(&self, sql: &str, params: &[SqlValue]) -> DbResult<Vec<SqlRow>>;

    /// Runs a mutation and returns the affected-row count.
    fn update(&self, sql: &str, params: &[SqlValue]) -> DbResult<usize>;
}
