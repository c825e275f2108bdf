//! `QueryExecutor` over a borrowed rusqlite connection.

use super::{QueryExecutor, SqlRow, SqlValue};
use crate::db::DbResult;
use rusqlite::types::{Type, ValueRef};
use rusqlite::{params_from_iter, Connection};

/// SQLite-backed executor. Transactions stay with the connection owner.
pub struct SqliteExecutor<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteExecutor<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl QueryExecutor for SqliteExecutor<'_> {
    fn query(&self, sql: &str, params: &[SqlValue]) -> DbResult<Vec<SqlRow>> {
        let mut stmt = self.conn.prepare(sql)?;
        let width = stmt.column_count();
        let mut rows = stmt.query(params_from_iter(params.iter()))?;
        let mut mapped = Vec::new();

        while let Some(row) = rows.next()? {
            mapped.push(map_row(row, width)?);
        }

        Ok(mapped)
    }

    fn update(&self, sql: &str, params: &[SqlValue]) -> DbResult<usize> {
        let changed = self.conn.execute(sql, params_from_iter(params.iter()))?;
        Ok(changed)
    }
}

fn map_row(row: &rusqlite::Row<'_>, width: usize) -> rusqlite::Result<SqlRow> {
    (0..width).map(|index| cell_text(row, index)).collect()
}

/// Reads a cell as text; numeric affinity may have turned bound text into a number.
fn cell_text(row: &rusqlite::Row<'_>, index: usize) -> rusqlite::Result<SqlValue> {
    match row.get_ref(index)? {
        ValueRef::Null => Ok(None),
        ValueRef::Integer(value) => Ok(Some(value.to_string())),
        ValueRef::Real(value) => Ok(Some(value.to_string())),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .map(|text| Some(text.to_string()))
            .map_err(|err| {
                rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(err))
            }),
        ValueRef::Blob(_) => Err(rusqlite::Error::InvalidColumnType(
            index,
            row.as_ref().column_name(index)?.to_string(),
            Type::Blob,
        )),
    }
}
