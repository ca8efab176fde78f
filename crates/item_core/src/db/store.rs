//! Statement-level contract between repositories and the SQL store.
//!
//! # Responsibility
//! - Express the four round-trip shapes repositories need: keyed insert,
//!   counted write, point lookup and scan.
//! - Keep statement preparation and row iteration out of repository code.
//!
//! # Invariants
//! - Each call runs exactly one statement.
//! - `query_one` never picks one of several rows; extra rows are an error.

use super::{DbError, DbResult};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row};

/// Minimal store adapter contract.
///
/// Parameters are positional and bound in slice order.
pub trait SqlStore {
    /// Runs an `INSERT` and returns the key generated for the new row.
    fn insert_returning_key(&self, sql: &str, params: &[Value]) -> DbResult<i64>;

    /// Runs a write statement and returns the number of affected rows.
    fn execute_update(&self, sql: &str, params: &[Value]) -> DbResult<usize>;

    /// Runs a query expected to match zero or one row.
    ///
    /// # Errors
    /// - `DbError::IncorrectResultSize` when more than one row matches.
    fn query_one<T, F>(&self, sql: &str, params: &[Value], mapper: F) -> DbResult<Option<T>>
    where
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>;

    /// Runs a query and maps every returned row.
    fn query_many<T, F>(&self, sql: &str, params: &[Value], mapper: F) -> DbResult<Vec<T>>
    where
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>;
}

impl SqlStore for Connection {
    fn insert_returning_key(&self, sql: &str, params: &[Value]) -> DbResult<i64> {
        let mut stmt = self.prepare_cached(sql)?;
        let key = stmt.insert(params_from_iter(params.iter()))?;
        Ok(key)
    }

    fn execute_update(&self, sql: &str, params: &[Value]) -> DbResult<usize> {
        let mut stmt = self.prepare_cached(sql)?;
        let changed = stmt.execute(params_from_iter(params.iter()))?;
        Ok(changed)
    }

    fn query_one<T, F>(&self, sql: &str, params: &[Value], mut mapper: F) -> DbResult<Option<T>>
    where
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let mut stmt = self.prepare_cached(sql)?;
        let mut rows = stmt.query(params_from_iter(params.iter()))?;

        let Some(first) = rows.next()? else {
            return Ok(None);
        };
        let value = mapper(first)?;

        let mut actual = 1;
        while rows.next()?.is_some() {
            actual += 1;
        }
        if actual > 1 {
            return Err(DbError::IncorrectResultSize {
                expected: 1,
                actual,
            });
        }

        Ok(Some(value))
    }

    fn query_many<T, F>(&self, sql: &str, params: &[Value], mut mapper: F) -> DbResult<Vec<T>>
    where
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let mut stmt = self.prepare_cached(sql)?;
        let mut rows = stmt.query(params_from_iter(params.iter()))?;
        let mut mapped = Vec::new();

        while let Some(row) = rows.next()? {
            mapped.push(mapper(row)?);
        }

        Ok(mapped)
    }
}
