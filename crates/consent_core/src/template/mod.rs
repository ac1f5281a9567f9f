//! SQL execution template.
//!
//! # Responsibility
//! - Run exactly one parameterized statement per call on a connection lent by
//!   a `ConnectionProvider`.
//! - Adapt the outcome to one of four shapes: generated key, single record,
//!   record list, affected-row count.
//! - Translate every driver or contract fault into `DataAccessError`.
//!
//! # Invariants
//! - The connection scope ends before any method returns, on success or error.
//! - The binder runs before execution and must bind every placeholder.
//! - Mappers receive rows in result order with a 0-based ordinal.
//! - SQL text and bound values are never written to logs.

mod binder;
mod error;

pub use binder::{without_params, ParameterBinder};
pub use error::{DataAccessError, DataAccessResult};

use crate::db::ConnectionProvider;
use log::{debug, error};
use rusqlite::{Connection, Row, Statement};
use std::time::Instant;

/// Executes single statements against connections from `P`.
#[derive(Debug, Clone)]
pub struct SqlTemplate<P> {
    provider: P,
}

impl<P: ConnectionProvider> SqlTemplate<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Runs an INSERT and optionally returns the store-assigned key.
    ///
    /// The persisted value is passed for its type name only, which is recorded
    /// in log events.
    ///
    /// Returns `0` when `return_generated_key` is `false`.
    ///
    /// # Errors
    /// - `DataAccessError::NoRowsAffected` when the statement inserts nothing.
    pub fn execute_insert<E, B>(
        &self,
        sql: &str,
        binder: B,
        _entity: &E,
        return_generated_key: bool,
    ) -> DataAccessResult<i64>
    where
        E: ?Sized,
        B: FnOnce(&mut ParameterBinder<'_, '_>) -> DataAccessResult<()>,
    {
        self.run("insert", std::any::type_name::<E>(), |conn| {
            let mut stmt = conn.prepare(sql)?;
            bind_parameters(&mut stmt, binder)?;
            let changed = stmt.raw_execute()?;
            if changed == 0 {
                return Err(DataAccessError::NoRowsAffected);
            }
            if return_generated_key {
                Ok(conn.last_insert_rowid())
            } else {
                Ok(0)
            }
        })
    }

    /// Runs a SELECT expected to match at most one row.
    ///
    /// Returns `Ok(None)` when no row matches.
    ///
    /// # Errors
    /// - `DataAccessError::MultipleRows` when a second row exists.
    pub fn fetch_single_record<T, M, B>(
        &self,
        sql: &str,
        mapper: M,
        binder: B,
    ) -> DataAccessResult<Option<T>>
    where
        M: FnOnce(&Row<'_>, usize) -> rusqlite::Result<T>,
        B: FnOnce(&mut ParameterBinder<'_, '_>) -> DataAccessResult<()>,
    {
        self.run("fetch_single", std::any::type_name::<T>(), |conn| {
            let mut stmt = conn.prepare(sql)?;
            bind_parameters(&mut stmt, binder)?;
            let mut rows = stmt.raw_query();
            let Some(row) = rows.next()? else {
                return Ok(None);
            };
            let record = mapper(row, 0)?;
            if rows.next()?.is_some() {
                return Err(DataAccessError::MultipleRows);
            }
            Ok(Some(record))
        })
    }

    /// Runs a SELECT and maps every row in result order.
    ///
    /// Returns an empty `Vec` when nothing matches.
    pub fn execute_query<T, M, B>(
        &self,
        sql: &str,
        mut mapper: M,
        binder: B,
    ) -> DataAccessResult<Vec<T>>
    where
        M: FnMut(&Row<'_>, usize) -> rusqlite::Result<T>,
        B: FnOnce(&mut ParameterBinder<'_, '_>) -> DataAccessResult<()>,
    {
        self.run("query", std::any::type_name::<T>(), |conn| {
            let mut stmt = conn.prepare(sql)?;
            bind_parameters(&mut stmt, binder)?;
            let mut rows = stmt.raw_query();
            let mut records = Vec::new();
            while let Some(row) = rows.next()? {
                records.push(mapper(row, records.len())?);
            }
            Ok(records)
        })
    }

    /// Runs an INSERT, UPDATE or DELETE and returns the affected-row count.
    ///
    /// Zero affected rows is not an error here.
    pub fn execute_update<B>(&self, sql: &str, binder: B) -> DataAccessResult<usize>
    where
        B: FnOnce(&mut ParameterBinder<'_, '_>) -> DataAccessResult<()>,
    {
        self.run("update", "rows", |conn| {
            let mut stmt = conn.prepare(sql)?;
            bind_parameters(&mut stmt, binder)?;
            Ok(stmt.raw_execute()?)
        })
    }

    fn run<T, F>(&self, op: &'static str, target: &str, f: F) -> DataAccessResult<T>
    where
        F: FnOnce(&Connection) -> DataAccessResult<T>,
    {
        let started_at = Instant::now();
        let result = self.provider.with_connection(f);
        match &result {
            Ok(_) => debug!(
                "event=sql_execute module=template op={} target={} status=ok duration_ms={}",
                op,
                target,
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=sql_execute module=template op={} target={} status=error duration_ms={} error={}",
                op,
                target,
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}

fn bind_parameters<B>(stmt: &mut Statement<'_>, binder: B) -> DataAccessResult<()>
where
    B: FnOnce(&mut ParameterBinder<'_, '_>) -> DataAccessResult<()>,
{
    let mut params = ParameterBinder::new(stmt);
    binder(&mut params)?;
    params.finish()
}
