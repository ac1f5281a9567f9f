//! Positional parameter binding for prepared statements.
//!
//! # Invariants
//! - Indexes are 1-based and map to `?` placeholders in SQL order.
//! - Every placeholder must be bound before the statement runs.

use super::error::{DataAccessError, DataAccessResult};
use rusqlite::types::Null;
use rusqlite::{Statement, ToSql};

/// Binds values into one prepared statement and tracks which placeholders
/// received a value.
pub struct ParameterBinder<'stmt, 'conn> {
    stmt: &'stmt mut Statement<'conn>,
    bound: Vec<bool>,
}

impl<'stmt, 'conn> ParameterBinder<'stmt, 'conn> {
    pub(crate) fn new(stmt: &'stmt mut Statement<'conn>) -> Self {
        let bound = vec![false; stmt.parameter_count()];
        Self { stmt, bound }
    }

    /// Binds `value` to the 1-based placeholder `index`.
    ///
    /// # Errors
    /// - Fails when `index` is zero or beyond the statement's placeholder count.
    pub fn bind<T: ToSql>(&mut self, index: usize, value: T) -> DataAccessResult<()> {
        self.stmt.raw_bind_parameter(index, value)?;
        if let Some(slot) = index.checked_sub(1).and_then(|i| self.bound.get_mut(i)) {
            *slot = true;
        }
        Ok(())
    }

    /// Binds SQL `NULL` to the 1-based placeholder `index`.
    pub fn bind_null(&mut self, index: usize) -> DataAccessResult<()> {
        self.bind(index, Null)
    }

    /// Number of placeholders declared by the SQL text.
    pub fn parameter_count(&self) -> usize {
        self.bound.len()
    }

    pub(crate) fn finish(self) -> DataAccessResult<()> {
        match self.bound.iter().position(|bound| !bound) {
            Some(position) => Err(DataAccessError::ParameterMismatch {
                expected: self.bound.len(),
                missing: position + 1,
            }),
            None => Ok(()),
        }
    }
}

/// Binder for statements without placeholders.
pub fn without_params(_: &mut ParameterBinder<'_, '_>) -> DataAccessResult<()> {
    Ok(())
}
