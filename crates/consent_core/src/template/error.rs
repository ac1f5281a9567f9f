//! Generic data-access fault raised by the execution template.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type DataAccessResult<T> = Result<T, DataAccessError>;

/// Any failure below the DAO boundary.
///
/// Driver errors are kept as the `source()` so callers can inspect them
/// without the template exposing `rusqlite` types in its signatures.
#[derive(Debug)]
pub enum DataAccessError {
    /// The provider could not hand out a connection.
    Connection(DbError),
    /// The driver rejected the statement, a binding or a row read.
    Sqlite(rusqlite::Error),
    /// A write statement changed no rows where at least one was required.
    NoRowsAffected,
    /// A single-record fetch matched more than one row.
    MultipleRows,
    /// The binder left a placeholder without a value.
    ParameterMismatch { expected: usize, missing: usize },
}

impl Display for DataAccessError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connection(err) => write!(f, "connection unavailable: {err}"),
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::NoRowsAffected => write!(f, "statement affected no rows"),
            Self::MultipleRows => write!(f, "expected at most one row, got more"),
            Self::ParameterMismatch { expected, missing } => write!(
                f,
                "statement expects {expected} parameter(s) but index {missing} was not bound"
            ),
        }
    }
}

impl Error for DataAccessError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Connection(err) => Some(err),
            Self::Sqlite(err) => Some(err),
            Self::NoRowsAffected | Self::MultipleRows | Self::ParameterMismatch { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DataAccessError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<DbError> for DataAccessError {
    fn from(value: DbError) -> Self {
        Self::Connection(value)
    }
}
