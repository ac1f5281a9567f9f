//! SQLite storage bootstrap and connection provisioning.
//!
//! # Responsibility
//! - Open and configure SQLite connections for consent core.
//! - Ensure the `PURPOSE` table exists before a connection is handed out.
//! - Lend connections to the execution template through `ConnectionProvider`.
//!
//! # Invariants
//! - Returned connections carry the pragmas requested by `DataSourceConfig`.
//! - A connection is never held by core code beyond a single provider call.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod bootstrap;
mod open;
pub mod provider;

pub use bootstrap::{bootstrap_schema, PURPOSE_TABLE};
pub use open::{open_db, open_db_in_memory, open_db_with_config};
pub use provider::{ConnectionProvider, FileConnectionProvider, SharedConnectionProvider};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    Bootstrap(rusqlite::Error),
    MissingPath,
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Bootstrap(err) => write!(f, "schema bootstrap failed: {err}"),
            Self::MissingPath => write!(f, "file connection provider requires a database path"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::Bootstrap(err) => Some(err),
            Self::MissingPath => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
