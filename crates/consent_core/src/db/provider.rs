//! Connection providers lent to the execution template.
//!
//! # Responsibility
//! - Hand out a ready-to-use connection for exactly one closure call.
//! - Own connection lifecycle; callers never keep a connection.
//!
//! # Invariants
//! - The connection (or the lock guarding it) is released when the closure
//!   returns, errors or unwinds.
//! - Acquisition failures surface as `DataAccessError::Connection`.

use super::open::{open_configured, open_db_with_config};
use super::{DbError, DbResult};
use crate::config::DataSourceConfig;
use crate::template::{DataAccessError, DataAccessResult};
use log::{error, warn};
use rusqlite::Connection;
use std::sync::{Arc, Mutex, PoisonError};

/// Source of connections for the SQL execution template.
///
/// Implementations decide pooling, timeouts and credentials; the template only
/// sees a borrowed `Connection` for the duration of `f`.
pub trait ConnectionProvider {
    fn with_connection<T, F>(&self, f: F) -> DataAccessResult<T>
    where
        F: FnOnce(&Connection) -> DataAccessResult<T>;
}

impl<P: ConnectionProvider> ConnectionProvider for &P {
    fn with_connection<T, F>(&self, f: F) -> DataAccessResult<T>
    where
        F: FnOnce(&Connection) -> DataAccessResult<T>,
    {
        (**self).with_connection(f)
    }
}

impl<P: ConnectionProvider> ConnectionProvider for Arc<P> {
    fn with_connection<T, F>(&self, f: F) -> DataAccessResult<T>
    where
        F: FnOnce(&Connection) -> DataAccessResult<T>,
    {
        (**self).with_connection(f)
    }
}

/// Opens a fresh connection to a database file for every call.
///
/// The schema is bootstrapped once at construction; per-call connections only
/// apply the configured pragmas.
#[derive(Debug, Clone)]
pub struct FileConnectionProvider {
    config: DataSourceConfig,
}

impl FileConnectionProvider {
    /// Builds a provider for `config` and bootstraps the schema.
    ///
    /// # Errors
    /// - `DbError::MissingPath` when `config.path` is `None`; a fresh in-memory
    ///   database per call would never see earlier writes.
    /// - Any open or bootstrap failure.
    pub fn new(config: DataSourceConfig) -> DbResult<Self> {
        if config.path.is_none() {
            return Err(DbError::MissingPath);
        }
        open_db_with_config(&config)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DataSourceConfig {
        &self.config
    }
}

impl ConnectionProvider for FileConnectionProvider {
    fn with_connection<T, F>(&self, f: F) -> DataAccessResult<T>
    where
        F: FnOnce(&Connection) -> DataAccessResult<T>,
    {
        let conn = open_configured(&self.config).map_err(|err| {
            error!(
                "event=connection_acquire module=db status=error mode={} error_code=connection_open_failed error={}",
                self.config.mode(),
                err
            );
            DataAccessError::Connection(err)
        })?;
        // `conn` is closed on drop at the end of this scope.
        f(&conn)
    }
}

/// Serializes callers over one owned connection.
///
/// Used for in-memory databases, where every new connection would be a
/// separate empty database.
#[derive(Debug)]
pub struct SharedConnectionProvider {
    conn: Mutex<Connection>,
}

impl SharedConnectionProvider {
    /// Wraps an already configured connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Opens and bootstraps a private in-memory database.
    pub fn in_memory() -> DbResult<Self> {
        Self::open(&DataSourceConfig::in_memory())
    }

    /// Opens and bootstraps the database described by `config`.
    pub fn open(config: &DataSourceConfig) -> DbResult<Self> {
        open_db_with_config(config).map(Self::new)
    }
}

impl ConnectionProvider for SharedConnectionProvider {
    fn with_connection<T, F>(&self, f: F) -> DataAccessResult<T>
    where
        F: FnOnce(&Connection) -> DataAccessResult<T>,
    {
        let guard = self.conn.lock().unwrap_or_else(|poisoned| {
            // A panicking caller cannot leave a statement open: statements are
            // dropped during unwind, so the connection itself is still usable.
            warn!("event=connection_acquire module=db status=recovered reason=lock_poisoned");
            PoisonError::into_inner(poisoned)
        });
        f(&guard)
    }
}
