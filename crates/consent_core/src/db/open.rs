//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection pragmas from `DataSourceConfig`.
//! - Bootstrap the purpose schema before returning a usable connection.
//!
//! # Invariants
//! - Returned connections have the configured `foreign_keys` and busy timeout.
//! - Returned connections have the `PURPOSE` table available.

use super::bootstrap::bootstrap_schema;
use super::DbResult;
use crate::config::DataSourceConfig;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::Instant;

/// Opens a SQLite database file with default settings and bootstraps it.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    open_db_with_config(&DataSourceConfig::file(path))
}

/// Opens a private in-memory SQLite database and bootstraps it.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_db_with_config(&DataSourceConfig::in_memory())
}

/// Opens the database described by `config` and bootstraps the schema.
pub fn open_db_with_config(config: &DataSourceConfig) -> DbResult<Connection> {
    let started_at = Instant::now();
    let mode = config.mode();
    info!("event=db_open module=db status=start mode={mode}");

    let conn = match open_configured(config) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_open_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err);
        }
    };

    match bootstrap_schema(&conn) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={} duration_ms={}",
                mode,
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

/// Opens and configures a connection without touching the schema.
pub(crate) fn open_configured(config: &DataSourceConfig) -> DbResult<Connection> {
    let conn = match &config.path {
        Some(path) => Connection::open(path)?,
        None => Connection::open_in_memory()?,
    };
    let foreign_keys = if config.foreign_keys { "ON" } else { "OFF" };
    conn.execute_batch(&format!("PRAGMA foreign_keys = {foreign_keys};"))?;
    conn.busy_timeout(config.busy_timeout)?;
    Ok(conn)
}
