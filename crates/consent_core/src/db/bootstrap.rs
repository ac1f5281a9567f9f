//! Schema bootstrap for standalone use.
//!
//! The schema is owned by the deployment; this only creates the `PURPOSE`
//! table when it is missing so in-memory and fresh file databases are usable.
//! It is idempotent and carries no version tracking.

use super::{DbError, DbResult};
use rusqlite::Connection;

/// Table name the purpose DAO reads and writes.
pub const PURPOSE_TABLE: &str = "PURPOSE";

const PURPOSE_SCHEMA_SQL: &str = include_str!("purpose_schema.sql");

/// Creates the `PURPOSE` table if it does not exist yet.
pub fn bootstrap_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(PURPOSE_SCHEMA_SQL)
        .map_err(DbError::Bootstrap)
}
