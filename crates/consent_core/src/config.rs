//! Data source configuration.
//!
//! # Responsibility
//! - Describe where and how SQLite connections are opened.
//!
//! # Invariants
//! - `path == None` selects a private in-memory database.
//! - `busy_timeout` is applied to every connection opened from this config.

use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection settings consumed by `open_db_with_config` and
/// `FileConnectionProvider`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSourceConfig {
    /// Database file location. `None` opens an in-memory database.
    pub path: Option<PathBuf>,
    /// How long SQLite waits on a locked database before failing.
    pub busy_timeout: Duration,
    /// Whether `PRAGMA foreign_keys` is enabled on open.
    pub foreign_keys: bool,
}

impl Default for DataSourceConfig {
    fn default() -> Self {
        Self {
            path: None,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
            foreign_keys: true,
        }
    }
}

impl DataSourceConfig {
    /// Config for an on-disk database at `path` with default settings.
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self {
            path: Some(path.as_ref().to_path_buf()),
            ..Self::default()
        }
    }

    /// Config for a private in-memory database.
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    pub fn with_foreign_keys(mut self, enabled: bool) -> Self {
        self.foreign_keys = enabled;
        self
    }

    /// Short label used in log events; never includes the full path.
    pub(crate) fn mode(&self) -> &'static str {
        if self.path.is_some() {
            "file"
        } else {
            "memory"
        }
    }
}
