//! Data-access core for consent management.
//! Every DAO operation runs through the SQL execution template in `template`.

pub mod config;
pub mod dao;
pub mod db;
pub mod error;
pub mod logging;
pub mod model;
pub mod template;

pub use config::DataSourceConfig;
pub use dao::purpose_dao::{PurposeDao, SqlitePurposeDao};
pub use db::{ConnectionProvider, FileConnectionProvider, SharedConnectionProvider};
pub use error::{ConsentError, ConsentResult, ErrorKind, ErrorMessage};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::purpose::{Purpose, PurposeId};
pub use template::{
    without_params, DataAccessError, DataAccessResult, ParameterBinder, SqlTemplate,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
