//! Purpose DAO contract and SQLite implementation.
//!
//! # Responsibility
//! - Create, read, list and delete rows of the `PURPOSE` table.
//!
//! # Invariants
//! - Projection order is `ID, NAME, DESCRIPTION`; mappers read positionally.
//! - Listing is ordered by ascending `ID`; `limit` is bound before `offset`.
//! - `limit`/`offset` are passed to the store unvalidated.
//! - Delete returns the requested id whether or not a row existed.

use crate::db::ConnectionProvider;
use crate::error::{ConsentError, ConsentResult};
use crate::model::purpose::{Purpose, PurposeId};
use crate::template::SqlTemplate;
use rusqlite::Row;

const INSERT_PURPOSE_SQL: &str = "INSERT INTO PURPOSE(NAME, DESCRIPTION) VALUES(?, ?)";
const SELECT_PURPOSE_BY_ID_SQL: &str = "SELECT ID, NAME, DESCRIPTION FROM PURPOSE WHERE ID = ?";
const LIST_PAGINATED_PURPOSE_SQL: &str =
    "SELECT ID, NAME, DESCRIPTION FROM PURPOSE ORDER BY ID ASC LIMIT ? OFFSET ?";
const DELETE_PURPOSE_SQL: &str = "DELETE FROM PURPOSE WHERE ID = ?";

/// Data-access contract for `Purpose` rows.
pub trait PurposeDao {
    /// Persists `purpose` and returns a new value carrying the generated id.
    fn add_purpose(&self, purpose: &Purpose) -> ConsentResult<Purpose>;
    /// Loads one purpose; a missing row is `ErrorKind::NotFound`.
    fn get_purpose_by_id(&self, id: PurposeId) -> ConsentResult<Purpose>;
    /// Returns one page of purposes ordered by id.
    fn list_purposes(&self, limit: i64, offset: i64) -> ConsentResult<Vec<Purpose>>;
    /// Deletes by id and echoes the id back.
    fn delete_purpose(&self, id: PurposeId) -> ConsentResult<PurposeId>;
}

/// `PurposeDao` backed by the SQL execution template.
pub struct SqlitePurposeDao<P> {
    template: SqlTemplate<P>,
}

impl<P: ConnectionProvider> SqlitePurposeDao<P> {
    pub fn new(provider: P) -> Self {
        Self {
            template: SqlTemplate::new(provider),
        }
    }

    pub fn template(&self) -> &SqlTemplate<P> {
        &self.template
    }
}

impl<P: ConnectionProvider> PurposeDao for SqlitePurposeDao<P> {
    fn add_purpose(&self, purpose: &Purpose) -> ConsentResult<Purpose> {
        let inserted_id = self
            .template
            .execute_insert(
                INSERT_PURPOSE_SQL,
                |params| {
                    params.bind(1, purpose.name())?;
                    params.bind(2, purpose.description())
                },
                purpose,
                true,
            )
            .map_err(|err| {
                ConsentError::add_failed(purpose.name(), purpose.description(), err)
            })?;

        Ok(Purpose::with_id(
            inserted_id,
            purpose.name(),
            purpose.description().map(str::to_string),
        ))
    }

    fn get_purpose_by_id(&self, id: PurposeId) -> ConsentResult<Purpose> {
        let purpose = self
            .template
            .fetch_single_record(SELECT_PURPOSE_BY_ID_SQL, map_purpose_row, |params| {
                params.bind(1, id)
            })
            .map_err(|err| ConsentError::get_failed(id, err))?;

        purpose.ok_or_else(|| ConsentError::not_found(id))
    }

    fn list_purposes(&self, limit: i64, offset: i64) -> ConsentResult<Vec<Purpose>> {
        self.template
            .execute_query(LIST_PAGINATED_PURPOSE_SQL, map_purpose_row, |params| {
                params.bind(1, limit)?;
                params.bind(2, offset)
            })
            .map_err(|err| ConsentError::list_failed(limit, offset, err))
    }

    fn delete_purpose(&self, id: PurposeId) -> ConsentResult<PurposeId> {
        self.template
            .execute_update(DELETE_PURPOSE_SQL, |params| params.bind(1, id))
            .map_err(|err| ConsentError::delete_failed(id, err))?;

        Ok(id)
    }
}

fn map_purpose_row(row: &Row<'_>, _row_number: usize) -> rusqlite::Result<Purpose> {
    Ok(Purpose::with_id(row.get(0)?, row.get::<_, String>(1)?, row.get(2)?))
}
