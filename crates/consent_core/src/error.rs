//! Operation-level errors raised at the DAO boundary.
//!
//! # Responsibility
//! - Hold one canonical error record per failed DAO operation.
//! - Wrap template faults with a stable code and a formatted message.
//!
//! # Invariants
//! - Codes never change once published; callers match on them.
//! - The original `DataAccessError` stays reachable through `source()`.
//! - `NotFound` is distinct from every fault kind and carries no cause.

use crate::model::purpose::PurposeId;
use crate::template::DataAccessError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ConsentResult<T> = Result<T, ConsentError>;

/// Category of a failed DAO operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    AddFailed,
    GetFailed,
    ListFailed,
    DeleteFailed,
    NotFound,
}

/// Canonical error records: one per failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorMessage {
    AddPurpose,
    SelectPurposeById,
    ListPurpose,
    DeletePurpose,
    PurposeIdInvalid,
}

impl ErrorMessage {
    /// Stable code identifying the failed operation.
    pub fn code(self) -> &'static str {
        match self {
            Self::AddPurpose => "CM_00004",
            Self::SelectPurposeById => "CM_00005",
            Self::ListPurpose => "CM_00006",
            Self::DeletePurpose => "CM_00007",
            Self::PurposeIdInvalid => "CM_00008",
        }
    }

    pub fn kind(self) -> ErrorKind {
        match self {
            Self::AddPurpose => ErrorKind::AddFailed,
            Self::SelectPurposeById => ErrorKind::GetFailed,
            Self::ListPurpose => ErrorKind::ListFailed,
            Self::DeletePurpose => ErrorKind::DeleteFailed,
            Self::PurposeIdInvalid => ErrorKind::NotFound,
        }
    }
}

/// Error returned by every DAO operation.
#[derive(Debug)]
pub struct ConsentError {
    record: ErrorMessage,
    message: String,
    cause: Option<DataAccessError>,
}

impl ConsentError {
    /// Insert of `name`/`description` failed. A missing description prints as `null`.
    pub fn add_failed(name: &str, description: Option<&str>, cause: DataAccessError) -> Self {
        Self::wrap(
            ErrorMessage::AddPurpose,
            format!(
                "Error occurred while adding the purpose, name: {name}, description: {}",
                description.unwrap_or("null")
            ),
            cause,
        )
    }

    pub fn get_failed(id: PurposeId, cause: DataAccessError) -> Self {
        Self::wrap(
            ErrorMessage::SelectPurposeById,
            format!("Error occurred while retrieving purpose with id: {id}"),
            cause,
        )
    }

    pub fn list_failed(limit: i64, offset: i64, cause: DataAccessError) -> Self {
        Self::wrap(
            ErrorMessage::ListPurpose,
            format!("Error occurred while listing purposes with limit: {limit}, offset: {offset}"),
            cause,
        )
    }

    pub fn delete_failed(id: PurposeId, cause: DataAccessError) -> Self {
        Self::wrap(
            ErrorMessage::DeletePurpose,
            format!("Error occurred while deleting purpose with id: {id}"),
            cause,
        )
    }

    /// No row matched `id`; carries no cause.
    pub fn not_found(id: PurposeId) -> Self {
        Self {
            record: ErrorMessage::PurposeIdInvalid,
            message: format!("No purpose found for the id: {id}"),
            cause: None,
        }
    }

    fn wrap(record: ErrorMessage, message: String, cause: DataAccessError) -> Self {
        Self {
            record,
            message,
            cause: Some(cause),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.record.kind()
    }

    pub fn code(&self) -> &'static str {
        self.record.code()
    }

    pub fn record(&self) -> ErrorMessage {
        self.record
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The wrapped template fault, if any.
    pub fn cause(&self) -> Option<&DataAccessError> {
        self.cause.as_ref()
    }
}

impl Display for ConsentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message)
    }
}

impl Error for ConsentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_ref().map(|err| err as &(dyn Error + 'static))
    }
}
