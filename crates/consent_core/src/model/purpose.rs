//! Purpose domain model.
//!
//! # Responsibility
//! - Describe one reason for which personal data may be processed.
//!
//! # Invariants
//! - `id` is `None` for values submitted for creation.
//! - `id` is `Some` for every value read back from storage.
//! - Fields are private; a persisted copy is a new value, never a mutation.

use serde::{Deserialize, Serialize};

/// Store-assigned primary key of a purpose row.
pub type PurposeId = i64;

/// Named, described reason for processing personal data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purpose {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<PurposeId>,
    name: String,
    description: Option<String>,
}

impl Purpose {
    /// Creates a transient purpose that has not been persisted yet.
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description,
        }
    }

    /// Creates a purpose carrying a store-assigned id.
    ///
    /// Used by row mappers and by the insert path once the generated key is
    /// known.
    pub fn with_id(id: PurposeId, name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
            description,
        }
    }

    pub fn id(&self) -> Option<PurposeId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns whether this value has been assigned a storage id.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::Purpose;

    #[test]
    fn new_purpose_has_no_id() {
        let purpose = Purpose::new("analytics", None);
        assert_eq!(purpose.id(), None);
        assert!(!purpose.is_persisted());
        assert_eq!(purpose.description(), None);
    }

    #[test]
    fn with_id_marks_purpose_as_persisted() {
        let purpose = Purpose::with_id(7, "billing", Some("invoice delivery".to_string()));
        assert_eq!(purpose.id(), Some(7));
        assert_eq!(purpose.name(), "billing");
        assert_eq!(purpose.description(), Some("invoice delivery"));
        assert!(purpose.is_persisted());
    }
}
