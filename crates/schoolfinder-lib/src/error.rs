use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the SchoolFinder library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// Variants fall into two families: validation failures raised before any
/// storage work happens, and storage failures raised by the record store.
#[derive(Debug, Error)]
pub enum Error {
    /// A caller supplied field was missing, malformed or out of range.
    #[error("invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// The database file could not be opened or bootstrapped.
    #[error("failed to open school database at {path}: {source}")]
    DatabaseOpen {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// The store could not be reached (poisoned lock, worker failure).
    #[error("school store unavailable: {0}")]
    StorageUnavailable(String),

    /// Wrapper for SQLite errors.
    #[error(transparent)]
    Storage(#[from] rusqlite::Error),
}

impl Error {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    /// True for errors caused by bad caller input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidField { .. })
    }

    /// True for errors raised by the persistence layer.
    pub fn is_storage(&self) -> bool {
        !self.is_validation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_field_message_names_field() {
        let err = Error::invalid("latitude", "must be a number");
        assert_eq!(err.to_string(), "invalid latitude: must be a number");
        assert!(err.is_validation());
        assert!(!err.is_storage());
    }

    #[test]
    fn sqlite_errors_are_storage_errors() {
        let err: Error = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(err.is_storage());
        assert!(!err.is_validation());
    }

    #[test]
    fn unavailable_is_storage_error() {
        let err = Error::StorageUnavailable("lock poisoned".to_string());
        assert!(err.is_storage());
        assert!(err.to_string().contains("lock poisoned"));
    }
}
