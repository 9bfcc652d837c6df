//! Error types and result types for document store operations.
//!
//! Use [`StoreResult<T>`] as the return type for fallible store operations.
//! Input validation failures are a separate type, see
//! [`ValidationError`](crate::validate::ValidationError).

use bson::error::Error as BsonError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Represents all possible errors that can occur when talking to a document store.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// Serialization/deserialization error when converting between document formats (BSON, JSON).
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Error during store initialization or connection setup.
    #[error("Initialization error: {0}")]
    Initialization(String),
    /// No store is configured, or the configured store cannot be reached.
    #[error("Database not available: {0}")]
    Unavailable(String),
    /// The record could not be turned into a storable document.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
    /// The query refers to something the collection does not have.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
    /// An error occurred in the underlying storage backend.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// A specialized `Result` type for document store operations.
pub type StoreResult<T> = Result<T, StoreError>;

impl From<BsonError> for StoreError {
    fn from(err: BsonError) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

impl From<SerdeJsonError> for StoreError {
    fn from(err: SerdeJsonError) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_message_names_the_database() {
        let err = StoreError::Unavailable("DATABASE_URL is not set".to_string());

        assert_eq!(err.to_string(), "Database not available: DATABASE_URL is not set");
    }

    #[test]
    fn json_errors_become_serialization_errors() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();

        assert!(matches!(StoreError::from(json_err), StoreError::Serialization(_)));
    }
}
