//! Error types and result types for book store operations.
//!
//! A missing record is never an error: lookups, replacements and removals
//! report absence through `Option::None`. The variants below cover the cases
//! where the store itself could not do its job. Use [`BookStoreResult<T>`] as
//! the return type for fallible operations.

use bson::error::Error as BsonError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Represents all possible errors that can occur when talking to a book store.
#[derive(Error, Debug)]
pub enum BookStoreError {
    /// Serialization/deserialization error when converting a record between formats (BSON, JSON).
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Error during store initialization or connection setup.
    #[error("Initialization error: {0}")]
    Initialization(String),
    /// A stored document does not have the shape of a book record.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
    /// The underlying storage backend is unreachable or rejected the operation.
    ///
    /// Only persistent stores produce this variant.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// A specialized `Result` type for book store operations.
pub type BookStoreResult<T> = Result<T, BookStoreError>;

impl From<BsonError> for BookStoreError {
    fn from(err: BsonError) -> Self {
        BookStoreError::Serialization(err.to_string())
    }
}

impl From<SerdeJsonError> for BookStoreError {
    fn from(err: SerdeJsonError) -> Self {
        BookStoreError::Serialization(err.to_string())
    }
}
