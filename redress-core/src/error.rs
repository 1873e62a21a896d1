//! Error types for the complaint tracker core

use thiserror::Error;

/// Store operation errors
///
/// Every persistence-layer failure surfaces as one of these variants; the API
/// layer maps them onto HTTP statuses. `Conflict` covers constraint failures
/// such as deleting a category that complaints still reference.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Record already exists: {0}")]
    AlreadyExists(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
