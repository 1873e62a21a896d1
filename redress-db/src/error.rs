//! Database error types

use redress_core::error::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Query error: {0}")]
    Query(String),

    #[error("Row not found: {0}")]
    NotFound(String),

    #[error("Row already exists: {0}")]
    AlreadyExists(String),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Connection lock poisoned")]
    LockPoisoned,
}

pub type DbResult<T> = Result<T, DbError>;

impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound(what) => StoreError::NotFound(what),
            DbError::AlreadyExists(what) => StoreError::AlreadyExists(what),
            other => StoreError::Storage(other.to_string()),
        }
    }
}
