//! Blob storage error types

use thiserror::Error;

/// Blob storage errors
#[derive(Debug, Error)]
pub enum BlobError {
    /// Blob not found
    #[error("Blob not found: {0}")]
    NotFound(String),

    /// Write operation failed
    #[error("Write failed: {0}")]
    WriteFailed(String),

    /// Read operation failed
    #[error("Read failed: {0}")]
    ReadFailed(String),

    /// Key rejected before touching the filesystem
    #[error("Invalid blob key: {0}")]
    InvalidKey(String),

    /// Signed URL signature mismatch
    #[error("Invalid signature")]
    SignatureInvalid,

    /// Signed URL past its expiry
    #[error("Signed URL expired")]
    Expired,

    /// Backend error
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Blob storage result type
pub type BlobResult<T> = Result<T, BlobError>;
