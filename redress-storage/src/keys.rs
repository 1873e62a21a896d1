//! Blob key construction and validation
//!
//! Keys are relative slash-separated paths chosen by the caller. They are
//! validated before any backend resolves them against its root, so a key can
//! never escape the storage directory.

use chrono::{DateTime, Utc};

use crate::error::{BlobError, BlobResult};

/// Maximum accepted key length
pub const MAX_KEY_LENGTH: usize = 512;

/// Build the storage key for a complaint attachment
pub fn attachment_key(
    owner_id: &str,
    complaint_id: &str,
    uploaded_at: DateTime<Utc>,
    extension: &str,
) -> String {
    format!(
        "{}/{}/{}.{}",
        owner_id,
        complaint_id,
        uploaded_at.timestamp(),
        extension
    )
}

/// Validate a blob key
///
/// Rejects empty keys, absolute paths, backslashes, and any `.`/`..`
/// segment.
pub fn validate_key(key: &str) -> BlobResult<()> {
    if key.is_empty() {
        return Err(BlobError::InvalidKey("key is empty".to_string()));
    }
    if key.len() > MAX_KEY_LENGTH {
        return Err(BlobError::InvalidKey(format!(
            "key exceeds {} bytes",
            MAX_KEY_LENGTH
        )));
    }
    if key.starts_with('/') {
        return Err(BlobError::InvalidKey(format!("absolute key: {}", key)));
    }
    if key.contains('\\') {
        return Err(BlobError::InvalidKey(format!(
            "backslash in key: {}",
            key
        )));
    }
    for segment in key.split('/') {
        if segment.is_empty() || segment == "." || segment == ".." {
            return Err(BlobError::InvalidKey(format!(
                "bad segment '{}' in key: {}",
                segment, key
            )));
        }
    }
    Ok(())
}
