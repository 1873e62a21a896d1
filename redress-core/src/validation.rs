//! Submission validation rules
//!
//! These checks run before any row is written; a failing check means the
//! operation is rejected with no side effects.
//!
//! # Rules
//!
//! 1. Subject: 5 to 100 characters
//! 2. Description: 20 to 2000 characters
//! 3. Attachment: allow-listed MIME type, at most 5 MiB
//! 4. Comment content: non-empty after trimming

use crate::error::{StoreError, StoreResult};

/// Minimum subject length in characters
pub const SUBJECT_MIN_CHARS: usize = 5;
/// Maximum subject length in characters
pub const SUBJECT_MAX_CHARS: usize = 100;
/// Minimum description length in characters
pub const DESCRIPTION_MIN_CHARS: usize = 20;
/// Maximum description length in characters
pub const DESCRIPTION_MAX_CHARS: usize = 2000;
/// Maximum attachment size in bytes (5 MiB)
pub const ATTACHMENT_MAX_BYTES: usize = 5 * 1024 * 1024;

/// MIME types accepted for attachments, with their storage extensions
pub const ALLOWED_ATTACHMENT_TYPES: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
    ("application/pdf", "pdf"),
    ("text/plain", "txt"),
];

/// Validate the complaint subject field
pub fn validate_subject(subject: &str) -> StoreResult<()> {
    let len = subject.chars().count();
    if len < SUBJECT_MIN_CHARS || len > SUBJECT_MAX_CHARS {
        return Err(StoreError::Validation(format!(
            "Subject must be between {} and {} characters, got {}",
            SUBJECT_MIN_CHARS, SUBJECT_MAX_CHARS, len
        )));
    }
    Ok(())
}

/// Validate the complaint description field
pub fn validate_description(description: &str) -> StoreResult<()> {
    let len = description.chars().count();
    if len < DESCRIPTION_MIN_CHARS || len > DESCRIPTION_MAX_CHARS {
        return Err(StoreError::Validation(format!(
            "Description must be between {} and {} characters, got {}",
            DESCRIPTION_MIN_CHARS, DESCRIPTION_MAX_CHARS, len
        )));
    }
    Ok(())
}

/// Storage extension for an allow-listed MIME type
pub fn extension_for_mime(content_type: &str) -> Option<&'static str> {
    ALLOWED_ATTACHMENT_TYPES
        .iter()
        .find(|(mime, _)| *mime == content_type)
        .map(|(_, ext)| *ext)
}

/// Validate an attachment's content type and size
pub fn validate_attachment(content_type: &str, size_bytes: usize) -> StoreResult<()> {
    if extension_for_mime(content_type).is_none() {
        return Err(StoreError::Validation(format!(
            "Attachment type '{}' is not allowed (allowed: {})",
            content_type,
            ALLOWED_ATTACHMENT_TYPES
                .iter()
                .map(|(mime, _)| *mime)
                .collect::<Vec<_>>()
                .join(", ")
        )));
    }
    if size_bytes > ATTACHMENT_MAX_BYTES {
        return Err(StoreError::Validation(format!(
            "Attachment exceeds the {} byte limit ({} bytes)",
            ATTACHMENT_MAX_BYTES, size_bytes
        )));
    }
    Ok(())
}

/// Validate comment content; the stored value is the trimmed content
pub fn validate_comment_content(content: &str) -> StoreResult<()> {
    if content.trim().is_empty() {
        return Err(StoreError::Validation(
            "Comment content must not be empty".to_string(),
        ));
    }
    Ok(())
}
