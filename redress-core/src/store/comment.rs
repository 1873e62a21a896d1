//! Comment store interface

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::types::CommentRecord;

/// Comment store trait
#[async_trait]
pub trait CommentStore: Send + Sync {
    /// Append a comment to a complaint's thread.
    ///
    /// Content must be non-empty after trimming; it is stored trimmed.
    /// `is_admin` reflects the author's effective role at write time.
    async fn add_comment(
        &self,
        complaint_id: &str,
        author_id: &str,
        content: &str,
        is_admin: bool,
    ) -> StoreResult<CommentRecord>;

    /// List a complaint's comments, oldest first
    async fn list_comments(&self, complaint_id: &str) -> StoreResult<Vec<CommentRecord>>;
}
