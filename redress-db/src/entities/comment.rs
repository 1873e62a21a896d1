//! Complaint comment entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Entity;

/// Comment row, append-only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentEntity {
    /// Generated id (format: cmt_{timestamp}_{seq})
    pub id: String,
    /// Parent complaint id
    pub complaint_id: String,
    /// Authoring user id
    pub author_id: String,
    /// Comment text, stored trimmed
    pub content: String,
    /// Whether the author acted as an admin
    pub is_admin: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Entity for CommentEntity {
    const TABLE: &'static str = "complaint_comments";

    fn id(&self) -> &str {
        &self.id
    }
}

impl CommentEntity {
    /// Create a new comment entity
    pub fn new(
        id: String,
        complaint_id: String,
        author_id: String,
        content: String,
        is_admin: bool,
    ) -> Self {
        Self {
            id,
            complaint_id,
            author_id,
            content,
            is_admin,
            created_at: Utc::now(),
        }
    }
}
