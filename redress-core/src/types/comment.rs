//! Complaint comment types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single comment in a complaint's thread
///
/// Comments are append-only and ordered by creation time. The `is_admin`
/// flag is computed server-side from the author's effective role at write
/// time, never taken from the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentRecord {
    pub comment_id: String,
    pub complaint_id: String,
    pub author_id: String,
    pub content: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}
