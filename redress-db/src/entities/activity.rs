//! Complaint activity log entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Entity;

/// Activity log row, append-only
///
/// Written alongside admin status/priority updates. The insert follows the
/// complaint update as a second independent statement; there is no
/// transaction tying the two together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntity {
    /// Generated id (format: log_{timestamp}_{seq})
    pub id: String,
    /// Complaint the action applied to
    pub complaint_id: String,
    /// Action description, e.g. "status_update" or "bulk_update"
    pub action: String,
    /// Status before the action, when a status was involved
    pub old_status: Option<String>,
    /// Status after the action, when a status was involved
    pub new_status: Option<String>,
    /// Free-text notes (priority deltas, batch summaries)
    pub notes: Option<String>,
    /// Admin who performed the action
    pub performed_by: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Entity for ActivityEntity {
    const TABLE: &'static str = "complaint_logs";

    fn id(&self) -> &str {
        &self.id
    }
}

impl ActivityEntity {
    /// Create a new activity log entity
    pub fn new(
        id: String,
        complaint_id: String,
        action: String,
        old_status: Option<String>,
        new_status: Option<String>,
        notes: Option<String>,
        performed_by: String,
    ) -> Self {
        Self {
            id,
            complaint_id,
            action,
            old_status,
            new_status,
            notes,
            performed_by,
            created_at: Utc::now(),
        }
    }
}
