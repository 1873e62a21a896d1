//! Activity log types
//!
//! Every admin-initiated status/priority update appends one log row per
//! complaint touched. The log is append-only and carries no transactional
//! guarantee with the update it describes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::complaint::ComplaintStatus;

/// One activity log row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub log_id: String,
    pub complaint_id: String,
    /// Free-text action description, e.g. "status_update" or "bulk_update"
    pub action: String,
    pub old_status: Option<ComplaintStatus>,
    pub new_status: Option<ComplaintStatus>,
    pub notes: Option<String>,
    pub performed_by: String,
    pub created_at: DateTime<Utc>,
}

impl ActivityRecord {
    /// Check whether this row describes a status transition
    pub fn is_status_change(&self) -> bool {
        match (self.old_status, self.new_status) {
            (Some(old), Some(new)) => old != new,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(old: Option<ComplaintStatus>, new: Option<ComplaintStatus>) -> ActivityRecord {
        ActivityRecord {
            log_id: "log:001".to_string(),
            complaint_id: "cmp:001".to_string(),
            action: "status_update".to_string(),
            old_status: old,
            new_status: new,
            notes: None,
            performed_by: "admin:001".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_is_status_change() {
        assert!(row(
            Some(ComplaintStatus::Submitted),
            Some(ComplaintStatus::Resolved)
        )
        .is_status_change());
        assert!(!row(
            Some(ComplaintStatus::Resolved),
            Some(ComplaintStatus::Resolved)
        )
        .is_status_change());
        assert!(!row(None, Some(ComplaintStatus::Resolved)).is_status_change());
    }
}
