//! Complaint entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Entity;

/// Complaint row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplaintEntity {
    /// Generated id (format: cmp_{timestamp}_{seq})
    pub id: String,
    /// Owning student's user id
    pub owner_id: String,
    /// Referenced category id
    pub category_id: String,
    /// Short subject line
    pub subject: String,
    /// Full complaint text
    pub description: String,
    /// Status: submitted, in_review, resolved
    pub status: String,
    /// Priority: low, medium, high, critical
    pub priority: String,
    /// Latest admin response text
    pub admin_response: Option<String>,
    /// Blob store path of the uploaded attachment
    pub attachment_path: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp
    pub updated_at: DateTime<Utc>,
    /// First transition into resolved; never cleared once set
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Entity for ComplaintEntity {
    const TABLE: &'static str = "complaints";

    fn id(&self) -> &str {
        &self.id
    }
}

impl ComplaintEntity {
    /// Create a new complaint entity in its initial state
    pub fn new(
        id: String,
        owner_id: String,
        category_id: String,
        subject: String,
        description: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            owner_id,
            category_id,
            subject,
            description,
            status: "submitted".to_string(),
            priority: "medium".to_string(),
            admin_response: None,
            attachment_path: None,
            created_at: now,
            updated_at: now,
            resolved_at: None,
        }
    }

    /// Check if the complaint is currently resolved
    pub fn is_resolved(&self) -> bool {
        self.status == "resolved"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_complaint_initial_state() {
        let complaint = ComplaintEntity::new(
            "cmp_0001".to_string(),
            "user:001".to_string(),
            "cat_0001".to_string(),
            "Broken projector".to_string(),
            "The projector in room 204 stopped working".to_string(),
        );
        assert_eq!(complaint.status, "submitted");
        assert_eq!(complaint.priority, "medium");
        assert!(complaint.resolved_at.is_none());
        assert!(!complaint.is_resolved());
        assert_eq!(complaint.created_at, complaint.updated_at);
    }
}
