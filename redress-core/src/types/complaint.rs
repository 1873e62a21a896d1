//! Complaint lifecycle types
//!
//! A complaint moves through submitted / in_review / resolved, carries a
//! triage priority, and keeps a permanent resolution stamp once resolved.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Complaint status
///
/// The nominal path is submitted -> in_review -> resolved, but admin updates
/// accept any target from any source; ordering is not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    Submitted,
    InReview,
    Resolved,
}

impl Default for ComplaintStatus {
    fn default() -> Self {
        Self::Submitted
    }
}

impl std::fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Submitted => "submitted",
            Self::InReview => "in_review",
            Self::Resolved => "resolved",
        };
        write!(f, "{}", s)
    }
}

/// Complaint triage priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintPriority {
    Low,
    Medium,
    High,
    Critical,
}

impl Default for ComplaintPriority {
    fn default() -> Self {
        Self::Medium
    }
}

impl std::fmt::Display for ComplaintPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        };
        write!(f, "{}", s)
    }
}

/// Complaint record
///
/// `resolved_at` is stamped exactly when the status transitions into
/// `Resolved` and is never cleared afterwards, even if the complaint is
/// reopened. `updated_at` advances on every mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplaintRecord {
    pub complaint_id: String,
    pub owner_id: String,
    pub category_id: String,
    pub subject: String,
    pub description: String,
    pub status: ComplaintStatus,
    pub priority: ComplaintPriority,
    pub admin_response: Option<String>,
    pub attachment_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl ComplaintRecord {
    /// Check whether the complaint is currently resolved
    pub fn is_resolved(&self) -> bool {
        self.status == ComplaintStatus::Resolved
    }

    /// Check whether an attachment was stored for this complaint
    pub fn has_attachment(&self) -> bool {
        self.attachment_path.is_some()
    }

    /// Whole days between creation and resolution, if resolved at least once
    pub fn resolution_days(&self) -> Option<i64> {
        self.resolved_at
            .map(|resolved| (resolved - self.created_at).num_days())
    }
}
