//! Outbound notification contract
//!
//! One dispatch per logically distinct change: a status change, a priority
//! change, and an admin comment are three independent kinds, each sent as its
//! own message. Bulk updates never notify. Dispatch is fire-and-forget with
//! no retry; a failed dispatch is reported in the outcome and logged, never
//! escalated to the caller of the triggering operation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Notification kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifyKind {
    StatusChange,
    PriorityChange,
    AdminComment,
}

impl std::fmt::Display for NotifyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::StatusChange => "status_change",
            Self::PriorityChange => "priority_change",
            Self::AdminComment => "admin_comment",
        };
        write!(f, "{}", s)
    }
}

/// One notification dispatch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifyRequest {
    pub kind: NotifyKind,
    pub complaint_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl NotifyRequest {
    /// Build a status-change notification
    pub fn status_change(
        complaint_id: impl Into<String>,
        old_status: impl ToString,
        new_status: impl ToString,
    ) -> Self {
        Self {
            kind: NotifyKind::StatusChange,
            complaint_id: complaint_id.into(),
            old_value: Some(old_status.to_string()),
            new_value: Some(new_status.to_string()),
            comment: None,
        }
    }

    /// Build a priority-change notification
    pub fn priority_change(
        complaint_id: impl Into<String>,
        old_priority: impl ToString,
        new_priority: impl ToString,
    ) -> Self {
        Self {
            kind: NotifyKind::PriorityChange,
            complaint_id: complaint_id.into(),
            old_value: Some(old_priority.to_string()),
            new_value: Some(new_priority.to_string()),
            comment: None,
        }
    }

    /// Build an admin-comment notification
    pub fn admin_comment(complaint_id: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            kind: NotifyKind::AdminComment,
            complaint_id: complaint_id.into(),
            old_value: None,
            new_value: None,
            comment: Some(comment.into()),
        }
    }
}

/// Result of one dispatch attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl NotifyOutcome {
    /// Successful dispatch
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    /// Failed dispatch with a reason
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Notification dispatcher trait
///
/// Implementations must not retry and must not panic; a transport failure is
/// a failed outcome, nothing more.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, request: NotifyRequest) -> NotifyOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_string(&NotifyKind::PriorityChange).unwrap();
        assert_eq!(json, "\"priority_change\"");
    }

    #[test]
    fn test_status_change_request() {
        let request = NotifyRequest::status_change("cmp:001", "submitted", "resolved");
        assert_eq!(request.kind, NotifyKind::StatusChange);
        assert_eq!(request.old_value.as_deref(), Some("submitted"));
        assert_eq!(request.new_value.as_deref(), Some("resolved"));
        assert!(request.comment.is_none());
    }

    #[test]
    fn test_request_serialization_skips_absent_fields() {
        let request = NotifyRequest::admin_comment("cmp:001", "We are on it");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["kind"], "admin_comment");
        assert!(json.get("old_value").is_none());
        assert_eq!(json["comment"], "We are on it");
    }

    #[test]
    fn test_outcome_constructors() {
        assert!(NotifyOutcome::ok().success);
        let failed = NotifyOutcome::failed("connection refused");
        assert!(!failed.success);
        assert_eq!(failed.error.as_deref(), Some("connection refused"));
    }
}
