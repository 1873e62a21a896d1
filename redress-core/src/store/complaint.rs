//! Complaint store interface - submission, triage, bulk updates

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{ActorScope, Page, PageRequest};
use crate::error::StoreResult;
use crate::types::{ComplaintPriority, ComplaintRecord, ComplaintStatus};

/// Filters applied to complaint listings, combined with AND
#[derive(Debug, Clone, Default)]
pub struct ComplaintFilter {
    pub status: Option<ComplaintStatus>,
    pub priority: Option<ComplaintPriority>,
    pub category_id: Option<String>,
    /// Case-insensitive substring over subject and description; for admin
    /// scope the owner's name and email are searched as well.
    pub search: Option<String>,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
}

impl ComplaintFilter {
    /// True when no filter is set
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.priority.is_none()
            && self.category_id.is_none()
            && self.search.is_none()
            && self.created_after.is_none()
            && self.created_before.is_none()
    }
}

/// Outcome of an admin status/priority update
///
/// Carries the prior values so the caller can decide which notification
/// kinds to dispatch; the store itself never notifies.
#[derive(Debug, Clone)]
pub struct StatusUpdateOutcome {
    pub complaint: ComplaintRecord,
    pub old_status: ComplaintStatus,
    pub old_priority: ComplaintPriority,
}

impl StatusUpdateOutcome {
    /// Did the update change the status?
    pub fn status_changed(&self) -> bool {
        self.old_status != self.complaint.status
    }

    /// Did the update change the priority?
    pub fn priority_changed(&self) -> bool {
        self.old_priority != self.complaint.priority
    }
}

/// Outcome of a bulk update: which ids were touched, which were unknown
#[derive(Debug, Clone)]
pub struct BulkUpdateOutcome {
    pub updated: Vec<String>,
    pub skipped: Vec<String>,
}

/// Complaint store trait
#[async_trait]
pub trait ComplaintStore: Send + Sync {
    /// Create a complaint with status=submitted, priority=medium.
    ///
    /// Validates subject/description bounds and that the category exists
    /// before any row is written.
    async fn submit_complaint(
        &self,
        owner_id: &str,
        category_id: &str,
        subject: &str,
        description: &str,
    ) -> StoreResult<ComplaintRecord>;

    /// Get a complaint by id
    async fn get_complaint(&self, complaint_id: &str) -> StoreResult<Option<ComplaintRecord>>;

    /// List complaints visible under the scope, filtered and paged
    async fn list_complaints(
        &self,
        scope: &ActorScope,
        filter: &ComplaintFilter,
        page: PageRequest,
    ) -> StoreResult<Page<ComplaintRecord>>;

    /// All complaints visible under the scope, unpaged (reporting/export)
    async fn all_complaints(
        &self,
        scope: &ActorScope,
        filter: &ComplaintFilter,
    ) -> StoreResult<Vec<ComplaintRecord>>;

    /// Admin status/priority/response update.
    ///
    /// Stamps `resolved_at` exactly on a transition into resolved; never
    /// clears it. Always appends exactly one activity log row describing
    /// the combined delta.
    async fn update_status_and_priority(
        &self,
        complaint_id: &str,
        new_status: ComplaintStatus,
        new_priority: ComplaintPriority,
        admin_response: Option<&str>,
        actor_id: &str,
    ) -> StoreResult<StatusUpdateOutcome>;

    /// Apply the same optional status/priority change to every id.
    ///
    /// Appends one activity log row per updated complaint. Unknown ids are
    /// skipped and reported in the outcome, not treated as errors.
    async fn bulk_update(
        &self,
        complaint_ids: &[String],
        new_status: Option<ComplaintStatus>,
        new_priority: Option<ComplaintPriority>,
        actor_id: &str,
    ) -> StoreResult<BulkUpdateOutcome>;

    /// Record the stored attachment path after a successful blob write
    async fn set_attachment_path(
        &self,
        complaint_id: &str,
        attachment_path: &str,
    ) -> StoreResult<ComplaintRecord>;
}
