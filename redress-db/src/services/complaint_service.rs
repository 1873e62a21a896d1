//! Complaint Store Service Implementation
//!
//! Implements the ComplaintStore, CommentStore, and ActivityStore traits
//! for complaint submission, triage, comment threads, and the audit log.

use async_trait::async_trait;
use chrono::Utc;
use redress_core::store::{
    ActivityStore, ActorScope, BulkUpdateOutcome, CommentStore, ComplaintFilter, ComplaintStore,
    Page, PageRequest, StatusUpdateOutcome,
};
use redress_core::types::{
    ActivityRecord, CommentRecord, ComplaintPriority, ComplaintRecord, ComplaintStatus,
};
use redress_core::validation::{validate_comment_content, validate_description, validate_subject};
use redress_core::{StoreError, StoreResult};
use std::collections::HashSet;
use tracing::info;

use crate::db::Database;
use crate::entities::{ActivityEntity, CommentEntity, ComplaintEntity};
use crate::repos::{
    fmt_ts, ActivityRepo, CategoryRepo, CommentRepo, ComplaintQuery, ComplaintRepo,
};

/// Complaint Store Service
pub struct ComplaintService {
    complaints: ComplaintRepo,
    categories: CategoryRepo,
    comments: CommentRepo,
    activity: ActivityRepo,
    sequence: std::sync::atomic::AtomicU64,
}

impl ComplaintService {
    /// Create a new Complaint Service
    pub fn new(db: &Database) -> Self {
        Self {
            complaints: ComplaintRepo::new(db.connection()),
            categories: CategoryRepo::new(db.connection()),
            comments: CommentRepo::new(db.connection()),
            activity: ActivityRepo::new(db.connection()),
            sequence: std::sync::atomic::AtomicU64::new(0),
        }
    }

    /// Generate a new ID
    fn generate_id(&self, prefix: &str) -> String {
        let seq = self
            .sequence
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        let timestamp = Utc::now().timestamp_micros();
        format!("{}_{:016x}_{:08x}", prefix, timestamp, seq)
    }

    /// Convert ComplaintStatus to string
    fn status_to_str(s: ComplaintStatus) -> &'static str {
        match s {
            ComplaintStatus::Submitted => "submitted",
            ComplaintStatus::InReview => "in_review",
            ComplaintStatus::Resolved => "resolved",
        }
    }

    /// Convert string to ComplaintStatus with validation
    fn str_to_status(s: &str) -> StoreResult<ComplaintStatus> {
        match s {
            "submitted" => Ok(ComplaintStatus::Submitted),
            "in_review" => Ok(ComplaintStatus::InReview),
            "resolved" => Ok(ComplaintStatus::Resolved),
            other => Err(StoreError::Validation(format!(
                "Invalid complaint status: '{}'. Expected one of: submitted, in_review, resolved",
                other
            ))),
        }
    }

    /// Convert ComplaintPriority to string
    fn priority_to_str(p: ComplaintPriority) -> &'static str {
        match p {
            ComplaintPriority::Low => "low",
            ComplaintPriority::Medium => "medium",
            ComplaintPriority::High => "high",
            ComplaintPriority::Critical => "critical",
        }
    }

    /// Convert string to ComplaintPriority with validation
    fn str_to_priority(s: &str) -> StoreResult<ComplaintPriority> {
        match s {
            "low" => Ok(ComplaintPriority::Low),
            "medium" => Ok(ComplaintPriority::Medium),
            "high" => Ok(ComplaintPriority::High),
            "critical" => Ok(ComplaintPriority::Critical),
            other => Err(StoreError::Validation(format!(
                "Invalid complaint priority: '{}'. Expected one of: low, medium, high, critical",
                other
            ))),
        }
    }

    /// Convert entity to ComplaintRecord with validation
    fn entity_to_record(entity: &ComplaintEntity) -> StoreResult<ComplaintRecord> {
        let status = Self::str_to_status(&entity.status)?;
        let priority = Self::str_to_priority(&entity.priority)?;

        Ok(ComplaintRecord {
            complaint_id: entity.id.clone(),
            owner_id: entity.owner_id.clone(),
            category_id: entity.category_id.clone(),
            subject: entity.subject.clone(),
            description: entity.description.clone(),
            status,
            priority,
            admin_response: entity.admin_response.clone(),
            attachment_path: entity.attachment_path.clone(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
            resolved_at: entity.resolved_at,
        })
    }

    /// Convert entity to CommentRecord
    fn comment_to_record(entity: &CommentEntity) -> CommentRecord {
        CommentRecord {
            comment_id: entity.id.clone(),
            complaint_id: entity.complaint_id.clone(),
            author_id: entity.author_id.clone(),
            content: entity.content.clone(),
            is_admin: entity.is_admin,
            created_at: entity.created_at,
        }
    }

    /// Convert entity to ActivityRecord with validation
    fn activity_to_record(entity: &ActivityEntity) -> StoreResult<ActivityRecord> {
        let old_status = match &entity.old_status {
            Some(s) => Some(Self::str_to_status(s)?),
            None => None,
        };
        let new_status = match &entity.new_status {
            Some(s) => Some(Self::str_to_status(s)?),
            None => None,
        };

        Ok(ActivityRecord {
            log_id: entity.id.clone(),
            complaint_id: entity.complaint_id.clone(),
            action: entity.action.clone(),
            old_status,
            new_status,
            notes: entity.notes.clone(),
            performed_by: entity.performed_by.clone(),
            created_at: entity.created_at,
        })
    }

    /// Build a row query from scope and filter
    fn build_query(scope: &ActorScope, filter: &ComplaintFilter) -> ComplaintQuery {
        ComplaintQuery {
            owner_id: scope.owner_id().map(|s| s.to_string()),
            status: filter.status.map(|s| Self::status_to_str(s).to_string()),
            priority: filter.priority.map(|p| Self::priority_to_str(p).to_string()),
            category_id: filter.category_id.clone(),
            search: filter.search.clone(),
            // owner name/email search only makes sense when rows from
            // other owners are visible at all
            search_profiles: matches!(scope, ActorScope::All),
            created_after: filter.created_after.map(|t| t.to_rfc3339()),
            created_before: filter.created_before.map(|t| t.to_rfc3339()),
        }
    }
}

#[async_trait]
impl ComplaintStore for ComplaintService {
    async fn submit_complaint(
        &self,
        owner_id: &str,
        category_id: &str,
        subject: &str,
        description: &str,
    ) -> StoreResult<ComplaintRecord> {
        validate_subject(subject)?;
        validate_description(description)?;
        if self.categories.get(category_id)?.is_none() {
            return Err(StoreError::Validation(format!(
                "Unknown category: {}",
                category_id
            )));
        }

        let entity = ComplaintEntity::new(
            self.generate_id("cmp"),
            owner_id.to_string(),
            category_id.to_string(),
            subject.to_string(),
            description.to_string(),
        );
        self.complaints.insert(&entity)?;

        info!("Complaint {} submitted by {}", entity.id, owner_id);
        Self::entity_to_record(&entity)
    }

    async fn get_complaint(&self, complaint_id: &str) -> StoreResult<Option<ComplaintRecord>> {
        match self.complaints.get(complaint_id)? {
            Some(entity) => Ok(Some(Self::entity_to_record(&entity)?)),
            None => Ok(None),
        }
    }

    async fn list_complaints(
        &self,
        scope: &ActorScope,
        filter: &ComplaintFilter,
        page: PageRequest,
    ) -> StoreResult<Page<ComplaintRecord>> {
        let query = Self::build_query(scope, filter);
        let total = self.complaints.count(&query)?;
        let items = self
            .complaints
            .list(&query, page.limit, page.offset)?
            .iter()
            .map(Self::entity_to_record)
            .collect::<StoreResult<Vec<_>>>()?;
        Ok(Page { items, total })
    }

    async fn all_complaints(
        &self,
        scope: &ActorScope,
        filter: &ComplaintFilter,
    ) -> StoreResult<Vec<ComplaintRecord>> {
        let query = Self::build_query(scope, filter);
        self.complaints
            .all(&query)?
            .iter()
            .map(Self::entity_to_record)
            .collect()
    }

    async fn update_status_and_priority(
        &self,
        complaint_id: &str,
        new_status: ComplaintStatus,
        new_priority: ComplaintPriority,
        admin_response: Option<&str>,
        actor_id: &str,
    ) -> StoreResult<StatusUpdateOutcome> {
        let mut entity = self.complaints.get(complaint_id)?.ok_or_else(|| {
            StoreError::NotFound(format!("Complaint {} not found", complaint_id))
        })?;

        let old_status = Self::str_to_status(&entity.status)?;
        let old_priority = Self::str_to_priority(&entity.priority)?;
        let now = Utc::now();

        entity.status = Self::status_to_str(new_status).to_string();
        entity.priority = Self::priority_to_str(new_priority).to_string();
        if let Some(response) = admin_response {
            entity.admin_response = Some(response.to_string());
        }
        // first transition into resolved stamps the resolution time; a
        // reopen later never clears it
        if new_status == ComplaintStatus::Resolved && entity.resolved_at.is_none() {
            entity.resolved_at = Some(now);
        }
        entity.updated_at = now;
        self.complaints.update(&entity)?;

        // one log row per update, covering the combined delta
        let mut notes: Vec<String> = Vec::new();
        if old_priority != new_priority {
            notes.push(format!(
                "priority: {} -> {}",
                Self::priority_to_str(old_priority),
                Self::priority_to_str(new_priority)
            ));
        }
        if admin_response.is_some() {
            notes.push("admin response updated".to_string());
        }
        let log = ActivityEntity::new(
            self.generate_id("log"),
            complaint_id.to_string(),
            "status_update".to_string(),
            Some(Self::status_to_str(old_status).to_string()),
            Some(entity.status.clone()),
            if notes.is_empty() {
                None
            } else {
                Some(notes.join("; "))
            },
            actor_id.to_string(),
        );
        self.activity.insert(&log)?;

        info!(
            "Complaint {} updated by {}: {} -> {}",
            complaint_id, actor_id, old_status, new_status
        );

        Ok(StatusUpdateOutcome {
            complaint: Self::entity_to_record(&entity)?,
            old_status,
            old_priority,
        })
    }

    async fn bulk_update(
        &self,
        complaint_ids: &[String],
        new_status: Option<ComplaintStatus>,
        new_priority: Option<ComplaintPriority>,
        actor_id: &str,
    ) -> StoreResult<BulkUpdateOutcome> {
        if complaint_ids.is_empty() {
            return Ok(BulkUpdateOutcome {
                updated: Vec::new(),
                skipped: Vec::new(),
            });
        }

        let found = self.complaints.statuses_for_ids(complaint_ids)?;
        let found_ids: Vec<String> = found.iter().map(|(id, _)| id.clone()).collect();
        let found_set: HashSet<&String> = found_ids.iter().collect();
        let skipped: Vec<String> = complaint_ids
            .iter()
            .filter(|id| !found_set.contains(id))
            .cloned()
            .collect();

        let status_str = new_status.map(Self::status_to_str);
        let priority_str = new_priority.map(Self::priority_to_str);
        let now = Utc::now();
        self.complaints
            .bulk_apply(&found_ids, status_str, priority_str, &fmt_ts(&now))?;

        // one log row per touched complaint
        let notes = priority_str.map(|p| format!("priority -> {}", p));
        for (id, old_status) in &found {
            let log = ActivityEntity::new(
                self.generate_id("log"),
                id.clone(),
                "bulk_update".to_string(),
                status_str.map(|_| old_status.clone()),
                status_str.map(|s| s.to_string()),
                notes.clone(),
                actor_id.to_string(),
            );
            self.activity.insert(&log)?;
        }

        info!(
            "Bulk update by {} touched {} complaints ({} unknown ids skipped)",
            actor_id,
            found_ids.len(),
            skipped.len()
        );

        Ok(BulkUpdateOutcome {
            updated: found_ids,
            skipped,
        })
    }

    async fn set_attachment_path(
        &self,
        complaint_id: &str,
        attachment_path: &str,
    ) -> StoreResult<ComplaintRecord> {
        let mut entity = self.complaints.get(complaint_id)?.ok_or_else(|| {
            StoreError::NotFound(format!("Complaint {} not found", complaint_id))
        })?;
        entity.attachment_path = Some(attachment_path.to_string());
        entity.updated_at = Utc::now();
        self.complaints.update(&entity)?;
        Self::entity_to_record(&entity)
    }
}

#[async_trait]
impl CommentStore for ComplaintService {
    async fn add_comment(
        &self,
        complaint_id: &str,
        author_id: &str,
        content: &str,
        is_admin: bool,
    ) -> StoreResult<CommentRecord> {
        validate_comment_content(content)?;
        if self.complaints.get(complaint_id)?.is_none() {
            return Err(StoreError::NotFound(format!(
                "Complaint {} not found",
                complaint_id
            )));
        }

        let entity = CommentEntity::new(
            self.generate_id("cmt"),
            complaint_id.to_string(),
            author_id.to_string(),
            content.trim().to_string(),
            is_admin,
        );
        self.comments.insert(&entity)?;
        Ok(Self::comment_to_record(&entity))
    }

    async fn list_comments(&self, complaint_id: &str) -> StoreResult<Vec<CommentRecord>> {
        Ok(self
            .comments
            .list_for_complaint(complaint_id)?
            .iter()
            .map(Self::comment_to_record)
            .collect())
    }
}

#[async_trait]
impl ActivityStore for ComplaintService {
    async fn list_activity(&self, page: PageRequest) -> StoreResult<Page<ActivityRecord>> {
        let total = self.activity.count()?;
        let items = self
            .activity
            .list(page.limit, page.offset)?
            .iter()
            .map(Self::activity_to_record)
            .collect::<StoreResult<Vec<_>>>()?;
        Ok(Page { items, total })
    }

    async fn list_activity_for_complaint(
        &self,
        complaint_id: &str,
    ) -> StoreResult<Vec<ActivityRecord>> {
        self.activity
            .list_for_complaint(complaint_id)?
            .iter()
            .map(Self::activity_to_record)
            .collect()
    }
}
