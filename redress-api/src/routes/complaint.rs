//! Complaint lifecycle endpoints
//!
//! Submission, listing, the admin status/priority update, bulk updates,
//! comments, and signed attachment URLs. Attachment bytes are validated
//! before the complaint row is written and uploaded after; an upload failure
//! leaves the complaint standing without its attachment.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use base64::Engine;
use chrono::{Duration, Utc};
use redress_core::logging::operations;
use redress_core::notify::{NotifyKind, NotifyRequest};
use redress_core::store::{ComplaintFilter, ComplaintStore, CommentStore, PageRequest};
use redress_core::validation::{extension_for_mime, validate_attachment};
use redress_core::{CommentRecord, ComplaintPriority, ComplaintRecord, ComplaintStatus};
use redress_storage::attachment_key;
use tracing::{debug, warn};

use crate::dto::{
    AddCommentRequest, AttachmentUrlResponse, BulkUpdateRequest, BulkUpdateResponse,
    CommentResponse, ComplaintResponse, ListQueryParams, PaginatedResponse, StatusUpdateResponse,
    SubmitComplaintRequest, UpdateStatusRequest,
};
use crate::error::{ApiError, ApiResult};
use crate::middleware::auth::Identity;
use crate::middleware::policy::{can_view, scope_for};
use crate::state::AppState;

/// Submit a new complaint, optionally with an inline attachment
pub async fn submit_complaint(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<SubmitComplaintRequest>,
) -> ApiResult<Json<ComplaintResponse>> {
    // Decode and validate the attachment before any row is written
    let attachment = match &req.attachment {
        Some(upload) => {
            let data = base64::engine::general_purpose::STANDARD
                .decode(&upload.data_base64)
                .map_err(|_| {
                    ApiError::BadRequest("Attachment data is not valid base64".to_string())
                })?;
            validate_attachment(&upload.content_type, data.len())?;
            Some((upload.content_type.clone(), data))
        }
        None => None,
    };

    let mut record = state
        .complaints
        .submit_complaint(&identity.user_id, &req.category_id, &req.subject, &req.description)
        .await?;

    if let Some((content_type, data)) = attachment {
        // an allow-listed type always maps to an extension
        let ext = extension_for_mime(&content_type).unwrap_or("bin");
        let key = attachment_key(&identity.user_id, &record.complaint_id, record.created_at, ext);

        match state.blobs.write(&key, &data, &content_type).await {
            Ok(_) => {
                record = state
                    .complaints
                    .set_attachment_path(&record.complaint_id, &key)
                    .await?;
            }
            Err(e) => {
                warn!(
                    operation = operations::BLOB_WRITE,
                    "Attachment upload failed for {}: {}; complaint kept without it",
                    record.complaint_id, e
                );
            }
        }
    }

    Ok(Json(complaint_to_response(&record)))
}

/// List complaints visible to the caller, filtered and paged
pub async fn list_complaints(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Query(params): Query<ListQueryParams>,
) -> ApiResult<Json<PaginatedResponse<ComplaintResponse>>> {
    let scope = scope_for(&identity);
    let filter = filter_from_params(&params)?;
    let page = PageRequest {
        limit: params.limit,
        offset: params.offset,
    };

    let result = state.complaints.list_complaints(&scope, &filter, page).await?;

    Ok(Json(PaginatedResponse {
        items: result.items.iter().map(complaint_to_response).collect(),
        total: result.total,
        limit: params.limit,
        offset: params.offset,
    }))
}

/// Get one complaint (owner or admin)
pub async fn get_complaint(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(complaint_id): Path<String>,
) -> ApiResult<Json<ComplaintResponse>> {
    let complaint = fetch_visible(&state, &identity, &complaint_id).await?;

    Ok(Json(complaint_to_response(&complaint)))
}

/// Update status, priority, and admin response (admin)
///
/// Dispatches one notification per changed field kind.
pub async fn update_status(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(complaint_id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> ApiResult<Json<StatusUpdateResponse>> {
    let new_status = parse_status(&req.status)?;
    let new_priority = parse_priority(&req.priority)?;

    let outcome = state
        .complaints
        .update_status_and_priority(
            &complaint_id,
            new_status,
            new_priority,
            req.admin_response.as_deref(),
            &identity.user_id,
        )
        .await?;

    let mut notified = Vec::new();

    if outcome.status_changed() {
        let dispatch = state
            .notifier
            .notify(NotifyRequest::status_change(
                &complaint_id,
                &outcome.old_status,
                &outcome.complaint.status,
            ))
            .await;
        if dispatch.success {
            notified.push(NotifyKind::StatusChange.to_string());
        }
    }

    if outcome.priority_changed() {
        let dispatch = state
            .notifier
            .notify(NotifyRequest::priority_change(
                &complaint_id,
                &outcome.old_priority,
                &outcome.complaint.priority,
            ))
            .await;
        if dispatch.success {
            notified.push(NotifyKind::PriorityChange.to_string());
        }
    }

    Ok(Json(StatusUpdateResponse {
        complaint: complaint_to_response(&outcome.complaint),
        notified,
    }))
}

/// Apply the same status/priority change to many complaints (admin)
///
/// Bulk updates never notify; unknown ids are skipped and reported.
pub async fn bulk_update(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<BulkUpdateRequest>,
) -> ApiResult<Json<BulkUpdateResponse>> {
    if req.status.is_none() && req.priority.is_none() {
        return Err(ApiError::BadRequest(
            "Provide a status and/or priority to apply".to_string(),
        ));
    }

    let new_status = req.status.as_deref().map(parse_status).transpose()?;
    let new_priority = req.priority.as_deref().map(parse_priority).transpose()?;

    let outcome = state
        .complaints
        .bulk_update(&req.complaint_ids, new_status, new_priority, &identity.user_id)
        .await?;

    Ok(Json(BulkUpdateResponse {
        updated: outcome.updated,
        skipped: outcome.skipped,
    }))
}

/// Add a comment to a complaint's thread (owner or admin)
pub async fn add_comment(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(complaint_id): Path<String>,
    Json(req): Json<AddCommentRequest>,
) -> ApiResult<Json<CommentResponse>> {
    fetch_visible(&state, &identity, &complaint_id).await?;

    let comment = state
        .complaints
        .add_comment(&complaint_id, &identity.user_id, &req.content, identity.is_admin())
        .await?;

    if identity.is_admin() && state.notify_on_admin_comment {
        state
            .notifier
            .notify(NotifyRequest::admin_comment(
                &complaint_id,
                comment.content.clone(),
            ))
            .await;
    }

    Ok(Json(comment_to_response(&comment)))
}

/// List a complaint's comments, oldest first (owner or admin)
pub async fn list_comments(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(complaint_id): Path<String>,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    fetch_visible(&state, &identity, &complaint_id).await?;

    let comments = state.complaints.list_comments(&complaint_id).await?;

    Ok(Json(comments.iter().map(comment_to_response).collect()))
}

/// Mint a signed URL for a complaint's attachment (owner or admin)
pub async fn attachment_url(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(complaint_id): Path<String>,
) -> ApiResult<Json<AttachmentUrlResponse>> {
    let complaint = fetch_visible(&state, &identity, &complaint_id).await?;

    let path = complaint.attachment_path.as_deref().ok_or_else(|| {
        ApiError::NotFound(format!("Complaint {} has no attachment", complaint_id))
    })?;

    let now = Utc::now();
    let url = state.signer.signed_url(path, state.signed_url_ttl_secs, now);

    Ok(Json(AttachmentUrlResponse {
        url,
        expires_at: now + Duration::seconds(state.signed_url_ttl_secs),
    }))
}

// Helper functions

/// Fetch a complaint, treating rows outside the caller's scope as missing
async fn fetch_visible(
    state: &AppState,
    identity: &Identity,
    complaint_id: &str,
) -> ApiResult<ComplaintRecord> {
    let complaint = state
        .complaints
        .get_complaint(complaint_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Complaint {} not found", complaint_id)))?;

    if !can_view(identity, &complaint.owner_id) {
        debug!("Complaint {} hidden from {}", complaint_id, identity.user_id);
        return Err(ApiError::NotFound(format!(
            "Complaint {} not found",
            complaint_id
        )));
    }

    Ok(complaint)
}

/// Translate list query parameters into a store filter (shared with exports)
pub(crate) fn filter_from_params(params: &ListQueryParams) -> ApiResult<ComplaintFilter> {
    Ok(ComplaintFilter {
        status: params.status.as_deref().map(parse_status).transpose()?,
        priority: params.priority.as_deref().map(parse_priority).transpose()?,
        category_id: params.category_id.clone(),
        search: params.search.clone(),
        created_after: params.created_after,
        created_before: params.created_before,
    })
}

fn parse_status(s: &str) -> ApiResult<ComplaintStatus> {
    match s {
        "submitted" => Ok(ComplaintStatus::Submitted),
        "in_review" => Ok(ComplaintStatus::InReview),
        "resolved" => Ok(ComplaintStatus::Resolved),
        _ => Err(ApiError::BadRequest(format!("Invalid status: {}", s))),
    }
}

fn parse_priority(s: &str) -> ApiResult<ComplaintPriority> {
    match s {
        "low" => Ok(ComplaintPriority::Low),
        "medium" => Ok(ComplaintPriority::Medium),
        "high" => Ok(ComplaintPriority::High),
        "critical" => Ok(ComplaintPriority::Critical),
        _ => Err(ApiError::BadRequest(format!("Invalid priority: {}", s))),
    }
}

fn complaint_to_response(record: &ComplaintRecord) -> ComplaintResponse {
    ComplaintResponse {
        complaint_id: record.complaint_id.clone(),
        owner_id: record.owner_id.clone(),
        category_id: record.category_id.clone(),
        subject: record.subject.clone(),
        description: record.description.clone(),
        status: record.status.to_string(),
        priority: record.priority.to_string(),
        admin_response: record.admin_response.clone(),
        has_attachment: record.has_attachment(),
        created_at: record.created_at,
        updated_at: record.updated_at,
        resolved_at: record.resolved_at,
    }
}

fn comment_to_response(record: &CommentRecord) -> CommentResponse {
    CommentResponse {
        comment_id: record.comment_id.clone(),
        complaint_id: record.complaint_id.clone(),
        author_id: record.author_id.clone(),
        content: record.content.clone(),
        is_admin: record.is_admin,
        created_at: record.created_at,
    }
}
