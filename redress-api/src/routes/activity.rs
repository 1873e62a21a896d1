//! Activity log endpoints (admin)

use axum::{
    extract::{Path, Query, State},
    Json,
};
use redress_core::store::{ActivityStore, ComplaintStore, PageRequest};
use redress_core::ActivityRecord;

use crate::dto::{ActivityResponse, ListQueryParams, PaginatedResponse};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Recent activity across all complaints, newest first
pub async fn list_recent(
    State(state): State<AppState>,
    Query(params): Query<ListQueryParams>,
) -> ApiResult<Json<PaginatedResponse<ActivityResponse>>> {
    let page = PageRequest {
        limit: params.limit,
        offset: params.offset,
    };

    let result = state.complaints.list_activity(page).await?;

    Ok(Json(PaginatedResponse {
        items: result.items.iter().map(activity_to_response).collect(),
        total: result.total,
        limit: params.limit,
        offset: params.offset,
    }))
}

/// Activity rows for one complaint, newest first
pub async fn list_for_complaint(
    State(state): State<AppState>,
    Path(complaint_id): Path<String>,
) -> ApiResult<Json<Vec<ActivityResponse>>> {
    state
        .complaints
        .get_complaint(&complaint_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Complaint {} not found", complaint_id)))?;

    let rows = state
        .complaints
        .list_activity_for_complaint(&complaint_id)
        .await?;

    Ok(Json(rows.iter().map(activity_to_response).collect()))
}

// Helper functions

fn activity_to_response(record: &ActivityRecord) -> ActivityResponse {
    ActivityResponse {
        log_id: record.log_id.clone(),
        complaint_id: record.complaint_id.clone(),
        action: record.action.clone(),
        old_status: record.old_status.map(|s| s.to_string()),
        new_status: record.new_status.map(|s| s.to_string()),
        notes: record.notes.clone(),
        performed_by: record.performed_by.clone(),
        created_at: record.created_at,
    }
}
