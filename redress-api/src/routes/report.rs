//! Reporting endpoints (admin)

use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use redress_core::export::{render_csv, ExportRow};
use redress_core::logging::operations;
use redress_core::reporting::{summarize, ComplaintSummary, DEFAULT_TREND_DAYS};
use redress_core::store::{ActorScope, CategoryStore, ComplaintFilter, ComplaintStore, ProfileStore};
use tracing::info;

use crate::dto::{ListQueryParams, SummaryQueryParams};
use crate::error::ApiResult;
use crate::routes::complaint::filter_from_params;
use crate::state::AppState;

/// Aggregate summary over all complaints
pub async fn summary(
    State(state): State<AppState>,
    Query(params): Query<SummaryQueryParams>,
) -> ApiResult<Json<ComplaintSummary>> {
    let complaints = state
        .complaints
        .all_complaints(&ActorScope::All, &ComplaintFilter::default())
        .await?;

    let days = params.days.unwrap_or(DEFAULT_TREND_DAYS);

    Ok(Json(summarize(&complaints, days, Utc::now())))
}

/// CSV export of all complaints matching the caller's filters
pub async fn export_csv(
    State(state): State<AppState>,
    Query(params): Query<ListQueryParams>,
) -> ApiResult<Response> {
    let filter = filter_from_params(&params)?;
    let complaints = state
        .complaints
        .all_complaints(&ActorScope::All, &filter)
        .await?;

    // Join category names and owner profile fields in two batched lookups
    let category_names: HashMap<String, String> = state
        .categories
        .list_categories()
        .await?
        .into_iter()
        .map(|c| (c.category_id, c.name))
        .collect();

    let mut owner_ids: Vec<String> = complaints.iter().map(|c| c.owner_id.clone()).collect();
    owner_ids.sort();
    owner_ids.dedup();

    let profiles: HashMap<String, (String, String)> = state
        .directory
        .get_profiles(&owner_ids)
        .await?
        .into_iter()
        .map(|p| (p.user_id, (p.full_name, p.email)))
        .collect();

    let rows: Vec<ExportRow> = complaints
        .into_iter()
        .map(|complaint| {
            let category_name = category_names
                .get(&complaint.category_id)
                .cloned()
                .unwrap_or_else(|| complaint.category_id.clone());
            let (student_name, student_email) = profiles
                .get(&complaint.owner_id)
                .cloned()
                .unwrap_or_default();
            ExportRow {
                complaint,
                category_name,
                student_name,
                student_email,
            }
        })
        .collect();

    info!(
        operation = operations::CSV_EXPORT,
        "Exported {} complaints to CSV",
        rows.len()
    );

    let csv = render_csv(&rows);

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
        (
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"complaints.csv\"",
        ),
    ];

    Ok((headers, csv).into_response())
}
