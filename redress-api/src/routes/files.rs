//! Signed URL redemption
//!
//! The only unauthenticated data route. The signature and expiry on the URL
//! are the whole credential; no JWT is required or consulted.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use redress_core::logging::operations;
use tracing::debug;

use crate::dto::FileQueryParams;
use crate::error::ApiResult;
use crate::state::AppState;

/// Serve a stored blob addressed by a signed URL
pub async fn serve_file(
    State(state): State<AppState>,
    Path(path): Path<String>,
    Query(params): Query<FileQueryParams>,
) -> ApiResult<Response> {
    state
        .signer
        .verify(&path, params.expires, &params.sig, Utc::now())?;

    let metadata = state.blobs.metadata(&path).await?;
    let data = state.blobs.read(&path).await?;

    debug!(
        operation = operations::BLOB_READ,
        "Served {} ({} bytes) via signed URL", path, data.len()
    );

    Ok((
        [(header::CONTENT_TYPE, metadata.content_type)],
        data,
    )
        .into_response())
}
