//! Category management endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use redress_core::store::CategoryStore;
use redress_core::CategoryRecord;

use crate::dto::{CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// List all categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<CategoryResponse>>> {
    let categories = state.categories.list_categories().await?;

    Ok(Json(categories.iter().map(category_to_response).collect()))
}

/// Create a category (admin)
pub async fn create_category(
    State(state): State<AppState>,
    Json(req): Json<CreateCategoryRequest>,
) -> ApiResult<Json<CategoryResponse>> {
    let category = state
        .categories
        .create_category(&req.name, req.description.as_deref())
        .await?;

    Ok(Json(category_to_response(&category)))
}

/// Update a category's name and/or description (admin)
pub async fn update_category(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
    Json(req): Json<UpdateCategoryRequest>,
) -> ApiResult<Json<CategoryResponse>> {
    if req.name.is_none() && req.description.is_none() {
        return Err(ApiError::BadRequest(
            "Provide a name and/or description to update".to_string(),
        ));
    }

    let category = state
        .categories
        .update_category(&category_id, req.name.as_deref(), req.description.as_deref())
        .await?;

    Ok(Json(category_to_response(&category)))
}

/// Delete a category (admin); fails while complaints reference it
pub async fn delete_category(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    state.categories.delete_category(&category_id).await?;

    Ok(Json(serde_json::json!({ "deleted": category_id })))
}

// Helper functions

fn category_to_response(record: &CategoryRecord) -> CategoryResponse {
    CategoryResponse {
        category_id: record.category_id.clone(),
        name: record.name.clone(),
        description: record.description.clone(),
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}
