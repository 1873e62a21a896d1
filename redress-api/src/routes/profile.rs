//! Profile and role management endpoints

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use redress_core::store::{PageRequest, ProfileStore, RoleStore};
use redress_core::{ProfileRecord, Role};

use crate::dto::{
    GrantRoleRequest, ListQueryParams, PaginatedResponse, ProfileResponse, RolesResponse,
    UpdateProfileRequest,
};
use crate::error::{ApiError, ApiResult};
use crate::middleware::auth::Identity;
use crate::state::AppState;

/// Get the caller's profile
pub async fn get_own_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Json<ProfileResponse>> {
    let profile = state
        .directory
        .get_profile(&identity.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Profile {} not found", identity.user_id)))?;

    Ok(Json(profile_to_response(&profile, identity.role)))
}

/// Update the caller's profile
pub async fn update_own_profile(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<ProfileResponse>> {
    let profile = state
        .directory
        .update_profile(
            &identity.user_id,
            &req.full_name,
            &req.email,
            req.student_number.as_deref(),
        )
        .await?;

    Ok(Json(profile_to_response(&profile, identity.role)))
}

/// List all profiles (admin)
pub async fn list_profiles(
    State(state): State<AppState>,
    Query(params): Query<ListQueryParams>,
) -> ApiResult<Json<PaginatedResponse<ProfileResponse>>> {
    let page = PageRequest {
        limit: params.limit,
        offset: params.offset,
    };
    let result = state.directory.list_profiles(page).await?;

    let mut items = Vec::with_capacity(result.items.len());
    for profile in &result.items {
        let roles = state.directory.roles_for(&profile.user_id).await?;
        items.push(profile_to_response(profile, Role::effective(&roles)));
    }

    Ok(Json(PaginatedResponse {
        items,
        total: result.total,
        limit: params.limit,
        offset: params.offset,
    }))
}

/// Grant a role to a user (admin)
pub async fn grant_role(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(req): Json<GrantRoleRequest>,
) -> ApiResult<Json<RolesResponse>> {
    let role = parse_role(&req.role)?;

    state
        .directory
        .grant_role(&req.user_id, role, Some(&identity.user_id))
        .await?;

    roles_response(&state, &req.user_id).await
}

/// Revoke a role from a user (admin)
pub async fn revoke_role(
    State(state): State<AppState>,
    Path((user_id, role)): Path<(String, String)>,
) -> ApiResult<Json<RolesResponse>> {
    let role = parse_role(&role)?;

    state.directory.revoke_role(&user_id, role).await?;

    roles_response(&state, &user_id).await
}

/// List a user's role assignments (admin)
pub async fn list_roles(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<RolesResponse>> {
    roles_response(&state, &user_id).await
}

// Helper functions

async fn roles_response(state: &AppState, user_id: &str) -> ApiResult<Json<RolesResponse>> {
    let roles = state.directory.roles_for(user_id).await?;

    Ok(Json(RolesResponse {
        user_id: user_id.to_string(),
        roles: roles.iter().map(|r| r.as_str().to_string()).collect(),
    }))
}

fn parse_role(s: &str) -> ApiResult<Role> {
    Role::parse(s).ok_or_else(|| ApiError::BadRequest(format!("Invalid role: {}", s)))
}

fn profile_to_response(record: &ProfileRecord, role: Role) -> ProfileResponse {
    ProfileResponse {
        user_id: record.user_id.clone(),
        full_name: record.full_name.clone(),
        email: record.email.clone(),
        student_number: record.student_number.clone(),
        role: role.as_str().to_string(),
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}
