//! API route handlers

pub mod activity;
pub mod category;
pub mod complaint;
pub mod files;
pub mod health;
pub mod profile;
pub mod report;

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post, put},
    Router,
};

use crate::middleware::{require_admin, require_auth};
use crate::state::AppState;

/// Create the API router
///
/// Three tiers: public (health, signed URL redemption), authenticated, and
/// admin. The admin tier sits behind both `require_auth` and `require_admin`.
pub fn create_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/profiles", get(profile::list_profiles))
        .route("/roles", post(profile::grant_role))
        .route("/roles/:user_id", get(profile::list_roles))
        .route("/roles/:user_id/:role", delete(profile::revoke_role))
        .route("/categories", post(category::create_category))
        .route(
            "/categories/:category_id",
            put(category::update_category).delete(category::delete_category),
        )
        .route("/complaints/bulk-update", post(complaint::bulk_update))
        .route("/complaints/:complaint_id/status", put(complaint::update_status))
        .route(
            "/complaints/:complaint_id/activity",
            get(activity::list_for_complaint),
        )
        .route("/activity", get(activity::list_recent))
        .route("/reports/summary", get(report::summary))
        .route("/reports/export.csv", get(report::export_csv))
        .route_layer(from_fn(require_admin));

    let authenticated_routes = Router::new()
        .route(
            "/profile",
            get(profile::get_own_profile).put(profile::update_own_profile),
        )
        .route("/categories", get(category::list_categories))
        .route(
            "/complaints",
            post(complaint::submit_complaint).get(complaint::list_complaints),
        )
        .route("/complaints/:complaint_id", get(complaint::get_complaint))
        .route(
            "/complaints/:complaint_id/comments",
            post(complaint::add_comment).get(complaint::list_comments),
        )
        .route(
            "/complaints/:complaint_id/attachment-url",
            get(complaint::attachment_url),
        )
        .merge(admin_routes)
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    Router::new()
        // Public endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/files/*path", get(files::serve_file))
        .merge(authenticated_routes)
        // State
        .with_state(state)
}
