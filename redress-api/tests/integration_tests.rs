//! Integration tests for the Redress API
//!
//! These tests run the full router over an in-memory database, a tempdir
//! blob root, and a recording notifier, with JWTs minted from a test secret.

use axum::http::StatusCode;
use axum_test::TestServer;
use base64::Engine;
use redress_api::{
    create_router, ApiConfig, AppState, AuthClaims, JwtConfig, RecordingNotifier,
};
use redress_core::notify::NotifyKind;
use redress_core::store::RoleStore;
use redress_core::Role;
use redress_db::Database;
use redress_storage::{LocalBlobBackend, UrlSigner};
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;

// ============ Test Helpers ============

const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";

struct TestContext {
    server: TestServer,
    notifier: Arc<RecordingNotifier>,
    state: AppState,
    _blob_root: TempDir,
}

async fn create_test_context_with(notify_on_admin_comment: bool) -> TestContext {
    let blob_root = TempDir::new().unwrap();
    let db = Database::open_in_memory().unwrap();
    let blobs = Arc::new(LocalBlobBackend::new(blob_root.path()).await.unwrap());
    let notifier = Arc::new(RecordingNotifier::new());
    let jwt = JwtConfig::try_new(TEST_SECRET).unwrap();
    let config = ApiConfig {
        notify_on_admin_comment,
        ..ApiConfig::default()
    };

    let state = AppState::new(db, blobs, notifier.clone(), jwt, &config).unwrap();
    let server = TestServer::new(create_router(state.clone())).unwrap();

    TestContext {
        server,
        notifier,
        state,
        _blob_root: blob_root,
    }
}

async fn create_test_context() -> TestContext {
    create_test_context_with(false).await
}

fn mint_token(sub: &str, name: &str, email: &str) -> String {
    let claims = AuthClaims {
        sub: sub.to_string(),
        name: Some(name.to_string()),
        email: Some(email.to_string()),
        iat: chrono::Utc::now().timestamp() as u64,
        exp: (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp() as u64,
        iss: None,
    };
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

fn student_token() -> String {
    mint_token("student_01", "Alice Chen", "alice@example.edu")
}

/// Grant the admin role directly and mint a matching token
async fn admin_token(ctx: &TestContext) -> String {
    ctx.state
        .directory
        .grant_role("admin_01", Role::Admin, None)
        .await
        .unwrap();
    mint_token("admin_01", "Dana Wells", "dana@example.edu")
}

async fn seed_category(ctx: &TestContext, admin: &str, name: &str) -> String {
    let response = ctx
        .server
        .post("/categories")
        .authorization_bearer(admin)
        .json(&json!({ "name": name, "description": "Seeded for tests" }))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    body["category_id"].as_str().unwrap().to_string()
}

async fn submit_complaint(
    ctx: &TestContext,
    token: &str,
    category_id: &str,
    subject: &str,
) -> serde_json::Value {
    let response = ctx
        .server
        .post("/complaints")
        .authorization_bearer(token)
        .json(&json!({
            "category_id": category_id,
            "subject": subject,
            "description": "This has been broken for two weeks and nobody has looked at it",
        }))
        .await;
    response.assert_status_ok();
    response.json()
}

// ============ Health Endpoint Tests ============

#[tokio::test]
async fn test_health_check() {
    let ctx = create_test_context().await;

    let response = ctx.server.get("/health").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].as_str().is_some());
}

#[tokio::test]
async fn test_ready_check() {
    let ctx = create_test_context().await;

    let response = ctx.server.get("/ready").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ready");
}

// ============ Auth Tests ============

#[tokio::test]
async fn test_missing_token_rejected() {
    let ctx = create_test_context().await;

    let response = ctx.server.get("/complaints").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_garbage_token_rejected() {
    let ctx = create_test_context().await;

    let response = ctx
        .server
        .get("/complaints")
        .authorization_bearer("not-a-jwt")
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_student_cannot_reach_admin_routes() {
    let ctx = create_test_context().await;
    let student = student_token();

    let response = ctx
        .server
        .get("/activity")
        .authorization_bearer(&student)
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "FORBIDDEN");
}

// ============ Profile and Role Tests ============

#[tokio::test]
async fn test_profile_created_from_claims_then_caller_edits_win() {
    let ctx = create_test_context().await;
    let token = student_token();

    // First sign-in creates the profile from the claims
    let response = ctx.server.get("/profile").authorization_bearer(&token).await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["full_name"], "Alice Chen");
    assert_eq!(body["role"], "student");
    assert!(body["student_number"].is_null());

    // Caller edits their profile
    let response = ctx
        .server
        .put("/profile")
        .authorization_bearer(&token)
        .json(&json!({
            "full_name": "Alice C. Chen",
            "email": "alice@example.edu",
            "student_number": "S-2024-123",
        }))
        .await;
    response.assert_status_ok();

    // A later sign-in with different claims does not clobber the edits
    let renamed = mint_token("student_01", "A. Chen (Old)", "alice@example.edu");
    let response = ctx.server.get("/profile").authorization_bearer(&renamed).await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["full_name"], "Alice C. Chen");
    assert_eq!(body["student_number"], "S-2024-123");
}

#[tokio::test]
async fn test_role_grant_and_revoke_flow() {
    let ctx = create_test_context().await;
    let admin = admin_token(&ctx).await;
    let student = student_token();

    // Student starts locked out of admin routes
    ctx.server
        .get("/activity")
        .authorization_bearer(&student)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    // Grant admin
    let response = ctx
        .server
        .post("/roles")
        .authorization_bearer(&admin)
        .json(&json!({ "user_id": "student_01", "role": "admin" }))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["roles"], json!(["admin"]));

    ctx.server
        .get("/activity")
        .authorization_bearer(&student)
        .await
        .assert_status_ok();

    // Revoke and the door closes again
    let response = ctx
        .server
        .delete("/roles/student_01/admin")
        .authorization_bearer(&admin)
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["roles"], json!([]));

    ctx.server
        .get("/activity")
        .authorization_bearer(&student)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_list_profiles_admin_only() {
    let ctx = create_test_context().await;
    let admin = admin_token(&ctx).await;
    let student = student_token();

    // Touch the server as the student so their profile exists
    ctx.server
        .get("/profile")
        .authorization_bearer(&student)
        .await
        .assert_status_ok();

    let response = ctx
        .server
        .get("/profiles")
        .authorization_bearer(&admin)
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert!(body["items"].as_array().unwrap().len() >= 2);

    ctx.server
        .get("/profiles")
        .authorization_bearer(&student)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

// ============ Category Tests ============

#[tokio::test]
async fn test_category_crud() {
    let ctx = create_test_context().await;
    let admin = admin_token(&ctx).await;
    let student = student_token();

    let category_id = seed_category(&ctx, &admin, "Facilities").await;

    // Any authenticated caller can list
    let response = ctx
        .server
        .get("/categories")
        .authorization_bearer(&student)
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Facilities");

    // Students cannot create
    ctx.server
        .post("/categories")
        .authorization_bearer(&student)
        .json(&json!({ "name": "Library" }))
        .await
        .assert_status(StatusCode::FORBIDDEN);

    // Duplicate names are rejected
    let response = ctx
        .server
        .post("/categories")
        .authorization_bearer(&admin)
        .json(&json!({ "name": "Facilities" }))
        .await;
    response.assert_status(StatusCode::CONFLICT);

    // Rename
    let response = ctx
        .server
        .put(&format!("/categories/{}", category_id))
        .authorization_bearer(&admin)
        .json(&json!({ "name": "Campus Facilities" }))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["name"], "Campus Facilities");
}

#[tokio::test]
async fn test_delete_category_blocked_while_referenced() {
    let ctx = create_test_context().await;
    let admin = admin_token(&ctx).await;
    let student = student_token();

    let referenced = seed_category(&ctx, &admin, "Facilities").await;
    let unreferenced = seed_category(&ctx, &admin, "Library").await;

    submit_complaint(&ctx, &student, &referenced, "Broken projector").await;

    let response = ctx
        .server
        .delete(&format!("/categories/{}", referenced))
        .authorization_bearer(&admin)
        .await;
    response.assert_status(StatusCode::CONFLICT);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "CONFLICT");

    ctx.server
        .delete(&format!("/categories/{}", unreferenced))
        .authorization_bearer(&admin)
        .await
        .assert_status_ok();
}

// ============ Complaint Lifecycle Tests ============

#[tokio::test]
async fn test_e2e_submit_update_reopen() {
    let ctx = create_test_context().await;
    let admin = admin_token(&ctx).await;
    let student = student_token();
    let category_id = seed_category(&ctx, &admin, "Facilities").await;

    // Submit: 16-char subject, defaults applied
    let complaint = submit_complaint(&ctx, &student, &category_id, "Broken projector").await;
    assert_eq!(complaint["status"], "submitted");
    assert_eq!(complaint["priority"], "medium");
    assert!(complaint["resolved_at"].is_null());
    assert_eq!(complaint["has_attachment"], false);
    let complaint_id = complaint["complaint_id"].as_str().unwrap().to_string();

    // Admin resolves with a priority bump and a response
    let response = ctx
        .server
        .put(&format!("/complaints/{}/status", complaint_id))
        .authorization_bearer(&admin)
        .json(&json!({
            "status": "resolved",
            "priority": "high",
            "admin_response": "Replaced the bulb",
        }))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["complaint"]["status"], "resolved");
    assert_eq!(body["complaint"]["priority"], "high");
    assert_eq!(body["complaint"]["admin_response"], "Replaced the bulb");
    assert!(body["complaint"]["resolved_at"].as_str().is_some());
    assert_eq!(body["notified"], json!(["status_change", "priority_change"]));

    let resolved_at = body["complaint"]["resolved_at"].as_str().unwrap().to_string();

    // Exactly one status_change and one priority_change dispatched
    let dispatches = ctx.notifier.requests();
    assert_eq!(dispatches.len(), 2);
    assert_eq!(dispatches[0].kind, NotifyKind::StatusChange);
    assert_eq!(dispatches[0].new_value.as_deref(), Some("resolved"));
    assert_eq!(dispatches[1].kind, NotifyKind::PriorityChange);

    // Exactly one log row for the update
    let response = ctx
        .server
        .get(&format!("/complaints/{}/activity", complaint_id))
        .authorization_bearer(&admin)
        .await;
    response.assert_status_ok();
    let rows: serde_json::Value = response.json();
    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert_eq!(rows[0]["action"], "status_update");
    assert_eq!(rows[0]["old_status"], "submitted");
    assert_eq!(rows[0]["new_status"], "resolved");
    assert_eq!(
        rows[0]["notes"],
        "priority: medium -> high; admin response updated"
    );

    // Reopen leaves the resolution stamp in place
    let response = ctx
        .server
        .put(&format!("/complaints/{}/status", complaint_id))
        .authorization_bearer(&admin)
        .json(&json!({ "status": "in_review", "priority": "high" }))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["complaint"]["status"], "in_review");
    assert_eq!(body["complaint"]["resolved_at"], resolved_at.as_str());
    assert_eq!(body["notified"], json!(["status_change"]));
}

#[tokio::test]
async fn test_submit_validation_rejected() {
    let ctx = create_test_context().await;
    let admin = admin_token(&ctx).await;
    let student = student_token();
    let category_id = seed_category(&ctx, &admin, "Facilities").await;

    // Subject too short
    let response = ctx
        .server
        .post("/complaints")
        .authorization_bearer(&student)
        .json(&json!({
            "category_id": category_id,
            "subject": "Hi",
            "description": "The projector in room 204 has not worked for two weeks",
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");

    // Description too short
    ctx.server
        .post("/complaints")
        .authorization_bearer(&student)
        .json(&json!({
            "category_id": category_id,
            "subject": "Broken projector",
            "description": "Too short",
        }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    // Unknown category
    ctx.server
        .post("/complaints")
        .authorization_bearer(&student)
        .json(&json!({
            "category_id": "cat_missing",
            "subject": "Broken projector",
            "description": "The projector in room 204 has not worked for two weeks",
        }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    // Nothing was written
    let response = ctx
        .server
        .get("/complaints")
        .authorization_bearer(&student)
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_update_status_bad_values() {
    let ctx = create_test_context().await;
    let admin = admin_token(&ctx).await;
    let student = student_token();
    let category_id = seed_category(&ctx, &admin, "Facilities").await;
    let complaint = submit_complaint(&ctx, &student, &category_id, "Broken projector").await;
    let complaint_id = complaint["complaint_id"].as_str().unwrap();

    let response = ctx
        .server
        .put(&format!("/complaints/{}/status", complaint_id))
        .authorization_bearer(&admin)
        .json(&json!({ "status": "closed", "priority": "high" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "BAD_REQUEST");

    // Unknown complaint id
    let response = ctx
        .server
        .put("/complaints/cmp_missing/status")
        .authorization_bearer(&admin)
        .json(&json!({ "status": "resolved", "priority": "high" }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_filters_and_pagination() {
    let ctx = create_test_context().await;
    let admin = admin_token(&ctx).await;
    let student = student_token();
    let category_id = seed_category(&ctx, &admin, "Facilities").await;

    let first = submit_complaint(&ctx, &student, &category_id, "Projector broken in 204").await;
    submit_complaint(&ctx, &student, &category_id, "Radiator leaks in dorm").await;
    submit_complaint(&ctx, &student, &category_id, "Wifi dead in library").await;

    // Resolve one
    ctx.server
        .put(&format!(
            "/complaints/{}/status",
            first["complaint_id"].as_str().unwrap()
        ))
        .authorization_bearer(&admin)
        .json(&json!({ "status": "resolved", "priority": "medium" }))
        .await
        .assert_status_ok();

    // Status filter
    let response = ctx
        .server
        .get("/complaints?status=resolved")
        .authorization_bearer(&student)
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["status"], "resolved");

    // Case-insensitive search
    let response = ctx
        .server
        .get("/complaints?search=PROJECTOR")
        .authorization_bearer(&student)
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["total"], 1);

    // Pagination reports the full total
    let response = ctx
        .server
        .get("/complaints?limit=2&offset=0")
        .authorization_bearer(&student)
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
    assert_eq!(body["total"], 3);
    assert_eq!(body["limit"], 2);
}

// ============ Row Policy Tests ============

#[tokio::test]
async fn test_students_cannot_see_others_complaints() {
    let ctx = create_test_context().await;
    let admin = admin_token(&ctx).await;
    let alice = student_token();
    let bob = mint_token("student_02", "Bob Okafor", "bob@example.edu");
    let category_id = seed_category(&ctx, &admin, "Facilities").await;

    let complaint = submit_complaint(&ctx, &alice, &category_id, "Broken projector").await;
    let complaint_id = complaint["complaint_id"].as_str().unwrap();

    // Bob's list is empty; the row reads as missing
    let response = ctx.server.get("/complaints").authorization_bearer(&bob).await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["total"], 0);

    ctx.server
        .get(&format!("/complaints/{}", complaint_id))
        .authorization_bearer(&bob)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    ctx.server
        .post(&format!("/complaints/{}/comments", complaint_id))
        .authorization_bearer(&bob)
        .json(&json!({ "content": "I saw this too" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    // The owner and the admin both see it
    ctx.server
        .get(&format!("/complaints/{}", complaint_id))
        .authorization_bearer(&alice)
        .await
        .assert_status_ok();

    ctx.server
        .get(&format!("/complaints/{}", complaint_id))
        .authorization_bearer(&admin)
        .await
        .assert_status_ok();
}

// ============ Bulk Update Tests ============

#[tokio::test]
async fn test_bulk_update_logs_but_never_notifies() {
    let ctx = create_test_context().await;
    let admin = admin_token(&ctx).await;
    let student = student_token();
    let category_id = seed_category(&ctx, &admin, "Facilities").await;

    let a = submit_complaint(&ctx, &student, &category_id, "Broken projector").await;
    let b = submit_complaint(&ctx, &student, &category_id, "Radiator leaks").await;
    let a_id = a["complaint_id"].as_str().unwrap().to_string();
    let b_id = b["complaint_id"].as_str().unwrap().to_string();

    let response = ctx
        .server
        .post("/complaints/bulk-update")
        .authorization_bearer(&admin)
        .json(&json!({
            "complaint_ids": [a_id, b_id, "cmp_missing"],
            "status": "in_review",
            "priority": "high",
        }))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["updated"].as_array().unwrap().len(), 2);
    assert_eq!(body["skipped"], json!(["cmp_missing"]));

    // Exactly one log row per updated complaint, zero dispatches
    for id in [&a_id, &b_id] {
        let response = ctx
            .server
            .get(&format!("/complaints/{}/activity", id))
            .authorization_bearer(&admin)
            .await;
        let rows: serde_json::Value = response.json();
        assert_eq!(rows.as_array().unwrap().len(), 1);
        assert_eq!(rows[0]["action"], "bulk_update");
    }
    assert!(ctx.notifier.requests().is_empty());

    // Neither field supplied is rejected
    ctx.server
        .post("/complaints/bulk-update")
        .authorization_bearer(&admin)
        .json(&json!({ "complaint_ids": ["cmp_whatever"] }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

// ============ Comment Tests ============

#[tokio::test]
async fn test_comment_thread() {
    let ctx = create_test_context().await;
    let admin = admin_token(&ctx).await;
    let student = student_token();
    let category_id = seed_category(&ctx, &admin, "Facilities").await;
    let complaint = submit_complaint(&ctx, &student, &category_id, "Broken projector").await;
    let complaint_id = complaint["complaint_id"].as_str().unwrap();

    let response = ctx
        .server
        .post(&format!("/complaints/{}/comments", complaint_id))
        .authorization_bearer(&student)
        .json(&json!({ "content": "  Any update on this?  " }))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["content"], "Any update on this?");
    assert_eq!(body["is_admin"], false);

    let response = ctx
        .server
        .post(&format!("/complaints/{}/comments", complaint_id))
        .authorization_bearer(&admin)
        .json(&json!({ "content": "Technician scheduled for Monday" }))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["is_admin"], true);

    // Oldest first
    let response = ctx
        .server
        .get(&format!("/complaints/{}/comments", complaint_id))
        .authorization_bearer(&student)
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let comments = body.as_array().unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["is_admin"], false);
    assert_eq!(comments[1]["is_admin"], true);

    // Blank comments are rejected
    ctx.server
        .post(&format!("/complaints/{}/comments", complaint_id))
        .authorization_bearer(&student)
        .json(&json!({ "content": "   " }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    // Comment notifications are off by default
    assert!(ctx.notifier.requests().is_empty());
}

#[tokio::test]
async fn test_admin_comment_notification_toggle() {
    let ctx = create_test_context_with(true).await;
    let admin = admin_token(&ctx).await;
    let student = student_token();
    let category_id = seed_category(&ctx, &admin, "Facilities").await;
    let complaint = submit_complaint(&ctx, &student, &category_id, "Broken projector").await;
    let complaint_id = complaint["complaint_id"].as_str().unwrap();

    // Student comments never notify
    ctx.server
        .post(&format!("/complaints/{}/comments", complaint_id))
        .authorization_bearer(&student)
        .json(&json!({ "content": "Any update on this?" }))
        .await
        .assert_status_ok();
    assert!(ctx.notifier.requests().is_empty());

    // Admin comments do, when the toggle is on
    ctx.server
        .post(&format!("/complaints/{}/comments", complaint_id))
        .authorization_bearer(&admin)
        .json(&json!({ "content": "Technician scheduled" }))
        .await
        .assert_status_ok();

    let dispatches = ctx.notifier.requests();
    assert_eq!(dispatches.len(), 1);
    assert_eq!(dispatches[0].kind, NotifyKind::AdminComment);
    assert_eq!(dispatches[0].comment.as_deref(), Some("Technician scheduled"));
}

// ============ Attachment and Signed URL Tests ============

const PNG_BYTES: &[u8] = b"\x89PNG fake image payload for testing";

#[tokio::test]
async fn test_attachment_upload_and_signed_url_round_trip() {
    let ctx = create_test_context().await;
    let admin = admin_token(&ctx).await;
    let student = student_token();
    let category_id = seed_category(&ctx, &admin, "Facilities").await;

    let response = ctx
        .server
        .post("/complaints")
        .authorization_bearer(&student)
        .json(&json!({
            "category_id": category_id,
            "subject": "Broken projector",
            "description": "The projector in room 204 has not worked for two weeks",
            "attachment": {
                "filename": "photo.png",
                "content_type": "image/png",
                "data_base64": base64::engine::general_purpose::STANDARD.encode(PNG_BYTES),
            },
        }))
        .await;
    response.assert_status_ok();
    let complaint: serde_json::Value = response.json();
    assert_eq!(complaint["has_attachment"], true);
    let complaint_id = complaint["complaint_id"].as_str().unwrap();

    // Mint a signed URL
    let response = ctx
        .server
        .get(&format!("/complaints/{}/attachment-url", complaint_id))
        .authorization_bearer(&student)
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let url = body["url"].as_str().unwrap().to_string();
    assert!(url.starts_with("/files/"));

    // Redeem it without any JWT
    let response = ctx.server.get(&url).await;
    response.assert_status_ok();
    assert_eq!(response.header("content-type").to_str().unwrap(), "image/png");
    assert_eq!(response.as_bytes().as_ref(), PNG_BYTES);

    // A tampered signature is rejected
    let response = ctx.server.get(&format!("{}ff", url)).await;
    response.assert_status(StatusCode::FORBIDDEN);

    // An expired URL is rejected even with a valid signature
    let key = url
        .strip_prefix("/files/")
        .and_then(|rest| rest.split('?').next())
        .unwrap();
    let past = chrono::Utc::now().timestamp() - 120;
    let stale_sig = UrlSigner::new(TEST_SECRET).sign(key, past);
    let response = ctx
        .server
        .get(&format!("/files/{}?expires={}&sig={}", key, past, stale_sig))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_attachment_validation() {
    let ctx = create_test_context().await;
    let admin = admin_token(&ctx).await;
    let student = student_token();
    let category_id = seed_category(&ctx, &admin, "Facilities").await;

    // Disallowed MIME type
    let response = ctx
        .server
        .post("/complaints")
        .authorization_bearer(&student)
        .json(&json!({
            "category_id": category_id,
            "subject": "Broken projector",
            "description": "The projector in room 204 has not worked for two weeks",
            "attachment": {
                "filename": "archive.zip",
                "content_type": "application/zip",
                "data_base64": base64::engine::general_purpose::STANDARD.encode(b"PK"),
            },
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    // Broken base64
    let response = ctx
        .server
        .post("/complaints")
        .authorization_bearer(&student)
        .json(&json!({
            "category_id": category_id,
            "subject": "Broken projector",
            "description": "The projector in room 204 has not worked for two weeks",
            "attachment": {
                "filename": "photo.png",
                "content_type": "image/png",
                "data_base64": "!!!not base64!!!",
            },
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    // Neither attempt left a row behind
    let response = ctx
        .server
        .get("/complaints")
        .authorization_bearer(&student)
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["total"], 0);

    // A complaint without an attachment has no URL to mint
    let complaint = submit_complaint(&ctx, &student, &category_id, "Broken projector").await;
    ctx.server
        .get(&format!(
            "/complaints/{}/attachment-url",
            complaint["complaint_id"].as_str().unwrap()
        ))
        .authorization_bearer(&student)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

// ============ Report Tests ============

#[tokio::test]
async fn test_summary_report() {
    let ctx = create_test_context().await;
    let admin = admin_token(&ctx).await;
    let student = student_token();
    let facilities = seed_category(&ctx, &admin, "Facilities").await;
    let library = seed_category(&ctx, &admin, "Library").await;

    let first = submit_complaint(&ctx, &student, &facilities, "Broken projector").await;
    submit_complaint(&ctx, &student, &library, "Wifi dead in library").await;

    ctx.server
        .put(&format!(
            "/complaints/{}/status",
            first["complaint_id"].as_str().unwrap()
        ))
        .authorization_bearer(&admin)
        .json(&json!({ "status": "resolved", "priority": "high" }))
        .await
        .assert_status_ok();

    let response = ctx
        .server
        .get("/reports/summary")
        .authorization_bearer(&admin)
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["total"], 2);
    assert_eq!(body["by_status"]["submitted"], 1);
    assert_eq!(body["by_status"]["resolved"], 1);
    assert_eq!(body["by_priority"]["high"], 1);
    assert_eq!(body["by_category"][&facilities], 1);
    assert_eq!(body["trend"].as_array().unwrap().len(), 14);

    // Trimmed trend window
    let response = ctx
        .server
        .get("/reports/summary?days=7")
        .authorization_bearer(&admin)
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["trend"].as_array().unwrap().len(), 7);

    // Admin only
    ctx.server
        .get("/reports/summary")
        .authorization_bearer(&student)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_csv_export_quoting_and_filters() {
    let ctx = create_test_context().await;
    let admin = admin_token(&ctx).await;
    let student = student_token();
    let category_id = seed_category(&ctx, &admin, "Facilities").await;

    let quoted = ctx
        .server
        .post("/complaints")
        .authorization_bearer(&student)
        .json(&json!({
            "category_id": category_id,
            "subject": "He said \"hi\" in class",
            "description": "A longer description of the classroom incident",
        }))
        .await;
    quoted.assert_status_ok();
    submit_complaint(&ctx, &student, &category_id, "Radiator leaks").await;

    let response = ctx
        .server
        .get("/reports/export.csv")
        .authorization_bearer(&admin)
        .await;
    response.assert_status_ok();
    assert!(response
        .header("content-type")
        .to_str()
        .unwrap()
        .starts_with("text/csv"));

    let csv = response.text();
    let mut lines = csv.lines();
    assert!(lines.next().unwrap().starts_with("\"ID\",\"Subject\",\"Category\""));
    assert_eq!(lines.count(), 2);
    assert!(csv.contains("\"He said \"\"hi\"\" in class\""));
    assert!(csv.contains("\"Facilities\""));
    assert!(csv.contains("\"Alice Chen\""));

    // Filters narrow the export
    let response = ctx
        .server
        .get("/reports/export.csv?search=radiator")
        .authorization_bearer(&admin)
        .await;
    let csv = response.text();
    assert_eq!(csv.lines().count(), 2);
    assert!(csv.contains("\"Radiator leaks\""));
}
