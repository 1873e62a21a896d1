//! Data Transfer Objects for API requests and responses

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============ Complaint DTOs ============

/// Inline attachment carried on a submission
#[derive(Debug, Deserialize)]
pub struct AttachmentUpload {
    /// Original filename (informational only)
    pub filename: Option<String>,
    /// MIME type; must be on the allow-list
    pub content_type: String,
    /// File bytes, standard base64
    pub data_base64: String,
}

/// Submit complaint request
#[derive(Debug, Deserialize)]
pub struct SubmitComplaintRequest {
    /// Category the complaint files under
    pub category_id: String,
    /// Subject line (5-100 characters)
    pub subject: String,
    /// Full description (20-2000 characters)
    pub description: String,
    /// Optional inline attachment
    pub attachment: Option<AttachmentUpload>,
}

/// Complaint response
#[derive(Debug, Serialize)]
pub struct ComplaintResponse {
    pub complaint_id: String,
    pub owner_id: String,
    pub category_id: String,
    pub subject: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub admin_response: Option<String>,
    pub has_attachment: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

/// Update status/priority request (admin)
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    /// New status (submitted, in_review, resolved)
    pub status: String,
    /// New priority (low, medium, high, critical)
    pub priority: String,
    /// Optional response text shown to the student
    pub admin_response: Option<String>,
}

/// Update status/priority response
#[derive(Debug, Serialize)]
pub struct StatusUpdateResponse {
    pub complaint: ComplaintResponse,
    /// Notification kinds dispatched for this update
    pub notified: Vec<String>,
}

/// Bulk update request (admin)
#[derive(Debug, Deserialize)]
pub struct BulkUpdateRequest {
    pub complaint_ids: Vec<String>,
    /// New status for every id, if changing
    pub status: Option<String>,
    /// New priority for every id, if changing
    pub priority: Option<String>,
}

/// Bulk update response
#[derive(Debug, Serialize)]
pub struct BulkUpdateResponse {
    pub updated: Vec<String>,
    pub skipped: Vec<String>,
}

/// Signed attachment URL response
#[derive(Debug, Serialize)]
pub struct AttachmentUrlResponse {
    pub url: String,
    pub expires_at: DateTime<Utc>,
}

// ============ Comment DTOs ============

/// Add comment request
#[derive(Debug, Deserialize)]
pub struct AddCommentRequest {
    /// Comment body; stored trimmed, must be non-empty
    pub content: String,
}

/// Comment response
#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub comment_id: String,
    pub complaint_id: String,
    pub author_id: String,
    pub content: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

// ============ Category DTOs ============

/// Create category request (admin)
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: Option<String>,
}

/// Update category request (admin)
#[derive(Debug, Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Category response
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub category_id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============ Profile DTOs ============

/// Update own profile request
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub full_name: String,
    pub email: String,
    pub student_number: Option<String>,
}

/// Profile response
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user_id: String,
    pub full_name: String,
    pub email: String,
    pub student_number: Option<String>,
    /// Effective role (student or admin)
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Grant role request (admin)
#[derive(Debug, Deserialize)]
pub struct GrantRoleRequest {
    pub user_id: String,
    /// Role name (student, admin)
    pub role: String,
}

/// Role assignments for one user
#[derive(Debug, Serialize)]
pub struct RolesResponse {
    pub user_id: String,
    pub roles: Vec<String>,
}

// ============ Activity DTOs ============

/// Activity log row response
#[derive(Debug, Serialize)]
pub struct ActivityResponse {
    pub log_id: String,
    pub complaint_id: String,
    pub action: String,
    pub old_status: Option<String>,
    pub new_status: Option<String>,
    pub notes: Option<String>,
    pub performed_by: String,
    pub created_at: DateTime<Utc>,
}

// ============ Report DTOs ============

/// Query parameters for the summary report
#[derive(Debug, Deserialize, Default)]
pub struct SummaryQueryParams {
    /// Trend window in days (default 14)
    pub days: Option<u32>,
}

// ============ Health DTOs ============

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

// ============ Pagination ============

/// Paginated list response
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub limit: u32,
    pub offset: u32,
}

/// Query parameters for complaint list endpoints
#[derive(Debug, Deserialize, Default)]
pub struct ListQueryParams {
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub category_id: Option<String>,
    /// Case-insensitive match over subject and description
    pub search: Option<String>,
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
}

fn default_limit() -> u32 {
    100
}

// ============ Signed URL redemption ============

/// Query parameters carried on a signed file URL
#[derive(Debug, Deserialize)]
pub struct FileQueryParams {
    /// Unix timestamp after which the URL is dead
    pub expires: i64,
    /// Hex SHA-256 over secret, key, and expiry
    pub sig: String,
}
