//! Redress API Server
//!
//! HTTP surface for the student complaint tracker.
//!
//! ## Endpoints
//!
//! ### Profiles and roles
//! - GET /profile - Caller's profile
//! - PUT /profile - Update own profile
//! - GET /profiles - List profiles (admin)
//! - POST /roles - Grant a role (admin)
//! - DELETE /roles/:user_id/:role - Revoke a role (admin)
//! - GET /roles/:user_id - List a user's roles (admin)
//!
//! ### Categories
//! - GET /categories - List categories
//! - POST /categories - Create category (admin)
//! - PUT /categories/:category_id - Update category (admin)
//! - DELETE /categories/:category_id - Delete category (admin)
//!
//! ### Complaints
//! - POST /complaints - Submit complaint (optional inline attachment)
//! - GET /complaints - List visible complaints, filtered and paged
//! - GET /complaints/:complaint_id - Get complaint (owner or admin)
//! - PUT /complaints/:complaint_id/status - Update status/priority (admin)
//! - POST /complaints/bulk-update - Bulk status/priority update (admin)
//! - POST /complaints/:complaint_id/comments - Add comment (owner or admin)
//! - GET /complaints/:complaint_id/comments - List comments (owner or admin)
//! - GET /complaints/:complaint_id/attachment-url - Signed URL (owner or admin)
//! - GET /complaints/:complaint_id/activity - Complaint log rows (admin)
//! - GET /activity - Recent log rows (admin)
//!
//! ### Reports
//! - GET /reports/summary - Aggregate summary (admin)
//! - GET /reports/export.csv - CSV download (admin)
//!
//! ### Files
//! - GET /files/*path - Signed URL redemption (no JWT)
//!
//! All routes except `/health`, `/ready`, and `/files/*path` require a
//! bearer JWT; admin routes additionally require the admin role.

pub mod dto;
pub mod error;
pub mod middleware;
pub mod notify;
pub mod routes;
pub mod server;
pub mod state;

pub use dto::*;
pub use error::*;
pub use middleware::{AuthClaims, Identity, JwtConfig};
pub use notify::*;
pub use routes::*;
pub use server::*;
pub use state::*;
