//! Role assignment entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Entity;

/// Role assignment row
///
/// A user may hold several roles; the effective role is admin when any
/// `admin` row exists, student otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleEntity {
    /// User the role is assigned to
    pub user_id: String,
    /// Role name: student, admin
    pub role: String,
    /// Admin who granted the role, if granted through the API
    pub granted_by: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Entity for RoleEntity {
    const TABLE: &'static str = "role_assignments";

    fn id(&self) -> &str {
        &self.user_id
    }
}

impl RoleEntity {
    /// Create a new role assignment entity
    pub fn new(user_id: String, role: String, granted_by: Option<String>) -> Self {
        Self {
            user_id,
            role,
            granted_by,
            created_at: Utc::now(),
        }
    }
}
