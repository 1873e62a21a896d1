//! Profile entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Entity;

/// Profile row, keyed by the external identity's user id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileEntity {
    /// External user id (JWT subject)
    pub user_id: String,
    /// Display name
    pub full_name: String,
    /// Contact email
    pub email: String,
    /// Optional student number
    pub student_number: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp
    pub updated_at: DateTime<Utc>,
}

impl Entity for ProfileEntity {
    const TABLE: &'static str = "profiles";

    fn id(&self) -> &str {
        &self.user_id
    }
}

impl ProfileEntity {
    /// Create a new profile entity
    pub fn new(user_id: String, full_name: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            full_name,
            email,
            student_number: None,
            created_at: now,
            updated_at: now,
        }
    }
}
