//! Complaint category types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category record
///
/// Names are unique. A category cannot be deleted while any complaint still
/// references it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub category_id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
