//! Category entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Entity;

/// Category row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryEntity {
    /// Generated id (format: cat_{timestamp}_{seq})
    pub id: String,
    /// Unique display name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp
    pub updated_at: DateTime<Utc>,
}

impl Entity for CategoryEntity {
    const TABLE: &'static str = "categories";

    fn id(&self) -> &str {
        &self.id
    }
}

impl CategoryEntity {
    /// Create a new category entity
    pub fn new(id: String, name: String, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            description,
            created_at: now,
            updated_at: now,
        }
    }
}
