//! Category store interface

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::types::CategoryRecord;

/// Category store trait
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// Create a category; names are unique
    async fn create_category(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> StoreResult<CategoryRecord>;

    /// Get a category by id
    async fn get_category(&self, category_id: &str) -> StoreResult<Option<CategoryRecord>>;

    /// List all categories, ordered by name
    async fn list_categories(&self) -> StoreResult<Vec<CategoryRecord>>;

    /// Update name and/or description
    async fn update_category(
        &self,
        category_id: &str,
        name: Option<&str>,
        description: Option<&str>,
    ) -> StoreResult<CategoryRecord>;

    /// Delete a category.
    ///
    /// Pre-checks the referencing complaint count and fails with a conflict
    /// while the count is non-zero.
    async fn delete_category(&self, category_id: &str) -> StoreResult<()>;
}
