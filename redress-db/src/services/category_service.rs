//! Category Store Service Implementation
//!
//! Implements the CategoryStore trait. Category names are unique and a
//! category cannot be deleted while any complaint still references it.

use async_trait::async_trait;
use chrono::Utc;
use redress_core::store::CategoryStore;
use redress_core::types::CategoryRecord;
use redress_core::{StoreError, StoreResult};
use tracing::info;

use crate::db::Database;
use crate::entities::CategoryEntity;
use crate::repos::{CategoryRepo, ComplaintRepo};

/// Category Store Service
pub struct CategoryService {
    categories: CategoryRepo,
    complaints: ComplaintRepo,
    sequence: std::sync::atomic::AtomicU64,
}

impl CategoryService {
    /// Create a new Category Service
    pub fn new(db: &Database) -> Self {
        Self {
            categories: CategoryRepo::new(db.connection()),
            complaints: ComplaintRepo::new(db.connection()),
            sequence: std::sync::atomic::AtomicU64::new(0),
        }
    }

    /// Generate a new ID
    fn generate_id(&self, prefix: &str) -> String {
        let seq = self
            .sequence
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        let timestamp = Utc::now().timestamp_micros();
        format!("{}_{:016x}_{:08x}", prefix, timestamp, seq)
    }

    fn entity_to_record(entity: &CategoryEntity) -> CategoryRecord {
        CategoryRecord {
            category_id: entity.id.clone(),
            name: entity.name.clone(),
            description: entity.description.clone(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[async_trait]
impl CategoryStore for CategoryService {
    async fn create_category(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> StoreResult<CategoryRecord> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::Validation(
                "Category name must not be empty".to_string(),
            ));
        }
        if self.categories.get_by_name(name)?.is_some() {
            return Err(StoreError::AlreadyExists(format!(
                "Category '{}' already exists",
                name
            )));
        }

        let entity = CategoryEntity::new(
            self.generate_id("cat"),
            name.to_string(),
            description.map(|d| d.to_string()),
        );
        self.categories.insert(&entity)?;

        info!("Category {} ({}) created", entity.id, entity.name);
        Ok(Self::entity_to_record(&entity))
    }

    async fn get_category(&self, category_id: &str) -> StoreResult<Option<CategoryRecord>> {
        Ok(self
            .categories
            .get(category_id)?
            .map(|entity| Self::entity_to_record(&entity)))
    }

    async fn list_categories(&self) -> StoreResult<Vec<CategoryRecord>> {
        Ok(self
            .categories
            .list()?
            .iter()
            .map(Self::entity_to_record)
            .collect())
    }

    async fn update_category(
        &self,
        category_id: &str,
        name: Option<&str>,
        description: Option<&str>,
    ) -> StoreResult<CategoryRecord> {
        let mut entity = self.categories.get(category_id)?.ok_or_else(|| {
            StoreError::NotFound(format!("Category {} not found", category_id))
        })?;

        if let Some(name) = name {
            let name = name.trim();
            if name.is_empty() {
                return Err(StoreError::Validation(
                    "Category name must not be empty".to_string(),
                ));
            }
            // renaming onto another category's name is a uniqueness violation
            if let Some(existing) = self.categories.get_by_name(name)? {
                if existing.id != category_id {
                    return Err(StoreError::AlreadyExists(format!(
                        "Category '{}' already exists",
                        name
                    )));
                }
            }
            entity.name = name.to_string();
        }
        if let Some(description) = description {
            entity.description = Some(description.to_string());
        }
        entity.updated_at = Utc::now();
        self.categories.update(&entity)?;
        Ok(Self::entity_to_record(&entity))
    }

    async fn delete_category(&self, category_id: &str) -> StoreResult<()> {
        let referencing = self.complaints.count_for_category(category_id)?;
        if referencing > 0 {
            return Err(StoreError::Conflict(format!(
                "Category {} is referenced by {} complaints",
                category_id, referencing
            )));
        }
        self.categories.delete(category_id)?;
        info!("Category {} deleted", category_id);
        Ok(())
    }
}
