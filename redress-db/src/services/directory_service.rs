//! Directory Service Implementation
//!
//! Implements the ProfileStore and RoleStore traits. Identities are issued
//! externally; this service keeps one profile row per identity plus the role
//! assignment table that decides who is an admin.

use async_trait::async_trait;
use chrono::Utc;
use redress_core::store::{Page, PageRequest, ProfileStore, RoleStore};
use redress_core::types::{ProfileRecord, Role};
use redress_core::{StoreError, StoreResult};
use tracing::info;

use crate::db::Database;
use crate::entities::{ProfileEntity, RoleEntity};
use crate::repos::{ProfileRepo, RoleRepo};

/// Directory Service
pub struct DirectoryService {
    profiles: ProfileRepo,
    roles: RoleRepo,
}

impl DirectoryService {
    /// Create a new Directory Service
    pub fn new(db: &Database) -> Self {
        Self {
            profiles: ProfileRepo::new(db.connection()),
            roles: RoleRepo::new(db.connection()),
        }
    }

    /// Convert string to Role with validation
    fn str_to_role(s: &str) -> StoreResult<Role> {
        Role::parse(s).ok_or_else(|| {
            StoreError::Validation(format!(
                "Invalid role: '{}'. Expected one of: student, admin",
                s
            ))
        })
    }

    fn entity_to_record(entity: &ProfileEntity) -> ProfileRecord {
        ProfileRecord {
            user_id: entity.user_id.clone(),
            full_name: entity.full_name.clone(),
            email: entity.email.clone(),
            student_number: entity.student_number.clone(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

#[async_trait]
impl ProfileStore for DirectoryService {
    async fn ensure_profile(
        &self,
        user_id: &str,
        full_name: &str,
        email: &str,
    ) -> StoreResult<ProfileRecord> {
        let entity = ProfileEntity::new(
            user_id.to_string(),
            full_name.to_string(),
            email.to_string(),
        );
        let created = self.profiles.insert_if_absent(&entity)?;
        if created {
            info!("Profile created for {}", user_id);
            return Ok(Self::entity_to_record(&entity));
        }
        // a pre-existing row wins over the token claims
        let existing = self.profiles.get(user_id)?.ok_or_else(|| {
            StoreError::NotFound(format!("Profile {} not found", user_id))
        })?;
        Ok(Self::entity_to_record(&existing))
    }

    async fn update_profile(
        &self,
        user_id: &str,
        full_name: &str,
        email: &str,
        student_number: Option<&str>,
    ) -> StoreResult<ProfileRecord> {
        let mut entity = self.profiles.get(user_id)?.ok_or_else(|| {
            StoreError::NotFound(format!("Profile {} not found", user_id))
        })?;
        entity.full_name = full_name.to_string();
        entity.email = email.to_string();
        entity.student_number = student_number.map(|n| n.to_string());
        entity.updated_at = Utc::now();
        self.profiles.update(&entity)?;
        Ok(Self::entity_to_record(&entity))
    }

    async fn get_profile(&self, user_id: &str) -> StoreResult<Option<ProfileRecord>> {
        Ok(self
            .profiles
            .get(user_id)?
            .map(|entity| Self::entity_to_record(&entity)))
    }

    async fn get_profiles(&self, user_ids: &[String]) -> StoreResult<Vec<ProfileRecord>> {
        Ok(self
            .profiles
            .get_many(user_ids)?
            .iter()
            .map(Self::entity_to_record)
            .collect())
    }

    async fn list_profiles(&self, page: PageRequest) -> StoreResult<Page<ProfileRecord>> {
        let total = self.profiles.count()?;
        let items = self
            .profiles
            .list(page.limit, page.offset)?
            .iter()
            .map(Self::entity_to_record)
            .collect();
        Ok(Page { items, total })
    }
}

#[async_trait]
impl RoleStore for DirectoryService {
    async fn grant_role(
        &self,
        user_id: &str,
        role: Role,
        granted_by: Option<&str>,
    ) -> StoreResult<()> {
        let entity = RoleEntity::new(
            user_id.to_string(),
            role.as_str().to_string(),
            granted_by.map(|g| g.to_string()),
        );
        let granted = self.roles.grant(&entity)?;
        if granted {
            info!("Role {} granted to {}", role, user_id);
        }
        Ok(())
    }

    async fn revoke_role(&self, user_id: &str, role: Role) -> StoreResult<()> {
        let revoked = self.roles.revoke(user_id, role.as_str())?;
        if revoked {
            info!("Role {} revoked from {}", role, user_id);
        }
        Ok(())
    }

    async fn roles_for(&self, user_id: &str) -> StoreResult<Vec<Role>> {
        self.roles
            .roles_for(user_id)?
            .iter()
            .map(|s| Self::str_to_role(s))
            .collect()
    }
}
