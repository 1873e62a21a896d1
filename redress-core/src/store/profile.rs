//! Profile and role store interfaces

use async_trait::async_trait;

use super::{Page, PageRequest};
use crate::error::StoreResult;
use crate::types::{ProfileRecord, Role};

/// Profile store trait
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Create the profile if this identity has not been seen before.
    ///
    /// Called from the auth layer on every request; an existing profile is
    /// returned untouched.
    async fn ensure_profile(
        &self,
        user_id: &str,
        full_name: &str,
        email: &str,
    ) -> StoreResult<ProfileRecord>;

    /// Overwrite the caller-editable profile fields
    async fn update_profile(
        &self,
        user_id: &str,
        full_name: &str,
        email: &str,
        student_number: Option<&str>,
    ) -> StoreResult<ProfileRecord>;

    /// Get one profile
    async fn get_profile(&self, user_id: &str) -> StoreResult<Option<ProfileRecord>>;

    /// Batched profile lookup, for joining owner fields onto complaints
    async fn get_profiles(&self, user_ids: &[String]) -> StoreResult<Vec<ProfileRecord>>;

    /// List all profiles, paged
    async fn list_profiles(&self, page: PageRequest) -> StoreResult<Page<ProfileRecord>>;
}

/// Role assignment store trait
#[async_trait]
pub trait RoleStore: Send + Sync {
    /// Grant a role; granting an already-held role is a no-op
    async fn grant_role(
        &self,
        user_id: &str,
        role: Role,
        granted_by: Option<&str>,
    ) -> StoreResult<()>;

    /// Revoke a role; revoking an unheld role is a no-op
    async fn revoke_role(&self, user_id: &str, role: Role) -> StoreResult<()>;

    /// All roles assigned to a user
    async fn roles_for(&self, user_id: &str) -> StoreResult<Vec<Role>>;
}
