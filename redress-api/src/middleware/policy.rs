//! Row-level and route-level access policy
//!
//! Students see only their own complaints; admins see everything. List
//! queries are scoped in SQL via [`ActorScope`]; single-row reads go through
//! [`can_view`]. A row hidden by policy is reported as not found, so a
//! student cannot probe for other students' complaint ids.

use axum::{extract::Request, middleware::Next, response::Response};
use redress_core::store::ActorScope;
use tracing::debug;

use crate::error::ApiError;
use crate::middleware::auth::Identity;

/// Require the admin role (layered after `require_auth`)
pub async fn require_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    let identity = request
        .extensions()
        .get::<Identity>()
        .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))?;

    if !identity.is_admin() {
        debug!("Admin route denied for {}", identity.user_id);
        return Err(ApiError::Forbidden(
            "Administrator role required".to_string(),
        ));
    }

    Ok(next.run(request).await)
}

/// Row visibility scope for the caller
pub fn scope_for(identity: &Identity) -> ActorScope {
    if identity.is_admin() {
        ActorScope::All
    } else {
        ActorScope::Owner(identity.user_id.clone())
    }
}

/// Whether the caller may see a row owned by `owner_id`
pub fn can_view(identity: &Identity, owner_id: &str) -> bool {
    identity.is_admin() || identity.user_id == owner_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use redress_core::Role;

    fn identity(user_id: &str, role: Role) -> Identity {
        Identity {
            user_id: user_id.to_string(),
            display_name: "Test User".to_string(),
            email: "test@example.edu".to_string(),
            role,
        }
    }

    #[test]
    fn test_scope_for_student_is_owner() {
        let scope = scope_for(&identity("user_001", Role::Student));
        assert_eq!(scope.owner_id(), Some("user_001"));
    }

    #[test]
    fn test_scope_for_admin_is_all() {
        let scope = scope_for(&identity("user_001", Role::Admin));
        assert_eq!(scope.owner_id(), None);
    }

    #[test]
    fn test_can_view() {
        let student = identity("user_001", Role::Student);
        assert!(can_view(&student, "user_001"));
        assert!(!can_view(&student, "user_002"));

        let admin = identity("admin_001", Role::Admin);
        assert!(can_view(&admin, "user_001"));
        assert!(can_view(&admin, "user_002"));
    }
}
