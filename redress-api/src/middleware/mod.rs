//! HTTP middleware layers

pub mod auth;
pub mod policy;

pub use auth::{require_auth, AuthClaims, Identity, JwtConfig, JwtConfigError};
pub use policy::{can_view, require_admin, scope_for};
