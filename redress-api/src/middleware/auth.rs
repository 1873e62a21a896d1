//! JWT authentication middleware
//!
//! Validates bearer tokens, upserts the caller's profile from the claims,
//! loads role assignments, and stores an [`Identity`] in request extensions
//! for downstream handlers. The token only proves who the caller is; what
//! they may do comes from the role assignments table.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use redress_core::store::{ProfileStore, RoleStore};
use redress_core::Role;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

/// Environment variable holding the signing secret
pub const JWT_SECRET_ENV: &str = "REDRESS_JWT_SECRET";
/// Environment variable holding the expected issuer, if any
pub const JWT_ISSUER_ENV: &str = "REDRESS_JWT_ISSUER";

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for HS256
    pub secret: String,
    /// Issuer to validate, when set
    pub issuer: Option<String>,
}

/// Error type for JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfigError {
    pub message: String,
}

impl std::fmt::Display for JwtConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "JWT config error: {}", self.message)
    }
}

impl std::error::Error for JwtConfigError {}

impl JwtConfig {
    /// Minimum secret length
    const MIN_SECRET_LENGTH: usize = 32;

    /// Create a config from a secret
    ///
    /// Rejects secrets shorter than 32 bytes.
    pub fn try_new(secret: impl Into<String>) -> Result<Self, JwtConfigError> {
        let secret = secret.into();
        if secret.len() < Self::MIN_SECRET_LENGTH {
            return Err(JwtConfigError {
                message: format!(
                    "JWT secret must be at least {} bytes, got {}",
                    Self::MIN_SECRET_LENGTH,
                    secret.len()
                ),
            });
        }
        Ok(Self {
            secret,
            issuer: None,
        })
    }

    /// Create a config from `REDRESS_JWT_SECRET` and optional `REDRESS_JWT_ISSUER`
    pub fn from_env() -> Result<Self, JwtConfigError> {
        let secret = std::env::var(JWT_SECRET_ENV).map_err(|_| JwtConfigError {
            message: format!(
                "JWT secret environment variable '{}' is not set",
                JWT_SECRET_ENV
            ),
        })?;
        let mut config = Self::try_new(secret)?;
        config.issuer = std::env::var(JWT_ISSUER_ENV).ok();
        Ok(config)
    }

    /// Set issuer validation
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthClaims {
    /// Subject (user id)
    pub sub: String,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Email address
    #[serde(default)]
    pub email: Option<String>,
    /// Issued at (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issuer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

/// Authenticated caller, stored in request extensions
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: String,
    pub display_name: String,
    pub email: String,
    /// Effective role from the role assignments table
    pub role: Role,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Extract the bearer token from an authorization header value
pub fn extract_token(auth_header: &str) -> Result<&str, ApiError> {
    auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        ApiError::Unauthorized(
            "Invalid authorization header format. Expected: Bearer <token>".to_string(),
        )
    })
}

/// Validate a JWT and extract its claims
pub fn validate_token(token: &str, config: &JwtConfig) -> Result<AuthClaims, ApiError> {
    let mut validation = Validation::new(Algorithm::HS256);
    if let Some(ref iss) = config.issuer {
        validation.set_issuer(&[iss]);
    }

    let key = DecodingKey::from_secret(config.secret.as_bytes());

    let token_data = decode::<AuthClaims>(token, &key, &validation).map_err(|e| {
        if e.kind() == &jsonwebtoken::errors::ErrorKind::ExpiredSignature {
            ApiError::Unauthorized("Token has expired".to_string())
        } else {
            ApiError::Unauthorized(format!("Token validation failed: {}", e))
        }
    })?;

    Ok(token_data.claims)
}

/// Require authentication middleware
///
/// On success the caller's profile exists (created from the claims on first
/// sight) and an [`Identity`] carrying the effective role is available to
/// every handler behind this layer.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Authorization header is required".to_string()))?;

    let token = extract_token(auth_header)?;
    let claims = validate_token(token, &state.jwt)?;

    let full_name = claims.name.clone().unwrap_or_else(|| claims.sub.clone());
    let email = claims.email.clone().unwrap_or_default();

    let profile = state
        .directory
        .ensure_profile(&claims.sub, &full_name, &email)
        .await?;

    let roles = state.directory.roles_for(&claims.sub).await?;
    let role = Role::effective(&roles);

    request.extensions_mut().insert(Identity {
        user_id: profile.user_id,
        display_name: profile.full_name,
        email: profile.email,
        role,
    });

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const TEST_SECRET: &str = "unit-test-secret-0123456789abcdef0123456789";

    fn create_test_token(claims: &AuthClaims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims_for(sub: &str, exp_offset_hours: i64) -> AuthClaims {
        AuthClaims {
            sub: sub.to_string(),
            name: Some("Alice Chen".to_string()),
            email: Some("alice@example.edu".to_string()),
            iat: chrono::Utc::now().timestamp() as u64,
            exp: (chrono::Utc::now() + chrono::Duration::hours(exp_offset_hours)).timestamp()
                as u64,
            iss: None,
        }
    }

    #[test]
    fn test_secret_length_enforced() {
        assert!(JwtConfig::try_new("short").is_err());
        assert!(JwtConfig::try_new(TEST_SECRET).is_ok());
    }

    #[test]
    fn test_extract_token() {
        assert_eq!(extract_token("Bearer abc123").unwrap(), "abc123");
        assert!(extract_token("Basic abc123").is_err());
        assert!(extract_token("abc123").is_err());
    }

    #[test]
    fn test_validate_token() {
        let config = JwtConfig::try_new(TEST_SECRET).unwrap();
        let claims = claims_for("user_001", 1);

        let token = create_test_token(&claims, TEST_SECRET);
        let validated = validate_token(&token, &config).unwrap();

        assert_eq!(validated.sub, "user_001");
        assert_eq!(validated.name.as_deref(), Some("Alice Chen"));
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = JwtConfig::try_new(TEST_SECRET).unwrap();
        let claims = claims_for("user_001", -1);

        let token = create_test_token(&claims, TEST_SECRET);
        let result = validate_token(&token, &config);

        match result {
            Err(ApiError::Unauthorized(msg)) => assert!(msg.contains("expired")),
            other => panic!("expected Unauthorized, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let config = JwtConfig::try_new(TEST_SECRET).unwrap();
        let claims = claims_for("user_001", 1);

        let token = create_test_token(&claims, "another-secret-0123456789abcdef0123456789");
        assert!(validate_token(&token, &config).is_err());
    }

    #[test]
    fn test_issuer_validated_when_configured() {
        let config = JwtConfig::try_new(TEST_SECRET)
            .unwrap()
            .with_issuer("redress");

        let mut claims = claims_for("user_001", 1);
        claims.iss = Some("redress".to_string());
        let token = create_test_token(&claims, TEST_SECRET);
        assert!(validate_token(&token, &config).is_ok());

        claims.iss = Some("someone-else".to_string());
        let token = create_test_token(&claims, TEST_SECRET);
        assert!(validate_token(&token, &config).is_err());
    }
}
