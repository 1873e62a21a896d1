//! Application state for the API server

use redress_core::notify::Notifier;
use redress_core::StoreError;
use redress_db::{CategoryService, ComplaintService, Database, DirectoryService};
use redress_storage::{BlobBackend, UrlSigner, DEFAULT_URL_TTL_SECS};
use std::sync::Arc;

use crate::middleware::auth::JwtConfig;

/// API server state
#[derive(Clone)]
pub struct AppState {
    /// Shared database handle (readiness probes)
    pub db: Database,
    /// Complaint lifecycle service
    pub complaints: Arc<ComplaintService>,
    /// Category management service
    pub categories: Arc<CategoryService>,
    /// Profile and role service
    pub directory: Arc<DirectoryService>,
    /// Attachment blob backend
    pub blobs: Arc<dyn BlobBackend>,
    /// Outbound notification dispatcher
    pub notifier: Arc<dyn Notifier>,
    /// Signed URL generator/verifier
    pub signer: UrlSigner,
    /// JWT validation config
    pub jwt: JwtConfig,
    /// Whether admin comments dispatch a notification
    pub notify_on_admin_comment: bool,
    /// Signed URL lifetime in seconds
    pub signed_url_ttl_secs: i64,
    /// API version
    pub version: String,
}

impl AppState {
    /// Create new app state over an opened database
    ///
    /// Initializes the schema and wires the services. The URL signer reuses
    /// the JWT secret; signed links die with a secret rotation.
    pub fn new(
        db: Database,
        blobs: Arc<dyn BlobBackend>,
        notifier: Arc<dyn Notifier>,
        jwt: JwtConfig,
        config: &ApiConfig,
    ) -> Result<Self, StoreError> {
        db.init_schema()?;

        let complaints = Arc::new(ComplaintService::new(&db));
        let categories = Arc::new(CategoryService::new(&db));
        let directory = Arc::new(DirectoryService::new(&db));
        let signer = UrlSigner::new(jwt.secret.clone());

        Ok(Self {
            db,
            complaints,
            categories,
            directory,
            blobs,
            notifier,
            signer,
            jwt,
            notify_on_admin_comment: config.notify_on_admin_comment,
            signed_url_ttl_secs: config.signed_url_ttl_secs,
            version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub enable_cors: bool,
    /// SQLite file path; `:memory:` for an ephemeral database
    pub db_path: String,
    /// Root directory for the local blob backend
    pub storage_root: String,
    /// Notification endpoint; `None` disables dispatch
    pub notify_endpoint: Option<String>,
    pub notify_on_admin_comment: bool,
    pub signed_url_ttl_secs: i64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            enable_cors: true,
            db_path: "redress.db".to_string(),
            storage_root: "storage".to_string(),
            notify_endpoint: None,
            notify_on_admin_comment: false,
            signed_url_ttl_secs: DEFAULT_URL_TTL_SECS,
        }
    }
}
