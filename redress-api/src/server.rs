//! API Server setup

use axum::Router;
use redress_core::notify::Notifier;
use redress_db::Database;
use redress_storage::{BlobBackend, LocalBlobBackend};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::middleware::auth::JwtConfig;
use crate::notify::{DisabledNotifier, HttpNotifier};
use crate::routes::create_router;
use crate::state::{ApiConfig, AppState};

/// Create the API server
///
/// Opens the database, the blob backend, and the notifier from the config;
/// the JWT secret comes from the environment.
pub async fn create_server(
    config: ApiConfig,
) -> Result<(Router, SocketAddr), Box<dyn std::error::Error + Send + Sync>> {
    let db = if config.db_path == ":memory:" {
        Database::open_in_memory()?
    } else {
        Database::open(&config.db_path)?
    };

    let blobs: Arc<dyn BlobBackend> = Arc::new(LocalBlobBackend::new(&config.storage_root).await?);

    let notifier: Arc<dyn Notifier> = match &config.notify_endpoint {
        Some(endpoint) => Arc::new(HttpNotifier::new(endpoint.clone())),
        None => Arc::new(DisabledNotifier),
    };

    let jwt = JwtConfig::from_env()?;

    // Create app state
    let state = AppState::new(db, blobs, notifier, jwt, &config)?;

    // Create router
    let mut router = create_router(state);

    // Add middleware
    router = router.layer(TraceLayer::new_for_http());

    if config.enable_cors {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    // Parse address
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    Ok((router, addr))
}

/// Run the API server
pub async fn run_server(
    config: ApiConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let (router, addr) = create_server(config).await?;

    tracing::info!("Redress API server listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

/// Start server in background (for testing)
pub async fn start_background_server(
    config: ApiConfig,
) -> Result<SocketAddr, Box<dyn std::error::Error + Send + Sync>> {
    let (router, addr) = create_server(config).await?;

    // Bind to get actual address (useful when port is 0)
    let listener = TcpListener::bind(addr).await?;
    let actual_addr = listener.local_addr()?;

    // Spawn server in background
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            tracing::error!("Server error: {}", e);
        }
    });

    Ok(actual_addr)
}
