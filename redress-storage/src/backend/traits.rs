//! Blob Backend Traits
//!
//! Defines the interface for attachment blob backends.
//! Backends are replaceable - the default is the local filesystem.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::BlobResult;

/// Blob Backend Trait
///
/// Keys are caller-chosen relative paths (`{owner}/{complaint}/{ts}.{ext}`),
/// validated before they touch the backend. All backends must implement
/// this trait.
#[async_trait]
pub trait BlobBackend: Send + Sync {
    /// Write bytes at a key, replacing any previous content
    async fn write(&self, key: &str, data: &[u8], content_type: &str) -> BlobResult<BlobMetadata>;

    /// Read the bytes stored at a key
    async fn read(&self, key: &str) -> BlobResult<Vec<u8>>;

    /// Check whether a key holds content
    async fn exists(&self, key: &str) -> BlobResult<bool>;

    /// Get blob metadata without reading content
    async fn metadata(&self, key: &str) -> BlobResult<BlobMetadata>;

    /// Backend name for diagnostics
    fn name(&self) -> &'static str;

    /// Health check
    async fn health_check(&self) -> BlobResult<HealthStatus>;
}

/// Blob metadata (without content)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlobMetadata {
    /// Storage key
    pub key: String,
    /// Content type as recorded at write time
    pub content_type: String,
    /// Size in bytes
    pub size_bytes: u64,
    /// SHA-256 checksum (hex encoded)
    pub checksum: String,
    /// Write timestamp
    pub created_at: DateTime<Utc>,
}

/// Backend health status
#[derive(Debug, Clone)]
pub struct HealthStatus {
    /// Is healthy
    pub healthy: bool,
    /// Status message
    pub message: String,
    /// Check timestamp
    pub checked_at: DateTime<Utc>,
}

impl HealthStatus {
    /// Create healthy status
    pub fn healthy() -> Self {
        Self {
            healthy: true,
            message: "OK".to_string(),
            checked_at: Utc::now(),
        }
    }

    /// Create unhealthy status
    pub fn unhealthy(message: &str) -> Self {
        Self {
            healthy: false,
            message: message.to_string(),
            checked_at: Utc::now(),
        }
    }
}
