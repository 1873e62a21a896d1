//! Local Filesystem Blob Backend
//!
//! Implements BlobBackend using the local filesystem.
//! Suitable for development, testing, and single-node deployments.

use async_trait::async_trait;
use chrono::Utc;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use super::traits::{BlobBackend, BlobMetadata, HealthStatus};
use crate::error::{BlobError, BlobResult};
use crate::keys::validate_key;

/// Local filesystem blob backend
///
/// Blobs live at `{root}/{key}`; each blob carries a `{key}.meta.json`
/// sidecar with its content type, size, and checksum.
pub struct LocalBlobBackend {
    root: PathBuf,
}

impl LocalBlobBackend {
    /// Create a new local blob backend, creating the root directory
    pub async fn new(root: impl AsRef<Path>) -> BlobResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await.map_err(|e| {
            BlobError::Backend(format!("Failed to create directory {:?}: {}", root, e))
        })?;

        info!("Initialized local blob backend at {:?}", root);
        Ok(Self { root })
    }

    fn data_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    fn meta_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.meta.json", key))
    }

    fn checksum(data: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data);
        hex::encode(hasher.finalize())
    }

    async fn save_metadata(&self, key: &str, meta: &BlobMetadata) -> BlobResult<()> {
        let json = serde_json::to_string_pretty(meta)
            .map_err(|e| BlobError::Backend(format!("Failed to serialize metadata: {}", e)))?;
        fs::write(self.meta_path(key), json)
            .await
            .map_err(|e| BlobError::Backend(format!("Failed to write metadata: {}", e)))
    }

    async fn load_metadata(&self, key: &str) -> BlobResult<BlobMetadata> {
        let path = self.meta_path(key);
        if !path.exists() {
            return Err(BlobError::NotFound(key.to_string()));
        }
        let json = fs::read_to_string(&path)
            .await
            .map_err(|e| BlobError::Backend(format!("Failed to read metadata: {}", e)))?;
        serde_json::from_str(&json)
            .map_err(|e| BlobError::Backend(format!("Failed to parse metadata: {}", e)))
    }
}

#[async_trait]
impl BlobBackend for LocalBlobBackend {
    async fn write(&self, key: &str, data: &[u8], content_type: &str) -> BlobResult<BlobMetadata> {
        validate_key(key)?;
        debug!("Writing blob {} ({} bytes)", key, data.len());

        let data_path = self.data_path(key);
        if let Some(parent) = data_path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                BlobError::WriteFailed(format!("Failed to create directory: {}", e))
            })?;
        }

        let mut file = fs::File::create(&data_path)
            .await
            .map_err(|e| BlobError::WriteFailed(format!("Failed to create file: {}", e)))?;
        file.write_all(data)
            .await
            .map_err(|e| BlobError::WriteFailed(format!("Failed to write data: {}", e)))?;
        file.sync_all()
            .await
            .map_err(|e| BlobError::WriteFailed(format!("Failed to sync file: {}", e)))?;

        let meta = BlobMetadata {
            key: key.to_string(),
            content_type: content_type.to_string(),
            size_bytes: data.len() as u64,
            checksum: Self::checksum(data),
            created_at: Utc::now(),
        };
        self.save_metadata(key, &meta).await?;

        info!("Stored blob {} ({} bytes, {})", key, data.len(), content_type);
        Ok(meta)
    }

    async fn read(&self, key: &str) -> BlobResult<Vec<u8>> {
        validate_key(key)?;
        debug!("Reading blob {}", key);

        fs::read(self.data_path(key)).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                BlobError::NotFound(key.to_string())
            } else {
                BlobError::ReadFailed(format!("Failed to read file: {}", e))
            }
        })
    }

    async fn exists(&self, key: &str) -> BlobResult<bool> {
        validate_key(key)?;
        Ok(self.data_path(key).exists())
    }

    async fn metadata(&self, key: &str) -> BlobResult<BlobMetadata> {
        validate_key(key)?;
        self.load_metadata(key).await
    }

    fn name(&self) -> &'static str {
        "local"
    }

    async fn health_check(&self) -> BlobResult<HealthStatus> {
        if !self.root.exists() {
            return Ok(HealthStatus::unhealthy("Root path does not exist"));
        }

        // probe with a real write
        let probe = self.root.join(".health_check");
        match fs::write(&probe, b"health_check").await {
            Ok(_) => {
                let _ = fs::remove_file(&probe).await;
                Ok(HealthStatus::healthy())
            }
            Err(e) => Ok(HealthStatus::unhealthy(&format!("Write test failed: {}", e))),
        }
    }
}
