//! Redress Blob Storage Layer
//!
//! Attachment storage for the complaint tracker.
//!
//! # Layout
//!
//! - **Backends**: the [`BlobBackend`] trait plus the default local
//!   filesystem implementation; keys are `{owner}/{complaint}/{ts}.{ext}`
//! - **Keys**: key construction and traversal-safe validation
//! - **Signed URLs**: downloads go through expiring signed URLs, never raw
//!   blob keys
//!
//! # Usage
//!
//! ```ignore
//! use redress_storage::{BlobBackend, LocalBlobBackend};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = LocalBlobBackend::new("/var/lib/redress/blobs").await?;
//!
//!     let meta = backend
//!         .write("user:alice/cmp_0001/1718000000.png", b"...", "image/png")
//!         .await?;
//!     println!("stored {} bytes", meta.size_bytes);
//!
//!     let data = backend.read(&meta.key).await?;
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod error;
pub mod keys;
pub mod signer;

pub use backend::{BlobBackend, BlobMetadata, HealthStatus, LocalBlobBackend};
pub use error::{BlobError, BlobResult};
pub use keys::{attachment_key, validate_key};
pub use signer::{UrlSigner, DEFAULT_URL_TTL_SECS};
