//! Blob storage backends
//!
//! This module contains blob backend implementations.

pub mod local;
pub mod traits;

pub use local::LocalBlobBackend;
pub use traits::{BlobBackend, BlobMetadata, HealthStatus};
