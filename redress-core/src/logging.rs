//! Logging standards and conventions
//!
//! All crates in the workspace log through `tracing` and follow these
//! conventions for consistent output.
//!
//! # Log Levels
//!
//! | Level | Usage | Examples |
//! |-------|-------|----------|
//! | ERROR | Unrecoverable failures | Storage failure, schema init failure |
//! | WARN  | Degraded but accepted outcomes | Attachment upload failed, dispatch failed |
//! | INFO  | State changes | Complaint submitted, status updated |
//! | DEBUG | Operation detail | Policy denials, filter values |
//! | TRACE | Fine-grained debugging | Full payloads |
//!
//! # Structured fields
//!
//! Cross-cutting side effects (blob writes, dispatches, exports) tag their
//! events with an `operation` field from [`operations`] so one filter can
//! follow an effect across crates:
//!
//! ```ignore
//! use tracing::warn;
//!
//! warn!(
//!     operation = operations::NOTIFY_DISPATCH,
//!     "Notification dispatch failed for {}: {}",
//!     complaint_id, err
//! );
//! ```

use serde::{Deserialize, Serialize};

/// Log level enumeration matching tracing levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Unrecoverable errors
    Error,
    /// Recoverable warnings
    Warn,
    /// Significant events
    Info,
    /// Detailed debugging
    Debug,
    /// Fine-grained tracing
    Trace,
}

impl LogLevel {
    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warn" | "warning" => Some(Self::Warn),
            "info" => Some(Self::Info),
            "debug" => Some(Self::Debug),
            "trace" => Some(Self::Trace),
            _ => None,
        }
    }

    /// Check if this level is enabled for the given max level
    pub fn is_enabled(&self, max_level: LogLevel) -> bool {
        self.priority() <= max_level.priority()
    }

    fn priority(&self) -> u8 {
        match self {
            Self::Error => 0,
            Self::Warn => 1,
            Self::Info => 2,
            Self::Debug => 3,
            Self::Trace => 4,
        }
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        Self::Info
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Operation names tagged onto cross-cutting side-effect events
pub mod operations {
    pub const NOTIFY_DISPATCH: &str = "notify_dispatch";
    pub const BLOB_WRITE: &str = "blob_write";
    pub const BLOB_READ: &str = "blob_read";
    pub const CSV_EXPORT: &str = "csv_export";
}
