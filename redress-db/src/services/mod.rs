//! Store trait implementations backed by SQLite
//!
//! This module provides concrete implementations of the store traits
//! defined in redress-core using the redress-db repository layer.

pub mod category_service;
pub mod complaint_service;
pub mod directory_service;

pub use category_service::CategoryService;
pub use complaint_service::ComplaintService;
pub use directory_service::DirectoryService;
