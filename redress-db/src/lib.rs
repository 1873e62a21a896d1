//! Redress Database Layer
//!
//! SQLite persistence for the complaint tracker. The crate is organized in
//! three layers:
//! - `entities`: storage-shaped rows (string statuses, RFC 3339 timestamps)
//! - `repos`: per-table CRUD over a shared connection
//! - `services`: implementations of the `redress-core` store traits,
//!   including id generation and the update-then-log flows
//!
//! A single [`Database`] handle owns the connection; every service clones the
//! shared handle. SQLite serializes statements through a mutex, which matches
//! the tracker's last-write-wins concurrency model.
//!
//! # Example
//!
//! ```ignore
//! use redress_db::{Database, ComplaintService};
//!
//! let db = Database::open_in_memory()?;
//! db.init_schema()?;
//! let complaints = ComplaintService::new(&db);
//! ```

pub mod db;
pub mod entities;
pub mod error;
pub mod repos;
pub mod schema;
pub mod services;

pub use db::Database;
pub use entities::*;
pub use error::*;
pub use schema::REDRESS_SCHEMA;
pub use services::{CategoryService, ComplaintService, DirectoryService};
