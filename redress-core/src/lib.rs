//! Redress Core - student complaint tracking
//!
//! This crate provides the domain types and interfaces for the complaint
//! tracking service:
//! - Complaint lifecycle records (status, priority, resolution stamps)
//! - Store interfaces implemented by the persistence layer
//! - Submission validation rules (field bounds, attachment constraints)
//! - Reporting reductions and CSV export formatting
//! - The outbound notification contract
//!
//! Persistence, HTTP transport, and blob storage live in sibling crates;
//! nothing in here touches a database or a socket.

pub mod error;
pub mod export;
pub mod logging;
pub mod notify;
pub mod reporting;
pub mod store;
pub mod types;
pub mod validation;

pub use error::*;
pub use types::*;
