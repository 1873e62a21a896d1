//! Storage-shaped entities
//!
//! Entities mirror the table layouts: enum-like fields are snake_case
//! strings, timestamps are `DateTime<Utc>` stored as RFC 3339 text. The
//! service layer converts between entities and the typed records in
//! `redress-core`.

mod activity;
mod category;
mod comment;
mod complaint;
mod profile;
mod role;

pub use activity::*;
pub use category::*;
pub use comment::*;
pub use complaint::*;
pub use profile::*;
pub use role::*;

/// Common entity interface
pub trait Entity {
    /// Table this entity is stored in
    const TABLE: &'static str;

    /// Primary key value
    fn id(&self) -> &str;
}
