//! Store interfaces for the complaint tracker
//!
//! The tracker keeps six kinds of rows:
//! - Profiles: one per externally issued identity
//! - Role assignments: user -> student/admin
//! - Categories: complaint classification, unique names
//! - Complaints: the lifecycle records themselves
//! - Comments: append-only per-complaint threads
//! - Activity log: append-only audit rows for admin updates
//!
//! The persistence crate implements these traits; the API layer only ever
//! talks to the trait objects, with row visibility decided by an
//! [`ActorScope`] computed from the caller's identity.

mod activity;
mod category;
mod comment;
mod complaint;
mod profile;

pub use activity::*;
pub use category::*;
pub use comment::*;
pub use complaint::*;
pub use profile::*;

/// Limit/offset pair applied to list queries
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    pub limit: u32,
    pub offset: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: 100,
            offset: 0,
        }
    }
}

/// One page of results plus the total row count before paging
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

/// Row visibility computed from the caller's identity
///
/// Students only ever see rows they own; admins see everything. The scope is
/// applied inside the store queries, never by filtering on the client side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActorScope {
    /// Admin: all rows are visible
    All,
    /// Student: only rows owned by this user id
    Owner(String),
}

impl ActorScope {
    /// The owner restriction, if any
    pub fn owner_id(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Owner(id) => Some(id),
        }
    }
}
