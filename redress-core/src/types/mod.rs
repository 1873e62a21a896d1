//! Core type definitions for the complaint tracker
//!
//! All types follow these naming conventions:
//! - snake_case for field names
//! - *_id suffix for primary keys
//! - statuses and priorities serialize as snake_case strings

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
