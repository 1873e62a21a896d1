//! Activity log store interface
//!
//! Log rows are appended by the complaint store during admin updates; this
//! trait only exposes reads.

use async_trait::async_trait;

use super::{Page, PageRequest};
use crate::error::StoreResult;
use crate::types::ActivityRecord;

/// Activity log store trait
#[async_trait]
pub trait ActivityStore: Send + Sync {
    /// Recent activity across all complaints, newest first
    async fn list_activity(&self, page: PageRequest) -> StoreResult<Page<ActivityRecord>>;

    /// Activity for one complaint, newest first
    async fn list_activity_for_complaint(
        &self,
        complaint_id: &str,
    ) -> StoreResult<Vec<ActivityRecord>>;
}
