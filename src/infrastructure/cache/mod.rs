pub mod cache_keys;
pub mod in_memory;

use crate::core::errors::LedgerError;
use crate::core::models::{PartyType, PartyWithTotals};
use async_trait::async_trait;

#[async_trait]
pub trait Cache: Send + Sync {
    async fn get_party_totals(
        &self,
        workspace_id: &str,
        party_type: Option<PartyType>,
    ) -> Result<Option<Vec<PartyWithTotals>>, LedgerError>;
    /// Current invalidation generation of the workspace.
    ///
    /// Read it before loading the rows that will be passed to `save_party_totals`.
    async fn generation(&self, workspace_id: &str) -> Result<u64, LedgerError>;
    /// Stores `rows` unless the workspace was invalidated since `generation` was read.
    async fn save_party_totals(
        &self,
        workspace_id: &str,
        party_type: Option<PartyType>,
        rows: &[PartyWithTotals],
        generation: u64,
        ttl: std::time::Duration,
    ) -> Result<(), LedgerError>;
    /// Drops every cached view of the workspace, whatever its filter, and bumps its generation.
    async fn invalidate_workspace(&self, workspace_id: &str) -> Result<(), LedgerError>;
}
