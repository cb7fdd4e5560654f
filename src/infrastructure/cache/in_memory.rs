use crate::core::errors::LedgerError;
use crate::core::models::{PartyType, PartyWithTotals};
use crate::infrastructure::cache::Cache;
use crate::infrastructure::cache::cache_keys::{party_totals_key, workspace_prefix};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Default)]
struct CacheState {
    entries: HashMap<String, (Vec<PartyWithTotals>, DateTime<Utc>)>,
    // Bumped on every invalidation; a save carrying an older value is dropped.
    generations: HashMap<String, u64>,
}

#[derive(Clone, Default)]
pub struct InMemoryCache {
    state: Arc<RwLock<CacheState>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.entries.len()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get_party_totals(
        &self,
        workspace_id: &str,
        party_type: Option<PartyType>,
    ) -> Result<Option<Vec<PartyWithTotals>>, LedgerError> {
        let key = party_totals_key(workspace_id, party_type);
        {
            let state = self.state.read().await;
            match state.entries.get(&key) {
                Some((rows, expiry)) if *expiry > Utc::now() => return Ok(Some(rows.clone())),
                Some(_) => {}
                None => return Ok(None),
            }
        }
        self.state.write().await.entries.remove(&key);
        Ok(None)
    }

    async fn generation(&self, workspace_id: &str) -> Result<u64, LedgerError> {
        let state = self.state.read().await;
        Ok(state.generations.get(workspace_id).copied().unwrap_or_default())
    }

    async fn save_party_totals(
        &self,
        workspace_id: &str,
        party_type: Option<PartyType>,
        rows: &[PartyWithTotals],
        generation: u64,
        ttl: std::time::Duration,
    ) -> Result<(), LedgerError> {
        let expiry = Utc::now()
            + chrono::Duration::from_std(ttl)
                .map_err(|e| LedgerError::CacheError(format!("Failed to convert TTL: {}", e)))?;
        let mut state = self.state.write().await;
        let current = state.generations.get(workspace_id).copied().unwrap_or_default();
        if current != generation {
            debug!(workspace_id, generation, current, "skipped caching stale party totals");
            return Ok(());
        }
        state
            .entries
            .insert(party_totals_key(workspace_id, party_type), (rows.to_vec(), expiry));
        Ok(())
    }

    async fn invalidate_workspace(&self, workspace_id: &str) -> Result<(), LedgerError> {
        let prefix = workspace_prefix(workspace_id);
        let mut state = self.state.write().await;
        *state.generations.entry(workspace_id.to_string()).or_default() += 1;
        state.entries.retain(|key, _| !key.starts_with(&prefix));
        Ok(())
    }
}
