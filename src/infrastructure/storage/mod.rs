use crate::core::errors::LedgerError;
use crate::core::models::{Party, PartyType, Transaction, User, Workspace};
use async_trait::async_trait;

/// Selects transactions within one workspace, newest `date` first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub workspace_id: String,
    pub party_ids: Option<Vec<String>>,
    pub limit: Option<usize>,
}

impl TransactionFilter {
    pub fn workspace(workspace_id: &str) -> Self {
        TransactionFilter {
            workspace_id: workspace_id.to_string(),
            ..Default::default()
        }
    }

    pub fn parties(mut self, party_ids: Vec<String>) -> Self {
        self.party_ids = Some(party_ids);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        tx.workspace_id == self.workspace_id
            && self
                .party_ids
                .as_ref()
                .is_none_or(|ids| ids.iter().any(|id| *id == tx.party_id))
    }
}

#[async_trait]
pub trait Storage: Send + Sync {
    /// Inserts a user; the email must be unique (already normalized by the caller).
    async fn create_user(&self, user: User) -> Result<User, LedgerError>;
    async fn get_user(&self, user_id: &str) -> Result<Option<User>, LedgerError>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, LedgerError>;

    async fn save_workspace(&self, workspace: Workspace) -> Result<(), LedgerError>;
    async fn find_workspace(&self, workspace_id: &str) -> Result<Option<Workspace>, LedgerError>;
    async fn find_workspaces_for(&self, user_id: &str, email: &str) -> Result<Vec<Workspace>, LedgerError>;

    async fn save_party(&self, party: Party) -> Result<(), LedgerError>;
    async fn find_party(&self, workspace_id: &str, party_id: &str) -> Result<Option<Party>, LedgerError>;
    async fn find_parties_by_workspace(
        &self,
        workspace_id: &str,
        party_type: Option<PartyType>,
    ) -> Result<Vec<Party>, LedgerError>;

    async fn save_transaction(&self, transaction: Transaction) -> Result<(), LedgerError>;
    async fn find_transaction(
        &self,
        workspace_id: &str,
        transaction_id: &str,
    ) -> Result<Option<Transaction>, LedgerError>;
    async fn find_transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, LedgerError>;
    async fn delete_transaction(&self, workspace_id: &str, transaction_id: &str) -> Result<bool, LedgerError>;
}

pub mod in_memory;
