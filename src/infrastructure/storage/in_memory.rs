use crate::core::errors::LedgerError;
use crate::core::models::{Party, PartyType, Transaction, User, Workspace};
use crate::infrastructure::storage::{Storage, TransactionFilter};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct InMemoryStorage {
    users: Arc<RwLock<HashMap<String, User>>>,
    user_ids_by_email: Arc<RwLock<HashMap<String, String>>>,
    workspaces: Arc<RwLock<HashMap<String, Workspace>>>,
    parties: Arc<RwLock<HashMap<String, Party>>>,
    transactions: Arc<RwLock<HashMap<String, Transaction>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn create_user(&self, user: User) -> Result<User, LedgerError> {
        // The email index lock is held across the insert, so two registrations
        // for the same address cannot both pass the uniqueness check.
        let mut by_email = self.user_ids_by_email.write().await;
        if by_email.contains_key(&user.email) {
            return Err(LedgerError::EmailAlreadyRegistered(user.email));
        }
        let mut users = self.users.write().await;
        by_email.insert(user.email.clone(), user.id.clone());
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<User>, LedgerError> {
        let users = self.users.read().await;
        Ok(users.get(user_id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, LedgerError> {
        let user_id = self.user_ids_by_email.read().await.get(email).cloned();
        Ok(match user_id {
            Some(id) => self.users.read().await.get(&id).cloned(),
            None => None,
        })
    }

    async fn save_workspace(&self, workspace: Workspace) -> Result<(), LedgerError> {
        let mut workspaces = self.workspaces.write().await;
        workspaces.insert(workspace.id.clone(), workspace);
        Ok(())
    }

    async fn find_workspace(&self, workspace_id: &str) -> Result<Option<Workspace>, LedgerError> {
        let workspaces = self.workspaces.read().await;
        Ok(workspaces.get(workspace_id).cloned())
    }

    async fn find_workspaces_for(&self, user_id: &str, email: &str) -> Result<Vec<Workspace>, LedgerError> {
        let workspaces = self.workspaces.read().await;
        let mut found: Vec<Workspace> = workspaces
            .values()
            .filter(|ws| ws.is_owned_by(user_id) || ws.members.contains(email))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(found)
    }

    async fn save_party(&self, party: Party) -> Result<(), LedgerError> {
        let mut parties = self.parties.write().await;
        parties.insert(party.id.clone(), party);
        Ok(())
    }

    async fn find_party(&self, workspace_id: &str, party_id: &str) -> Result<Option<Party>, LedgerError> {
        let parties = self.parties.read().await;
        Ok(parties
            .get(party_id)
            .filter(|p| p.workspace_id == workspace_id)
            .cloned())
    }

    async fn find_parties_by_workspace(
        &self,
        workspace_id: &str,
        party_type: Option<PartyType>,
    ) -> Result<Vec<Party>, LedgerError> {
        let parties = self.parties.read().await;
        let mut found: Vec<Party> = parties
            .values()
            .filter(|p| p.workspace_id == workspace_id)
            .filter(|p| party_type.is_none_or(|t| p.party_type == t))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(found)
    }

    async fn save_transaction(&self, transaction: Transaction) -> Result<(), LedgerError> {
        let mut transactions = self.transactions.write().await;
        transactions.insert(transaction.id.clone(), transaction);
        Ok(())
    }

    async fn find_transaction(
        &self,
        workspace_id: &str,
        transaction_id: &str,
    ) -> Result<Option<Transaction>, LedgerError> {
        let transactions = self.transactions.read().await;
        Ok(transactions
            .get(transaction_id)
            .filter(|tx| tx.workspace_id == workspace_id)
            .cloned())
    }

    async fn find_transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, LedgerError> {
        let transactions = self.transactions.read().await;
        let mut found: Vec<Transaction> = transactions.values().filter(|tx| filter.matches(tx)).cloned().collect();
        found.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.created_at.cmp(&a.created_at))
                .then_with(|| a.id.cmp(&b.id))
        });
        if let Some(limit) = filter.limit {
            found.truncate(limit);
        }
        Ok(found)
    }

    async fn delete_transaction(&self, workspace_id: &str, transaction_id: &str) -> Result<bool, LedgerError> {
        let mut transactions = self.transactions.write().await;
        let in_workspace = transactions
            .get(transaction_id)
            .is_some_and(|tx| tx.workspace_id == workspace_id);
        if in_workspace {
            transactions.remove(transaction_id);
        }
        Ok(in_workspace)
    }
}
