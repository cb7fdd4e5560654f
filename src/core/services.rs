use crate::auth::jwt::{Claims, JwtService};
use crate::auth::password::{hash_password, verify_password};
use crate::config::Config;
use crate::constants::{
    DEFAULT_CACHE_TTL_SECS, DEFAULT_RECENT_WINDOW, MAX_AMOUNT, MAX_NAME_LENGTH, MAX_PASSWORD_LENGTH, MAX_USER_NAME_LENGTH,
    MIN_NAME_LENGTH, MIN_PASSWORD_LENGTH,
};
use crate::core::access::{Actor, require_access};
use crate::core::balance::{compute_party_balance, list_parties_with_totals};
use crate::core::errors::LedgerError;
use crate::core::models::{
    Members, NewTransaction, Party, PartyDetail, PartyType, PartyWithTotals, Transaction, TransactionChanges, User,
    UserProfile, UserRole, Workspace, WorkspaceSummary, normalize_email,
};
use crate::core::summary::summarize_with_history;
use crate::infrastructure::cache::Cache;
use crate::infrastructure::storage::{Storage, TransactionFilter};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, ToSchema, Clone)]
pub struct AuthResponse {
    pub user: UserProfile,
    pub token: String,
}

#[derive(Serialize, Deserialize, Debug, ToSchema, Clone, PartialEq, Eq)]
pub struct WorkspaceListing {
    pub id: String,
    pub name: String,
}

pub struct LedgerService<S: Storage, C: Cache> {
    storage: S,
    cache: C,
    jwt_service: JwtService,
    bcrypt_cost: u32,
    recent_window: usize,
    cache_ttl: Duration,
}

impl<S: Storage, C: Cache> LedgerService<S, C> {
    pub fn new(storage: S, cache: C, jwt_service: JwtService) -> Self {
        LedgerService {
            storage,
            cache,
            jwt_service,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            recent_window: DEFAULT_RECENT_WINDOW,
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        }
    }

    pub fn from_config(storage: S, cache: C, config: &Config) -> Self {
        let jwt_service = JwtService::new(config.jwt_secret.clone(), config.jwt_expires_in);
        Self::new(storage, cache, jwt_service)
            .with_bcrypt_cost(config.bcrypt_cost)
            .with_recent_window(config.recent_window)
            .with_cache_ttl(config.cache_ttl)
    }

    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    pub fn with_recent_window(mut self, window: usize) -> Self {
        self.recent_window = window;
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, LedgerError> {
        self.jwt_service.validate_token(token)
    }

    // VALIDATION

    fn validate_string_input(&self, field: &str, value: &str, min: usize, max: usize) -> Result<(), LedgerError> {
        let len = value.trim().chars().count();
        if len == 0 {
            return Err(LedgerError::invalid_input(
                field,
                format!("Invalid {}", field),
                format!("{} cannot be empty", field),
            ));
        }
        if len < min {
            return Err(LedgerError::invalid_input(
                field,
                format!("{} Too Short", field),
                format!("{} must be at least {} characters", field, min),
            ));
        }
        if len > max {
            return Err(LedgerError::invalid_input(
                field,
                format!("{} Too Long", field),
                format!("{} cannot exceed {} characters", field, max),
            ));
        }
        if value.chars().any(|c| c.is_control()) {
            return Err(LedgerError::invalid_input(
                field,
                format!("Invalid {}", field),
                format!("{} contains invalid characters", field),
            ));
        }
        Ok(())
    }

    fn validate_email(&self, email: &str) -> Result<(), LedgerError> {
        if email.is_empty() {
            return Err(LedgerError::MissingEmail);
        }
        let valid = match email.split_once('@') {
            Some((local, domain)) => {
                !local.is_empty()
                    && !domain.contains('@')
                    && domain.contains('.')
                    && !domain.starts_with('.')
                    && !domain.ends_with('.')
                    && !email.chars().any(char::is_whitespace)
            }
            None => false,
        };
        if !valid {
            return Err(LedgerError::InvalidEmail(email.to_string()));
        }
        Ok(())
    }

    fn validate_amount_input(&self, field: &str, amount: Decimal) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::invalid_input(
                field,
                "Invalid Amount",
                "Amount must be greater than 0",
            ));
        }
        if amount > Decimal::from(MAX_AMOUNT) {
            return Err(LedgerError::invalid_input(
                field,
                "Invalid Amount",
                format!("Amount must not exceed {}", MAX_AMOUNT),
            ));
        }
        Ok(())
    }

    fn validate_url_input(&self, field: &str, url: &str) -> Result<(), LedgerError> {
        if Url::parse(url).is_err() {
            return Err(LedgerError::invalid_input(field, "Invalid URL", format!("{} must be a valid URI", field)));
        }
        Ok(())
    }

    // USERS

    pub async fn register(&self, email: &str, name: &str, password: &str) -> Result<AuthResponse, LedgerError> {
        let email = normalize_email(email);
        self.validate_email(&email)?;
        self.validate_string_input("name", name, MIN_NAME_LENGTH, MAX_USER_NAME_LENGTH)?;
        let password_len = password.chars().count();
        if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&password_len) {
            return Err(LedgerError::invalid_input(
                "password",
                "Invalid password",
                format!(
                    "password must be between {} and {} characters",
                    MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH
                ),
            ));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            email,
            name: name.trim().to_string(),
            password_hash: hash_password(password, self.bcrypt_cost)?,
            role: UserRole::User,
            created_at: Utc::now(),
        };
        let user = self.storage.create_user(user).await?;
        info!(user_id = %user.id, "registered user");
        self.issue(&user)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, LedgerError> {
        let email = normalize_email(email);
        let user = self
            .storage
            .get_user_by_email(&email)
            .await?
            .ok_or(LedgerError::InvalidCredentials)?;
        if !verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "rejected login with wrong password");
            return Err(LedgerError::InvalidCredentials);
        }
        debug!(user_id = %user.id, "user logged in");
        self.issue(&user)
    }

    fn issue(&self, user: &User) -> Result<AuthResponse, LedgerError> {
        let token = self.jwt_service.generate_token(&user.id, &user.email)?;
        Ok(AuthResponse {
            user: UserProfile::from(user),
            token,
        })
    }

    pub async fn get_user(&self, user_id: &str) -> Result<UserProfile, LedgerError> {
        self.storage
            .get_user(user_id)
            .await?
            .map(|u| UserProfile::from(&u))
            .ok_or_else(|| LedgerError::UserNotFound(user_id.to_string()))
    }

    // WORKSPACES

    pub async fn create_workspace(
        &self,
        actor: &Actor,
        name: &str,
        member_emails: &[String],
    ) -> Result<Workspace, LedgerError> {
        self.validate_string_input("name", name, MIN_NAME_LENGTH, MAX_NAME_LENGTH)?;
        let emails: Vec<String> = member_emails.iter().map(|e| normalize_email(e)).collect();
        for email in &emails {
            self.validate_email(email)?;
        }

        let workspace = Workspace {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            owner_id: actor.id.clone(),
            members: emails.iter().map(String::as_str).collect::<Members>(),
            created_at: Utc::now(),
        };
        self.storage.save_workspace(workspace.clone()).await?;
        info!(
            workspace_id = %workspace.id,
            owner_id = %actor.id,
            members = workspace.members.len(),
            "created workspace"
        );
        Ok(workspace)
    }

    pub async fn list_my_workspaces(&self, actor: &Actor) -> Result<Vec<WorkspaceListing>, LedgerError> {
        let email = actor.email.as_deref().map(normalize_email).unwrap_or_default();
        let workspaces = self.storage.find_workspaces_for(&actor.id, &email).await?;
        Ok(workspaces
            .into_iter()
            .map(|ws| WorkspaceListing { id: ws.id, name: ws.name })
            .collect())
    }

    /// Resolves the workspace and checks the actor may use it.
    ///
    /// Fails with `MissingWorkspaceId`, then `WorkspaceNotFound`, then
    /// `NotWorkspaceMember`, in that order.
    pub async fn authorize_workspace(
        &self,
        actor: &Actor,
        workspace_id: Option<&str>,
    ) -> Result<Workspace, LedgerError> {
        let workspace_id = workspace_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(LedgerError::MissingWorkspaceId)?;
        let workspace = self
            .storage
            .find_workspace(workspace_id)
            .await?
            .ok_or_else(|| LedgerError::WorkspaceNotFound(workspace_id.to_string()))?;
        if let Err(e) = require_access(actor, &workspace) {
            warn!(workspace_id = %workspace.id, actor_id = %actor.id, "denied workspace access");
            return Err(e);
        }
        Ok(workspace)
    }

    pub async fn workspace_home(
        &self,
        actor: &Actor,
        workspace_id: Option<&str>,
    ) -> Result<WorkspaceSummary, LedgerError> {
        let workspace = self.authorize_workspace(actor, workspace_id).await?;
        let parties = self.storage.find_parties_by_workspace(&workspace.id, None).await?;
        let history = self
            .storage
            .find_transactions(&TransactionFilter::workspace(&workspace.id))
            .await?;
        let recent = self
            .storage
            .find_transactions(&TransactionFilter::workspace(&workspace.id).limit(self.recent_window))
            .await?;
        summarize_with_history(&parties, &history, recent)
    }

    // PARTIES

    pub async fn create_party(
        &self,
        actor: &Actor,
        workspace_id: Option<&str>,
        name: &str,
        phone: Option<String>,
        party_type: PartyType,
    ) -> Result<Party, LedgerError> {
        let workspace = self.authorize_workspace(actor, workspace_id).await?;
        self.validate_string_input("name", name, MIN_NAME_LENGTH, MAX_NAME_LENGTH)?;

        let party = Party {
            id: Uuid::new_v4().to_string(),
            workspace_id: workspace.id.clone(),
            name: name.trim().to_string(),
            phone: phone.map(|p| p.trim().to_string()).filter(|p| !p.is_empty()),
            party_type,
            created_at: Utc::now(),
        };
        self.storage.save_party(party.clone()).await?;
        self.cache.invalidate_workspace(&workspace.id).await?;
        info!(workspace_id = %workspace.id, party_id = %party.id, party_type = %party_type, "created party");
        Ok(party)
    }

    pub async fn list_parties(
        &self,
        actor: &Actor,
        workspace_id: Option<&str>,
        party_type: Option<PartyType>,
    ) -> Result<Vec<PartyWithTotals>, LedgerError> {
        let workspace = self.authorize_workspace(actor, workspace_id).await?;
        if let Some(rows) = self.cache.get_party_totals(&workspace.id, party_type).await? {
            debug!(workspace_id = %workspace.id, "party totals served from cache");
            return Ok(rows);
        }

        let generation = self.cache.generation(&workspace.id).await?;
        let parties = self.storage.find_parties_by_workspace(&workspace.id, party_type).await?;
        let party_ids = parties.iter().map(|p| p.id.clone()).collect();
        let transactions = self
            .storage
            .find_transactions(&TransactionFilter::workspace(&workspace.id).parties(party_ids))
            .await?;
        let rows = list_parties_with_totals(&parties, &transactions)?;
        self.cache
            .save_party_totals(&workspace.id, party_type, &rows, generation, self.cache_ttl)
            .await?;
        Ok(rows)
    }

    pub async fn party_detail(
        &self,
        actor: &Actor,
        workspace_id: Option<&str>,
        party_id: &str,
    ) -> Result<PartyDetail, LedgerError> {
        let workspace = self.authorize_workspace(actor, workspace_id).await?;
        let party = self.find_party(&workspace.id, party_id).await?;
        let transactions = self
            .storage
            .find_transactions(&TransactionFilter::workspace(&workspace.id).parties(vec![party.id.clone()]))
            .await?;
        let balance = compute_party_balance(party.party_type, &transactions)?;
        Ok(PartyDetail {
            party,
            balance,
            transactions,
        })
    }

    async fn find_party(&self, workspace_id: &str, party_id: &str) -> Result<Party, LedgerError> {
        self.storage
            .find_party(workspace_id, party_id)
            .await?
            .ok_or_else(|| LedgerError::PartyNotFound(party_id.to_string()))
    }

    // TRANSACTIONS

    pub async fn create_transaction(
        &self,
        actor: &Actor,
        workspace_id: Option<&str>,
        party_id: &str,
        new: NewTransaction,
    ) -> Result<Transaction, LedgerError> {
        let workspace = self.authorize_workspace(actor, workspace_id).await?;
        let party = self.find_party(&workspace.id, party_id).await?;
        self.validate_amount_input("amount", new.amount)?;
        let bill_image_url = new.bill_image_url.filter(|u| !u.is_empty());
        if let Some(url) = &bill_image_url {
            self.validate_url_input("billImageUrl", url)?;
        }

        let now = Utc::now();
        let transaction = Transaction {
            id: Uuid::new_v4().to_string(),
            workspace_id: workspace.id.clone(),
            party_id: party.id,
            amount: new.amount,
            direction: new.direction,
            description: new.description.filter(|d| !d.is_empty()),
            date: new.date,
            bill_image_url,
            created_by: actor.id.clone(),
            created_at: now,
            updated_at: now,
        };
        self.storage.save_transaction(transaction.clone()).await?;
        self.cache.invalidate_workspace(&workspace.id).await?;
        info!(
            workspace_id = %workspace.id,
            transaction_id = %transaction.id,
            amount = %transaction.amount,
            "recorded transaction"
        );
        Ok(transaction)
    }

    pub async fn get_transaction(
        &self,
        actor: &Actor,
        workspace_id: Option<&str>,
        transaction_id: &str,
    ) -> Result<Transaction, LedgerError> {
        let workspace = self.authorize_workspace(actor, workspace_id).await?;
        self.storage
            .find_transaction(&workspace.id, transaction_id)
            .await?
            .ok_or_else(|| LedgerError::TransactionNotFound(transaction_id.to_string()))
    }

    pub async fn update_transaction(
        &self,
        actor: &Actor,
        workspace_id: Option<&str>,
        transaction_id: &str,
        changes: TransactionChanges,
    ) -> Result<Transaction, LedgerError> {
        let workspace = self.authorize_workspace(actor, workspace_id).await?;
        if changes.is_empty() {
            return Err(LedgerError::invalid_input(
                "body",
                "Empty update",
                "At least one field must be provided",
            ));
        }
        if let Some(amount) = changes.amount {
            self.validate_amount_input("amount", amount)?;
        }
        if let Some(url) = changes.bill_image_url.as_deref().filter(|u| !u.is_empty()) {
            self.validate_url_input("billImageUrl", url)?;
        }

        let mut transaction = self
            .storage
            .find_transaction(&workspace.id, transaction_id)
            .await?
            .ok_or_else(|| LedgerError::TransactionNotFound(transaction_id.to_string()))?;
        changes.apply_to(&mut transaction);
        transaction.updated_at = Utc::now();

        self.storage.save_transaction(transaction.clone()).await?;
        self.cache.invalidate_workspace(&workspace.id).await?;
        info!(workspace_id = %workspace.id, transaction_id = %transaction.id, "updated transaction");
        Ok(transaction)
    }

    pub async fn delete_transaction(
        &self,
        actor: &Actor,
        workspace_id: Option<&str>,
        transaction_id: &str,
    ) -> Result<(), LedgerError> {
        let workspace = self.authorize_workspace(actor, workspace_id).await?;
        if !self.storage.delete_transaction(&workspace.id, transaction_id).await? {
            return Err(LedgerError::TransactionNotFound(transaction_id.to_string()));
        }
        self.cache.invalidate_workspace(&workspace.id).await?;
        info!(workspace_id = %workspace.id, transaction_id = %transaction_id, "deleted transaction");
        Ok(())
    }
}
