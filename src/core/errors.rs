use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

impl FieldError {
    pub fn new(field: &str, title: impl Into<String>, description: impl Into<String>) -> Self {
        FieldError {
            field: field.to_string(),
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Outcome class of a [`LedgerError`], used by the HTTP layer to pick a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    PayloadTooLarge,
    InvariantViolation,
    Internal,
}

#[derive(Error, Debug, Clone, Serialize, PartialEq, Eq)]
pub enum LedgerError {
    #[error("workspaceId is required")]
    MissingWorkspaceId,
    #[error("Email is required")]
    MissingEmail,
    #[error("Invalid email format: {0}")]
    InvalidEmail(String),
    #[error("Invalid input for field `{}`: {}", .0, .1.description)]
    InvalidInput(String, FieldError),
    #[error("Request body is too large")]
    BodyTooLarge,

    #[error("Missing or invalid Authorization header")]
    Unauthorized,
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User {0} not found")]
    UserNotFound(String),
    #[error("Workspace not found")]
    WorkspaceNotFound(String),
    #[error("Party not found")]
    PartyNotFound(String),
    #[error("Transaction not found")]
    TransactionNotFound(String),

    #[error("Not a member of this workspace")]
    NotWorkspaceMember(String),

    #[error("Email {0} already registered")]
    EmailAlreadyRegistered(String),

    #[error("Transaction {0} has a non-positive amount")]
    NonPositiveAmount(String),
    #[error("Transaction {transaction_id} references party {party_id} outside its workspace")]
    CrossWorkspaceReference { transaction_id: String, party_id: String },
    #[error("Balance overflowed while adding transaction {0}")]
    BalanceOverflow(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
    #[error("Storage error: {0}")]
    StorageError(String),
    #[error("Cache error: {0}")]
    CacheError(String),
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::MissingWorkspaceId
            | LedgerError::MissingEmail
            | LedgerError::InvalidEmail(_)
            | LedgerError::InvalidInput(..) => ErrorKind::BadRequest,
            LedgerError::Unauthorized | LedgerError::InvalidCredentials => ErrorKind::Unauthorized,
            LedgerError::UserNotFound(_)
            | LedgerError::WorkspaceNotFound(_)
            | LedgerError::PartyNotFound(_)
            | LedgerError::TransactionNotFound(_) => ErrorKind::NotFound,
            LedgerError::NotWorkspaceMember(_) => ErrorKind::Forbidden,
            LedgerError::EmailAlreadyRegistered(_) => ErrorKind::Conflict,
            LedgerError::BodyTooLarge => ErrorKind::PayloadTooLarge,
            LedgerError::NonPositiveAmount(_)
            | LedgerError::CrossWorkspaceReference { .. }
            | LedgerError::BalanceOverflow(_) => ErrorKind::InvariantViolation,
            LedgerError::InternalServerError(_) | LedgerError::StorageError(_) | LedgerError::CacheError(_) => {
                ErrorKind::Internal
            }
        }
    }

    pub fn invalid_input(field: &str, title: impl Into<String>, description: impl Into<String>) -> Self {
        LedgerError::InvalidInput(field.to_string(), FieldError::new(field, title, description))
    }
}
