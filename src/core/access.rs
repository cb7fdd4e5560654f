//! Workspace access gate.
//!
//! Decides whether an authenticated actor may read or write a workspace's
//! parties and transactions. Resolving the workspace itself (and reporting a
//! missing or unknown id) is the caller's job; this module only ever sees a
//! workspace that exists.

use crate::core::errors::LedgerError;
use crate::core::models::Workspace;

/// An authenticated caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Actor {
    pub id: String,
    pub email: Option<String>,
}

impl Actor {
    pub fn new(id: impl Into<String>, email: Option<String>) -> Self {
        Actor { id: id.into(), email }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Authorization {
    Allowed,
    Denied,
}

impl Authorization {
    pub fn is_allowed(self) -> bool {
        self == Authorization::Allowed
    }
}

/// Allowed iff the actor owns the workspace or their email is in its member set.
pub fn authorize(actor: &Actor, workspace: &Workspace) -> Authorization {
    if workspace.is_owned_by(&actor.id) {
        return Authorization::Allowed;
    }
    match actor.email.as_deref() {
        Some(email) if workspace.members.contains(email) => Authorization::Allowed,
        _ => Authorization::Denied,
    }
}

pub fn require_access(actor: &Actor, workspace: &Workspace) -> Result<(), LedgerError> {
    match authorize(actor, workspace) {
        Authorization::Allowed => Ok(()),
        Authorization::Denied => Err(LedgerError::NotWorkspaceMember(workspace.id.clone())),
    }
}
