use super::user::normalize_email;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Owner,
    #[default]
    Member,
}

impl std::fmt::Display for MemberRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MemberRole::Owner => "owner",
            MemberRole::Member => "member",
        };
        write!(f, "{}", s)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub user_email: String,
    pub role: MemberRole,
}

/// Workspace members keyed by lower-cased email.
///
/// Inserting the same address twice, in any casing, keeps a single entry. The
/// owning user is not stored here; ownership is checked against
/// [`Workspace::owner_id`] instead.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Membership>", into = "Vec<Membership>")]
pub struct Members(BTreeMap<String, MemberRole>);

impl Members {
    pub fn new() -> Self {
        Members(BTreeMap::new())
    }

    /// Returns `true` if the email was not present before.
    pub fn insert(&mut self, email: &str, role: MemberRole) -> bool {
        self.0.insert(normalize_email(email), role).is_none()
    }

    pub fn contains(&self, email: &str) -> bool {
        self.0.contains_key(&normalize_email(email))
    }

    pub fn role_of(&self, email: &str) -> Option<MemberRole> {
        self.0.get(&normalize_email(email)).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Membership> + '_ {
        self.0.iter().map(|(email, role)| Membership {
            user_email: email.clone(),
            role: *role,
        })
    }
}

impl From<Vec<Membership>> for Members {
    fn from(list: Vec<Membership>) -> Self {
        let mut members = Members::new();
        for m in list {
            members.insert(&m.user_email, m.role);
        }
        members
    }
}

impl From<Members> for Vec<Membership> {
    fn from(members: Members) -> Self {
        members.iter().collect()
    }
}

impl<'a> FromIterator<&'a str> for Members {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut members = Members::new();
        for email in iter {
            members.insert(email, MemberRole::Member);
        }
        members
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: String,
    pub name: String,
    pub owner_id: String,
    #[schema(value_type = Vec<Membership>)]
    pub members: Members,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub created_at: DateTime<Utc>,
}

impl Workspace {
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner_id == user_id
    }
}
