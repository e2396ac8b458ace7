//! Account record and write models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use opsdesk_core::AccountId;
use opsdesk_rbac::Role;

/// A stored user account with its current role memberships.
///
/// # Invariants
/// - `email` is unique across all accounts (enforced by the store).
/// - `password_hash` holds a one-way hash, never a plaintext credential, and
///   is skipped on serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub roles: Vec<Role>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn holds_role(&self, role: &Role) -> bool {
        self.roles.iter().any(|r| r.as_str() == role.as_str())
    }
}

/// Fields for inserting a new account. The password arrives pre-hashed; the
/// store never hashes.
#[derive(Debug, Clone)]
pub struct NewAccountRecord {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub password_hash: String,
}

/// Partial update: `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct AccountChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

impl AccountChanges {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.phone.is_none()
            && self.email.is_none()
            && self.password_hash.is_none()
    }
}

/// List-query filter: free-text search over name/email plus a role filter.
#[derive(Debug, Clone, Default)]
pub struct AccountFilter {
    pub search: Option<String>,
    pub role: Option<Role>,
}

impl AccountFilter {
    pub fn matches(&self, account: &Account) -> bool {
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let haystack_name = account.full_name().to_lowercase();
            let haystack_email = account.email.to_lowercase();
            if !haystack_name.contains(&needle) && !haystack_email.contains(&needle) {
                return false;
            }
        }
        if let Some(role) = &self.role {
            if !account.holds_role(role) {
                return false;
            }
        }
        true
    }
}
