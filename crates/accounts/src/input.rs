//! Inputs and views for the management operations.

use serde::{Deserialize, Serialize};

use opsdesk_rbac::Permission;
use opsdesk_store::Account;

/// Validated fields for creating an account. The password is plaintext here;
/// the service hashes it before it reaches the store.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAccount {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
}

/// Partial update. `None` fields are left untouched; an empty password string
/// is treated the same as an absent one (the stored credential is kept).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Single-account view: the record plus its resolved permission set.
#[derive(Debug, Clone, Serialize)]
pub struct AccountDetails {
    pub account: Account,
    pub permissions: Vec<Permission>,
}
