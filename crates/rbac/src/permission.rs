use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Permission identifier.
///
/// Permissions are modeled as opaque strings (e.g. "edit users"). The set of
/// permissions the engine ever evaluates is fixed; see [`perms`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub const fn borrowed(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The account-administration permission set.
pub mod perms {
    use super::Permission;

    pub const VIEW_USERS: Permission = Permission::borrowed("view users");
    pub const CREATE_USERS: Permission = Permission::borrowed("create users");
    pub const EDIT_USERS: Permission = Permission::borrowed("edit users");
    pub const DELETE_USERS: Permission = Permission::borrowed("delete users");
    pub const ASSIGN_ROLES: Permission = Permission::borrowed("assign roles");
}
