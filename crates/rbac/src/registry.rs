//! Role-permission registry.
//!
//! Holds the seeded role and permission definitions and resolves an account's
//! held roles into an effective permission set. The registry is read-only
//! after construction; seeding new roles is a bootstrap concern outside this
//! crate.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use opsdesk_core::RoleId;

use crate::permission::perms;
use crate::{Permission, Role, RoleDef};

/// Reference to a role: either by name or by its seeded identifier.
///
/// Callers that carry a resolved role record use `ById`; everything else uses
/// the canonical name. Both normalize to the same [`RoleDef`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleSelector {
    ByName(String),
    ById(RoleId),
}

impl From<&Role> for RoleSelector {
    fn from(role: &Role) -> Self {
        Self::ByName(role.as_str().to_string())
    }
}

/// Registry of all seeded roles and the permissions they grant.
#[derive(Debug, Clone)]
pub struct RoleRegistry {
    roles: HashMap<String, RoleDef>,
}

impl RoleRegistry {
    pub fn new(defs: impl IntoIterator<Item = RoleDef>) -> Self {
        Self {
            roles: defs.into_iter().map(|d| (d.name.clone(), d)).collect(),
        }
    }

    /// Registry seeded with the stock back-office roles.
    pub fn seeded() -> Self {
        let user_management = [
            perms::VIEW_USERS,
            perms::CREATE_USERS,
            perms::EDIT_USERS,
            perms::DELETE_USERS,
            perms::ASSIGN_ROLES,
        ];
        let settings = [
            Permission::borrowed("view settings"),
            Permission::borrowed("edit settings"),
        ];
        let content = [
            Permission::borrowed("view content"),
            Permission::borrowed("create content"),
            Permission::borrowed("edit content"),
            Permission::borrowed("delete content"),
            Permission::borrowed("publish content"),
        ];

        let all = user_management
            .iter()
            .chain(settings.iter())
            .chain(content.iter())
            .cloned();

        Self::new([
            RoleDef::new("super-admin", all.clone()),
            RoleDef::new("admin", all),
            RoleDef::new(
                "manager",
                [
                    perms::VIEW_USERS,
                    Permission::borrowed("view content"),
                    Permission::borrowed("create content"),
                    Permission::borrowed("edit content"),
                    Permission::borrowed("publish content"),
                ],
            ),
            RoleDef::new("user", [Permission::borrowed("view content")]),
        ])
    }

    pub fn role_exists(&self, name: &str) -> bool {
        self.roles.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&RoleDef> {
        self.roles.get(name)
    }

    /// Resolve a selector to its role definition.
    pub fn resolve_selector(&self, selector: &RoleSelector) -> Option<&RoleDef> {
        match selector {
            RoleSelector::ByName(name) => self.roles.get(name),
            RoleSelector::ById(id) => self.roles.values().find(|d| d.id == *id),
        }
    }

    /// Union of permissions granted by the given roles.
    ///
    /// Unknown role names contribute nothing; a lookup miss is not an error.
    pub fn resolve_permissions<'a>(
        &self,
        roles: impl IntoIterator<Item = &'a Role>,
    ) -> HashSet<Permission> {
        let mut resolved = HashSet::new();
        for role in roles {
            if let Some(def) = self.roles.get(role.as_str()) {
                resolved.extend(def.permissions.iter().cloned());
            }
        }
        resolved
    }

    /// All seeded role definitions (display/bootstrap support).
    pub fn roles(&self) -> impl Iterator<Item = &RoleDef> {
        self.roles.values()
    }
}

impl Default for RoleRegistry {
    fn default() -> Self {
        Self::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_union_across_roles() {
        let registry = RoleRegistry::seeded();
        let roles = [Role::new("manager"), Role::new("user")];

        let resolved = registry.resolve_permissions(roles.iter());

        assert!(resolved.contains(&perms::VIEW_USERS));
        assert!(resolved.contains(&Permission::borrowed("publish content")));
        assert!(!resolved.contains(&perms::DELETE_USERS));
    }

    #[test]
    fn unknown_role_resolves_to_nothing() {
        let registry = RoleRegistry::seeded();
        let roles = [Role::new("ghost-role")];

        assert!(registry.resolve_permissions(roles.iter()).is_empty());
        assert!(!registry.role_exists("ghost-role"));
    }

    #[test]
    fn admin_holds_full_user_management_set() {
        let registry = RoleRegistry::seeded();
        let admin = registry.get("admin").unwrap();

        for p in [
            perms::VIEW_USERS,
            perms::CREATE_USERS,
            perms::EDIT_USERS,
            perms::DELETE_USERS,
            perms::ASSIGN_ROLES,
        ] {
            assert!(admin.grants(&p), "admin missing {p}");
        }
    }

    #[test]
    fn selector_by_name_and_by_id_normalize_to_same_role() {
        let registry = RoleRegistry::seeded();
        let by_name = registry
            .resolve_selector(&RoleSelector::ByName("manager".into()))
            .unwrap();
        let by_id = registry
            .resolve_selector(&RoleSelector::ById(by_name.id))
            .unwrap();

        assert_eq!(by_name.name, by_id.name);
    }

    #[test]
    fn unknown_selector_resolves_to_none() {
        let registry = RoleRegistry::seeded();

        assert!(registry
            .resolve_selector(&RoleSelector::ByName("ghost-role".into()))
            .is_none());
        assert!(registry
            .resolve_selector(&RoleSelector::ById(RoleId::new()))
            .is_none());
    }
}
