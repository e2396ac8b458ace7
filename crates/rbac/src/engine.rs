//! Authorization engine for account administration.
//!
//! A pure decision function: no IO, no panics, no ambient state. The caller
//! resolves the actor's permission set up front (see [`Actor::resolve`]) and
//! decides how to surface a denial.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use opsdesk_core::AccountId;

use crate::permission::perms;
use crate::{Permission, Role, RoleRegistry};

/// A fully resolved actor for authorization decisions.
///
/// Construction is decoupled from storage and transport: the calling surface
/// derives the held roles from its authenticated session and resolves them
/// through the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: AccountId,
    pub permissions: HashSet<Permission>,
}

impl Actor {
    pub fn new(id: AccountId, permissions: impl IntoIterator<Item = Permission>) -> Self {
        Self {
            id,
            permissions: permissions.into_iter().collect(),
        }
    }

    /// Resolve an actor from its held roles.
    pub fn resolve(id: AccountId, roles: &[Role], registry: &RoleRegistry) -> Self {
        Self {
            id,
            permissions: registry.resolve_permissions(roles.iter()),
        }
    }

    pub fn has(&self, permission: &Permission) -> bool {
        self.permissions.contains(permission)
    }
}

/// Administrative actions subject to authorization.
///
/// One variant per policy row; the required permission is data, not code, so
/// the rule set stays exhaustively testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountAction {
    List,
    View,
    Create,
    Update,
    Delete,
    AssignRole,
    RemoveRole,
    Restore,
    ForceDelete,
}

impl AccountAction {
    pub const fn required_permission(self) -> Permission {
        match self {
            AccountAction::List | AccountAction::View => perms::VIEW_USERS,
            AccountAction::Create => perms::CREATE_USERS,
            AccountAction::Update => perms::EDIT_USERS,
            // Removing a role needs the same grant as assigning one.
            AccountAction::AssignRole | AccountAction::RemoveRole => perms::ASSIGN_ROLES,
            AccountAction::Delete | AccountAction::Restore | AccountAction::ForceDelete => {
                perms::DELETE_USERS
            }
        }
    }

    /// Whether the action is denied when actor and target are the same
    /// account, regardless of permissions. Self-service profile changes go
    /// through a different surface than the admin path.
    pub const fn denies_self(self) -> bool {
        matches!(self, AccountAction::Update | AccountAction::Delete)
    }
}

/// Decide whether `actor` may perform `action` against `target`.
///
/// Update and delete are always targeted; a self-denying action with no
/// target is denied outright.
pub fn authorize(actor: &Actor, action: AccountAction, target: Option<AccountId>) -> bool {
    if action.denies_self() {
        match target {
            Some(target) if target != actor.id => {}
            _ => return false,
        }
    }

    actor.has(&action.required_permission())
}
