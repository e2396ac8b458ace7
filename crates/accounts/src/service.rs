//! Account management orchestration.
//!
//! Every operation follows the same shape: authorize against the explicit
//! actor first (a denial performs no store access), then mutate through the
//! store, emitting audit events around the mutation. Mutations return the
//! post-mutation snapshot; callers never re-fetch.

use serde_json::json;

use opsdesk_core::{AccountId, Page, Pagination};
use opsdesk_rbac::{authorize, AccountAction, Actor, Role, RoleRegistry, RoleSelector};
use opsdesk_store::{Account, AccountChanges, AccountFilter, AccountStore, NewAccountRecord};

use crate::audit::{AuditEvent, AuditSink};
use crate::error::{ServiceError, ServiceResult};
use crate::input::{AccountDetails, AccountPatch, NewAccount};
use crate::password::CredentialHasher;
use crate::validate;

pub struct AccountService<S, H, A> {
    store: S,
    registry: RoleRegistry,
    hasher: H,
    audit: A,
}

impl<S, H, A> AccountService<S, H, A>
where
    S: AccountStore,
    H: CredentialHasher,
    A: AuditSink,
{
    pub fn new(store: S, registry: RoleRegistry, hasher: H, audit: A) -> Self {
        Self {
            store,
            registry,
            hasher,
            audit,
        }
    }

    pub fn registry(&self) -> &RoleRegistry {
        &self.registry
    }

    /// Resolve an actor's held roles into its effective permission set.
    pub fn resolve_actor(&self, id: AccountId, roles: &[Role]) -> Actor {
        Actor::resolve(id, roles, &self.registry)
    }

    fn require(
        &self,
        actor: &Actor,
        action: AccountAction,
        target: Option<AccountId>,
    ) -> ServiceResult<()> {
        if authorize(actor, action, target) {
            Ok(())
        } else {
            Err(ServiceError::Forbidden)
        }
    }

    /// Paginated account listing with search/role filters.
    pub fn list_accounts(
        &self,
        actor: &Actor,
        filter: &AccountFilter,
        pagination: Pagination,
    ) -> ServiceResult<Page<Account>> {
        self.require(actor, AccountAction::List, None)?;
        Ok(self.store.list(filter, pagination)?)
    }

    /// Single account with its roles and resolved permission set.
    pub fn get_account(&self, actor: &Actor, id: AccountId) -> ServiceResult<AccountDetails> {
        self.require(actor, AccountAction::View, Some(id))?;

        let account = self.store.get(id)?;
        let mut permissions: Vec<_> = self
            .registry
            .resolve_permissions(account.roles.iter())
            .into_iter()
            .collect();
        permissions.sort_by(|a, b| a.as_str().cmp(b.as_str()));

        Ok(AccountDetails {
            account,
            permissions,
        })
    }

    /// Create an account, optionally setting its initial role list.
    pub fn create_account(
        &self,
        actor: &Actor,
        input: NewAccount,
        roles: Option<Vec<Role>>,
    ) -> ServiceResult<Account> {
        self.require(actor, AccountAction::Create, None)?;
        validate::validate_new_account(&input)?;

        let email = validate::normalize_email(&input.email);
        self.audit.emit(AuditEvent::info(
            "creating account",
            json!({
                "email": email,
                "first_name": input.first_name.trim(),
                "last_name": input.last_name.trim(),
                "phone": input.phone,
                "created_by": actor.id,
            }),
        ));

        let password_hash = self.hasher.hash(&input.password)?;
        let account = self.store.create(NewAccountRecord {
            first_name: input.first_name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            phone: input.phone,
            email,
            password_hash,
        })?;

        self.audit.emit(AuditEvent::info(
            "account created",
            json!({
                "account_id": account.id,
                "email": account.email,
                "name": account.full_name(),
            }),
        ));

        let account = match roles {
            Some(roles) => self.store.replace_roles(account.id, roles)?,
            None => account,
        };
        Ok(account)
    }

    /// Apply a partial update, optionally replacing the role set.
    ///
    /// An absent `roles` argument leaves memberships untouched; `Some(vec![])`
    /// clears them. The stored credential is replaced only when a non-empty
    /// password is supplied.
    pub fn update_account(
        &self,
        actor: &Actor,
        id: AccountId,
        patch: AccountPatch,
        roles: Option<Vec<Role>>,
    ) -> ServiceResult<Account> {
        self.require(actor, AccountAction::Update, Some(id))?;
        validate::validate_patch(&patch)?;

        let current = self.store.get(id)?;

        let email = patch.email.as_deref().map(validate::normalize_email);
        let password_changed = patch.password.as_deref().is_some_and(|p| !p.is_empty());
        self.audit.emit(AuditEvent::info(
            "updating account",
            json!({
                "account_id": id,
                "email": current.email,
                "updated_by": actor.id,
                "changes": {
                    "first_name": patch.first_name.as_deref()
                        .is_some_and(|v| v.trim() != current.first_name),
                    "last_name": patch.last_name.as_deref()
                        .is_some_and(|v| v.trim() != current.last_name),
                    "phone": patch.phone.as_deref().is_some_and(|v| v != current.phone),
                    "email": email.as_deref().is_some_and(|v| v != current.email),
                    "password": password_changed,
                },
            }),
        ));

        let password_hash = match patch.password.as_deref() {
            Some(p) if !p.is_empty() => Some(self.hasher.hash(p)?),
            _ => None,
        };
        let account = self.store.update(
            id,
            AccountChanges {
                first_name: patch.first_name.map(|v| v.trim().to_string()),
                last_name: patch.last_name.map(|v| v.trim().to_string()),
                phone: patch.phone,
                email,
                password_hash,
            },
        )?;

        self.audit.emit(AuditEvent::info(
            "account updated",
            json!({
                "account_id": account.id,
                "email": account.email,
                "name": account.full_name(),
            }),
        ));

        let account = match roles {
            Some(roles) => self.store.replace_roles(id, roles)?,
            None => account,
        };
        Ok(account)
    }

    /// Hard-delete an account.
    ///
    /// Returns the store's verdict: `false` means the backend rejected the
    /// removal without raising; a missing target surfaces as `NotFound`.
    pub fn delete_account(&self, actor: &Actor, id: AccountId) -> ServiceResult<bool> {
        self.require(actor, AccountAction::Delete, Some(id))?;

        let account = self.store.get(id)?;
        self.audit.emit(AuditEvent::warning(
            "deleting account",
            json!({
                "account_id": id,
                "email": account.email,
                "name": account.full_name(),
                "deleted_by": actor.id,
            }),
        ));

        let deleted = self.store.delete(id)?;
        if deleted {
            self.audit.emit(AuditEvent::info(
                "account deleted",
                json!({ "account_id": id, "email": account.email }),
            ));
        } else {
            self.audit.emit(AuditEvent::error(
                "failed to delete account",
                json!({ "account_id": id, "email": account.email }),
            ));
        }
        Ok(deleted)
    }

    /// Attach a role. Assigning an already-held role is a successful no-op.
    pub fn assign_role(
        &self,
        actor: &Actor,
        id: AccountId,
        role: RoleSelector,
    ) -> ServiceResult<Account> {
        self.require(actor, AccountAction::AssignRole, Some(id))?;
        let role_name = self.canonical_role_name(&role)?;
        let account = self.store.get(id)?;

        self.audit.emit(AuditEvent::info(
            "assigning role",
            json!({
                "account_id": id,
                "email": account.email,
                "role": role_name,
                "assigned_by": actor.id,
            }),
        ));

        let account = self.store.attach_role(id, Role::new(role_name.clone()))?;

        self.audit.emit(AuditEvent::info(
            "role assigned",
            json!({ "account_id": id, "role": role_name }),
        ));
        Ok(account)
    }

    /// Detach a role. Removing a never-held role is a successful no-op.
    pub fn remove_role(
        &self,
        actor: &Actor,
        id: AccountId,
        role: RoleSelector,
    ) -> ServiceResult<Account> {
        self.require(actor, AccountAction::RemoveRole, Some(id))?;
        let role_name = self.canonical_role_name(&role)?;
        let account = self.store.get(id)?;

        self.audit.emit(AuditEvent::info(
            "removing role",
            json!({
                "account_id": id,
                "email": account.email,
                "role": role_name,
                "removed_by": actor.id,
            }),
        ));

        let account = self.store.detach_role(id, &Role::new(role_name.clone()))?;

        self.audit.emit(AuditEvent::info(
            "role removed",
            json!({ "account_id": id, "role": role_name }),
        ));
        Ok(account)
    }

    /// Normalize a role selector to its seeded canonical name.
    fn canonical_role_name(&self, selector: &RoleSelector) -> ServiceResult<String> {
        self.registry
            .resolve_selector(selector)
            .map(|def| def.name.clone())
            .ok_or(ServiceError::NotFound)
    }
}
