//! The account persistence seam.

use std::sync::Arc;

use opsdesk_core::{AccountId, Page, Pagination};
use opsdesk_rbac::Role;

use crate::account::{Account, AccountChanges, AccountFilter, NewAccountRecord};
use crate::error::StoreResult;

/// Owns account records and their role-membership edges.
///
/// Every write returns the post-mutation snapshot, so callers never re-fetch
/// after a mutation. Implementations wrap each operation in a transaction (or
/// equivalent atomic write); partial field updates are never observable.
pub trait AccountStore: Send + Sync {
    /// Insert a new record. Fails with `DuplicateEmail` when the email is
    /// already taken.
    fn create(&self, record: NewAccountRecord) -> StoreResult<Account>;

    fn get(&self, id: AccountId) -> StoreResult<Account>;

    fn get_by_email(&self, email: &str) -> Option<Account>;

    /// Newest-first listing with filter and pagination.
    fn list(&self, filter: &AccountFilter, pagination: Pagination) -> StoreResult<Page<Account>>;

    /// Apply the supplied fields only; `None` fields stay untouched.
    fn update(&self, id: AccountId, changes: AccountChanges) -> StoreResult<Account>;

    /// Remove the record. `Ok(false)` means the backend rejected the removal
    /// for a non-exceptional reason; a missing record is `Err(NotFound)`.
    fn delete(&self, id: AccountId) -> StoreResult<bool>;

    /// Attach a role. Attaching an already-held role is a successful no-op.
    fn attach_role(&self, id: AccountId, role: Role) -> StoreResult<Account>;

    /// Detach a role. Detaching a never-held role is a successful no-op.
    fn detach_role(&self, id: AccountId, role: &Role) -> StoreResult<Account>;

    /// Replace the account's role set with exactly the given roles; an empty
    /// set clears all memberships.
    fn replace_roles(&self, id: AccountId, roles: Vec<Role>) -> StoreResult<Account>;
}

impl<S> AccountStore for Arc<S>
where
    S: AccountStore + ?Sized,
{
    fn create(&self, record: NewAccountRecord) -> StoreResult<Account> {
        (**self).create(record)
    }

    fn get(&self, id: AccountId) -> StoreResult<Account> {
        (**self).get(id)
    }

    fn get_by_email(&self, email: &str) -> Option<Account> {
        (**self).get_by_email(email)
    }

    fn list(&self, filter: &AccountFilter, pagination: Pagination) -> StoreResult<Page<Account>> {
        (**self).list(filter, pagination)
    }

    fn update(&self, id: AccountId, changes: AccountChanges) -> StoreResult<Account> {
        (**self).update(id, changes)
    }

    fn delete(&self, id: AccountId) -> StoreResult<bool> {
        (**self).delete(id)
    }

    fn attach_role(&self, id: AccountId, role: Role) -> StoreResult<Account> {
        (**self).attach_role(id, role)
    }

    fn detach_role(&self, id: AccountId, role: &Role) -> StoreResult<Account> {
        (**self).detach_role(id, role)
    }

    fn replace_roles(&self, id: AccountId, roles: Vec<Role>) -> StoreResult<Account> {
        (**self).replace_roles(id, roles)
    }
}
