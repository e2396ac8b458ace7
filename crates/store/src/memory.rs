//! In-memory account store for tests/dev.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;

use opsdesk_core::{AccountId, Page, Pagination};
use opsdesk_rbac::Role;

use crate::account::{Account, AccountChanges, AccountFilter, NewAccountRecord};
use crate::error::{StoreError, StoreResult};
use crate::store::AccountStore;

/// RwLock-backed store. Each operation takes a single guard, so partial
/// updates are never observable from another operation.
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    inner: RwLock<HashMap<AccountId, Account>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard_poisoned<T>() -> StoreResult<T> {
        Err(StoreError::Backend("store lock poisoned".to_string()))
    }
}

impl AccountStore for InMemoryAccountStore {
    fn create(&self, record: NewAccountRecord) -> StoreResult<Account> {
        let Ok(mut map) = self.inner.write() else {
            return Self::guard_poisoned();
        };

        if map.values().any(|a| a.email == record.email) {
            return Err(StoreError::DuplicateEmail);
        }

        let now = Utc::now();
        let account = Account {
            id: AccountId::new(),
            first_name: record.first_name,
            last_name: record.last_name,
            phone: record.phone,
            email: record.email,
            password_hash: record.password_hash,
            roles: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        map.insert(account.id, account.clone());
        Ok(account)
    }

    fn get(&self, id: AccountId) -> StoreResult<Account> {
        let Ok(map) = self.inner.read() else {
            return Self::guard_poisoned();
        };
        map.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    fn get_by_email(&self, email: &str) -> Option<Account> {
        let map = self.inner.read().ok()?;
        map.values().find(|a| a.email == email).cloned()
    }

    fn list(&self, filter: &AccountFilter, pagination: Pagination) -> StoreResult<Page<Account>> {
        let Ok(map) = self.inner.read() else {
            return Self::guard_poisoned();
        };

        let mut matched: Vec<Account> = map.values().filter(|a| filter.matches(a)).cloned().collect();
        // Newest first; the time-ordered id breaks created_at ties.
        matched.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.as_uuid().cmp(a.id.as_uuid()))
        });

        let total = matched.len() as u64;
        let items = matched
            .into_iter()
            .skip(pagination.offset as usize)
            .take(pagination.limit as usize)
            .collect();

        Ok(Page {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }

    fn update(&self, id: AccountId, changes: AccountChanges) -> StoreResult<Account> {
        let Ok(mut map) = self.inner.write() else {
            return Self::guard_poisoned();
        };

        if let Some(email) = &changes.email {
            if map.values().any(|a| a.id != id && &a.email == email) {
                return Err(StoreError::DuplicateEmail);
            }
        }

        let account = map.get_mut(&id).ok_or(StoreError::NotFound)?;

        if let Some(first_name) = changes.first_name {
            account.first_name = first_name;
        }
        if let Some(last_name) = changes.last_name {
            account.last_name = last_name;
        }
        if let Some(phone) = changes.phone {
            account.phone = phone;
        }
        if let Some(email) = changes.email {
            account.email = email;
        }
        if let Some(password_hash) = changes.password_hash {
            account.password_hash = password_hash;
        }
        account.updated_at = Utc::now();

        Ok(account.clone())
    }

    fn delete(&self, id: AccountId) -> StoreResult<bool> {
        let Ok(mut map) = self.inner.write() else {
            return Self::guard_poisoned();
        };
        match map.remove(&id) {
            Some(_) => Ok(true),
            None => Err(StoreError::NotFound),
        }
    }

    fn attach_role(&self, id: AccountId, role: Role) -> StoreResult<Account> {
        let Ok(mut map) = self.inner.write() else {
            return Self::guard_poisoned();
        };
        let account = map.get_mut(&id).ok_or(StoreError::NotFound)?;

        if !account.roles.iter().any(|r| r.as_str() == role.as_str()) {
            account.roles.push(role);
            account.updated_at = Utc::now();
        }
        Ok(account.clone())
    }

    fn detach_role(&self, id: AccountId, role: &Role) -> StoreResult<Account> {
        let Ok(mut map) = self.inner.write() else {
            return Self::guard_poisoned();
        };
        let account = map.get_mut(&id).ok_or(StoreError::NotFound)?;

        let before = account.roles.len();
        account.roles.retain(|r| r.as_str() != role.as_str());
        if account.roles.len() != before {
            account.updated_at = Utc::now();
        }
        Ok(account.clone())
    }

    fn replace_roles(&self, id: AccountId, roles: Vec<Role>) -> StoreResult<Account> {
        let Ok(mut map) = self.inner.write() else {
            return Self::guard_poisoned();
        };
        let account = map.get_mut(&id).ok_or(StoreError::NotFound)?;

        let mut replacement: Vec<Role> = Vec::with_capacity(roles.len());
        for role in roles {
            if !replacement.iter().any(|r| r.as_str() == role.as_str()) {
                replacement.push(role);
            }
        }
        account.roles = replacement;
        account.updated_at = Utc::now();

        Ok(account.clone())
    }
}
