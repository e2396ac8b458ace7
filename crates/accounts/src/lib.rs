//! `opsdesk-accounts` — administrative account management.
//!
//! Orchestrates account CRUD and role changes: authorizes first, mutates
//! through the store, and emits audit events for every mutating operation.
//! The actor is always an explicit parameter; there is no ambient
//! current-user state in this crate.

pub mod audit;
pub mod error;
pub mod input;
pub mod password;
pub mod service;
mod validate;

pub use audit::{AuditEvent, AuditLevel, AuditSink, MemoryAuditSink, TracingAuditSink};
pub use error::{FieldErrors, ServiceError, ServiceResult};
pub use input::{AccountDetails, AccountPatch, NewAccount};
pub use password::{Argon2Hasher, CredentialError, CredentialHasher};
pub use service::AccountService;
