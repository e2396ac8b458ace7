//! Management-operation error taxonomy.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use opsdesk_store::StoreError;

use crate::password::CredentialError;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Field-scoped validation messages, one per offending field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

impl core::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut first = true;
        for (field, message) in self.0.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Error surfaced by the account management service.
///
/// `Forbidden` deliberately carries no detail about which permission was
/// missing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("not permitted")]
    Forbidden,

    #[error("not found")]
    NotFound,

    #[error("email already taken")]
    DuplicateEmail,

    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    #[error("credential failure: {0}")]
    Credential(String),

    #[error("storage failure: {0}")]
    Store(String),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => Self::DuplicateEmail,
            StoreError::NotFound => Self::NotFound,
            StoreError::Backend(msg) => Self::Store(msg),
        }
    }
}

impl From<CredentialError> for ServiceError {
    fn from(err: CredentialError) -> Self {
        Self::Credential(err.to_string())
    }
}
