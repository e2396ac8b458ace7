//! Store error model.

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence-layer error.
///
/// A failed delete that the backend rejected without raising is NOT an error:
/// `AccountStore::delete` reports it as `Ok(false)`, distinct from a missing
/// record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The email is already taken by another account.
    #[error("email already taken")]
    DuplicateEmail,

    /// No account matches the given identifier.
    #[error("account not found")]
    NotFound,

    /// The backend failed for a reason outside the domain taxonomy.
    #[error("storage backend failure: {0}")]
    Backend(String),
}
