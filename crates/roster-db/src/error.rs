/// Failures of the backing store itself, as opposed to a missing record.
/// Lookups report "no such user" as `Ok(None)`, so a `StoreError` always means
/// the store could not answer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store: SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Store: connection lock poisoned: {0}")]
    LockPoisoned(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Why a credential check did not pass.
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    /// A required credential field was empty. Raised before any lookup.
    #[error("missing required field: {0}")]
    Validation(&'static str),

    /// Unknown user, wrong password, or insufficient role.
    #[error("not authorized")]
    NotAuthorized,

    #[error(transparent)]
    Storage(#[from] StoreError),
}
