//! Database error types.

use ipswich_auth::AuthError;
use ipswich_commerce::store::StoreError;
use thiserror::Error;

/// Errors that can occur when using the database.
#[derive(Error, Debug)]
pub enum DbError {
    /// Failed to open the database file.
    #[error("Failed to open database: {0}")]
    OpenError(String),

    /// Failed to write the database file.
    #[error("Failed to persist database: {0}")]
    PersistError(String),

    /// Failed to (de)serialize the snapshot.
    #[error("Deserialization error: {0}")]
    DeserializeError(String),

    /// A referenced record does not exist.
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    /// A uniqueness constraint was violated.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A record failed validation.
    #[error("Invalid record: {0}")]
    Invalid(String),

    /// A thread panicked while holding the table lock.
    #[error("Database lock poisoned")]
    Poisoned,

    /// Account handling failed.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl DbError {
    pub(crate) fn not_found(entity: &'static str, key: impl ToString) -> Self {
        DbError::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}

impl From<serde_json::Error> for DbError {
    fn from(e: serde_json::Error) -> Self {
        DbError::DeserializeError(e.to_string())
    }
}

impl From<DbError> for StoreError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { entity, key } => StoreError::NotFound { entity, key },
            DbError::Conflict(reason) => StoreError::Conflict(reason),
            other => StoreError::Backend(other.to_string()),
        }
    }
}
