use thiserror::Error;
use uuid::Uuid;

/// Field-level failures raised by the model constructors.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },

    #[error("Failed to hash password: {0}")]
    PasswordHash(String),

    #[error("Invalid password hash: {0}")]
    InvalidHash(String),
}

impl ModelError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ModelError::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum RepoError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: Uuid },

    #[error("{kind} {id} already exists")]
    Duplicate { kind: &'static str, id: Uuid },

    #[error("In-memory store lock poisoned")]
    Poisoned,
}
