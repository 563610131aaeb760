use identity_sdk::IdentityError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Username '{username}' is already taken")]
    UsernameTaken { username: String },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl DomainError {
    pub fn username_taken(username: impl Into<String>) -> Self {
        Self::UsernameTaken {
            username: username.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl From<DomainError> for IdentityError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::InvalidCredentials => Self::InvalidCredentials,
            DomainError::UsernameTaken { username } => Self::already_exists(username),
            DomainError::Validation { field, message } => {
                Self::invalid_input(format!("{field}: {message}"))
            }
            DomainError::Internal(msg) => Self::internal(msg),
            DomainError::Database(db) => {
                tracing::error!(error = %db, "identity storage failure");
                Self::internal("storage failure")
            }
        }
    }
}
