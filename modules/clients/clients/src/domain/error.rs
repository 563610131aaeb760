use clients_sdk::ClientsError;
use thiserror::Error;
use uuid::Uuid;

use crate::infra::storage::secure::ScopeError;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Malformed input: {field}: {message}")]
    MalformedInput { field: String, message: String },

    #[error("Malformed client: {field}: {message}")]
    MalformedClient { field: String, message: String },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("'{identifier}' already exists")]
    Conflict { identifier: String },

    #[error("Client not found: {id}")]
    NotFound { id: Uuid },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn malformed_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedInput {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn malformed_client(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedClient {
            field: field.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn not_found(id: Uuid) -> Self {
        Self::NotFound { id }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        tracing::error!(error = %e, "clients storage failure");
        Self::storage(e.to_string())
    }
}

impl From<ScopeError> for DomainError {
    fn from(e: ScopeError) -> Self {
        match e {
            ScopeError::Db(db) => db.into(),
            // Reaching this means the service passed a scope that does not
            // cover the record it built.
            ScopeError::Denied(msg) => {
                tracing::error!(reason = msg, "owner scope rejected a write");
                Self::Unauthorized
            }
        }
    }
}

impl From<DomainError> for ClientsError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::MalformedInput { field, message } => {
                Self::malformed_input(format!("{field}: {message}"))
            }
            DomainError::MalformedClient { field, message } => {
                Self::malformed_client(format!("{field}: {message}"))
            }
            DomainError::InvalidCredentials => Self::InvalidCredentials,
            DomainError::Unauthorized => Self::Unauthorized,
            DomainError::Conflict { identifier } => Self::conflict(identifier),
            DomainError::NotFound { .. } => Self::NotFound,
            DomainError::Storage { message } => Self::storage(message),
        }
    }
}
