//! Error types for the identity module.

use thiserror::Error;

/// Errors that can occur when using the identity API.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The credential or username/secret pair did not resolve to an account.
    ///
    /// Deliberately carries no detail: "unknown user" and "wrong secret" are
    /// indistinguishable.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// An account with this username already exists.
    #[error("identity '{username}' already exists")]
    AlreadyExists { username: String },

    /// Username or secret missing or empty.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// An internal error occurred (storage, signing keys).
    #[error("internal error: {0}")]
    Internal(String),
}

impl IdentityError {
    pub fn already_exists(username: impl Into<String>) -> Self {
        Self::AlreadyExists {
            username: username.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}
