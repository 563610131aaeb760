//! Public error types for the clients module.
//!
//! The variant set is closed: every failure a caller can observe is exactly
//! one of these kinds, and transports map each kind to exactly one outcome.

use thiserror::Error;

/// Errors that can be returned by the `ClientsClientV1`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientsError {
    /// A required registration or login field is missing or empty.
    #[error("malformed input: {message}")]
    MalformedInput { message: String },

    /// The client's `type` or `name` is empty.
    #[error("malformed client: {message}")]
    MalformedClient { message: String },

    /// Login secret does not match, or the account does not exist.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The presented credential does not resolve to an owner.
    #[error("unauthorized")]
    Unauthorized,

    /// The identity being registered already exists.
    #[error("already exists: {identifier}")]
    Conflict { identifier: String },

    /// No client with this id exists under the caller's ownership.
    #[error("client not found")]
    NotFound,

    /// Persistence or collaborator failure. The message is for logs only.
    #[error("storage failure: {message}")]
    StorageFailure { message: String },
}

impl ClientsError {
    pub fn malformed_input(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }

    pub fn malformed_client(message: impl Into<String>) -> Self {
        Self::MalformedClient {
            message: message.into(),
        }
    }

    pub fn conflict(identifier: impl Into<String>) -> Self {
        Self::Conflict {
            identifier: identifier.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::StorageFailure {
            message: message.into(),
        }
    }
}
