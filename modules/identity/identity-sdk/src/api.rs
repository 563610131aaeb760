//! Public API trait for the identity module.

use async_trait::async_trait;
use manager_security::SecurityContext;
use uuid::Uuid;

use crate::error::IdentityError;

/// Identity collaborator contract.
///
/// The clients module treats implementations as a black box: a credential
/// either resolves to an owner or it does not.
#[async_trait]
pub trait IdentityClient: Send + Sync {
    /// Resolve a presented credential to the identity it was issued for.
    ///
    /// # Arguments
    ///
    /// * `credential` - raw token, optionally prefixed with `Bearer `
    ///
    /// # Errors
    ///
    /// - `InvalidCredentials` if the credential is empty, malformed, expired or forged
    /// - `Internal` for unexpected errors
    async fn resolve(&self, credential: &str) -> Result<SecurityContext, IdentityError>;

    /// Check a username/secret pair and issue a credential for it.
    ///
    /// # Errors
    ///
    /// - `InvalidCredentials` if the user is unknown or the secret does not match
    /// - `Internal` for unexpected errors
    async fn authenticate(&self, username: &str, secret: &str) -> Result<String, IdentityError>;

    /// Create a new account and return its identifier.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the username or secret is empty
    /// - `AlreadyExists` if the username is taken
    /// - `Internal` for unexpected errors
    async fn create(&self, username: &str, secret: &str) -> Result<Uuid, IdentityError>;
}
