//! Public API trait for the clients module.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::ClientsError;
use crate::models::{Client, NewClient};

/// Public API of the clients module.
///
/// Every client operation takes the caller's credential and resolves it to an
/// owner exactly once. Clients are reachable only through that owner: a client
/// owned by someone else is reported as `NotFound`.
///
/// # Example
///
/// ```ignore
/// let clients = hub.get::<dyn ClientsClientV1>()?;
/// let id = clients.add_client(&token, NewClient::new("sensor", "temp1")).await?;
/// ```
#[async_trait]
pub trait ClientsClientV1: Send + Sync {
    /// Register a new account.
    ///
    /// # Errors
    ///
    /// - `MalformedInput` if the username or secret is empty
    /// - `Conflict` if the username is taken
    /// - `StorageFailure` for collaborator failures
    async fn register(&self, username: &str, secret: &str) -> Result<Uuid, ClientsError>;

    /// Exchange a username/secret pair for a credential.
    ///
    /// # Errors
    ///
    /// - `MalformedInput` if the username or secret is empty
    /// - `InvalidCredentials` for an unknown user or a wrong secret
    /// - `StorageFailure` for collaborator failures
    async fn login(&self, username: &str, secret: &str) -> Result<String, ClientsError>;

    /// Create a client owned by the caller and return its id.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if the credential does not resolve
    /// - `MalformedClient` if `client_type` or `name` is empty
    /// - `StorageFailure` if persistence fails
    async fn add_client(&self, credential: &str, client: NewClient) -> Result<Uuid, ClientsError>;

    /// Fetch one of the caller's clients.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if the credential does not resolve
    /// - `NotFound` if no such client exists under the caller
    /// - `StorageFailure` if persistence fails
    async fn view_client(&self, credential: &str, id: Uuid) -> Result<Client, ClientsError>;

    /// Delete one of the caller's clients. Removing a missing client succeeds.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if the credential does not resolve
    /// - `StorageFailure` if persistence fails
    async fn remove_client(&self, credential: &str, id: Uuid) -> Result<(), ClientsError>;
}
