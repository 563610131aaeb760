use std::sync::Arc;

use clients_sdk::NewClient;
use identity_sdk::{IdentityClient, IdentityError};
use manager_security::SecurityContext;
use rand::RngCore;
use sea_orm::DatabaseConnection;
use tracing::{field::Empty, instrument};
use uuid::Uuid;

use super::error::DomainError;
use super::model::{Client, ClientDraft};
use super::repo::ClientsRepository;

// ============================================================================
// Service Configuration
// ============================================================================

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub access_key_bytes: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            access_key_bytes: 32,
        }
    }
}

// ============================================================================
// Service Implementation
// ============================================================================

/// Resource service for clients.
///
/// Each client operation resolves the caller's credential once, derives the
/// owner scope from the resulting context, and hands only that scope to the
/// repository. Caller-supplied owner fields never reach storage.
pub struct ClientsService<R: ClientsRepository> {
    db: DatabaseConnection,
    repo: Arc<R>,
    identity: Arc<dyn IdentityClient>,
    config: ServiceConfig,
}

impl<R: ClientsRepository> ClientsService<R> {
    #[must_use]
    pub fn new(
        db: DatabaseConnection,
        repo: Arc<R>,
        identity: Arc<dyn IdentityClient>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            db,
            repo,
            identity,
            config,
        }
    }

    #[instrument(skip(self, secret), fields(username = %username))]
    pub async fn register(&self, username: &str, secret: &str) -> Result<Uuid, DomainError> {
        require_non_empty("username", username)?;
        require_non_empty("password", secret)?;

        let user_id = self
            .identity
            .create(username, secret)
            .await
            .map_err(|e| match e {
                IdentityError::AlreadyExists { username } => DomainError::Conflict {
                    identifier: username,
                },
                IdentityError::InvalidInput { message } => {
                    DomainError::malformed_input("credentials", message)
                }
                IdentityError::InvalidCredentials => DomainError::InvalidCredentials,
                IdentityError::Internal(msg) => {
                    tracing::error!(error = %msg, "identity store failed");
                    DomainError::storage(msg)
                }
            })?;

        tracing::info!(user_id = %user_id, "User registered");
        Ok(user_id)
    }

    #[instrument(skip(self, secret), fields(username = %username))]
    pub async fn login(&self, username: &str, secret: &str) -> Result<String, DomainError> {
        require_non_empty("username", username)?;
        require_non_empty("password", secret)?;

        let token = self
            .identity
            .authenticate(username, secret)
            .await
            .map_err(|e| match e {
                IdentityError::InvalidCredentials | IdentityError::AlreadyExists { .. } => {
                    DomainError::InvalidCredentials
                }
                IdentityError::InvalidInput { message } => {
                    DomainError::malformed_input("credentials", message)
                }
                IdentityError::Internal(msg) => {
                    tracing::error!(error = %msg, "identity store failed");
                    DomainError::storage(msg)
                }
            })?;

        tracing::debug!("Login succeeded");
        Ok(token)
    }

    #[instrument(
        skip(self, credential, client),
        fields(owner.id = Empty, client.id = Empty, client.type = %client.client_type)
    )]
    pub async fn add_client(&self, credential: &str, client: NewClient) -> Result<Uuid, DomainError> {
        let ctx = self.authorize(credential).await?;

        require_well_formed("type", &client.client_type)?;
        require_well_formed("name", &client.name)?;

        let NewClient {
            owner_id: requested_owner,
            client_type,
            name,
            description,
            key,
            meta,
        } = client;

        let owner_id = ctx.subject_id();
        if requested_owner.is_some_and(|o| o != owner_id) {
            tracing::debug!("Ignoring caller-supplied owner");
        }

        let key = if key.is_empty() {
            self.generate_key()
        } else {
            key
        };

        let draft = ClientDraft {
            owner_id,
            client_type,
            name,
            description,
            key,
            meta,
        };

        let id = self.repo.save(&self.db, &ctx.owner_scope(), draft).await?;

        tracing::Span::current().record("client.id", tracing::field::display(id));
        tracing::info!("Client created");
        Ok(id)
    }

    #[instrument(skip(self, credential), fields(owner.id = Empty, client.id = %id))]
    pub async fn view_client(&self, credential: &str, id: Uuid) -> Result<Client, DomainError> {
        let ctx = self.authorize(credential).await?;

        let client = self
            .repo
            .one(&self.db, &ctx.owner_scope(), id)
            .await?
            .ok_or_else(|| DomainError::not_found(id))?;

        tracing::debug!("Client retrieved");
        Ok(client)
    }

    #[instrument(skip(self, credential), fields(owner.id = Empty, client.id = %id))]
    pub async fn remove_client(&self, credential: &str, id: Uuid) -> Result<(), DomainError> {
        let ctx = self.authorize(credential).await?;

        self.repo.remove(&self.db, &ctx.owner_scope(), id).await?;

        tracing::info!("Client removed");
        Ok(())
    }

    /// Resolve the credential into the caller's context, exactly once per call.
    async fn authorize(&self, credential: &str) -> Result<SecurityContext, DomainError> {
        let ctx = match self.identity.resolve(credential).await {
            Ok(ctx) if !ctx.is_anonymous() => ctx,
            Ok(_) | Err(IdentityError::InvalidCredentials | IdentityError::InvalidInput { .. }) => {
                tracing::warn!("Rejected credential: does not resolve to an owner");
                return Err(DomainError::Unauthorized);
            }
            Err(IdentityError::AlreadyExists { .. }) => return Err(DomainError::Unauthorized),
            Err(IdentityError::Internal(msg)) => {
                tracing::error!(error = %msg, "identity resolution failed");
                return Err(DomainError::storage(msg));
            }
        };

        tracing::Span::current().record("owner.id", tracing::field::display(ctx.subject_id()));
        Ok(ctx)
    }

    fn generate_key(&self) -> String {
        let mut bytes = vec![0u8; self.config.access_key_bytes];
        rand::rng().fill_bytes(&mut bytes);
        hex::encode(bytes)
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::malformed_input(field, "must not be empty"));
    }
    Ok(())
}

fn require_well_formed(field: &str, value: &str) -> Result<(), DomainError> {
    if value.is_empty() {
        return Err(DomainError::malformed_client(field, "must not be empty"));
    }
    Ok(())
}
