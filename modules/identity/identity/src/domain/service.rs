use std::sync::Arc;

use manager_security::SecurityContext;
use sea_orm::DatabaseConnection;
use time::OffsetDateTime;
use tracing::instrument;
use uuid::Uuid;

use super::error::DomainError;
use super::model::UserRecord;
use super::repo::UsersRepository;
use crate::infra::password;
use crate::infra::token::TokenIssuer;

const BEARER_PREFIX: &str = "Bearer ";
const SUBJECT_TYPE_USER: &str = "user";

/// Identity service: accounts, secrets and credentials.
pub struct Service<R: UsersRepository> {
    db: DatabaseConnection,
    repo: Arc<R>,
    tokens: TokenIssuer,
}

impl<R: UsersRepository> Service<R> {
    #[must_use]
    pub fn new(db: DatabaseConnection, repo: Arc<R>, tokens: TokenIssuer) -> Self {
        Self { db, repo, tokens }
    }

    #[instrument(skip(self, secret), fields(username = %username))]
    pub async fn create(&self, username: &str, secret: &str) -> Result<Uuid, DomainError> {
        tracing::info!("Creating account");

        if username.trim().is_empty() {
            return Err(DomainError::validation("username", "must not be empty"));
        }
        if secret.is_empty() {
            return Err(DomainError::validation("secret", "must not be empty"));
        }

        if self
            .repo
            .find_by_username(&self.db, username)
            .await?
            .is_some()
        {
            return Err(DomainError::username_taken(username));
        }

        let secret_hash = password::hash_secret(secret.to_owned()).await?;
        let record = UserRecord {
            id: Uuid::now_v7(),
            username: username.to_owned(),
            secret_hash,
            created_at: OffsetDateTime::now_utc(),
        };

        // The unique index still catches a concurrent registration of the same name.
        self.repo.insert(&self.db, &record).await?;

        tracing::info!(user_id = %record.id, "Account created");
        Ok(record.id)
    }

    #[instrument(skip(self, secret), fields(username = %username))]
    pub async fn authenticate(&self, username: &str, secret: &str) -> Result<String, DomainError> {
        tracing::debug!("Authenticating");

        let Some(user) = self.repo.find_by_username(&self.db, username).await? else {
            tracing::warn!("Login rejected: invalid credentials");
            return Err(DomainError::InvalidCredentials);
        };

        if !password::verify_secret(secret.to_owned(), user.secret_hash).await? {
            tracing::warn!("Login rejected: invalid credentials");
            return Err(DomainError::InvalidCredentials);
        }

        let token = self.tokens.issue(user.id)?;
        tracing::info!(user_id = %user.id, "Credential issued");
        Ok(token)
    }

    /// Resolve a presented credential. Accepts the raw token or `Bearer <token>`.
    #[instrument(skip_all)]
    pub fn resolve(&self, credential: &str) -> Result<SecurityContext, DomainError> {
        let credential = credential.trim();
        let token = credential
            .strip_prefix(BEARER_PREFIX)
            .unwrap_or(credential)
            .trim();

        if token.is_empty() {
            tracing::warn!("Credential rejected: empty");
            return Err(DomainError::InvalidCredentials);
        }

        let subject = self.tokens.verify(token).inspect_err(|_| {
            tracing::warn!("Credential rejected: failed verification");
        })?;

        Ok(SecurityContext::builder()
            .subject_id(subject)
            .subject_type(SUBJECT_TYPE_USER)
            .bearer_token(token.to_owned())
            .build())
    }
}
