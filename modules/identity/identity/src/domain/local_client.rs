use std::sync::Arc;

use async_trait::async_trait;
use identity_sdk::{IdentityClient, IdentityError};
use manager_security::SecurityContext;
use uuid::Uuid;

use super::repo::UsersRepository;
use super::service::Service;

/// In-process adapter exposing the identity service through the SDK trait.
pub struct IdentityLocalClient<R: UsersRepository> {
    service: Arc<Service<R>>,
}

impl<R: UsersRepository> IdentityLocalClient<R> {
    #[must_use]
    pub fn new(service: Arc<Service<R>>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl<R: UsersRepository + 'static> IdentityClient for IdentityLocalClient<R> {
    async fn resolve(&self, credential: &str) -> Result<SecurityContext, IdentityError> {
        self.service.resolve(credential).map_err(Into::into)
    }

    async fn authenticate(&self, username: &str, secret: &str) -> Result<String, IdentityError> {
        self.service
            .authenticate(username, secret)
            .await
            .map_err(Into::into)
    }

    async fn create(&self, username: &str, secret: &str) -> Result<Uuid, IdentityError> {
        self.service
            .create(username, secret)
            .await
            .map_err(Into::into)
    }
}
