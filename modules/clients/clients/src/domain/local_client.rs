use std::sync::Arc;

use async_trait::async_trait;
use clients_sdk::{Client, ClientsClientV1, ClientsError, NewClient};
use uuid::Uuid;

use super::repo::ClientsRepository;
use super::service::ClientsService;

/// In-process adapter exposing [`ClientsService`] through the SDK trait.
pub struct ClientsLocalClient<R: ClientsRepository> {
    service: Arc<ClientsService<R>>,
}

impl<R: ClientsRepository> ClientsLocalClient<R> {
    #[must_use]
    pub fn new(service: Arc<ClientsService<R>>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl<R: ClientsRepository + 'static> ClientsClientV1 for ClientsLocalClient<R> {
    async fn register(&self, username: &str, secret: &str) -> Result<Uuid, ClientsError> {
        self.service
            .register(username, secret)
            .await
            .map_err(Into::into)
    }

    async fn login(&self, username: &str, secret: &str) -> Result<String, ClientsError> {
        self.service.login(username, secret).await.map_err(Into::into)
    }

    async fn add_client(&self, credential: &str, client: NewClient) -> Result<Uuid, ClientsError> {
        self.service
            .add_client(credential, client)
            .await
            .map_err(Into::into)
    }

    async fn view_client(&self, credential: &str, id: Uuid) -> Result<Client, ClientsError> {
        self.service
            .view_client(credential, id)
            .await
            .map_err(Into::into)
    }

    async fn remove_client(&self, credential: &str, id: Uuid) -> Result<(), ClientsError> {
        self.service
            .remove_client(credential, id)
            .await
            .map_err(Into::into)
    }
}
