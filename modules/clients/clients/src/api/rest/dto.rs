use clients_sdk::{Client, ClientMeta, NewClient};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Username/password pair for registration and login.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CredentialsReq {
    pub username: String,
    pub password: String,
}

/// Issued credential.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenDto {
    pub token: String,
}

/// Request body for creating a client.
///
/// `owner` is accepted but ignored: the owner is always the caller.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateClientReq {
    pub owner: Option<String>,
    #[serde(rename = "type")]
    pub client_type: String,
    pub name: String,
    pub description: Option<String>,
    pub key: String,
    #[schema(value_type = Object)]
    pub meta: ClientMeta,
}

impl From<CreateClientReq> for NewClient {
    fn from(req: CreateClientReq) -> Self {
        Self {
            owner_id: req.owner.as_deref().and_then(|o| Uuid::parse_str(o).ok()),
            client_type: req.client_type,
            name: req.name,
            description: req.description,
            key: req.key,
            meta: req.meta,
        }
    }
}

/// A stored client as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClientDto {
    pub id: Uuid,
    pub owner: Uuid,
    #[serde(rename = "type")]
    pub client_type: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub key: String,
    #[schema(value_type = Object)]
    pub meta: ClientMeta,
}

impl From<Client> for ClientDto {
    fn from(c: Client) -> Self {
        Self {
            id: c.id,
            owner: c.owner_id,
            client_type: c.client_type,
            name: c.name,
            description: c.description,
            key: c.key,
            meta: c.meta,
        }
    }
}
