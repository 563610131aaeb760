use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Auxiliary key/value data attached to a client. Stored and returned as-is.
pub type ClientMeta = serde_json::Map<String, serde_json::Value>;

/// A stored client, always owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub client_type: String,
    pub name: String,
    pub description: Option<String>,
    pub key: String,
    pub meta: ClientMeta,
}

/// Data for creating a client.
///
/// `owner_id` is accepted for wire compatibility only: the owner is always
/// the identity the caller's credential resolves to. An empty `key` asks the
/// service to generate one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewClient {
    pub owner_id: Option<Uuid>,
    pub client_type: String,
    pub name: String,
    pub description: Option<String>,
    pub key: String,
    pub meta: ClientMeta,
}

impl NewClient {
    #[must_use]
    pub fn new(client_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            client_type: client_type.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    #[must_use]
    pub fn with_meta(mut self, meta: ClientMeta) -> Self {
        self.meta = meta;
        self
    }
}
