use uuid::Uuid;

pub use clients_sdk::{Client, ClientMeta};

/// A validated client ready to be persisted. Has an owner but no id yet:
/// ids are assigned by the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientDraft {
    pub owner_id: Uuid,
    pub client_type: String,
    pub name: String,
    pub description: Option<String>,
    pub key: String,
    pub meta: ClientMeta,
}
