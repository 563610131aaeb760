use async_trait::async_trait;
use manager_security::OwnerScope;
use sea_orm::ConnectionTrait;
use uuid::Uuid;

use super::error::DomainError;
use super::model::{Client, ClientDraft};

/// Client persistence. Every operation is qualified by an [`OwnerScope`];
/// there is no lookup by id alone.
#[async_trait]
pub trait ClientsRepository: Send + Sync {
    /// Persist a new record under a freshly generated, time-ordered id.
    /// Never overwrites an existing record.
    async fn save<C: ConnectionTrait>(
        &self,
        conn: &C,
        scope: &OwnerScope,
        draft: ClientDraft,
    ) -> Result<Uuid, DomainError>;

    /// The record matching both the scope's owner and `id`, if any.
    async fn one<C: ConnectionTrait>(
        &self,
        conn: &C,
        scope: &OwnerScope,
        id: Uuid,
    ) -> Result<Option<Client>, DomainError>;

    /// Delete the record matching both the scope's owner and `id`.
    /// Deleting a missing record succeeds.
    async fn remove<C: ConnectionTrait>(
        &self,
        conn: &C,
        scope: &OwnerScope,
        id: Uuid,
    ) -> Result<(), DomainError>;
}
