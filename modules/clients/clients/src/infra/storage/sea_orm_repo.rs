use async_trait::async_trait;
use manager_security::OwnerScope;
use sea_orm::{ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::model::{Client, ClientDraft};
use crate::domain::repo::ClientsRepository;

use super::entity::{self, Column, Entity as ClientEntity};
use super::secure::{SecureDeleteExt, SecureEntityExt, secure_insert};

/// `SeaORM` implementation of [`ClientsRepository`] over `clients_by_owner`.
#[derive(Clone, Default)]
pub struct SeaOrmClientsRepository;

impl SeaOrmClientsRepository {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ClientsRepository for SeaOrmClientsRepository {
    async fn save<C: ConnectionTrait>(
        &self,
        conn: &C,
        scope: &OwnerScope,
        draft: ClientDraft,
    ) -> Result<Uuid, DomainError> {
        let id = Uuid::now_v7();
        let m = entity::ActiveModel {
            owner_id: ActiveValue::Set(draft.owner_id),
            id: ActiveValue::Set(id),
            client_type: ActiveValue::Set(draft.client_type),
            name: ActiveValue::Set(draft.name),
            description: ActiveValue::Set(draft.description),
            access_key: ActiveValue::Set(draft.key),
            meta: ActiveValue::Set(serde_json::Value::Object(draft.meta)),
        };

        secure_insert::<ClientEntity, _, _>(m, scope, conn).await?;
        Ok(id)
    }

    async fn one<C: ConnectionTrait>(
        &self,
        conn: &C,
        scope: &OwnerScope,
        id: Uuid,
    ) -> Result<Option<Client>, DomainError> {
        let found = ClientEntity::find()
            .filter(Column::Id.eq(id))
            .secure()
            .scope_with(scope)
            .one(conn)
            .await?;
        Ok(found.map(Into::into))
    }

    async fn remove<C: ConnectionTrait>(
        &self,
        conn: &C,
        scope: &OwnerScope,
        id: Uuid,
    ) -> Result<(), DomainError> {
        let removed = ClientEntity::delete_many()
            .filter(Column::Id.eq(id))
            .secure()
            .scope_with(scope)
            .exec(conn)
            .await?;
        tracing::debug!(removed, "delete by owner and id");
        Ok(())
    }
}
