use sea_orm::entity::prelude::*;
use uuid::Uuid;

use super::secure::OwnedEntity;
use crate::domain::model::Client;

/// One row per client, keyed `(owner_id, id)` so every lookup is an
/// owner-prefixed index seek.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "clients_by_owner")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub owner_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_name = "type")]
    pub client_type: String,
    pub name: String,
    pub description: Option<String>,
    pub access_key: String,
    pub meta: Json,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl OwnedEntity for Entity {
    fn owner_col() -> Self::Column {
        Column::OwnerId
    }
}

impl From<Model> for Client {
    fn from(m: Model) -> Self {
        let meta = match m.meta {
            Json::Object(map) => map,
            // Rows are only ever written with an object; anything else reads back empty.
            _ => serde_json::Map::new(),
        };
        Self {
            id: m.id,
            owner_id: m.owner_id,
            client_type: m.client_type,
            name: m.name,
            description: m.description,
            key: m.access_key,
            meta,
        }
    }
}
