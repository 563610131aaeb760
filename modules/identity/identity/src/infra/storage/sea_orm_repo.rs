use async_trait::async_trait;
use sea_orm::{ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, SqlErr};

use crate::domain::error::DomainError;
use crate::domain::model::UserRecord;
use crate::domain::repo::UsersRepository;

use super::entity::{self, Column, Entity as UserEntity};

#[derive(Clone, Default)]
pub struct SeaOrmUsersRepository;

impl SeaOrmUsersRepository {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl UsersRepository for SeaOrmUsersRepository {
    async fn find_by_username<C: ConnectionTrait>(
        &self,
        conn: &C,
        username: &str,
    ) -> Result<Option<UserRecord>, DomainError> {
        let found = UserEntity::find()
            .filter(Column::Username.eq(username))
            .one(conn)
            .await?;
        Ok(found.map(Into::into))
    }

    async fn insert<C: ConnectionTrait>(
        &self,
        conn: &C,
        record: &UserRecord,
    ) -> Result<(), DomainError> {
        let m = entity::ActiveModel {
            id: ActiveValue::Set(record.id),
            username: ActiveValue::Set(record.username.clone()),
            secret_hash: ActiveValue::Set(record.secret_hash.clone()),
            created_at: ActiveValue::Set(record.created_at),
        };

        UserEntity::insert(m)
            .exec_without_returning(conn)
            .await
            .map_err(|e| {
                if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                    DomainError::username_taken(record.username.clone())
                } else {
                    DomainError::from(e)
                }
            })?;
        Ok(())
    }
}
