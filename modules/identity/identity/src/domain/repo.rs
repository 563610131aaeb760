use async_trait::async_trait;
use sea_orm::ConnectionTrait;

use super::error::DomainError;
use super::model::UserRecord;

#[async_trait]
pub trait UsersRepository: Send + Sync {
    async fn find_by_username<C: ConnectionTrait>(
        &self,
        conn: &C,
        username: &str,
    ) -> Result<Option<UserRecord>, DomainError>;

    /// Insert a new account. A username collision surfaces as
    /// `DomainError::UsernameTaken`.
    async fn insert<C: ConnectionTrait>(
        &self,
        conn: &C,
        record: &UserRecord,
    ) -> Result<(), DomainError>;
}
