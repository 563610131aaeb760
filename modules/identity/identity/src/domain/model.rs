use time::OffsetDateTime;
use uuid::Uuid;

/// Stored account. The secret itself is never kept, only its PHC hash string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    pub secret_hash: String,
    pub created_at: OffsetDateTime,
}
