use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

/// Internal user record, keyed by the identity provider's user id.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub identity_id: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
