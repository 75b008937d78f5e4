use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ApiKeyRow {
    pub id: uuid::Uuid,
    pub name: String,
    pub key: String,
    pub permissions: Vec<String>,
    pub is_active: bool,
    pub last_used_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub expires_at: Option<OffsetDateTime>,
}
