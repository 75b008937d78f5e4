use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct AiGenerationRow {
    pub id: uuid::Uuid,
    pub kind: String,
    pub prompt: String,
    pub result: Option<String>,
    pub model: String,
    pub tokens_used: Option<i32>,
    pub created_at: OffsetDateTime,
}
