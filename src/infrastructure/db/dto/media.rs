use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct MediaRow {
    pub id: uuid::Uuid,
    pub filename: String,
    pub original_name: Option<String>,
    pub url: String,
    pub media_type: String,
    pub size_bytes: i64,
    pub alt_text: Option<String>,
    pub uploaded_by: Option<uuid::Uuid>,
    pub created_at: OffsetDateTime,
}
