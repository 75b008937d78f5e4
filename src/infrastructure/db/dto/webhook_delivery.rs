use time::OffsetDateTime;

/// One delivery attempt. Written once, never retried or updated.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct WebhookDeliveryRow {
    pub id: uuid::Uuid,
    pub webhook_id: uuid::Uuid,
    pub event_name: String,
    pub success: bool,
    pub response_status: Option<i32>,
    pub error: Option<String>,
    pub created_at: OffsetDateTime,
}
