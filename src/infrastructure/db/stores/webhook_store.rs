use crate::infrastructure::db::dto::WebhookRow;
use crate::infrastructure::db::stores::StoreError;
use async_trait::async_trait;

#[async_trait]
pub trait WebhookStore: Send + Sync {
    /// Fetch a webhook by its ID. Returns `None` if it doesn't exist.
    async fn get(&self, webhook_id: uuid::Uuid) -> Result<Option<WebhookRow>, StoreError>;
    /// All webhooks, newest first.
    async fn list(&self) -> Result<Vec<WebhookRow>, StoreError>;
    /// Webhooks with `is_active = true`, regardless of their event list.
    async fn list_active(&self) -> Result<Vec<WebhookRow>, StoreError>;
    /// Create a webhook and return exactly what was stored in the database.
    async fn insert(&self, row: &WebhookRow) -> Result<WebhookRow, StoreError>;
    /// Delete a webhook by its ID. Returns `NotFound` if it doesn't exist.
    async fn delete(&self, webhook_id: uuid::Uuid) -> Result<(), StoreError>;
}
