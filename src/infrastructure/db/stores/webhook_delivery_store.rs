use crate::infrastructure::db::dto::WebhookDeliveryRow;
use crate::infrastructure::db::stores::StoreError;
use async_trait::async_trait;

#[async_trait]
pub trait WebhookDeliveryStore: Send + Sync {
    /// Append one delivery outcome.
    async fn insert(&self, row: &WebhookDeliveryRow) -> Result<WebhookDeliveryRow, StoreError>;
    /// Most recent outcomes for one webhook, newest first.
    async fn list_by_webhook(
        &self,
        webhook_id: uuid::Uuid,
        limit: i64,
    ) -> Result<Vec<WebhookDeliveryRow>, StoreError>;
}
