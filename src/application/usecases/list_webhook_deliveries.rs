// Use case: list_webhook_deliveries.

use crate::application::context::AppContext;
use crate::infrastructure::db::dto::WebhookDeliveryRow;

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 200;

/// Returns the most recent delivery attempts for one webhook.
pub struct ListWebhookDeliveriesUseCase;

#[derive(Debug, PartialEq, Eq)]
pub enum ListWebhookDeliveriesError {
    NotFound,
    Storage(String),
}

impl ListWebhookDeliveriesUseCase {
    pub async fn execute(
        ctx: &AppContext,
        webhook_id: uuid::Uuid,
        limit: Option<i64>,
    ) -> Result<Vec<WebhookDeliveryRow>, ListWebhookDeliveriesError> {
        // Step 1: Ensure the webhook exists.
        ctx.repos
            .webhook
            .get(webhook_id)
            .await
            .map_err(|e| ListWebhookDeliveriesError::Storage(format!("{e:?}")))?
            .ok_or(ListWebhookDeliveriesError::NotFound)?;

        // Step 2: Load the newest attempts.
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        ctx.repos
            .webhook_delivery
            .list_by_webhook(webhook_id, limit)
            .await
            .map_err(|e| ListWebhookDeliveriesError::Storage(format!("{e:?}")))
    }
}
