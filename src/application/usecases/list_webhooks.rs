// Use case: list_webhooks.

use crate::application::context::AppContext;
use crate::infrastructure::db::dto::WebhookRow;

/// Placeholder shown instead of a stored secret.
pub const MASKED_SECRET: &str = "••••••••";

/// Lists webhooks with secrets replaced by a placeholder.
pub struct ListWebhooksUseCase;

#[derive(Debug)]
pub enum ListWebhooksError {
    Storage(String),
}

impl ListWebhooksUseCase {
    pub async fn execute(ctx: &AppContext) -> Result<Vec<WebhookRow>, ListWebhooksError> {
        let rows = ctx
            .repos
            .webhook
            .list()
            .await
            .map_err(|e| ListWebhooksError::Storage(format!("{e:?}")))?;

        Ok(rows
            .into_iter()
            .map(|row| WebhookRow {
                secret: row
                    .secret
                    .filter(|s| !s.is_empty())
                    .map(|_| MASKED_SECRET.to_string()),
                ..row
            })
            .collect())
    }
}
