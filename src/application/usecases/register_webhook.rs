// Use case: register_webhook.

use crate::application::context::AppContext;
use crate::domain::entities::webhook::WebhookEvent;
use crate::infrastructure::db::dto::WebhookRow;
use time::OffsetDateTime;

/// Registers a webhook that will receive post lifecycle callbacks.
pub struct RegisterWebhookUseCase;

#[derive(Debug, PartialEq, Eq)]
pub enum RegisterWebhookError {
    Validation(String),
    Storage(String),
}

#[derive(Debug, Clone)]
pub struct RegisterWebhookCommand {
    pub name: String,
    pub url: String,
    pub secret: Option<String>,
    pub events: Vec<String>,
    pub is_active: Option<bool>,
}

impl RegisterWebhookUseCase {
    /// Register a new webhook and return the stored row.
    pub async fn execute(
        ctx: &AppContext,
        cmd: RegisterWebhookCommand,
    ) -> Result<WebhookRow, RegisterWebhookError> {
        // Step 1: Validate name, target URL and event names.
        let name = cmd.name.trim();
        if name.is_empty() {
            return Err(RegisterWebhookError::Validation("name is required".to_string()));
        }
        let url = cmd.url.trim();
        let parsed = reqwest::Url::parse(url)
            .map_err(|_| RegisterWebhookError::Validation("url must be absolute".to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(RegisterWebhookError::Validation(
                "url must use http or https".to_string(),
            ));
        }
        let mut events: Vec<String> = Vec::with_capacity(cmd.events.len());
        for raw in &cmd.events {
            let Some(event) = WebhookEvent::parse(raw) else {
                return Err(RegisterWebhookError::Validation(format!("unknown event: {raw}")));
            };
            if !events.iter().any(|e| e == event.as_str()) {
                events.push(event.as_str().to_string());
            }
        }

        // Step 2: Build and persist the row.
        let row = WebhookRow {
            id: uuid::Uuid::new_v4(),
            name: name.to_string(),
            url: url.to_string(),
            secret: cmd.secret.filter(|s| !s.is_empty()),
            events,
            is_active: cmd.is_active.unwrap_or(true),
            created_at: OffsetDateTime::now_utc(),
        };
        ctx.repos
            .webhook
            .insert(&row)
            .await
            .map_err(|e| RegisterWebhookError::Storage(format!("{e:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::{RegisterWebhookCommand, RegisterWebhookError, RegisterWebhookUseCase};
    use crate::application::context::test_support::test_context;

    fn command(url: &str, events: &[&str]) -> RegisterWebhookCommand {
        RegisterWebhookCommand {
            name: "ci hook".to_string(),
            url: url.to_string(),
            secret: Some("s3cret".to_string()),
            events: events.iter().map(|e| e.to_string()).collect(),
            is_active: None,
        }
    }

    #[tokio::test]
    async fn given_valid_request_when_execute_should_register_active_webhook() {
        let ctx = test_context();

        let row = RegisterWebhookUseCase::execute(
            &ctx,
            command("https://example.com/webhook", &["post.created", "post.created"]),
        )
        .await
        .unwrap();

        assert!(row.is_active);
        assert_eq!(row.events, vec!["post.created".to_string()]);
        assert_eq!(ctx.repos.webhook.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn given_unknown_event_when_execute_should_reject() {
        let ctx = test_context();

        let err = RegisterWebhookUseCase::execute(
            &ctx,
            command("https://example.com/webhook", &["comment.created"]),
        )
        .await
        .unwrap_err();

        assert_eq!(
            err,
            RegisterWebhookError::Validation("unknown event: comment.created".to_string())
        );
    }

    #[tokio::test]
    async fn given_non_http_url_when_execute_should_reject() {
        let ctx = test_context();

        let err = RegisterWebhookUseCase::execute(&ctx, command("ftp://example.com", &[]))
            .await
            .unwrap_err();

        assert!(matches!(err, RegisterWebhookError::Validation(_)));
    }

    #[tokio::test]
    async fn given_empty_secret_when_execute_should_store_none() {
        let ctx = test_context();
        let mut cmd = command("http://localhost:9000/hook", &["post.deleted"]);
        cmd.secret = Some(String::new());

        let row = RegisterWebhookUseCase::execute(&ctx, cmd).await.unwrap();

        assert_eq!(row.secret, None);
    }
}
