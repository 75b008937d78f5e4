// Use case: unregister_webhook.

use crate::application::context::AppContext;
use crate::infrastructure::db::stores::StoreError;

/// Removes a previously registered webhook.
pub struct UnregisterWebhookUseCase;

#[derive(Debug, PartialEq, Eq)]
pub enum UnregisterWebhookError {
    NotFound,
    Storage(String),
}

#[derive(Debug, Clone)]
pub struct UnregisterWebhookCommand {
    pub webhook_id: uuid::Uuid,
}

#[derive(Debug, Clone)]
pub struct UnregisterWebhookResult {
    pub deleted: bool,
}

impl UnregisterWebhookUseCase {
    /// Unregister a webhook by ID.
    pub async fn execute(
        ctx: &AppContext,
        cmd: UnregisterWebhookCommand,
    ) -> Result<UnregisterWebhookResult, UnregisterWebhookError> {
        // Step 1: Attempt delete in storage.
        let result = ctx.repos.webhook.delete(cmd.webhook_id).await;

        // Step 2: Map storage errors to use case errors.
        match result {
            Ok(()) => Ok(UnregisterWebhookResult { deleted: true }),
            Err(StoreError::NotFound) => Err(UnregisterWebhookError::NotFound),
            Err(err) => Err(UnregisterWebhookError::Storage(format!("{err:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{UnregisterWebhookCommand, UnregisterWebhookError, UnregisterWebhookUseCase};
    use crate::application::context::test_support::{seed_webhook, test_context};

    #[tokio::test]
    async fn given_existing_webhook_when_execute_should_delete() {
        let ctx = test_context();
        let hook = seed_webhook(&ctx, "http://localhost/h", None, &["post.created"], true).await;

        let result = UnregisterWebhookUseCase::execute(
            &ctx,
            UnregisterWebhookCommand {
                webhook_id: hook.id,
            },
        )
        .await
        .unwrap();

        assert!(result.deleted);
        assert!(ctx.repos.webhook.get(hook.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn given_missing_webhook_when_execute_should_return_not_found() {
        let ctx = test_context();

        let err = UnregisterWebhookUseCase::execute(
            &ctx,
            UnregisterWebhookCommand {
                webhook_id: uuid::Uuid::new_v4(),
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err, UnregisterWebhookError::NotFound);
    }
}
