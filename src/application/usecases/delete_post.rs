// Use case: delete_post.

use crate::application::context::AppContext;
use crate::application::shared::post_view::PostView;
use crate::application::usecases::dispatch_webhook::{DispatchReport, DispatchWebhookUseCase};
use crate::domain::entities::webhook::WebhookEvent;
use crate::infrastructure::db::stores::StoreError;

/// Deletes a post by slug and announces the removal.
pub struct DeletePostUseCase;

#[derive(Debug, PartialEq, Eq)]
pub enum DeletePostError {
    NotFound,
    Storage(String),
}

#[derive(Debug, Clone)]
pub struct DeletePostResult {
    pub deleted: PostView,
    pub dispatch: DispatchReport,
}

impl DeletePostUseCase {
    pub async fn execute(ctx: &AppContext, slug: &str) -> Result<DeletePostResult, DeletePostError> {
        // Step 1: Remove the row.
        let removed = ctx.repos.post.delete_by_slug(slug).await.map_err(|e| match e {
            StoreError::NotFound => DeletePostError::NotFound,
            _ => DeletePostError::Storage(format!("{e:?}")),
        })?;

        // Step 2: Notify subscribers with the removed post.
        let deleted = PostView::from(&removed);
        let dispatch =
            DispatchWebhookUseCase::execute(ctx, WebhookEvent::PostDeleted, deleted.to_payload()).await;

        Ok(DeletePostResult { deleted, dispatch })
    }
}

#[cfg(test)]
mod tests {
    use super::{DeletePostError, DeletePostUseCase};
    use crate::application::context::test_support::test_context;
    use crate::application::usecases::create_post::{CreatePostCommand, CreatePostUseCase};
    use crate::domain::entities::webhook::WebhookEvent;

    #[tokio::test]
    async fn given_existing_post_when_execute_should_delete_and_fire_deleted() {
        let ctx = test_context();
        CreatePostUseCase::execute(
            &ctx,
            CreatePostCommand {
                title: "Gone Soon".to_string(),
                content: "bye".to_string(),
                ..CreatePostCommand::default()
            },
        )
        .await
        .unwrap();

        let result = DeletePostUseCase::execute(&ctx, "gone-soon").await.unwrap();

        assert_eq!(result.deleted.slug, "gone-soon");
        assert_eq!(result.dispatch.event, WebhookEvent::PostDeleted);
        assert!(ctx.repos.post.get_by_slug("gone-soon").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn given_unknown_slug_when_execute_should_return_not_found() {
        let ctx = test_context();

        let err = DeletePostUseCase::execute(&ctx, "nothing").await.unwrap_err();

        assert_eq!(err, DeletePostError::NotFound);
    }
}
