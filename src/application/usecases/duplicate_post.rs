// Use case: duplicate_post.

use crate::application::context::AppContext;
use crate::application::shared::post_view::PostView;
use crate::application::usecases::dispatch_webhook::{DispatchReport, DispatchWebhookUseCase};
use crate::domain::entities::post::PostStatus;
use crate::domain::entities::webhook::WebhookEvent;
use crate::infrastructure::db::dto::PostRow;
use crate::infrastructure::db::stores::StoreError;
use time::OffsetDateTime;

/// Copies a post into a new draft.
pub struct DuplicatePostUseCase;

#[derive(Debug, PartialEq, Eq)]
pub enum DuplicatePostError {
    NotFound,
    Conflict,
    Storage(String),
}

#[derive(Debug, Clone)]
pub struct DuplicatePostResult {
    pub post: PostRow,
    pub dispatch: DispatchReport,
}

impl DuplicatePostUseCase {
    pub async fn execute(
        ctx: &AppContext,
        slug: &str,
        author_id: Option<uuid::Uuid>,
    ) -> Result<DuplicatePostResult, DuplicatePostError> {
        // Step 1: Load the source post.
        let source = ctx
            .repos
            .post
            .get_by_slug(slug)
            .await
            .map_err(|e| DuplicatePostError::Storage(format!("{e:?}")))?
            .ok_or(DuplicatePostError::NotFound)?;

        // Step 2: Build the draft copy with a time-suffixed slug.
        let now = OffsetDateTime::now_utc();
        let millis = now.unix_timestamp_nanos() / 1_000_000;
        let copy = PostRow {
            id: uuid::Uuid::new_v4(),
            title: format!("{} (copy)", source.title),
            slug: format!("{}-{millis}", source.slug),
            status: PostStatus::Draft.as_str().to_string(),
            author_id: author_id.or(source.author_id),
            views: 0,
            published_at: None,
            scheduled_at: None,
            created_at: now,
            updated_at: now,
            ..source
        };

        // Step 3: Persist and announce it.
        let stored = ctx.repos.post.insert(&copy).await.map_err(|e| match e {
            StoreError::Conflict => DuplicatePostError::Conflict,
            _ => DuplicatePostError::Storage(format!("{e:?}")),
        })?;
        let dispatch = DispatchWebhookUseCase::execute(
            ctx,
            WebhookEvent::PostCreated,
            PostView::from(&stored).to_payload(),
        )
        .await;

        Ok(DuplicatePostResult {
            post: stored,
            dispatch,
        })
    }
}
