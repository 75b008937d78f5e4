// Use case: create_post.

use crate::application::context::AppContext;
use crate::application::shared::post_view::PostView;
use crate::application::usecases::dispatch_webhook::{DispatchReport, DispatchWebhookUseCase};
use crate::domain::entities::post::{PostStatus, derive_excerpt, read_time_minutes};
use crate::domain::entities::webhook::WebhookEvent;
use crate::domain::value_objects::slug::slugify;
use crate::infrastructure::db::dto::PostRow;
use crate::infrastructure::db::stores::StoreError;
use time::OffsetDateTime;

/// Creates a post, derives its slug and metadata, and notifies subscribers.
pub struct CreatePostUseCase;

#[derive(Debug, PartialEq, Eq)]
pub enum CreatePostError {
    Validation(String),
    Conflict,
    Storage(String),
}

#[derive(Debug, Clone, Default)]
pub struct CreatePostCommand {
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub status: Option<String>,
    pub category_slug: Option<String>,
    pub tag_slugs: Option<Vec<String>>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub scheduled_at: Option<OffsetDateTime>,
    pub author_id: Option<uuid::Uuid>,
}

#[derive(Debug, Clone)]
pub struct CreatePostResult {
    pub post: PostRow,
    pub dispatches: Vec<DispatchReport>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl CreatePostUseCase {
    pub async fn execute(
        ctx: &AppContext,
        cmd: CreatePostCommand,
    ) -> Result<CreatePostResult, CreatePostError> {
        // Step 1: Validate required fields and the requested status.
        let title = cmd.title.trim().to_string();
        if title.is_empty() {
            return Err(CreatePostError::Validation("title is required".to_string()));
        }
        if cmd.content.trim().is_empty() {
            return Err(CreatePostError::Validation("content is required".to_string()));
        }
        let slug = slugify(&title);
        if slug.is_empty() {
            return Err(CreatePostError::Validation(
                "title must contain at least one letter or digit".to_string(),
            ));
        }
        let status = match cmd.status.as_deref() {
            None | Some("") => PostStatus::Draft,
            Some(raw) => PostStatus::parse(raw)
                .ok_or_else(|| CreatePostError::Validation(format!("invalid status: {raw}")))?,
        };
        if status == PostStatus::Scheduled && cmd.scheduled_at.is_none() {
            return Err(CreatePostError::Validation(
                "scheduled_at is required for scheduled posts".to_string(),
            ));
        }

        // Step 2: Derive excerpt, metadata and read time.
        let now = OffsetDateTime::now_utc();
        let excerpt = non_blank(cmd.excerpt).unwrap_or_else(|| derive_excerpt(&cmd.content));
        let row = PostRow {
            id: uuid::Uuid::new_v4(),
            meta_title: Some(non_blank(cmd.meta_title).unwrap_or_else(|| title.clone())),
            meta_description: Some(non_blank(cmd.meta_description).unwrap_or_else(|| excerpt.clone())),
            title,
            slug,
            read_time: read_time_minutes(&cmd.content),
            content: cmd.content,
            excerpt: Some(excerpt),
            featured_image: non_blank(cmd.featured_image),
            status: status.as_str().to_string(),
            category_slug: non_blank(cmd.category_slug),
            tag_slugs: cmd.tag_slugs.unwrap_or_default(),
            author_id: cmd.author_id,
            views: 0,
            published_at: status.publishes_from(None).then_some(now),
            scheduled_at: cmd.scheduled_at,
            created_at: now,
            updated_at: now,
        };

        // Step 3: Persist; a taken slug is a conflict.
        let stored = ctx.repos.post.insert(&row).await.map_err(|e| match e {
            StoreError::Conflict => CreatePostError::Conflict,
            _ => CreatePostError::Storage(format!("{e:?}")),
        })?;

        // Step 4: Notify subscribers.
        let payload = PostView::from(&stored).to_payload();
        let mut dispatches = vec![
            DispatchWebhookUseCase::execute(ctx, WebhookEvent::PostCreated, payload.clone()).await,
        ];
        if status.publishes_from(None) {
            dispatches
                .push(DispatchWebhookUseCase::execute(ctx, WebhookEvent::PostPublished, payload).await);
        }

        Ok(CreatePostResult {
            post: stored,
            dispatches,
        })
    }
}
