// Use case: update_post.

use crate::application::context::AppContext;
use crate::application::shared::post_view::PostView;
use crate::application::usecases::dispatch_webhook::{DispatchReport, DispatchWebhookUseCase};
use crate::domain::entities::post::{PostStatus, derive_excerpt, read_time_minutes};
use crate::domain::entities::webhook::WebhookEvent;
use crate::domain::value_objects::slug::slugify;
use crate::infrastructure::db::dto::PostRow;
use crate::infrastructure::db::stores::StoreError;
use time::OffsetDateTime;

/// Applies a partial update to a post addressed by slug.
pub struct UpdatePostUseCase;

#[derive(Debug, PartialEq, Eq)]
pub enum UpdatePostError {
    NotFound,
    Validation(String),
    Conflict,
    /// The post changed between read and write; nothing was written.
    Modified,
    Storage(String),
}

/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdatePostCommand {
    pub slug: String,
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub status: Option<String>,
    pub category_slug: Option<String>,
    pub tag_slugs: Option<Vec<String>>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub scheduled_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone)]
pub struct UpdatePostResult {
    pub post: PostRow,
    pub dispatches: Vec<DispatchReport>,
}

impl UpdatePostUseCase {
    pub async fn execute(
        ctx: &AppContext,
        cmd: UpdatePostCommand,
    ) -> Result<UpdatePostResult, UpdatePostError> {
        // Step 1: Load the current post.
        let existing = ctx
            .repos
            .post
            .get_by_slug(&cmd.slug)
            .await
            .map_err(|e| UpdatePostError::Storage(format!("{e:?}")))?
            .ok_or(UpdatePostError::NotFound)?;
        let previous_status = existing.status();
        let read_at = existing.updated_at;
        let mut row = existing;

        // Step 2: A new title means a new slug.
        if let Some(title) = cmd.title {
            let title = title.trim().to_string();
            let slug = slugify(&title);
            if slug.is_empty() {
                return Err(UpdatePostError::Validation(
                    "title must contain at least one letter or digit".to_string(),
                ));
            }
            row.title = title;
            row.slug = slug;
        }

        // Step 3: New content refreshes read time and, unless given, the excerpt.
        if let Some(content) = cmd.content {
            row.read_time = read_time_minutes(&content);
            if cmd.excerpt.is_none() {
                row.excerpt = Some(derive_excerpt(&content));
            }
            row.content = content;
        }
        if let Some(excerpt) = cmd.excerpt {
            row.excerpt = Some(excerpt);
        }
        if let Some(featured_image) = cmd.featured_image {
            row.featured_image = Some(featured_image).filter(|v| !v.is_empty());
        }
        if let Some(category_slug) = cmd.category_slug {
            row.category_slug = Some(category_slug).filter(|v| !v.is_empty());
        }
        if let Some(tag_slugs) = cmd.tag_slugs {
            row.tag_slugs = tag_slugs;
        }
        if let Some(meta_title) = cmd.meta_title {
            row.meta_title = Some(meta_title);
        }
        if let Some(meta_description) = cmd.meta_description {
            row.meta_description = Some(meta_description);
        }
        if cmd.scheduled_at.is_some() {
            row.scheduled_at = cmd.scheduled_at;
        }

        // Step 4: Status changes; publishing stamps `published_at` once per transition.
        let now = OffsetDateTime::now_utc();
        let next_status = match cmd.status.as_deref() {
            None => previous_status,
            Some(raw) => PostStatus::parse(raw)
                .ok_or_else(|| UpdatePostError::Validation(format!("invalid status: {raw}")))?,
        };
        if next_status == PostStatus::Scheduled && row.scheduled_at.is_none() {
            return Err(UpdatePostError::Validation(
                "scheduled_at is required for scheduled posts".to_string(),
            ));
        }
        let published_now = next_status.publishes_from(Some(previous_status));
        if published_now {
            row.published_at = Some(now);
        }
        row.status = next_status.as_str().to_string();
        row.updated_at = now;

        // Step 5: Persist against the version read in step 1.
        let stored = ctx.repos.post.update(&row, read_at).await.map_err(|e| match e {
            StoreError::Conflict => UpdatePostError::Conflict,
            StoreError::Stale => UpdatePostError::Modified,
            StoreError::NotFound => UpdatePostError::NotFound,
            _ => UpdatePostError::Storage(format!("{e:?}")),
        })?;

        // Step 6: Notify subscribers.
        let payload = PostView::from(&stored).to_payload();
        let mut dispatches = vec![
            DispatchWebhookUseCase::execute(ctx, WebhookEvent::PostUpdated, payload.clone()).await,
        ];
        if published_now {
            dispatches
                .push(DispatchWebhookUseCase::execute(ctx, WebhookEvent::PostPublished, payload).await);
        }

        Ok(UpdatePostResult {
            post: stored,
            dispatches,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{UpdatePostCommand, UpdatePostError, UpdatePostUseCase};
    use crate::application::context::AppContext;
    use crate::application::context::test_support::test_context;
    use crate::application::usecases::create_post::{CreatePostCommand, CreatePostUseCase};
    use crate::domain::entities::webhook::WebhookEvent;
    use crate::infrastructure::db::dto::PostRow;

    async fn seed(ctx: &AppContext, title: &str, status: &str) -> PostRow {
        CreatePostUseCase::execute(
            ctx,
            CreatePostCommand {
                title: title.to_string(),
                content: "original body".to_string(),
                status: Some(status.to_string()),
                ..CreatePostCommand::default()
            },
        )
        .await
        .unwrap()
        .post
    }

    #[tokio::test]
    async fn given_new_title_when_execute_should_rederive_slug() {
        let ctx = test_context();
        seed(&ctx, "First Title", "draft").await;

        let result = UpdatePostUseCase::execute(
            &ctx,
            UpdatePostCommand {
                slug: "first-title".to_string(),
                title: Some("Café & Açúcar!".to_string()),
                ..UpdatePostCommand::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(result.post.slug, "cafe-acucar");
        assert!(ctx.repos.post.get_by_slug("first-title").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn given_new_content_when_execute_should_refresh_read_time_and_excerpt() {
        let ctx = test_context();
        seed(&ctx, "Body", "draft").await;
        let content = "word ".repeat(401);

        let post = UpdatePostUseCase::execute(
            &ctx,
            UpdatePostCommand {
                slug: "body".to_string(),
                content: Some(content),
                ..UpdatePostCommand::default()
            },
        )
        .await
        .unwrap()
        .post;

        assert_eq!(post.read_time, 3);
        assert!(post.excerpt.unwrap().starts_with("word word"));
    }

    #[tokio::test]
    async fn given_draft_when_published_should_stamp_once_and_fire_published() {
        let ctx = test_context();
        seed(&ctx, "Draft", "draft").await;

        let result = UpdatePostUseCase::execute(
            &ctx,
            UpdatePostCommand {
                slug: "draft".to_string(),
                status: Some("published".to_string()),
                ..UpdatePostCommand::default()
            },
        )
        .await
        .unwrap();

        assert!(result.post.published_at.is_some());
        let events: Vec<_> = result.dispatches.iter().map(|d| d.event).collect();
        assert_eq!(events, vec![WebhookEvent::PostUpdated, WebhookEvent::PostPublished]);
    }

    #[tokio::test]
    async fn given_published_post_when_published_again_should_not_restamp() {
        let ctx = test_context();
        let original = seed(&ctx, "Live", "published").await;

        let result = UpdatePostUseCase::execute(
            &ctx,
            UpdatePostCommand {
                slug: "live".to_string(),
                status: Some("published".to_string()),
                content: Some("edited".to_string()),
                ..UpdatePostCommand::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(result.post.published_at, original.published_at);
        let events: Vec<_> = result.dispatches.iter().map(|d| d.event).collect();
        assert_eq!(events, vec![WebhookEvent::PostUpdated]);
    }

    #[tokio::test]
    async fn given_archived_post_when_updated_should_keep_published_at() {
        let ctx = test_context();
        let original = seed(&ctx, "Old News", "published").await;

        let post = UpdatePostUseCase::execute(
            &ctx,
            UpdatePostCommand {
                slug: "old-news".to_string(),
                status: Some("archived".to_string()),
                ..UpdatePostCommand::default()
            },
        )
        .await
        .unwrap()
        .post;

        assert_eq!(post.status, "archived");
        assert_eq!(post.published_at, original.published_at);
    }

    #[tokio::test]
    async fn given_title_of_other_post_when_execute_should_return_conflict() {
        let ctx = test_context();
        seed(&ctx, "Alpha", "draft").await;
        seed(&ctx, "Beta", "draft").await;

        let err = UpdatePostUseCase::execute(
            &ctx,
            UpdatePostCommand {
                slug: "beta".to_string(),
                title: Some("Alpha".to_string()),
                ..UpdatePostCommand::default()
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err, UpdatePostError::Conflict);
    }

    #[tokio::test]
    async fn given_concurrent_publishes_when_executed_should_stamp_and_fire_once() {
        let ctx = test_context();
        seed(&ctx, "Race", "draft").await;
        let publish = || UpdatePostCommand {
            slug: "race".to_string(),
            status: Some("published".to_string()),
            ..UpdatePostCommand::default()
        };

        let (first, second) = tokio::join!(
            UpdatePostUseCase::execute(&ctx, publish()),
            UpdatePostUseCase::execute(&ctx, publish()),
        );

        let results = [first, second];
        let winners: Vec<_> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
        let published_events = winners
            .iter()
            .flat_map(|r| r.dispatches.iter())
            .filter(|d| d.event == WebhookEvent::PostPublished)
            .count();
        assert_eq!(published_events, 1);
        let stored = ctx.repos.post.get_by_slug("race").await.unwrap().unwrap();
        let winner = winners
            .iter()
            .find(|r| r.dispatches.iter().any(|d| d.event == WebhookEvent::PostPublished))
            .unwrap();
        assert_eq!(stored.published_at, winner.post.published_at);
        for result in &results {
            if let Err(err) = result {
                assert_eq!(*err, UpdatePostError::Modified);
            }
        }
    }

    #[tokio::test]
    async fn given_post_changed_after_read_when_written_should_be_rejected_as_stale() {
        let ctx = test_context();
        let original = seed(&ctx, "Shared", "draft").await;
        let mut edited = original.clone();
        edited.content = "edited by author".to_string();
        edited.updated_at = original.updated_at + time::Duration::seconds(1);
        ctx.repos.post.update(&edited, original.updated_at).await.unwrap();

        let mut stale = original.clone();
        stale.title = "Overwrite".to_string();
        let err = ctx
            .repos
            .post
            .update(&stale, original.updated_at)
            .await
            .unwrap_err();

        assert_eq!(err, crate::infrastructure::db::stores::StoreError::Stale);
        let stored = ctx.repos.post.get_by_slug("shared").await.unwrap().unwrap();
        assert_eq!(stored.content, "edited by author");
        assert_eq!(stored.title, "Shared");
    }

    #[tokio::test]
    async fn given_unknown_slug_when_execute_should_return_not_found() {
        let ctx = test_context();

        let err = UpdatePostUseCase::execute(
            &ctx,
            UpdatePostCommand {
                slug: "ghost".to_string(),
                ..UpdatePostCommand::default()
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err, UpdatePostError::NotFound);
    }
}
