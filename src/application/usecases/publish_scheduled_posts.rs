// Use case: publish_scheduled_posts.

use crate::application::context::AppContext;
use crate::application::shared::post_view::PostView;
use crate::application::usecases::dispatch_webhook::DispatchWebhookUseCase;
use crate::domain::entities::webhook::WebhookEvent;
use crate::domain::value_objects::timestamps::Timestamp;
use time::Duration;
use tracing::{debug, info, warn};

/// Publishes scheduled posts once their `scheduled_at` has passed.
pub struct PublishScheduledPostsUseCase;

#[derive(Debug)]
pub enum PublishScheduledPostsError {
    Storage(String),
}

impl PublishScheduledPostsUseCase {
    /// Run one publishing pass and return the number of posts published.
    pub async fn run_once(
        ctx: &AppContext,
        now: Timestamp,
        limit: u32,
    ) -> Result<usize, PublishScheduledPostsError> {
        // Step 1: Find scheduled posts that are due.
        let due = ctx
            .repos
            .post
            .list_due_scheduled(now.as_inner(), limit)
            .await
            .map_err(|e| PublishScheduledPostsError::Storage(format!("{e:?}")))?;

        // Step 2: Publish each one that is still scheduled, then announce it.
        let mut published = 0;
        for row in due {
            let stored = match ctx.repos.post.publish_if_due(row.id, now.as_inner()).await {
                Ok(Some(stored)) => stored,
                Ok(None) => {
                    debug!(post_id = %row.id, "scheduled_post_no_longer_due");
                    continue;
                }
                Err(err) => {
                    warn!(post_id = %row.id, error = %err, "scheduled_publish_failed");
                    continue;
                }
            };
            DispatchWebhookUseCase::execute(
                ctx,
                WebhookEvent::PostPublished,
                PostView::from(&stored).to_payload(),
            )
            .await;
            info!(post_id = %stored.id, slug = %stored.slug, "scheduled_post_published");
            published += 1;
        }

        Ok(published)
    }

    /// Run publishing passes at a fixed interval until shutdown.
    pub async fn run_loop(
        ctx: &AppContext,
        poll_interval: Duration,
        limit: u32,
        mut shutdown: tokio::sync::watch::Receiver<bool>,
    ) {
        let sleep_duration =
            std::time::Duration::from_millis(poll_interval.whole_milliseconds().max(0) as u64);

        // Step 1: Loop until shutdown is triggered.
        loop {
            if *shutdown.borrow() {
                break;
            }

            // Step 2: Run a pass; a failed pass is retried on the next tick.
            if let Err(err) = Self::run_once(ctx, Timestamp::now_utc(), limit).await {
                warn!(error = ?err, "scheduled_publish_pass_failed");
            }

            // Step 3: Sleep until the next tick or shutdown.
            tokio::select! {
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        break;
                    }
                }
                _ = tokio::time::sleep(sleep_duration) => {}
            }
        }
    }
}
