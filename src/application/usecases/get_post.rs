// Use case: get_post.

use crate::application::context::AppContext;
use crate::infrastructure::db::dto::PostRow;
use tracing::warn;

/// Fetches a post by slug and counts the view.
pub struct GetPostUseCase;

#[derive(Debug, PartialEq, Eq)]
pub enum GetPostError {
    NotFound,
    Storage(String),
}

impl GetPostUseCase {
    pub async fn execute(ctx: &AppContext, slug: &str) -> Result<PostRow, GetPostError> {
        // Step 1: Load the post.
        let mut row = ctx
            .repos
            .post
            .get_by_slug(slug)
            .await
            .map_err(|e| GetPostError::Storage(format!("{e:?}")))?
            .ok_or(GetPostError::NotFound)?;

        // Step 2: Count the view; a failed increment still serves the post.
        match ctx.repos.post.increment_views(row.id).await {
            Ok(views) => row.views = views,
            Err(err) => warn!(post_id = %row.id, error = %err, "post_view_not_counted"),
        }

        Ok(row)
    }
}
