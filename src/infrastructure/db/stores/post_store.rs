use crate::infrastructure::db::dto::{PostFilter, PostRow};
use crate::infrastructure::db::stores::StoreError;
use async_trait::async_trait;
use time::OffsetDateTime;

#[async_trait]
pub trait PostStore: Send + Sync {
    /// Fetch a post by slug. Returns `None` if it doesn't exist.
    async fn get_by_slug(&self, slug: &str) -> Result<Option<PostRow>, StoreError>;
    /// One page of posts matching the filter, newest first, plus the filtered total.
    async fn list(&self, filter: &PostFilter) -> Result<(Vec<PostRow>, i64), StoreError>;
    /// Create a post and return exactly what was stored. Duplicate slugs yield `Conflict`.
    async fn insert(&self, row: &PostRow) -> Result<PostRow, StoreError>;
    /// Overwrite a post by ID, only if its `updated_at` still equals `read_at`.
    /// A row changed in between yields `Stale`.
    async fn update(&self, row: &PostRow, read_at: OffsetDateTime)
    -> Result<PostRow, StoreError>;
    /// Delete a post by slug and return the removed row.
    async fn delete_by_slug(&self, slug: &str) -> Result<PostRow, StoreError>;
    /// Bump the view counter and return the new value.
    async fn increment_views(&self, post_id: uuid::Uuid) -> Result<i64, StoreError>;
    /// Scheduled posts whose `scheduled_at` is at or before `now`.
    async fn list_due_scheduled(
        &self,
        now: OffsetDateTime,
        limit: u32,
    ) -> Result<Vec<PostRow>, StoreError>;
    /// Publish the post if it is still scheduled and due at `now`. `None` when it no longer is.
    async fn publish_if_due(
        &self,
        post_id: uuid::Uuid,
        now: OffsetDateTime,
    ) -> Result<Option<PostRow>, StoreError>;
}
