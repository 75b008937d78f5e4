use crate::infrastructure::db::dto::MediaRow;
use crate::infrastructure::db::stores::StoreError;
use async_trait::async_trait;

#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Newest media first, optionally restricted to one media type.
    async fn list(
        &self,
        media_type: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<MediaRow>, StoreError>;
    async fn insert(&self, row: &MediaRow) -> Result<MediaRow, StoreError>;
}
