use crate::infrastructure::db::dto::{CategoryRow, TagRow};
use crate::infrastructure::db::stores::StoreError;
use async_trait::async_trait;

#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// All categories ordered by name.
    async fn list(&self) -> Result<Vec<CategoryRow>, StoreError>;
    /// Create a category. Duplicate slugs yield `Conflict`.
    async fn insert(&self, row: &CategoryRow) -> Result<CategoryRow, StoreError>;
}

#[async_trait]
pub trait TagStore: Send + Sync {
    /// All tags ordered by name.
    async fn list(&self) -> Result<Vec<TagRow>, StoreError>;
    /// Create a tag. Duplicate slugs yield `Conflict`.
    async fn insert(&self, row: &TagRow) -> Result<TagRow, StoreError>;
}
