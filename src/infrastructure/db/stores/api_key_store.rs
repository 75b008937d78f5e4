use crate::infrastructure::db::dto::ApiKeyRow;
use crate::infrastructure::db::stores::StoreError;
use async_trait::async_trait;
use time::OffsetDateTime;

#[async_trait]
pub trait ApiKeyStore: Send + Sync {
    /// All keys, newest first.
    async fn list(&self) -> Result<Vec<ApiKeyRow>, StoreError>;
    /// Create an API key and return exactly what was stored in the database.
    async fn insert(&self, row: &ApiKeyRow) -> Result<ApiKeyRow, StoreError>;
    /// Fetch an active key by its exact value (used for auth). Expiry is checked by the caller.
    async fn get_active_by_key(&self, key: &str) -> Result<Option<ApiKeyRow>, StoreError>;
    /// Record that the key was just used.
    async fn touch_last_used(
        &self,
        key_id: uuid::Uuid,
        at: OffsetDateTime,
    ) -> Result<(), StoreError>;
}
