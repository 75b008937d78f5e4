use crate::infrastructure::db::dto::AiGenerationRow;
use crate::infrastructure::db::stores::StoreError;
use async_trait::async_trait;

#[async_trait]
pub trait AiGenerationStore: Send + Sync {
    /// Record one provider call for usage tracking.
    async fn insert(&self, row: &AiGenerationRow) -> Result<AiGenerationRow, StoreError>;
}
