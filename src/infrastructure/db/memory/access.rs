use super::lock;
use crate::infrastructure::db::dto::{AiGenerationRow, ApiKeyRow, WebhookDeliveryRow, WebhookRow};
use crate::infrastructure::db::stores::StoreError;
use crate::infrastructure::db::stores::ai_generation_store::AiGenerationStore;
use crate::infrastructure::db::stores::api_key_store::ApiKeyStore;
use crate::infrastructure::db::stores::webhook_delivery_store::WebhookDeliveryStore;
use crate::infrastructure::db::stores::webhook_store::WebhookStore;
use async_trait::async_trait;
use std::sync::Mutex;
use time::OffsetDateTime;

#[derive(Default)]
pub struct ApiKeyStoreMemory {
    rows: Mutex<Vec<ApiKeyRow>>,
}

#[async_trait]
impl ApiKeyStore for ApiKeyStoreMemory {
    async fn list(&self) -> Result<Vec<ApiKeyRow>, StoreError> {
        let mut rows = lock(&self.rows)?.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn insert(&self, row: &ApiKeyRow) -> Result<ApiKeyRow, StoreError> {
        let mut rows = lock(&self.rows)?;
        if rows.iter().any(|existing| existing.key == row.key) {
            return Err(StoreError::Conflict);
        }
        rows.push(row.clone());
        Ok(row.clone())
    }

    async fn get_active_by_key(&self, key: &str) -> Result<Option<ApiKeyRow>, StoreError> {
        let rows = lock(&self.rows)?;
        Ok(rows
            .iter()
            .find(|row| row.key == key && row.is_active)
            .cloned())
    }

    async fn touch_last_used(
        &self,
        key_id: uuid::Uuid,
        at: OffsetDateTime,
    ) -> Result<(), StoreError> {
        let mut rows = lock(&self.rows)?;
        let row = rows
            .iter_mut()
            .find(|row| row.id == key_id)
            .ok_or(StoreError::NotFound)?;
        row.last_used_at = Some(at);
        Ok(())
    }
}

#[derive(Default)]
pub struct WebhookStoreMemory {
    rows: Mutex<Vec<WebhookRow>>,
}

#[async_trait]
impl WebhookStore for WebhookStoreMemory {
    async fn get(&self, webhook_id: uuid::Uuid) -> Result<Option<WebhookRow>, StoreError> {
        let rows = lock(&self.rows)?;
        Ok(rows.iter().find(|row| row.id == webhook_id).cloned())
    }

    async fn list(&self) -> Result<Vec<WebhookRow>, StoreError> {
        let mut rows = lock(&self.rows)?.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn list_active(&self) -> Result<Vec<WebhookRow>, StoreError> {
        let rows = self.list().await?;
        Ok(rows.into_iter().filter(|row| row.is_active).collect())
    }

    async fn insert(&self, row: &WebhookRow) -> Result<WebhookRow, StoreError> {
        lock(&self.rows)?.push(row.clone());
        Ok(row.clone())
    }

    async fn delete(&self, webhook_id: uuid::Uuid) -> Result<(), StoreError> {
        let mut rows = lock(&self.rows)?;
        let before = rows.len();
        rows.retain(|row| row.id != webhook_id);
        if rows.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct WebhookDeliveryStoreMemory {
    rows: Mutex<Vec<WebhookDeliveryRow>>,
}

#[async_trait]
impl WebhookDeliveryStore for WebhookDeliveryStoreMemory {
    async fn insert(&self, row: &WebhookDeliveryRow) -> Result<WebhookDeliveryRow, StoreError> {
        lock(&self.rows)?.push(row.clone());
        Ok(row.clone())
    }

    async fn list_by_webhook(
        &self,
        webhook_id: uuid::Uuid,
        limit: i64,
    ) -> Result<Vec<WebhookDeliveryRow>, StoreError> {
        let rows = lock(&self.rows)?;
        let mut matching: Vec<WebhookDeliveryRow> = rows
            .iter()
            .filter(|row| row.webhook_id == webhook_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matching.truncate(limit.max(0) as usize);
        Ok(matching)
    }
}

#[derive(Default)]
pub struct AiGenerationStoreMemory {
    rows: Mutex<Vec<AiGenerationRow>>,
}

impl AiGenerationStoreMemory {
    /// Everything recorded so far, oldest first.
    pub fn snapshot(&self) -> Vec<AiGenerationRow> {
        self.rows.lock().map(|rows| rows.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl AiGenerationStore for AiGenerationStoreMemory {
    async fn insert(&self, row: &AiGenerationRow) -> Result<AiGenerationRow, StoreError> {
        lock(&self.rows)?.push(row.clone());
        Ok(row.clone())
    }
}
