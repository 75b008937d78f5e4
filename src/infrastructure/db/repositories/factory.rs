use std::sync::Arc;

use crate::infrastructure::db::database::{Database, DatabaseError};
use crate::infrastructure::db::memory::{
    AiGenerationStoreMemory, ApiKeyStoreMemory, CategoryStoreMemory, MediaStoreMemory,
    PostStoreMemory, TagStoreMemory, WebhookDeliveryStoreMemory, WebhookStoreMemory,
};
use crate::infrastructure::db::postgres::PostgresDatabase;
use crate::infrastructure::db::postgres::ai_generation_store_postgres::AiGenerationStorePostgres;
use crate::infrastructure::db::postgres::api_key_store_postgres::ApiKeyStorePostgres;
use crate::infrastructure::db::postgres::media_store_postgres::MediaStorePostgres;
use crate::infrastructure::db::postgres::post_store_postgres::PostStorePostgres;
use crate::infrastructure::db::postgres::taxonomy_store_postgres::{
    CategoryStorePostgres, TagStorePostgres,
};
use crate::infrastructure::db::postgres::webhook_delivery_store_postgres::WebhookDeliveryStorePostgres;
use crate::infrastructure::db::postgres::webhook_store_postgres::WebhookStorePostgres;
use crate::infrastructure::db::stores::ai_generation_store::AiGenerationStore;
use crate::infrastructure::db::stores::api_key_store::ApiKeyStore;
use crate::infrastructure::db::stores::media_store::MediaStore;
use crate::infrastructure::db::stores::post_store::PostStore;
use crate::infrastructure::db::stores::taxonomy_store::{CategoryStore, TagStore};
use crate::infrastructure::db::stores::webhook_delivery_store::WebhookDeliveryStore;
use crate::infrastructure::db::stores::webhook_store::WebhookStore;

#[derive(Clone)]
pub struct Repositories {
    pub db: Option<Arc<PostgresDatabase>>,
    pub post: Arc<dyn PostStore>,
    pub category: Arc<dyn CategoryStore>,
    pub tag: Arc<dyn TagStore>,
    pub media: Arc<dyn MediaStore>,
    pub api_key: Arc<dyn ApiKeyStore>,
    pub webhook: Arc<dyn WebhookStore>,
    pub webhook_delivery: Arc<dyn WebhookDeliveryStore>,
    pub ai_generation: Arc<dyn AiGenerationStore>,
}

impl Repositories {
    /// Build all stores backed by Postgres.
    pub fn postgres(db: Arc<PostgresDatabase>) -> Self {
        Self {
            db: Some(db.clone()),
            post: Arc::new(PostStorePostgres::new(db.clone())),
            category: Arc::new(CategoryStorePostgres::new(db.clone())),
            tag: Arc::new(TagStorePostgres::new(db.clone())),
            media: Arc::new(MediaStorePostgres::new(db.clone())),
            api_key: Arc::new(ApiKeyStorePostgres::new(db.clone())),
            webhook: Arc::new(WebhookStorePostgres::new(db.clone())),
            webhook_delivery: Arc::new(WebhookDeliveryStorePostgres::new(db.clone())),
            ai_generation: Arc::new(AiGenerationStorePostgres::new(db)),
        }
    }

    /// Build all stores in process memory. Nothing survives a restart.
    pub fn in_memory() -> Self {
        Self {
            db: None,
            post: Arc::new(PostStoreMemory::default()),
            category: Arc::new(CategoryStoreMemory::default()),
            tag: Arc::new(TagStoreMemory::default()),
            media: Arc::new(MediaStoreMemory::default()),
            api_key: Arc::new(ApiKeyStoreMemory::default()),
            webhook: Arc::new(WebhookStoreMemory::default()),
            webhook_delivery: Arc::new(WebhookDeliveryStoreMemory::default()),
            ai_generation: Arc::new(AiGenerationStoreMemory::default()),
        }
    }

    /// Execute a raw SQL statement. The memory backend has no SQL and always succeeds.
    pub async fn execute(&self, query: &str) -> Result<u64, DatabaseError> {
        let Some(db) = self.db.as_ref() else {
            return Ok(0);
        };
        db.execute(query).await
    }
}
