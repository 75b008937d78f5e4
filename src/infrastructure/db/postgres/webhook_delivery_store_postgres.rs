use crate::infrastructure::db::dto::WebhookDeliveryRow;
use crate::infrastructure::db::postgres::PostgresDatabase;
use crate::infrastructure::db::stores::StoreError;
use crate::infrastructure::db::stores::webhook_delivery_store::WebhookDeliveryStore;
use async_trait::async_trait;
use sqlx::PgConnection;

#[derive(Clone)]
pub struct WebhookDeliveryStorePostgres {
    db: std::sync::Arc<PostgresDatabase>,
}

impl WebhookDeliveryStorePostgres {
    /// Build a Postgres-backed webhook delivery store.
    pub fn new(db: std::sync::Arc<PostgresDatabase>) -> Self {
        Self { db }
    }

    async fn insert_impl_conn(
        conn: &mut PgConnection,
        row: WebhookDeliveryRow,
    ) -> Result<WebhookDeliveryRow, StoreError> {
        let stored = sqlx::query_as::<_, WebhookDeliveryRow>(
            "INSERT INTO webhook_deliveries (
                id,
                webhook_id,
                event_name,
                success,
                response_status,
                error,
                created_at
            )
            VALUES ($1,$2,$3,$4,$5,$6,$7)
            RETURNING
                id,
                webhook_id,
                event_name,
                success,
                response_status,
                error,
                created_at",
        )
        .bind(row.id)
        .bind(row.webhook_id)
        .bind(&row.event_name)
        .bind(row.success)
        .bind(row.response_status)
        .bind(&row.error)
        .bind(row.created_at)
        .fetch_one(&mut *conn)
        .await?;

        Ok(stored)
    }

    async fn list_by_webhook_impl_conn(
        conn: &mut PgConnection,
        webhook_id: uuid::Uuid,
        limit: i64,
    ) -> Result<Vec<WebhookDeliveryRow>, StoreError> {
        let rows = sqlx::query_as::<_, WebhookDeliveryRow>(
            "SELECT
                id,
                webhook_id,
                event_name,
                success,
                response_status,
                error,
                created_at
            FROM webhook_deliveries
            WHERE webhook_id = $1
            ORDER BY created_at DESC
            LIMIT $2",
        )
        .bind(webhook_id)
        .bind(limit)
        .fetch_all(&mut *conn)
        .await?;

        Ok(rows)
    }
}

#[async_trait]
impl WebhookDeliveryStore for WebhookDeliveryStorePostgres {
    async fn insert(&self, row: &WebhookDeliveryRow) -> Result<WebhookDeliveryRow, StoreError> {
        let row = row.clone();
        self.db
            .with_conn(move |conn| Box::pin(Self::insert_impl_conn(conn, row)))
            .await
    }

    async fn list_by_webhook(
        &self,
        webhook_id: uuid::Uuid,
        limit: i64,
    ) -> Result<Vec<WebhookDeliveryRow>, StoreError> {
        self.db
            .with_conn(move |conn| {
                Box::pin(Self::list_by_webhook_impl_conn(conn, webhook_id, limit))
            })
            .await
    }
}
