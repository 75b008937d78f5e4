use crate::infrastructure::db::dto::WebhookRow;
use crate::infrastructure::db::postgres::PostgresDatabase;
use crate::infrastructure::db::stores::StoreError;
use crate::infrastructure::db::stores::webhook_store::WebhookStore;
use async_trait::async_trait;
use sqlx::PgConnection;

#[derive(Clone)]
pub struct WebhookStorePostgres {
    db: std::sync::Arc<PostgresDatabase>,
}

impl WebhookStorePostgres {
    /// Build a Postgres-backed webhook store.
    pub fn new(db: std::sync::Arc<PostgresDatabase>) -> Self {
        Self { db }
    }

    async fn get_impl_conn(
        conn: &mut PgConnection,
        webhook_id: uuid::Uuid,
    ) -> Result<Option<WebhookRow>, StoreError> {
        let row = sqlx::query_as::<_, WebhookRow>(
            "SELECT id, name, url, secret, events, is_active, created_at
            FROM webhooks
            WHERE id = $1",
        )
        .bind(webhook_id)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(row)
    }

    async fn list_impl_conn(
        conn: &mut PgConnection,
        active_only: bool,
    ) -> Result<Vec<WebhookRow>, StoreError> {
        let rows = sqlx::query_as::<_, WebhookRow>(
            "SELECT id, name, url, secret, events, is_active, created_at
            FROM webhooks
            WHERE ($1 = FALSE OR is_active = TRUE)
            ORDER BY created_at DESC",
        )
        .bind(active_only)
        .fetch_all(&mut *conn)
        .await?;

        Ok(rows)
    }

    async fn insert_impl_conn(conn: &mut PgConnection, row: WebhookRow) -> Result<WebhookRow, StoreError> {
        let stored = sqlx::query_as::<_, WebhookRow>(
            "INSERT INTO webhooks (id, name, url, secret, events, is_active, created_at)
            VALUES ($1,$2,$3,$4,$5,$6,$7)
            RETURNING id, name, url, secret, events, is_active, created_at",
        )
        .bind(row.id)
        .bind(&row.name)
        .bind(&row.url)
        .bind(&row.secret)
        .bind(&row.events)
        .bind(row.is_active)
        .bind(row.created_at)
        .fetch_one(&mut *conn)
        .await?;

        Ok(stored)
    }

    async fn delete_impl_conn(conn: &mut PgConnection, webhook_id: uuid::Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM webhooks WHERE id = $1")
            .bind(webhook_id)
            .execute(&mut *conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl WebhookStore for WebhookStorePostgres {
    async fn get(&self, webhook_id: uuid::Uuid) -> Result<Option<WebhookRow>, StoreError> {
        self.db
            .with_conn(move |conn| Box::pin(Self::get_impl_conn(conn, webhook_id)))
            .await
    }

    async fn list(&self) -> Result<Vec<WebhookRow>, StoreError> {
        self.db
            .with_conn(|conn| Box::pin(Self::list_impl_conn(conn, false)))
            .await
    }

    async fn list_active(&self) -> Result<Vec<WebhookRow>, StoreError> {
        self.db
            .with_conn(|conn| Box::pin(Self::list_impl_conn(conn, true)))
            .await
    }

    async fn insert(&self, row: &WebhookRow) -> Result<WebhookRow, StoreError> {
        let row = row.clone();
        self.db
            .with_conn(move |conn| Box::pin(Self::insert_impl_conn(conn, row)))
            .await
    }

    async fn delete(&self, webhook_id: uuid::Uuid) -> Result<(), StoreError> {
        self.db
            .with_conn(move |conn| Box::pin(Self::delete_impl_conn(conn, webhook_id)))
            .await
    }
}
