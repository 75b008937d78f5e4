use crate::infrastructure::db::dto::ApiKeyRow;
use crate::infrastructure::db::postgres::PostgresDatabase;
use crate::infrastructure::db::stores::StoreError;
use crate::infrastructure::db::stores::api_key_store::ApiKeyStore;
use async_trait::async_trait;
use sqlx::PgConnection;
use time::OffsetDateTime;

#[derive(Clone)]
pub struct ApiKeyStorePostgres {
    db: std::sync::Arc<PostgresDatabase>,
}

impl ApiKeyStorePostgres {
    /// Build a Postgres-backed API key store.
    pub fn new(db: std::sync::Arc<PostgresDatabase>) -> Self {
        Self { db }
    }

    async fn list_impl_conn(conn: &mut PgConnection) -> Result<Vec<ApiKeyRow>, StoreError> {
        let rows = sqlx::query_as::<_, ApiKeyRow>(
            "SELECT
                id,
                name,
                key,
                permissions,
                is_active,
                last_used_at,
                created_at,
                expires_at
            FROM api_keys
            ORDER BY created_at DESC",
        )
        .fetch_all(&mut *conn)
        .await?;

        Ok(rows)
    }

    async fn insert_impl_conn(conn: &mut PgConnection, row: ApiKeyRow) -> Result<ApiKeyRow, StoreError> {
        let stored = sqlx::query_as::<_, ApiKeyRow>(
            "INSERT INTO api_keys (
                id,
                name,
                key,
                permissions,
                is_active,
                last_used_at,
                created_at,
                expires_at
            )
            VALUES ($1,$2,$3,$4,$5,$6,$7,$8)
            RETURNING
                id,
                name,
                key,
                permissions,
                is_active,
                last_used_at,
                created_at,
                expires_at",
        )
        .bind(row.id)
        .bind(&row.name)
        .bind(&row.key)
        .bind(&row.permissions)
        .bind(row.is_active)
        .bind(row.last_used_at)
        .bind(row.created_at)
        .bind(row.expires_at)
        .fetch_one(&mut *conn)
        .await?;

        Ok(stored)
    }

    async fn get_active_by_key_impl_conn(
        conn: &mut PgConnection,
        key: String,
    ) -> Result<Option<ApiKeyRow>, StoreError> {
        let row = sqlx::query_as::<_, ApiKeyRow>(
            "SELECT
                id,
                name,
                key,
                permissions,
                is_active,
                last_used_at,
                created_at,
                expires_at
            FROM api_keys
            WHERE key = $1 AND is_active = TRUE",
        )
        .bind(key)
        .fetch_optional(&mut *conn)
        .await?;

        Ok(row)
    }

    async fn touch_last_used_impl_conn(
        conn: &mut PgConnection,
        key_id: uuid::Uuid,
        at: OffsetDateTime,
    ) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE api_keys SET last_used_at = $2 WHERE id = $1")
            .bind(key_id)
            .bind(at)
            .execute(&mut *conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl ApiKeyStore for ApiKeyStorePostgres {
    async fn list(&self) -> Result<Vec<ApiKeyRow>, StoreError> {
        self.db
            .with_conn(|conn| Box::pin(Self::list_impl_conn(conn)))
            .await
    }

    async fn insert(&self, row: &ApiKeyRow) -> Result<ApiKeyRow, StoreError> {
        let row = row.clone();
        self.db
            .with_conn(move |conn| Box::pin(Self::insert_impl_conn(conn, row)))
            .await
    }

    async fn get_active_by_key(&self, key: &str) -> Result<Option<ApiKeyRow>, StoreError> {
        let key = key.to_string();
        self.db
            .with_conn(move |conn| Box::pin(Self::get_active_by_key_impl_conn(conn, key)))
            .await
    }

    async fn touch_last_used(
        &self,
        key_id: uuid::Uuid,
        at: OffsetDateTime,
    ) -> Result<(), StoreError> {
        self.db
            .with_conn(move |conn| Box::pin(Self::touch_last_used_impl_conn(conn, key_id, at)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::ApiKeyStorePostgres;
    use crate::infrastructure::db::dto::ApiKeyRow;
    use crate::infrastructure::db::postgres::PostgresDatabase;
    use crate::infrastructure::db::stores::api_key_store::ApiKeyStore;
    use std::sync::Arc;
    use time::OffsetDateTime;

    fn test_db_url() -> Option<String> {
        std::env::var("DATABASE_URL").ok()
    }

    #[tokio::test]
    async fn given_inactive_key_when_looked_up_should_not_be_returned() {
        let Some(url) = test_db_url() else {
            return;
        };
        let db = PostgresDatabase::connect(&url, 2).await.unwrap();
        db.migrate().await.unwrap();
        let store = ApiKeyStorePostgres::new(Arc::new(db));
        let now = OffsetDateTime::now_utc();
        let value = format!("eb_{}", uuid::Uuid::new_v4().simple());
        store
            .insert(&ApiKeyRow {
                id: uuid::Uuid::new_v4(),
                name: "disabled".to_string(),
                key: value.clone(),
                permissions: vec!["read".to_string()],
                is_active: false,
                last_used_at: None,
                created_at: now,
                expires_at: None,
            })
            .await
            .unwrap();

        assert!(store.get_active_by_key(&value).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn given_active_key_when_touched_should_record_last_used() {
        let Some(url) = test_db_url() else {
            return;
        };
        let db = PostgresDatabase::connect(&url, 2).await.unwrap();
        db.migrate().await.unwrap();
        let store = ApiKeyStorePostgres::new(Arc::new(db));
        let now = OffsetDateTime::now_utc();
        let value = format!("eb_{}", uuid::Uuid::new_v4().simple());
        let stored = store
            .insert(&ApiKeyRow {
                id: uuid::Uuid::new_v4(),
                name: "active".to_string(),
                key: value.clone(),
                permissions: vec!["read".to_string(), "write".to_string()],
                is_active: true,
                last_used_at: None,
                created_at: now,
                expires_at: None,
            })
            .await
            .unwrap();

        store.touch_last_used(stored.id, now).await.unwrap();

        let fetched = store.get_active_by_key(&value).await.unwrap().unwrap();
        assert!(fetched.last_used_at.is_some());
    }
}
