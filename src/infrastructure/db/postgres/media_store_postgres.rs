use crate::infrastructure::db::dto::MediaRow;
use crate::infrastructure::db::postgres::PostgresDatabase;
use crate::infrastructure::db::stores::StoreError;
use crate::infrastructure::db::stores::media_store::MediaStore;
use async_trait::async_trait;
use sqlx::PgConnection;

#[derive(Clone)]
pub struct MediaStorePostgres {
    db: std::sync::Arc<PostgresDatabase>,
}

impl MediaStorePostgres {
    /// Build a Postgres-backed media store.
    pub fn new(db: std::sync::Arc<PostgresDatabase>) -> Self {
        Self { db }
    }

    async fn list_impl_conn(
        conn: &mut PgConnection,
        media_type: Option<String>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<MediaRow>, StoreError> {
        let rows = sqlx::query_as::<_, MediaRow>(
            "SELECT
                id,
                filename,
                original_name,
                url,
                media_type,
                size_bytes,
                alt_text,
                uploaded_by,
                created_at
            FROM media
            WHERE ($1::text IS NULL OR media_type = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3",
        )
        .bind(media_type)
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *conn)
        .await?;

        Ok(rows)
    }

    async fn insert_impl_conn(conn: &mut PgConnection, row: MediaRow) -> Result<MediaRow, StoreError> {
        let stored = sqlx::query_as::<_, MediaRow>(
            "INSERT INTO media (
                id,
                filename,
                original_name,
                url,
                media_type,
                size_bytes,
                alt_text,
                uploaded_by,
                created_at
            )
            VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9)
            RETURNING
                id,
                filename,
                original_name,
                url,
                media_type,
                size_bytes,
                alt_text,
                uploaded_by,
                created_at",
        )
        .bind(row.id)
        .bind(&row.filename)
        .bind(&row.original_name)
        .bind(&row.url)
        .bind(&row.media_type)
        .bind(row.size_bytes)
        .bind(&row.alt_text)
        .bind(row.uploaded_by)
        .bind(row.created_at)
        .fetch_one(&mut *conn)
        .await?;

        Ok(stored)
    }
}

#[async_trait]
impl MediaStore for MediaStorePostgres {
    async fn list(
        &self,
        media_type: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<MediaRow>, StoreError> {
        let media_type = media_type.map(str::to_string);
        self.db
            .with_conn(move |conn| Box::pin(Self::list_impl_conn(conn, media_type, limit, offset)))
            .await
    }

    async fn insert(&self, row: &MediaRow) -> Result<MediaRow, StoreError> {
        let row = row.clone();
        self.db
            .with_conn(move |conn| Box::pin(Self::insert_impl_conn(conn, row)))
            .await
    }
}
