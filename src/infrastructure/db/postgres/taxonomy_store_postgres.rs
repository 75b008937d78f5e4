use crate::infrastructure::db::dto::{CategoryRow, TagRow};
use crate::infrastructure::db::postgres::PostgresDatabase;
use crate::infrastructure::db::stores::StoreError;
use crate::infrastructure::db::stores::taxonomy_store::{CategoryStore, TagStore};
use async_trait::async_trait;
use sqlx::PgConnection;

#[derive(Clone)]
pub struct CategoryStorePostgres {
    db: std::sync::Arc<PostgresDatabase>,
}

impl CategoryStorePostgres {
    pub fn new(db: std::sync::Arc<PostgresDatabase>) -> Self {
        Self { db }
    }

    async fn list_impl_conn(conn: &mut PgConnection) -> Result<Vec<CategoryRow>, StoreError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, slug, description, created_at
            FROM categories
            ORDER BY name ASC",
        )
        .fetch_all(&mut *conn)
        .await?;

        Ok(rows)
    }

    async fn insert_impl_conn(
        conn: &mut PgConnection,
        row: CategoryRow,
    ) -> Result<CategoryRow, StoreError> {
        let stored = sqlx::query_as::<_, CategoryRow>(
            "INSERT INTO categories (id, name, slug, description, created_at)
            VALUES ($1,$2,$3,$4,$5)
            RETURNING id, name, slug, description, created_at",
        )
        .bind(row.id)
        .bind(&row.name)
        .bind(&row.slug)
        .bind(&row.description)
        .bind(row.created_at)
        .fetch_one(&mut *conn)
        .await?;

        Ok(stored)
    }
}

#[async_trait]
impl CategoryStore for CategoryStorePostgres {
    async fn list(&self) -> Result<Vec<CategoryRow>, StoreError> {
        self.db
            .with_conn(|conn| Box::pin(Self::list_impl_conn(conn)))
            .await
    }

    async fn insert(&self, row: &CategoryRow) -> Result<CategoryRow, StoreError> {
        let row = row.clone();
        self.db
            .with_conn(move |conn| Box::pin(Self::insert_impl_conn(conn, row)))
            .await
    }
}

#[derive(Clone)]
pub struct TagStorePostgres {
    db: std::sync::Arc<PostgresDatabase>,
}

impl TagStorePostgres {
    pub fn new(db: std::sync::Arc<PostgresDatabase>) -> Self {
        Self { db }
    }

    async fn list_impl_conn(conn: &mut PgConnection) -> Result<Vec<TagRow>, StoreError> {
        let rows = sqlx::query_as::<_, TagRow>(
            "SELECT id, name, slug, created_at
            FROM tags
            ORDER BY name ASC",
        )
        .fetch_all(&mut *conn)
        .await?;

        Ok(rows)
    }

    async fn insert_impl_conn(conn: &mut PgConnection, row: TagRow) -> Result<TagRow, StoreError> {
        let stored = sqlx::query_as::<_, TagRow>(
            "INSERT INTO tags (id, name, slug, created_at)
            VALUES ($1,$2,$3,$4)
            RETURNING id, name, slug, created_at",
        )
        .bind(row.id)
        .bind(&row.name)
        .bind(&row.slug)
        .bind(row.created_at)
        .fetch_one(&mut *conn)
        .await?;

        Ok(stored)
    }
}

#[async_trait]
impl TagStore for TagStorePostgres {
    async fn list(&self) -> Result<Vec<TagRow>, StoreError> {
        self.db
            .with_conn(|conn| Box::pin(Self::list_impl_conn(conn)))
            .await
    }

    async fn insert(&self, row: &TagRow) -> Result<TagRow, StoreError> {
        let row = row.clone();
        self.db
            .with_conn(move |conn| Box::pin(Self::insert_impl_conn(conn, row)))
            .await
    }
}
