use crate::infrastructure::db::dto::{PostFilter, PostRow};
use crate::infrastructure::db::postgres::PostgresDatabase;
use crate::infrastructure::db::stores::StoreError;
use crate::infrastructure::db::stores::post_store::PostStore;
use async_trait::async_trait;
use sqlx::PgConnection;
use time::OffsetDateTime;

const POST_COLUMNS: &str = "
    id,
    title,
    slug,
    content,
    excerpt,
    featured_image,
    status,
    category_slug,
    tag_slugs,
    author_id,
    meta_title,
    meta_description,
    read_time,
    views,
    published_at,
    scheduled_at,
    created_at,
    updated_at";

const POST_FILTER: &str = "
    ($1::text IS NULL OR status = $1)
    AND ($2::text IS NULL OR category_slug = $2)
    AND ($3::text IS NULL OR $3 = ANY(tag_slugs))
    AND ($4::text IS NULL OR title ILIKE '%' || $4 || '%' OR content ILIKE '%' || $4 || '%')";

#[derive(Clone)]
pub struct PostStorePostgres {
    db: std::sync::Arc<PostgresDatabase>,
}

impl PostStorePostgres {
    /// Build a Postgres-backed post store.
    pub fn new(db: std::sync::Arc<PostgresDatabase>) -> Self {
        Self { db }
    }

    async fn get_by_slug_impl_conn(
        conn: &mut PgConnection,
        slug: String,
    ) -> Result<Option<PostRow>, StoreError> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE slug = $1");
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(slug)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(row)
    }

    async fn list_impl_conn(
        conn: &mut PgConnection,
        filter: PostFilter,
    ) -> Result<(Vec<PostRow>, i64), StoreError> {
        let sql = format!(
            "SELECT {POST_COLUMNS} FROM posts
            WHERE {POST_FILTER}
            ORDER BY created_at DESC
            LIMIT $5 OFFSET $6"
        );
        let rows = sqlx::query_as::<_, PostRow>(&sql)
            .bind(&filter.status)
            .bind(&filter.category)
            .bind(&filter.tag)
            .bind(&filter.search)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(&mut *conn)
            .await?;

        let count_sql = format!("SELECT COUNT(*) FROM posts WHERE {POST_FILTER}");
        let total = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(&filter.status)
            .bind(&filter.category)
            .bind(&filter.tag)
            .bind(&filter.search)
            .fetch_one(&mut *conn)
            .await?;

        Ok((rows, total))
    }

    async fn insert_impl_conn(conn: &mut PgConnection, row: PostRow) -> Result<PostRow, StoreError> {
        let sql = format!(
            "INSERT INTO posts ({POST_COLUMNS})
            VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13,$14,$15,$16,$17,$18)
            RETURNING {POST_COLUMNS}"
        );
        let stored = sqlx::query_as::<_, PostRow>(&sql)
            .bind(row.id)
            .bind(&row.title)
            .bind(&row.slug)
            .bind(&row.content)
            .bind(&row.excerpt)
            .bind(&row.featured_image)
            .bind(&row.status)
            .bind(&row.category_slug)
            .bind(&row.tag_slugs)
            .bind(row.author_id)
            .bind(&row.meta_title)
            .bind(&row.meta_description)
            .bind(row.read_time)
            .bind(row.views)
            .bind(row.published_at)
            .bind(row.scheduled_at)
            .bind(row.created_at)
            .bind(row.updated_at)
            .fetch_one(&mut *conn)
            .await?;

        Ok(stored)
    }

    async fn update_impl_conn(
        conn: &mut PgConnection,
        row: PostRow,
        read_at: OffsetDateTime,
    ) -> Result<PostRow, StoreError> {
        let sql = format!(
            "UPDATE posts SET
                title = $2,
                slug = $3,
                content = $4,
                excerpt = $5,
                featured_image = $6,
                status = $7,
                category_slug = $8,
                tag_slugs = $9,
                author_id = $10,
                meta_title = $11,
                meta_description = $12,
                read_time = $13,
                published_at = $14,
                scheduled_at = $15,
                updated_at = $16
            WHERE id = $1 AND updated_at = $17
            RETURNING {POST_COLUMNS}"
        );
        let stored = sqlx::query_as::<_, PostRow>(&sql)
            .bind(row.id)
            .bind(&row.title)
            .bind(&row.slug)
            .bind(&row.content)
            .bind(&row.excerpt)
            .bind(&row.featured_image)
            .bind(&row.status)
            .bind(&row.category_slug)
            .bind(&row.tag_slugs)
            .bind(row.author_id)
            .bind(&row.meta_title)
            .bind(&row.meta_description)
            .bind(row.read_time)
            .bind(row.published_at)
            .bind(row.scheduled_at)
            .bind(row.updated_at)
            .bind(read_at)
            .fetch_optional(&mut *conn)
            .await?;
        if let Some(stored) = stored {
            return Ok(stored);
        }

        // Zero rows: either gone or changed since it was read.
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM posts WHERE id = $1)")
                .bind(row.id)
                .fetch_one(&mut *conn)
                .await?;
        Err(if exists {
            StoreError::Stale
        } else {
            StoreError::NotFound
        })
    }

    async fn delete_by_slug_impl_conn(
        conn: &mut PgConnection,
        slug: String,
    ) -> Result<PostRow, StoreError> {
        let sql = format!("DELETE FROM posts WHERE slug = $1 RETURNING {POST_COLUMNS}");
        let removed = sqlx::query_as::<_, PostRow>(&sql)
            .bind(slug)
            .fetch_optional(&mut *conn)
            .await?;

        removed.ok_or(StoreError::NotFound)
    }

    async fn increment_views_impl_conn(
        conn: &mut PgConnection,
        post_id: uuid::Uuid,
    ) -> Result<i64, StoreError> {
        let views = sqlx::query_scalar::<_, i64>(
            "UPDATE posts SET views = views + 1 WHERE id = $1 RETURNING views",
        )
        .bind(post_id)
        .fetch_optional(&mut *conn)
        .await?;

        views.ok_or(StoreError::NotFound)
    }

    async fn list_due_scheduled_impl_conn(
        conn: &mut PgConnection,
        now: OffsetDateTime,
        limit: u32,
    ) -> Result<Vec<PostRow>, StoreError> {
        let sql = format!(
            "SELECT {POST_COLUMNS} FROM posts
            WHERE status = 'scheduled'
              AND scheduled_at IS NOT NULL
              AND scheduled_at <= $1
            ORDER BY scheduled_at ASC
            LIMIT $2"
        );
        let rows = sqlx::query_as::<_, PostRow>(&sql)
            .bind(now)
            .bind(i64::from(limit))
            .fetch_all(&mut *conn)
            .await?;

        Ok(rows)
    }

    async fn publish_if_due_impl_conn(
        conn: &mut PgConnection,
        post_id: uuid::Uuid,
        now: OffsetDateTime,
    ) -> Result<Option<PostRow>, StoreError> {
        let sql = format!(
            "UPDATE posts SET
                status = 'published',
                published_at = $2,
                updated_at = $2
            WHERE id = $1
              AND status = 'scheduled'
              AND scheduled_at <= $2
            RETURNING {POST_COLUMNS}"
        );
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(post_id)
            .bind(now)
            .fetch_optional(&mut *conn)
            .await?;

        Ok(row)
    }
}

#[async_trait]
impl PostStore for PostStorePostgres {
    async fn get_by_slug(&self, slug: &str) -> Result<Option<PostRow>, StoreError> {
        let slug = slug.to_string();
        self.db
            .with_conn(move |conn| Box::pin(Self::get_by_slug_impl_conn(conn, slug)))
            .await
    }

    async fn list(&self, filter: &PostFilter) -> Result<(Vec<PostRow>, i64), StoreError> {
        let filter = filter.clone();
        self.db
            .with_conn(move |conn| Box::pin(Self::list_impl_conn(conn, filter)))
            .await
    }

    async fn insert(&self, row: &PostRow) -> Result<PostRow, StoreError> {
        let row = row.clone();
        self.db
            .with_conn(move |conn| Box::pin(Self::insert_impl_conn(conn, row)))
            .await
    }

    async fn update(
        &self,
        row: &PostRow,
        read_at: OffsetDateTime,
    ) -> Result<PostRow, StoreError> {
        let row = row.clone();
        self.db
            .with_conn(move |conn| Box::pin(Self::update_impl_conn(conn, row, read_at)))
            .await
    }

    async fn delete_by_slug(&self, slug: &str) -> Result<PostRow, StoreError> {
        let slug = slug.to_string();
        self.db
            .with_conn(move |conn| Box::pin(Self::delete_by_slug_impl_conn(conn, slug)))
            .await
    }

    async fn increment_views(&self, post_id: uuid::Uuid) -> Result<i64, StoreError> {
        self.db
            .with_conn(move |conn| Box::pin(Self::increment_views_impl_conn(conn, post_id)))
            .await
    }

    async fn list_due_scheduled(
        &self,
        now: OffsetDateTime,
        limit: u32,
    ) -> Result<Vec<PostRow>, StoreError> {
        self.db
            .with_conn(move |conn| Box::pin(Self::list_due_scheduled_impl_conn(conn, now, limit)))
            .await
    }

    async fn publish_if_due(
        &self,
        post_id: uuid::Uuid,
        now: OffsetDateTime,
    ) -> Result<Option<PostRow>, StoreError> {
        self.db
            .with_conn(move |conn| Box::pin(Self::publish_if_due_impl_conn(conn, post_id, now)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::PostStorePostgres;
    use crate::infrastructure::db::dto::{PostFilter, PostRow};
    use crate::infrastructure::db::postgres::PostgresDatabase;
    use crate::infrastructure::db::stores::StoreError;
    use crate::infrastructure::db::stores::post_store::PostStore;
    use std::sync::Arc;
    use time::OffsetDateTime;

    fn test_db_url() -> Option<String> {
        std::env::var("DATABASE_URL").ok()
    }

    async fn store(url: &str) -> PostStorePostgres {
        let db = PostgresDatabase::connect(url, 2).await.unwrap();
        db.migrate().await.unwrap();
        PostStorePostgres::new(Arc::new(db))
    }

    fn row(slug: &str) -> PostRow {
        let now = OffsetDateTime::now_utc();
        PostRow {
            id: uuid::Uuid::new_v4(),
            title: "Pg post".to_string(),
            slug: slug.to_string(),
            content: "hello postgres".to_string(),
            excerpt: Some("hello postgres...".to_string()),
            featured_image: None,
            status: "draft".to_string(),
            category_slug: Some("rust".to_string()),
            tag_slugs: vec!["db".to_string()],
            author_id: None,
            meta_title: None,
            meta_description: None,
            read_time: 1,
            views: 0,
            published_at: None,
            scheduled_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn given_inserted_post_when_fetched_by_slug_should_return_it() {
        let Some(url) = test_db_url() else {
            return;
        };
        let store = store(&url).await;
        let slug = format!("pg-post-{}", uuid::Uuid::new_v4().simple());
        let inserted = store.insert(&row(&slug)).await.unwrap();

        let fetched = store.get_by_slug(&slug).await.unwrap().unwrap();
        assert_eq!(fetched.id, inserted.id);
        assert_eq!(fetched.tag_slugs, vec!["db".to_string()]);

        store.delete_by_slug(&slug).await.unwrap();
    }

    #[tokio::test]
    async fn given_duplicate_slug_when_insert_should_return_conflict() {
        let Some(url) = test_db_url() else {
            return;
        };
        let store = store(&url).await;
        let slug = format!("pg-dup-{}", uuid::Uuid::new_v4().simple());
        store.insert(&row(&slug)).await.unwrap();

        let err = store.insert(&row(&slug)).await.unwrap_err();
        assert_eq!(err, StoreError::Conflict);

        store.delete_by_slug(&slug).await.unwrap();
    }

    #[tokio::test]
    async fn given_views_when_incremented_should_return_new_count() {
        let Some(url) = test_db_url() else {
            return;
        };
        let store = store(&url).await;
        let slug = format!("pg-views-{}", uuid::Uuid::new_v4().simple());
        let inserted = store.insert(&row(&slug)).await.unwrap();

        assert_eq!(store.increment_views(inserted.id).await.unwrap(), 1);
        assert_eq!(store.increment_views(inserted.id).await.unwrap(), 2);

        store.delete_by_slug(&slug).await.unwrap();
    }

    #[tokio::test]
    async fn given_stale_read_when_update_should_return_stale() {
        let Some(url) = test_db_url() else {
            return;
        };
        let store = store(&url).await;
        let slug = format!("pg-stale-{}", uuid::Uuid::new_v4().simple());
        let original = store.insert(&row(&slug)).await.unwrap();

        let mut first = original.clone();
        first.title = "first writer".to_string();
        first.updated_at = original.updated_at + time::Duration::seconds(1);
        store.update(&first, original.updated_at).await.unwrap();

        let err = store.update(&original, original.updated_at).await.unwrap_err();
        assert_eq!(err, StoreError::Stale);

        store.delete_by_slug(&slug).await.unwrap();
    }

    #[tokio::test]
    async fn given_draft_with_past_schedule_when_publish_if_due_should_skip_it() {
        let Some(url) = test_db_url() else {
            return;
        };
        let store = store(&url).await;
        let now = OffsetDateTime::now_utc();
        let slug = format!("pg-pulled-{}", uuid::Uuid::new_v4().simple());
        let mut post = row(&slug);
        post.scheduled_at = Some(now - time::Duration::minutes(1));
        let inserted = store.insert(&post).await.unwrap();

        assert!(store.publish_if_due(inserted.id, now).await.unwrap().is_none());
        let stored = store.get_by_slug(&slug).await.unwrap().unwrap();
        assert_eq!(stored.status, "draft");

        store.delete_by_slug(&slug).await.unwrap();
    }

    #[tokio::test]
    async fn given_search_filter_when_list_should_count_matches() {
        let Some(url) = test_db_url() else {
            return;
        };
        let store = store(&url).await;
        let marker = uuid::Uuid::new_v4().simple().to_string();
        let slug = format!("pg-search-{marker}");
        let mut post = row(&slug);
        post.content = format!("needle {marker}");
        store.insert(&post).await.unwrap();

        let filter = PostFilter {
            search: Some(marker.clone()),
            limit: 10,
            ..PostFilter::default()
        };
        let (rows, total) = store.list(&filter).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(rows[0].slug, slug);

        store.delete_by_slug(&slug).await.unwrap();
    }
}
