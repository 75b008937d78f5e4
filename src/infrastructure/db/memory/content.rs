use super::lock;
use crate::infrastructure::db::dto::{CategoryRow, MediaRow, PostFilter, PostRow, TagRow};
use crate::infrastructure::db::stores::StoreError;
use crate::infrastructure::db::stores::media_store::MediaStore;
use crate::infrastructure::db::stores::post_store::PostStore;
use crate::infrastructure::db::stores::taxonomy_store::{CategoryStore, TagStore};
use async_trait::async_trait;
use std::sync::Mutex;
use time::OffsetDateTime;

#[derive(Default)]
pub struct PostStoreMemory {
    rows: Mutex<Vec<PostRow>>,
}

fn newest_first(rows: &mut [PostRow]) {
    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[async_trait]
impl PostStore for PostStoreMemory {
    async fn get_by_slug(&self, slug: &str) -> Result<Option<PostRow>, StoreError> {
        let rows = lock(&self.rows)?;
        Ok(rows.iter().find(|row| row.slug == slug).cloned())
    }

    async fn list(&self, filter: &PostFilter) -> Result<(Vec<PostRow>, i64), StoreError> {
        let rows = lock(&self.rows)?;
        let mut matching: Vec<PostRow> =
            rows.iter().filter(|row| filter.matches(row)).cloned().collect();
        newest_first(&mut matching);
        let total = matching.len() as i64;
        let page = matching
            .into_iter()
            .skip(filter.offset.max(0) as usize)
            .take(filter.limit.max(0) as usize)
            .collect();
        Ok((page, total))
    }

    async fn insert(&self, row: &PostRow) -> Result<PostRow, StoreError> {
        let mut rows = lock(&self.rows)?;
        if rows.iter().any(|existing| existing.slug == row.slug) {
            return Err(StoreError::Conflict);
        }
        rows.push(row.clone());
        Ok(row.clone())
    }

    async fn update(
        &self,
        row: &PostRow,
        read_at: OffsetDateTime,
    ) -> Result<PostRow, StoreError> {
        let mut rows = lock(&self.rows)?;
        if rows
            .iter()
            .any(|existing| existing.slug == row.slug && existing.id != row.id)
        {
            return Err(StoreError::Conflict);
        }
        let existing = rows
            .iter_mut()
            .find(|existing| existing.id == row.id)
            .ok_or(StoreError::NotFound)?;
        if existing.updated_at != read_at {
            return Err(StoreError::Stale);
        }
        let views = existing.views;
        let created_at = existing.created_at;
        *existing = PostRow {
            views,
            created_at,
            ..row.clone()
        };
        Ok(existing.clone())
    }

    async fn delete_by_slug(&self, slug: &str) -> Result<PostRow, StoreError> {
        let mut rows = lock(&self.rows)?;
        let index = rows
            .iter()
            .position(|row| row.slug == slug)
            .ok_or(StoreError::NotFound)?;
        Ok(rows.remove(index))
    }

    async fn increment_views(&self, post_id: uuid::Uuid) -> Result<i64, StoreError> {
        let mut rows = lock(&self.rows)?;
        let row = rows
            .iter_mut()
            .find(|row| row.id == post_id)
            .ok_or(StoreError::NotFound)?;
        row.views += 1;
        Ok(row.views)
    }

    async fn list_due_scheduled(
        &self,
        now: OffsetDateTime,
        limit: u32,
    ) -> Result<Vec<PostRow>, StoreError> {
        let rows = lock(&self.rows)?;
        let mut due: Vec<PostRow> = rows
            .iter()
            .filter(|row| row.status == "scheduled")
            .filter(|row| row.scheduled_at.is_some_and(|at| at <= now))
            .cloned()
            .collect();
        due.sort_by_key(|row| row.scheduled_at);
        due.truncate(limit as usize);
        Ok(due)
    }

    async fn publish_if_due(
        &self,
        post_id: uuid::Uuid,
        now: OffsetDateTime,
    ) -> Result<Option<PostRow>, StoreError> {
        let mut rows = lock(&self.rows)?;
        let Some(row) = rows.iter_mut().find(|row| row.id == post_id) else {
            return Ok(None);
        };
        if row.status != "scheduled" || !row.scheduled_at.is_some_and(|at| at <= now) {
            return Ok(None);
        }
        row.status = "published".to_string();
        row.published_at = Some(now);
        row.updated_at = now;
        Ok(Some(row.clone()))
    }
}

#[derive(Default)]
pub struct CategoryStoreMemory {
    rows: Mutex<Vec<CategoryRow>>,
}

#[async_trait]
impl CategoryStore for CategoryStoreMemory {
    async fn list(&self) -> Result<Vec<CategoryRow>, StoreError> {
        let mut rows = lock(&self.rows)?.clone();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn insert(&self, row: &CategoryRow) -> Result<CategoryRow, StoreError> {
        let mut rows = lock(&self.rows)?;
        if rows.iter().any(|existing| existing.slug == row.slug) {
            return Err(StoreError::Conflict);
        }
        rows.push(row.clone());
        Ok(row.clone())
    }
}

#[derive(Default)]
pub struct TagStoreMemory {
    rows: Mutex<Vec<TagRow>>,
}

#[async_trait]
impl TagStore for TagStoreMemory {
    async fn list(&self) -> Result<Vec<TagRow>, StoreError> {
        let mut rows = lock(&self.rows)?.clone();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn insert(&self, row: &TagRow) -> Result<TagRow, StoreError> {
        let mut rows = lock(&self.rows)?;
        if rows.iter().any(|existing| existing.slug == row.slug) {
            return Err(StoreError::Conflict);
        }
        rows.push(row.clone());
        Ok(row.clone())
    }
}

#[derive(Default)]
pub struct MediaStoreMemory {
    rows: Mutex<Vec<MediaRow>>,
}

#[async_trait]
impl MediaStore for MediaStoreMemory {
    async fn list(
        &self,
        media_type: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<MediaRow>, StoreError> {
        let rows = lock(&self.rows)?;
        let mut matching: Vec<MediaRow> = rows
            .iter()
            .filter(|row| media_type.map_or(true, |kind| row.media_type == kind))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn insert(&self, row: &MediaRow) -> Result<MediaRow, StoreError> {
        lock(&self.rows)?.push(row.clone());
        Ok(row.clone())
    }
}
