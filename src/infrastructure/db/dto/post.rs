use crate::domain::entities::post::PostStatus;
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct PostRow {
    pub id: uuid::Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub status: String,
    pub category_slug: Option<String>,
    pub tag_slugs: Vec<String>,
    pub author_id: Option<uuid::Uuid>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub read_time: i32,
    pub views: i64,
    pub published_at: Option<OffsetDateTime>,
    pub scheduled_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl PostRow {
    /// Stored status; rows written by this service always hold a known value.
    pub fn status(&self) -> PostStatus {
        PostStatus::parse(&self.status).unwrap_or(PostStatus::Draft)
    }
}

/// Query parameters accepted by the post listing.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub status: Option<String>,
    pub category: Option<String>,
    pub tag: Option<String>,
    pub search: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

impl PostFilter {
    /// In-process equivalent of the SQL `WHERE` clause.
    pub fn matches(&self, row: &PostRow) -> bool {
        if let Some(status) = &self.status {
            if &row.status != status {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if row.category_slug.as_deref() != Some(category.as_str()) {
                return false;
            }
        }
        if let Some(tag) = &self.tag {
            if !row.tag_slugs.iter().any(|t| t == tag) {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            if !row.title.to_lowercase().contains(&needle)
                && !row.content.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }
}
