use crate::domain::value_objects::timestamps::format_rfc3339;
use crate::infrastructure::db::dto::PostRow;
use serde::Serialize;

/// Public shape of a post, used for API responses and webhook payloads.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PostView {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub status: String,
    pub category_slug: Option<String>,
    pub tag_slugs: Vec<String>,
    pub author_id: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub read_time: i32,
    pub views: i64,
    pub published_at: Option<String>,
    pub scheduled_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&PostRow> for PostView {
    fn from(row: &PostRow) -> Self {
        Self {
            id: row.id.to_string(),
            title: row.title.clone(),
            slug: row.slug.clone(),
            content: row.content.clone(),
            excerpt: row.excerpt.clone(),
            featured_image: row.featured_image.clone(),
            status: row.status.clone(),
            category_slug: row.category_slug.clone(),
            tag_slugs: row.tag_slugs.clone(),
            author_id: row.author_id.map(|id| id.to_string()),
            meta_title: row.meta_title.clone(),
            meta_description: row.meta_description.clone(),
            read_time: row.read_time,
            views: row.views,
            published_at: row.published_at.map(format_rfc3339),
            scheduled_at: row.scheduled_at.map(format_rfc3339),
            created_at: format_rfc3339(row.created_at),
            updated_at: format_rfc3339(row.updated_at),
        }
    }
}

impl PostView {
    /// Webhook `data` for this post.
    pub fn to_payload(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
