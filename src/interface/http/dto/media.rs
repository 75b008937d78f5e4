use crate::domain::value_objects::timestamps::format_rfc3339;
use crate::infrastructure::db::dto::MediaRow;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateMediaRequest {
    #[serde(default)]
    pub filename: String,
    pub original_name: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "type", default)]
    pub media_type: String,
    #[serde(default)]
    pub size: i64,
    pub alt_text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListMediaParams {
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct MediaResponse {
    pub id: String,
    pub filename: String,
    pub original_name: Option<String>,
    pub url: String,
    #[serde(rename = "type")]
    pub media_type: String,
    pub size: i64,
    pub alt_text: Option<String>,
    pub uploaded_by: Option<String>,
    pub created_at: String,
}

impl From<MediaRow> for MediaResponse {
    fn from(row: MediaRow) -> Self {
        Self {
            id: row.id.to_string(),
            filename: row.filename,
            original_name: row.original_name,
            url: row.url,
            media_type: row.media_type,
            size: row.size_bytes,
            alt_text: row.alt_text,
            uploaded_by: row.uploaded_by.map(|id| id.to_string()),
            created_at: format_rfc3339(row.created_at),
        }
    }
}
